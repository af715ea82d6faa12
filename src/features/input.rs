//! Region input captured from the form

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

/// One submission's worth of region attributes.
///
/// Ranges are checked at the HTTP surface via [`Validate`]; everything
/// downstream trusts them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct RegionInput {
    #[validate(range(min = 0.0, max = 10.0), custom(function = "finite"))]
    pub disaster_score: f64,

    #[validate(range(min = 0.0, max = 20000.0), custom(function = "finite"))]
    pub population_density: f64,

    #[validate(range(min = 0.0, max = 1.0), custom(function = "finite"))]
    pub urbanization_level: f64,

    #[validate(range(max = 10000))]
    pub houses_affected: u32,

    #[validate(range(max = 1000))]
    pub human_deaths: u32,

    #[validate(range(min = 5.0, max = 40.0), custom(function = "finite"))]
    pub latitude: f64,

    #[validate(range(min = 65.0, max = 100.0), custom(function = "finite"))]
    pub longitude: f64,
}

impl Default for RegionInput {
    /// Values the form is pre-filled with
    fn default() -> Self {
        Self {
            disaster_score: 5.0,
            population_density: 5000.0,
            urbanization_level: 0.5,
            houses_affected: 100,
            human_deaths: 10,
            latitude: 22.5,
            longitude: 78.9,
        }
    }
}

/// NaN slips through range checks, every comparison with it is false
fn finite(value: f64) -> Result<(), ValidationError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ValidationError::new("finite"))
    }
}

/// Flatten validator output into one human readable line
pub fn describe_errors(errors: &validator::ValidationErrors) -> String {
    let mut fields: Vec<String> = errors
        .field_errors()
        .iter()
        .map(|(field, _)| field.to_string())
        .collect();
    fields.sort();
    format!("Out of range: {}", fields.join(", "))
}
