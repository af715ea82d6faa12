//! Feature derivation
//!
//! Pure linear combinations; no rounding, no clamping. The weights are the
//! ones the classifier was trained with, including the heavy population term.

use super::input::RegionInput;

const DISASTER_WEIGHT: f64 = 0.5;
const DENSITY_WEIGHT: f64 = 0.3;
const URBANIZATION_WEIGHT: f64 = 0.2;
const DEATH_MULTIPLIER: u32 = 10;

/// Engineered features computed from a [`RegionInput`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DerivedFeatures {
    pub risk_index: f64,
    pub damage_scale: u32,
}

/// Compute the derived features for one submission
pub fn derive(input: &RegionInput) -> DerivedFeatures {
    let risk_index = input.disaster_score * DISASTER_WEIGHT
        + input.population_density * DENSITY_WEIGHT
        + input.urbanization_level * URBANIZATION_WEIGHT;

    // Ranges cap this at 10_000 + 1_000 * 10, far below u32::MAX
    let damage_scale = input.houses_affected + input.human_deaths * DEATH_MULTIPLIER;

    DerivedFeatures {
        risk_index,
        damage_scale,
    }
}
