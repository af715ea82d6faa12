//! Feature Vector - Core data structure for ML input
//!
//! Fixed-size row in the order defined by `layout.rs`.

use super::derive::DerivedFeatures;
use super::input::RegionInput;
use super::layout::{FEATURE_COUNT, FEATURE_LAYOUT};

/// One classifier input row
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FeatureVector {
    /// Feature values in order defined by FEATURE_LAYOUT
    pub values: [f64; FEATURE_COUNT],
}

impl FeatureVector {
    /// Assemble the row from the raw input and its derived features
    pub fn assemble(input: &RegionInput, derived: &DerivedFeatures) -> Self {
        Self {
            values: [
                input.disaster_score,
                input.population_density,
                input.urbanization_level,
                f64::from(input.houses_affected),
                f64::from(input.human_deaths),
                derived.risk_index,
                f64::from(derived.damage_scale),
            ],
        }
    }

    /// Get values as slice
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Get feature by index
    pub fn get(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied()
    }

    /// Single precision copy for runtimes that take f32 tensors
    pub fn to_f32(&self) -> [f32; FEATURE_COUNT] {
        self.values.map(|v| v as f32)
    }

    /// Convert to JSON-serializable format for logging
    pub fn to_log_entry(&self) -> serde_json::Value {
        let named: serde_json::Map<String, serde_json::Value> = FEATURE_LAYOUT
            .iter()
            .zip(self.values.iter())
            .map(|(name, value)| (name.to_string(), serde_json::json!(value)))
            .collect();
        serde_json::Value::Object(named)
    }
}
