//! Features Module - Input capture and feature engineering
//!
//! RegionInput → DerivedFeatures → FeatureVector (classifier row)

pub mod layout;
pub mod input;
pub mod derive;
pub mod vector;

// Re-export common types
pub use layout::{FEATURE_COUNT, FEATURE_LAYOUT};
pub use input::RegionInput;
pub use derive::{derive, DerivedFeatures};
pub use vector::FeatureVector;
