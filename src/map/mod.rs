//! Map Module - Risk map construction, rendering and persistence

pub mod regions;
pub mod render;
pub mod html;
pub mod store;

// Re-export common types
pub use regions::{HighRiskRegion, HIGH_RISK_REGIONS};
pub use render::{build_map, IconColor, MapArtifact, MapRenderer, RiskMap};
pub use store::{MapStore, MapStoreError};
