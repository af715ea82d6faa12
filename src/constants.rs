//! Central Configuration Constants
//!
//! Single source of truth for all configuration defaults.

/// Default HTTP port
pub const DEFAULT_PORT: u16 = 8501;

/// Default location of the pre-trained classifier artifact
pub const DEFAULT_MODEL_PATH: &str = "disaster_model.onnx";

/// Default location of the persisted map document (single slot, overwritten)
pub const DEFAULT_MAP_PATH: &str = "disaster_risk_map.html";

/// Class order of the default artifact.
///
/// scikit-learn sorts string classes, so index 0 is "High", 1 "Low", 2 "Medium".
pub const DEFAULT_MODEL_CLASSES: &[&str] = &["High", "Low", "Medium"];

/// App version
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

/// App name
pub const APP_NAME: &str = "Disaster Risk Classifier";

// ============================================
// Map defaults
// ============================================

/// Initial zoom of every rendered map
pub const MAP_ZOOM: u8 = 6;

/// Popup width of the user marker (pixels)
pub const MARKER_POPUP_MAX_WIDTH: u32 = 250;

/// Glyph shown inside the user marker
pub const MARKER_ICON: &str = "info-sign";

/// Radius of every high-risk overlay (meters)
pub const OVERLAY_RADIUS_M: f64 = 50_000.0;

/// Fill opacity of every high-risk overlay
pub const OVERLAY_FILL_OPACITY: f64 = 0.3;

/// Height of the embedded full-map view (pixels)
pub const FULL_MAP_HEIGHT: u32 = 600;
