//! Model Module - Classifier loading and inference
//!
//! The artifact is opaque: anything that can predict a label for one
//! 7-column row implements [`Classifier`]. Backend is picked by extension.

pub mod classifier;
pub mod onnx;
pub mod tree;

use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

// Re-export common types
pub use classifier::{Classifier, PredictionError, RiskLabel};
pub use onnx::OnnxClassifier;
pub use tree::TreeEnsemble;

/// Startup failures. All of them halt the session.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("Model file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Unsupported model format: {}", .0.display())]
    UnsupportedFormat(PathBuf),

    #[error("{0}")]
    Load(String),
}

/// Load the classifier artifact once; the handle is shared for the process lifetime
pub fn load(model_path: &Path, classes: &[String]) -> Result<Arc<dyn Classifier>, ModelError> {
    if !model_path.exists() {
        return Err(ModelError::NotFound(model_path.to_path_buf()));
    }

    let extension = model_path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);

    let classifier: Arc<dyn Classifier> = match extension.as_deref() {
        Some("onnx") => Arc::new(OnnxClassifier::load(model_path, classes.to_vec())?),
        Some("json") => Arc::new(TreeEnsemble::from_file(model_path)?),
        _ => return Err(ModelError::UnsupportedFormat(model_path.to_path_buf())),
    };

    tracing::info!("Classifier ready (backend: {})", classifier.backend());
    Ok(classifier)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{derive, FeatureVector, RegionInput};

    fn classes() -> Vec<String> {
        vec!["High".into(), "Low".into(), "Medium".into()]
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disaster_model.onnx");
        match load(&path, &classes()) {
            Err(ModelError::NotFound(p)) => assert_eq!(p, path),
            other => panic!("expected NotFound, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disaster_model.pkl");
        std::fs::write(&path, b"\x80\x04").unwrap();
        assert!(matches!(load(&path, &classes()), Err(ModelError::UnsupportedFormat(_))));
    }

    #[test]
    fn test_load_json_ensemble() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("disaster_model.json");
        std::fs::write(
            &path,
            r#"{"classes": ["High", "Low"], "trees": [{"nodes": [{"value": [2.0, 1.0]}]}]}"#,
        )
        .unwrap();

        let classifier = load(&path, &classes()).unwrap();
        assert_eq!(classifier.backend(), "tree-ensemble");

        let input = RegionInput::default();
        let row = FeatureVector::assemble(&input, &derive(&input));
        assert_eq!(classifier.predict(&row).unwrap().as_str(), "High");
    }

    #[test]
    fn test_not_found_message_names_path() {
        let err = ModelError::NotFound(PathBuf::from("disaster_model.onnx"));
        assert_eq!(err.to_string(), "Model file not found: disaster_model.onnx");
    }
}
