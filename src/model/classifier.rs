//! Classifier capability and its label type

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::features::FeatureVector;

/// Discrete output category of the classifier.
///
/// The set is open: whatever string the artifact emits is carried through.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RiskLabel(String);

impl RiskLabel {
    pub fn new(label: impl Into<String>) -> Self {
        Self(label.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RiskLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RiskLabel {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

/// Any failure raised while running inference on a well-formed row
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct PredictionError(pub String);

/// Trait for inference backends (ONNX, serialized trees, ...)
///
/// Loaded once at startup and shared read-only by every submission.
pub trait Classifier: Send + Sync {
    /// Predict the label of exactly one row
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, PredictionError>;

    /// Backend name for status reporting
    fn backend(&self) -> &'static str;
}

/// Pick the class with the highest score; ties go to the lower index
pub(crate) fn argmax_class(scores: &[f64], classes: &[String]) -> Result<RiskLabel, PredictionError> {
    if scores.len() != classes.len() {
        return Err(PredictionError(format!(
            "Expected {} class scores, got {}",
            classes.len(),
            scores.len()
        )));
    }

    let mut best: Option<(usize, f64)> = None;
    for (i, &score) in scores.iter().enumerate() {
        if score.is_nan() {
            return Err(PredictionError(format!("Class score {} is NaN", i)));
        }
        if best.map_or(true, |(_, b)| score > b) {
            best = Some((i, score));
        }
    }

    best.map(|(i, _)| RiskLabel::new(classes[i].clone()))
        .ok_or_else(|| PredictionError("Model returned no class scores".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classes() -> Vec<String> {
        vec!["High".into(), "Low".into(), "Medium".into()]
    }

    #[test]
    fn test_argmax_picks_highest() {
        let label = argmax_class(&[0.1, 0.2, 0.7], &classes()).unwrap();
        assert_eq!(label.as_str(), "Medium");
    }

    #[test]
    fn test_argmax_tie_prefers_first() {
        let label = argmax_class(&[0.5, 0.5, 0.0], &classes()).unwrap();
        assert_eq!(label.as_str(), "High");
    }

    #[test]
    fn test_argmax_width_mismatch() {
        let err = argmax_class(&[1.0, 0.0], &classes()).unwrap_err();
        assert!(err.0.contains("Expected 3 class scores"));
    }

    #[test]
    fn test_argmax_empty() {
        assert!(argmax_class(&[], &[]).is_err());
    }

    #[test]
    fn test_label_serializes_as_string() {
        let json = serde_json::to_string(&RiskLabel::from("High")).unwrap();
        assert_eq!(json, "\"High\"");
    }
}
