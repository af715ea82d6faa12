//! ONNX Runtime classifier
//!
//! Runs an exported classifier on a `1 x 7` f32 row. Label decoding, in order:
//! 1. first output as a string tensor → label as emitted (open set)
//! 2. first output as int64 class indices → configured class names
//! 3. last output as f32 class scores → arg-max over configured classes

use std::path::Path;

use ndarray::Array2;
use ort::session::{builder::GraphOptimizationLevel, Session};
use ort::value::Value;
use parking_lot::Mutex;

use super::classifier::{argmax_class, Classifier, PredictionError, RiskLabel};
use super::ModelError;
use crate::features::{FeatureVector, FEATURE_COUNT};

/// Label output of one inference, as extracted from the runtime
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawLabels<'a> {
    Strings(&'a [String]),
    Indices(&'a [i64]),
    Scores(&'a [f32]),
}

/// Turn the extracted output of a single-row inference into a label
pub fn decode_label(raw: RawLabels<'_>, classes: &[String]) -> Result<RiskLabel, PredictionError> {
    match raw {
        RawLabels::Strings(labels) => labels
            .first()
            .map(|label| RiskLabel::new(label.clone()))
            .ok_or_else(|| PredictionError("Model returned no labels".to_string())),

        RawLabels::Indices(indices) => {
            let index = *indices
                .first()
                .ok_or_else(|| PredictionError("Model returned no labels".to_string()))?;
            usize::try_from(index)
                .ok()
                .and_then(|i| classes.get(i))
                .map(|name| RiskLabel::new(name.clone()))
                .ok_or_else(|| {
                    PredictionError(format!(
                        "Class index {} outside of {} configured classes",
                        index,
                        classes.len()
                    ))
                })
        }

        RawLabels::Scores(scores) => {
            // One row in, so exactly one score per class
            if scores.len() != classes.len() {
                return Err(PredictionError(format!(
                    "Model returned {} class scores but {} classes are configured",
                    scores.len(),
                    classes.len()
                )));
            }
            let row: Vec<f64> = scores.iter().map(|&s| f64::from(s)).collect();
            argmax_class(&row, classes)
        }
    }
}

pub struct OnnxClassifier {
    // `Session::run` needs exclusive access
    session: Mutex<Session>,
    output_names: Vec<String>,
    classes: Vec<String>,
}

impl OnnxClassifier {
    /// Load ONNX model from file
    pub fn load(model_path: &Path, classes: Vec<String>) -> Result<Self, ModelError> {
        tracing::info!("Loading ONNX model from: {}", model_path.display());

        let session = Session::builder()
            .map_err(|e| ModelError::Load(format!("Failed to create session builder: {}", e)))?
            .with_optimization_level(GraphOptimizationLevel::Level3)
            .map_err(|e| ModelError::Load(format!("Failed to set optimization: {}", e)))?
            .commit_from_file(model_path)
            .map_err(|e| ModelError::Load(format!("Failed to load model: {}", e)))?;

        let output_names: Vec<String> = session.outputs.iter().map(|o| o.name.clone()).collect();
        if output_names.is_empty() {
            return Err(ModelError::Load("No output defined".to_string()));
        }

        tracing::info!(
            "ONNX model loaded successfully (outputs: {:?}, classes: {:?})",
            output_names,
            classes
        );

        Ok(Self {
            session: Mutex::new(session),
            output_names,
            classes,
        })
    }
}

impl Classifier for OnnxClassifier {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, PredictionError> {
        let input_array = Array2::<f32>::from_shape_vec((1, FEATURE_COUNT), features.to_f32().to_vec())
            .map_err(|e| PredictionError(format!("Array error: {}", e)))?;

        let input_tensor = Value::from_array(input_array)
            .map_err(|e| PredictionError(format!("Tensor error: {}", e)))?;

        let mut session = self.session.lock();
        let outputs = session
            .run(ort::inputs![input_tensor])
            .map_err(|e| PredictionError(format!("Inference failed: {}", e)))?;

        let label_name = &self.output_names[0];
        let label_output = outputs
            .get(label_name.as_str())
            .ok_or_else(|| PredictionError(format!("No output '{}'", label_name)))?;

        if let Ok((_, labels)) = label_output.try_extract_strings() {
            return decode_label(RawLabels::Strings(&labels), &self.classes);
        }

        if let Ok((_, indices)) = label_output.try_extract_tensor::<i64>() {
            return decode_label(RawLabels::Indices(indices), &self.classes);
        }

        let score_name = &self.output_names[self.output_names.len() - 1];
        let score_output = outputs
            .get(score_name.as_str())
            .ok_or_else(|| PredictionError(format!("No output '{}'", score_name)))?;

        let (_, scores) = score_output
            .try_extract_tensor::<f32>()
            .map_err(|e| PredictionError(format!("Extract error: {}", e)))?;

        decode_label(RawLabels::Scores(scores), &self.classes)
    }

    fn backend(&self) -> &'static str {
        "onnx"
    }
}
