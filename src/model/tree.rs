//! Serialized decision-tree ensemble
//!
//! JSON artifact, e.g. exported from a scikit-learn forest:
//!
//! ```json
//! {
//!   "classes": ["High", "Low", "Medium"],
//!   "trees": [
//!     { "nodes": [
//!         { "feature": 5, "threshold": 1500.0, "left": 1, "right": 2 },
//!         { "value": [0.0, 1.0, 0.0] },
//!         { "value": [1.0, 0.0, 0.0] }
//!     ] }
//!   ]
//! }
//! ```
//!
//! Node 0 is the root. A row goes left when `x[feature] <= threshold`.
//! Leaf scores are summed over all trees; the arg-max class wins.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::classifier::{argmax_class, Classifier, PredictionError, RiskLabel};
use super::ModelError;
use crate::features::FeatureVector;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: Vec<f64>,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DecisionTree {
    pub nodes: Vec<TreeNode>,
}

impl DecisionTree {
    /// Walk from the root to a leaf and return its scores
    fn leaf_for(&self, features: &FeatureVector) -> Result<&[f64], PredictionError> {
        let mut index = 0usize;

        // A valid tree reaches a leaf in at most `nodes.len()` steps
        for _ in 0..=self.nodes.len() {
            let node = self
                .nodes
                .get(index)
                .ok_or_else(|| PredictionError(format!("Node index {} out of range", index)))?;

            match node {
                TreeNode::Leaf { value } => return Ok(value),
                TreeNode::Split { feature, threshold, left, right } => {
                    let x = features.get(*feature).ok_or_else(|| {
                        PredictionError(format!(
                            "Split on feature {} but row has {} columns",
                            feature,
                            features.as_slice().len()
                        ))
                    })?;
                    index = if x <= *threshold { *left } else { *right };
                }
            }
        }

        Err(PredictionError("Tree contains a cycle".to_string()))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeEnsemble {
    pub classes: Vec<String>,
    pub trees: Vec<DecisionTree>,
}

impl TreeEnsemble {
    /// Parse an ensemble from its JSON artifact
    pub fn from_file(path: &Path) -> Result<Self, ModelError> {
        tracing::info!("Loading tree ensemble from: {}", path.display());

        let raw = std::fs::read_to_string(path)
            .map_err(|e| ModelError::Load(format!("Failed to read model: {}", e)))?;
        let ensemble: Self = serde_json::from_str(&raw)
            .map_err(|e| ModelError::Load(format!("Failed to parse model: {}", e)))?;

        if ensemble.classes.is_empty() {
            return Err(ModelError::Load("Model declares no classes".to_string()));
        }
        if ensemble.trees.is_empty() {
            return Err(ModelError::Load("Model contains no trees".to_string()));
        }

        tracing::info!(
            "Tree ensemble loaded ({} trees, classes: {:?})",
            ensemble.trees.len(),
            ensemble.classes
        );
        Ok(ensemble)
    }
}

impl Classifier for TreeEnsemble {
    fn predict(&self, features: &FeatureVector) -> Result<RiskLabel, PredictionError> {
        let mut totals = vec![0.0f64; self.classes.len()];

        for (i, tree) in self.trees.iter().enumerate() {
            let leaf = tree.leaf_for(features)?;
            if leaf.len() != totals.len() {
                return Err(PredictionError(format!(
                    "Tree {} leaf has {} scores, expected {}",
                    i,
                    leaf.len(),
                    totals.len()
                )));
            }
            for (total, score) in totals.iter_mut().zip(leaf) {
                *total += score;
            }
        }

        argmax_class(&totals, &self.classes)
    }

    fn backend(&self) -> &'static str {
        "tree-ensemble"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::features::{derive, RegionInput};

    const STUMP: &str = r#"{
        "classes": ["High", "Low", "Medium"],
        "trees": [
            { "nodes": [
                { "feature": 6, "threshold": 150.0, "left": 1, "right": 2 },
                { "value": [0.0, 1.0, 0.0] },
                { "value": [1.0, 0.0, 0.0] }
            ] }
        ]
    }"#;

    fn row(houses_affected: u32) -> FeatureVector {
        let input = RegionInput { houses_affected, ..Default::default() };
        FeatureVector::assemble(&input, &derive(&input))
    }

    fn stump() -> TreeEnsemble {
        serde_json::from_str(STUMP).unwrap()
    }

    #[test]
    fn test_split_direction() {
        let model = stump();
        // damage_scale = houses + 100
        assert_eq!(model.predict(&row(0)).unwrap().as_str(), "Low");
        assert_eq!(model.predict(&row(50)).unwrap().as_str(), "Low");
        assert_eq!(model.predict(&row(51)).unwrap().as_str(), "High");
    }

    #[test]
    fn test_votes_are_summed() {
        let mut model = stump();
        let medium = DecisionTree {
            nodes: vec![TreeNode::Leaf { value: vec![0.0, 0.0, 0.8] }],
        };
        model.trees.push(medium.clone());
        model.trees.push(medium);

        // 1.0 High vs 1.6 Medium
        assert_eq!(model.predict(&row(500)).unwrap().as_str(), "Medium");
    }

    #[test]
    fn test_bad_feature_index_is_prediction_error() {
        let mut model = stump();
        model.trees[0].nodes[0] = TreeNode::Split { feature: 9, threshold: 0.0, left: 1, right: 2 };
        let err = model.predict(&row(0)).unwrap_err();
        assert!(err.0.contains("feature 9"));
    }

    #[test]
    fn test_dangling_child_is_prediction_error() {
        let mut model = stump();
        model.trees[0].nodes[0] = TreeNode::Split { feature: 0, threshold: 100.0, left: 42, right: 2 };
        assert!(model.predict(&row(0)).is_err());
    }

    #[test]
    fn test_cycle_is_prediction_error() {
        let mut model = stump();
        model.trees[0].nodes[0] = TreeNode::Split { feature: 0, threshold: 100.0, left: 0, right: 0 };
        let err = model.predict(&row(0)).unwrap_err();
        assert_eq!(err.0, "Tree contains a cycle");
    }

    #[test]
    fn test_leaf_width_mismatch() {
        let mut model = stump();
        model.trees[0].nodes[1] = TreeNode::Leaf { value: vec![1.0] };
        assert!(model.predict(&row(0)).is_err());
    }

    #[test]
    fn test_from_file_rejects_garbage() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(matches!(TreeEnsemble::from_file(&path), Err(ModelError::Load(_))));
    }

    #[test]
    fn test_from_file_rejects_empty_forest() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("model.json");
        std::fs::write(&path, r#"{"classes": ["High"], "trees": []}"#).unwrap();
        assert!(matches!(TreeEnsemble::from_file(&path), Err(ModelError::Load(_))));
    }
}
