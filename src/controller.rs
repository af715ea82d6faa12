//! Interaction Controller
//!
//! Linear single-shot pipeline per submission:
//!
//! ```text
//! Idle ──submit──▶ Submitted ──derive──▶ predict ──▶ render ──▶ Succeeded
//!                                          │           │
//!                                          └───────────┴──────▶ Failed
//! ```
//!
//! A failure only ends the current submission. The controller keeps
//! accepting new ones. Submissions are serialized by a gate lock; the
//! state lock is only held long enough to read or write the state.

use std::sync::Arc;

use parking_lot::Mutex;
use serde::Serialize;

use crate::features::{derive, DerivedFeatures, FeatureVector, RegionInput};
use crate::map::{MapArtifact, MapRenderer, MapStoreError, HIGH_RISK_REGIONS};
use crate::model::{Classifier, RiskLabel};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ControllerState {
    Idle,
    Submitted,
    Succeeded,
    Failed,
}

/// Output of a successful prediction, consumed by the renderer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PredictionResult {
    pub label: RiskLabel,
    pub damage_scale: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailedStage {
    Prediction,
    Rendering,
}

#[derive(Debug, Clone)]
pub enum Outcome {
    Succeeded {
        result: PredictionResult,
        map: MapArtifact,
    },
    Failed {
        stage: FailedStage,
        message: String,
    },
}

impl Outcome {
    pub fn state(&self) -> ControllerState {
        match self {
            Outcome::Succeeded { .. } => ControllerState::Succeeded,
            Outcome::Failed { .. } => ControllerState::Failed,
        }
    }
}

/// Secondary display of the last persisted map
#[derive(Debug, Clone, PartialEq)]
pub enum FullMapView {
    Loaded(String),
    Missing { warning: String },
}

/// Everything one submission produced
#[derive(Debug, Clone)]
pub struct Submission {
    pub input: RegionInput,
    pub derived: DerivedFeatures,
    pub outcome: Outcome,
    pub full_map: FullMapView,
}

pub struct InteractionController {
    classifier: Arc<dyn Classifier>,
    renderer: MapRenderer,
    gate: Mutex<()>,
    state: Mutex<ControllerState>,
}

impl InteractionController {
    pub fn new(classifier: Arc<dyn Classifier>, renderer: MapRenderer) -> Self {
        Self {
            classifier,
            renderer,
            gate: Mutex::new(()),
            state: Mutex::new(ControllerState::Idle),
        }
    }

    /// Current state; `Submitted` while a submission is in flight
    pub fn state(&self) -> ControllerState {
        *self.state.lock()
    }

    pub fn backend(&self) -> &'static str {
        self.classifier.backend()
    }

    pub fn renderer(&self) -> &MapRenderer {
        &self.renderer
    }

    /// Process one submission end to end. Never fails: every stage error
    /// is folded into [`Outcome::Failed`].
    pub fn submit(&self, input: RegionInput) -> Submission {
        // Held for the whole submission so the next one waits
        let _gate = self.gate.lock();
        self.set_state(ControllerState::Submitted);

        let derived = derive(&input);
        let features = FeatureVector::assemble(&input, &derived);
        tracing::debug!(features = %features.to_log_entry(), "Submission received");

        let outcome = self.run(&input, &derived, &features);
        self.set_state(outcome.state());

        match &outcome {
            Outcome::Succeeded { result, .. } => {
                tracing::info!(
                    label = %result.label,
                    damage_scale = result.damage_scale,
                    "Prediction succeeded"
                );
            }
            Outcome::Failed { stage, message } => {
                tracing::warn!(?stage, "Prediction failed: {}", message);
            }
        }

        let full_map = self.load_full_map();

        Submission {
            input,
            derived,
            outcome,
            full_map,
        }
    }

    fn set_state(&self, state: ControllerState) {
        *self.state.lock() = state;
    }

    fn run(&self, input: &RegionInput, derived: &DerivedFeatures, features: &FeatureVector) -> Outcome {
        let label = match self.classifier.predict(features) {
            Ok(label) => label,
            Err(e) => {
                return Outcome::Failed {
                    stage: FailedStage::Prediction,
                    message: e.to_string(),
                }
            }
        };

        let map = match self.renderer.render(
            input.latitude,
            input.longitude,
            &label,
            derived.damage_scale,
            &HIGH_RISK_REGIONS,
        ) {
            Ok(map) => map,
            Err(e) => {
                return Outcome::Failed {
                    stage: FailedStage::Rendering,
                    message: e.to_string(),
                }
            }
        };

        Outcome::Succeeded {
            result: PredictionResult {
                label,
                damage_scale: derived.damage_scale,
            },
            map,
        }
    }

    /// Independent of the outcome above; a missing file is only a warning
    fn load_full_map(&self) -> FullMapView {
        match self.renderer.store().load() {
            Ok(html) => FullMapView::Loaded(html),
            Err(e @ MapStoreError::Missing(_)) => {
                tracing::warn!("{}", e);
                FullMapView::Missing { warning: e.to_string() }
            }
            Err(e) => {
                tracing::warn!("Could not read full map: {}", e);
                FullMapView::Missing { warning: e.to_string() }
            }
        }
    }
}
