//! JSON prediction API

use axum::{extract::State, Json};
use serde::Serialize;
use validator::Validate;

use crate::controller::{ControllerState, FailedStage, FullMapView, Outcome};
use crate::features::RegionInput;
use crate::map::IconColor;
use crate::model::RiskLabel;
use crate::{AppResult, AppState};

#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub state: ControllerState,
    pub risk_index: f64,
    pub damage_scale: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<RiskLabel>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker_color: Option<IconColor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failed_stage: Option<FailedStage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub full_map_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_map_warning: Option<String>,
}

/// Same pipeline as the form, structured output.
///
/// A failed prediction is still a 200: the outcome is in `state`.
pub async fn predict(
    State(state): State<AppState>,
    Json(input): Json<RegionInput>,
) -> AppResult<Json<PredictResponse>> {
    let controller = state.controller()?;
    input.validate()?;

    let submission = tokio::task::spawn_blocking(move || controller.submit(input)).await?;

    let (label, marker_color, failed_stage, error) = match &submission.outcome {
        Outcome::Succeeded { result, map } => {
            (Some(result.label.clone()), Some(map.map.marker.color), None, None)
        }
        Outcome::Failed { stage, message } => (None, None, Some(*stage), Some(message.clone())),
    };

    let (full_map_available, full_map_warning) = match &submission.full_map {
        FullMapView::Loaded(_) => (true, None),
        FullMapView::Missing { warning } => (false, Some(warning.clone())),
    };

    Ok(Json(PredictResponse {
        state: submission.outcome.state(),
        risk_index: submission.derived.risk_index,
        damage_scale: submission.derived.damage_scale,
        label,
        marker_color,
        failed_stage,
        error,
        full_map_available,
        full_map_warning,
    }))
}
