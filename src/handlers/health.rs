//! Health check handler

use axum::{extract::State, Json};
use serde::Serialize;

use crate::controller::ControllerState;
use crate::{AppState, Session};

#[derive(Serialize)]
pub struct HealthResponse {
    status: &'static str,
    version: &'static str,
    timestamp: i64,
    model_loaded: bool,
    backend: Option<&'static str>,
    last_state: Option<ControllerState>,
}

pub async fn check(State(state): State<AppState>) -> Json<HealthResponse> {
    let (status, backend, last_state) = match state.session.as_ref() {
        Session::Ready(controller) => ("healthy", Some(controller.backend()), Some(controller.state())),
        Session::Halted { .. } => ("halted", None, None),
    };

    Json(HealthResponse {
        status,
        version: env!("CARGO_PKG_VERSION"),
        timestamp: chrono::Utc::now().timestamp(),
        model_loaded: backend.is_some(),
        backend,
        last_state,
    })
}
