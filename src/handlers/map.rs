//! Full map view

use axum::{extract::State, response::Html};

use crate::map::MapStoreError;
use crate::{AppError, AppResult, AppState};

/// Serve the most recently persisted map, independent of the live flow
pub async fn full_map(State(state): State<AppState>) -> AppResult<Html<String>> {
    let controller = state.controller()?;

    let html = tokio::task::spawn_blocking(move || controller.renderer().store().load())
        .await?
        .map_err(|e| match e {
            MapStoreError::Missing(_) => AppError::NotFound(e.to_string()),
            MapStoreError::Io { .. } => AppError::InternalError(e.to_string()),
        })?;

    Ok(Html(html))
}
