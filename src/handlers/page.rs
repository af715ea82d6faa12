//! Interactive form handlers

use axum::{
    extract::{rejection::FormRejection, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Form,
};
use validator::Validate;

use crate::features::{input::describe_errors, RegionInput};
use crate::views::{self, Notice};
use crate::{AppResult, AppState, Session};

/// Idle: show the form with its defaults
pub async fn index(State(state): State<AppState>) -> Response {
    match state.session.as_ref() {
        Session::Ready(_) => Html(views::form_page(&RegionInput::default(), None)).into_response(),
        Session::Halted { reason } => halted(reason),
    }
}

/// Submitted: run the pipeline and show whatever it produced
pub async fn predict(
    State(state): State<AppState>,
    form: Result<Form<RegionInput>, FormRejection>,
) -> AppResult<Response> {
    let controller = match state.session.as_ref() {
        Session::Ready(controller) => controller.clone(),
        Session::Halted { reason } => return Ok(halted(reason)),
    };

    // Unparseable fields never reach validation; show the form again instead
    let input = match form {
        Ok(Form(input)) => input,
        Err(rejection) => {
            let message = rejection.body_text();
            tracing::debug!("Form rejected: {}", message);
            let notice = Notice::Error(message);
            return Ok(unprocessable(&RegionInput::default(), &notice));
        }
    };

    if let Err(errors) = input.validate() {
        let notice = Notice::Error(describe_errors(&errors));
        return Ok(unprocessable(&input, &notice));
    }

    let submission = tokio::task::spawn_blocking(move || controller.submit(input)).await?;

    Ok(Html(views::result_page(&submission)).into_response())
}

fn halted(reason: &str) -> Response {
    tracing::warn!("Page request rejected, session halted: {}", reason);
    (StatusCode::SERVICE_UNAVAILABLE, Html(views::halted_page(reason))).into_response()
}

fn unprocessable(input: &RegionInput, notice: &Notice) -> Response {
    (
        StatusCode::UNPROCESSABLE_ENTITY,
        Html(views::form_page(input, Some(notice))),
    )
        .into_response()
}
