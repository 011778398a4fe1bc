use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::{info, warn};

use super::AppState;
use crate::error::FieldError;
use crate::response::{SubmitResponse, METHOD_NOT_ALLOWED_MESSAGE};
use crate::submission::SubmissionRecord;

/// Handler for the form page
pub async fn index_handler() -> impl IntoResponse {
    Html(include_str!("../../assets/index.html"))
}

/// Handler for health checks
pub async fn health_handler() -> impl IntoResponse {
    "ok"
}

/// Handler for form submissions
pub async fn submit_handler(State(state): State<AppState>, body: Bytes) -> Response {
    let record: SubmissionRecord = match serde_json::from_slice(&body) {
        Ok(record) => record,
        Err(e) => {
            warn!("Rejected malformed submission body: {}", e);
            let mut reply = SubmitResponse::failure("Invalid request body");
            reply.errors.push(FieldError::new("body", &e.to_string()));
            return (StatusCode::BAD_REQUEST, Json(reply)).into_response();
        }
    };

    info!("Received submission '{}'", record.event_name);
    let outcome = state.handler.handle(&record).await;
    let (status, reply) = SubmitResponse::from_outcome(outcome);
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    (status, Json(reply)).into_response()
}

/// Any method other than POST on the submit route
pub async fn method_not_allowed_handler() -> Response {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Json(SubmitResponse::failure(METHOD_NOT_ALLOWED_MESSAGE)),
    )
        .into_response()
}
