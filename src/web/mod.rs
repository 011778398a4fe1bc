//! HTTP surface: the form page and the submission endpoint
mod handlers;

use axum::{routing::get, routing::post, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::handler::SubmissionHandler;
pub use handlers::{health_handler, index_handler, method_not_allowed_handler, submit_handler};

/// Path the form posts to
pub const SUBMIT_PATH: &str = "/api/submit";

#[derive(Clone)]
pub struct AppState {
    /// Handler shared by every request
    pub handler: SubmissionHandler,
}

/// Build the router
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/health", get(health_handler))
        .route(
            SUBMIT_PATH,
            post(submit_handler).fallback(method_not_allowed_handler),
        )
        .layer(TraceLayer::new_for_http())
        // The form reads the reply, so it must be allowed cross-origin
        .layer(CorsLayer::permissive())
        .with_state(state)
}
