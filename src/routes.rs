// src/routes.rs

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::trace::TraceLayer;

use crate::{handlers::quiz, state::AppState};

/// Assembles the main application router.
///
/// * Wires the quiz flow (start page, start, test, submit, results).
/// * Applies request tracing.
/// * Injects global state (question bank, session store, config).
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(quiz::index))
        .route("/start", post(quiz::start_test))
        .route("/test", get(quiz::test_page))
        .route("/submit", post(quiz::submit))
        .route("/results", get(quiz::results))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
