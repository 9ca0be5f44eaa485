pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::assistant::handlers as assistant;
use crate::jobs::handlers as jobs;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Job description flows
        .route(
            "/api/v1/job-descriptions/generate",
            post(jobs::handle_generate),
        )
        .route(
            "/api/v1/job-descriptions/regenerate",
            post(jobs::handle_regenerate),
        )
        .route(
            "/api/v1/job-descriptions/analyze",
            post(jobs::handle_analyze),
        )
        .route("/api/v1/job-descriptions/parse", post(jobs::handle_parse))
        // Assistant
        .route("/api/v1/assistant/chat", post(assistant::handle_chat))
        .with_state(state)
}
