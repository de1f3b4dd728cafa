pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::export::handlers as export;
use crate::gateway::handlers as gateway;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Resume API
        .route("/api/v1/resume", get(gateway::handle_get_resume))
        .route("/api/v1/resume/extract", post(gateway::handle_extract))
        .route("/api/v1/resume/enhance", post(gateway::handle_enhance))
        .route("/api/v1/resume/modify", post(gateway::handle_modify))
        .route(
            "/api/v1/resume/score",
            post(gateway::handle_score)
                .get(gateway::handle_get_score)
                .delete(gateway::handle_dismiss_score),
        )
        // Export API
        .route("/api/v1/resume/export", get(export::handle_export))
        .route("/api/v1/resume/layout", get(export::handle_layout_preview))
        .with_state(state)
}
