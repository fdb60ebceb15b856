pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;
use crate::{domain, extraction, matching};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Extraction API
        .route(
            "/api/v1/profiles/extract",
            post(extraction::handlers::handle_extract),
        )
        // Matching API
        .route("/api/v1/match", post(matching::handlers::handle_match))
        // Domain API
        .route(
            "/api/v1/domain",
            post(domain::handlers::handle_classify_domain),
        )
        .with_state(state)
}
