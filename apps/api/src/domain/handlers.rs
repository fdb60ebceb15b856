//! Axum route handlers for the Domain API.

use axum::{extract::State, Json};
use serde::Deserialize;

use crate::domain::DomainDecision;
use crate::errors::{require_text, AppError};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct DomainRequest {
    pub text: String,
}

/// POST /api/v1/domain
pub async fn handle_classify_domain(
    State(state): State<AppState>,
    Json(request): Json<DomainRequest>,
) -> Result<Json<DomainDecision>, AppError> {
    require_text("text", &request.text)?;

    let decision = state
        .ensemble
        .classify_text(&request.text, state.vectorizer.as_ref())
        .await?;

    Ok(Json(decision))
}
