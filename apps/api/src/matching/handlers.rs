//! Axum route handlers for the Matching API.

use axum::{extract::State, Json};
use serde::Deserialize;
use tracing::info;

use crate::errors::{require_text, AppError};
use crate::matching::pipeline::{match_profiles, MatchOutcome};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct MatchRequest {
    pub cv_text: String,
    /// Omitted or blank → the bundled default offer.
    #[serde(default)]
    pub job_text: Option<String>,
}

/// POST /api/v1/match
pub async fn handle_match(
    State(state): State<AppState>,
    Json(request): Json<MatchRequest>,
) -> Result<Json<MatchOutcome>, AppError> {
    require_text("cv_text", &request.cv_text)?;

    let outcome = match_profiles(&state, &request.cv_text, request.job_text.as_deref()).await?;
    info!(
        score = outcome.score,
        verdict = %outcome.verdict,
        "Match computed"
    );

    Ok(Json(outcome))
}
