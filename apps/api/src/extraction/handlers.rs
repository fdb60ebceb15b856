//! Axum route handlers for the Extraction API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::errors::{require_text, AppError};
use crate::extraction::normalize::preprocess;
use crate::extraction::{is_job_offer, StructuredProfile};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExtractRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct ExtractResponse {
    pub profile: StructuredProfile,
    pub is_job_offer: bool,
}

/// POST /api/v1/profiles/extract
///
/// Returns the structured profile of a CV or job offer, without scoring it.
pub async fn handle_extract(
    State(state): State<AppState>,
    Json(request): Json<ExtractRequest>,
) -> Result<Json<ExtractResponse>, AppError> {
    require_text("text", &request.text)?;

    let text = preprocess(&request.text);
    let profile = state.extractor.extract(&text);

    Ok(Json(ExtractResponse {
        profile,
        is_job_offer: is_job_offer(&text),
    }))
}
