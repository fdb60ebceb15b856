//! The full CV / job-offer matching pipeline.
//!
//! 1. preprocess both texts (the bundled offer stands in for a missing one)
//! 2. adapt languages and score semantic similarity on the adapted texts
//! 3. extract structured profiles from the preprocessed originals
//! 4. score skill vectors over the extracted technical skills
//! 5. score coverage, then fuse the three signals

use serde::Serialize;
use tracing::debug;

use crate::extraction::normalize::preprocess;
use crate::extraction::StructuredProfile;
use crate::matching::coverage::{coverage_breakdown, coverage_score, CoverageBreakdown};
use crate::matching::fusion::{fuse, FusionWeights, ScoreTriple, Verdict};
use crate::matching::language::adapt_texts;
use crate::matching::skill_vectors::skillset_similarity;
use crate::providers::ProviderError;
use crate::state::AppState;

/// Offer used when a match request carries no job text.
pub const DEFAULT_JOB_OFFER: &str = "Nous recherchons un profil polyvalent avec des compétences \
en gestion de projet, maîtrise des outils bureautiques, capacité d’analyse, et aisance en \
communication. Une expérience en environnement agile est un plus.";

#[derive(Debug, Clone, Serialize)]
pub struct MatchOutcome {
    /// Truncated percentage, 0..=100.
    pub score: u8,
    pub final_score: f64,
    pub verdict: Verdict,
    /// The signals as blended, each clamped to `[0, 1]`.
    pub signals: ScoreTriple,
    pub weights: FusionWeights,
    pub coverage: CoverageBreakdown,
    pub cv_language: String,
    pub job_language: String,
    pub cv_profile: StructuredProfile,
    pub job_profile: StructuredProfile,
}

/// Matches a CV against a job offer. Blank or missing job text falls back to
/// [`DEFAULT_JOB_OFFER`].
pub async fn match_profiles(
    state: &AppState,
    cv_text: &str,
    job_text: Option<&str>,
) -> Result<MatchOutcome, ProviderError> {
    let job_text = job_text
        .filter(|t| !t.trim().is_empty())
        .unwrap_or(DEFAULT_JOB_OFFER);

    let cv = preprocess(cv_text);
    let job = preprocess(job_text);

    let adapted = adapt_texts(state.language.as_ref(), &cv, &job).await?;
    let semantic = state.semantic.similarity(&adapted.cv, &adapted.offer).await?;

    let cv_profile = state.extractor.extract(&cv);
    let job_profile = state.extractor.extract(&job);

    let skill_vector = skillset_similarity(
        &cv_profile.competences,
        &job_profile.competences,
        state.skill_vectors.as_ref(),
    )
    .await?;

    let coverage = coverage_breakdown(&cv_profile, &job_profile);
    let structured = coverage_score(&cv_profile, &job_profile);

    let signals = ScoreTriple {
        semantic,
        skill_vector,
        structured,
    }
    .clamped();
    let fused = fuse(signals);
    debug!(
        semantic = signals.semantic,
        skill_vector = signals.skill_vector,
        structured = signals.structured,
        branch = fused.branch,
        final_score = fused.final_score,
        "Match scored"
    );

    Ok(MatchOutcome {
        score: fused.percent,
        final_score: fused.final_score,
        verdict: fused.verdict,
        signals,
        weights: fused.weights,
        coverage,
        cv_language: adapted.cv_lang,
        job_language: adapted.offer_lang,
        cv_profile,
        job_profile,
    })
}
