//! Coverage scoring: the fraction of a job's structured requirements found in a CV.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::extraction::StructuredProfile;

/// Base weight per fact category, renormalized over the categories the job defines.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct CoverageWeights {
    pub skills: f64,
    pub soft_skills: f64,
    pub languages: f64,
}

impl Default for CoverageWeights {
    fn default() -> Self {
        Self {
            skills: 0.6,
            soft_skills: 0.3,
            languages: 0.1,
        }
    }
}

/// Per-category sub-scores. `None` means the job lists nothing for that category.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CoverageBreakdown {
    pub skills: Option<f64>,
    pub soft_skills: Option<f64>,
    pub languages: Option<f64>,
}

/// Share of `job` items present in `cv`, compared case-insensitively.
///
/// Empty job list → `None` (category excluded); empty CV list → `Some(0.0)`.
pub fn coverage_ratio(cv: &BTreeSet<String>, job: &BTreeSet<String>) -> Option<f64> {
    if job.is_empty() {
        return None;
    }
    if cv.is_empty() {
        return Some(0.0);
    }
    let cv_lower: HashSet<String> = cv.iter().map(|c| c.to_lowercase()).collect();
    let matched = job
        .iter()
        .filter(|item| cv_lower.contains(&item.to_lowercase()))
        .count();
    Some(matched as f64 / job.len() as f64)
}

pub fn coverage_breakdown(cv: &StructuredProfile, job: &StructuredProfile) -> CoverageBreakdown {
    CoverageBreakdown {
        skills: coverage_ratio(&cv.competences, &job.competences),
        soft_skills: coverage_ratio(&cv.soft_skills, &job.soft_skills),
        languages: coverage_ratio(&cv.languages, &job.languages),
    }
}

/// Weighted coverage over the defined categories, rounded to 4 decimals.
///
/// A job with no structured requirements at all scores 1.0.
pub fn coverage_score(cv: &StructuredProfile, job: &StructuredProfile) -> f64 {
    weighted_coverage(&coverage_breakdown(cv, job), &CoverageWeights::default())
}

pub fn weighted_coverage(breakdown: &CoverageBreakdown, weights: &CoverageWeights) -> f64 {
    let parts = [
        (breakdown.skills, weights.skills),
        (breakdown.soft_skills, weights.soft_skills),
        (breakdown.languages, weights.languages),
    ];

    let (total, weight_sum) = parts
        .iter()
        .filter_map(|(score, weight)| score.map(|s| (s * weight, *weight)))
        .fold((0.0, 0.0), |(total, sum), (ws, w)| (total + ws, sum + w));

    if weight_sum > 0.0 {
        round4(total / weight_sum)
    } else {
        1.0
    }
}

pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}
