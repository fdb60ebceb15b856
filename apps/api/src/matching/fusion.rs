//! Match fusion: blends the semantic, skill-vector and coverage signals.
//!
//! Weights are picked by an ordered cascade: the first rule whose condition
//! holds decides, later rules are never consulted. When no rule fires, the
//! fallback keeps the semantic weight at 0.6 and shifts a little weight onto
//! coverage when coverage is at least 0.5.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::matching::coverage::round4;

/// The three signals for one CV/job pair, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreTriple {
    pub semantic: f64,
    pub skill_vector: f64,
    pub structured: f64,
}

impl ScoreTriple {
    /// Clamps every signal into `[0, 1]`; non-finite values become 0.
    pub fn clamped(self) -> Self {
        let clamp = |v: f64| if v.is_finite() { v.clamp(0.0, 1.0) } else { 0.0 };
        Self {
            semantic: clamp(self.semantic),
            skill_vector: clamp(self.skill_vector),
            structured: clamp(self.structured),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionWeights {
    pub semantic: f64,
    pub skill_vector: f64,
    pub structured: f64,
}

impl FusionWeights {
    const fn new(semantic: f64, skill_vector: f64, structured: f64) -> Self {
        Self {
            semantic,
            skill_vector,
            structured,
        }
    }

    fn apply(&self, s: &ScoreTriple) -> f64 {
        self.semantic * s.semantic + self.skill_vector * s.skill_vector + self.structured * s.structured
    }
}

type Condition = fn(&ScoreTriple) -> bool;

/// Ordered weight rules; the index + 1 is the branch number reported in logs.
const CASCADE: &[(Condition, FusionWeights)] = &[
    (
        |s: &ScoreTriple| s.semantic > 0.75 && s.skill_vector > 0.80,
        FusionWeights::new(0.6, 0.4, 0.0),
    ),
    (|s: &ScoreTriple| s.semantic > 0.75, FusionWeights::new(0.8, 0.2, 0.0)),
    (
        |s: &ScoreTriple| s.skill_vector > 0.75 && s.structured > 0.75 && s.semantic < 0.75,
        FusionWeights::new(0.4, 0.4, 0.2),
    ),
    (
        |s: &ScoreTriple| s.skill_vector >= 0.75 && s.semantic >= 0.60,
        FusionWeights::new(0.2, 0.8, 0.0),
    ),
];

const FALLBACK_LOW_COVERAGE: FusionWeights = FusionWeights::new(0.6, 0.35, 0.05);
const FALLBACK_HIGH_COVERAGE: FusionWeights = FusionWeights::new(0.6, 0.3, 0.1);

/// Returns the selected weights and the 1-based branch that produced them.
pub fn select_weights(scores: &ScoreTriple) -> (FusionWeights, usize) {
    CASCADE
        .iter()
        .position(|(condition, _)| condition(scores))
        .map(|i| (CASCADE[i].1, i + 1))
        .unwrap_or_else(|| {
            let weights = if scores.structured < 0.5 {
                FALLBACK_LOW_COVERAGE
            } else {
                FALLBACK_HIGH_COVERAGE
            };
            (weights, CASCADE.len() + 1)
        })
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    #[serde(rename = "Strong match")]
    StrongMatch,
    #[serde(rename = "Partial match")]
    PartialMatch,
    #[serde(rename = "Low compatibility")]
    LowCompatibility,
}

impl Verdict {
    /// Thresholds are exclusive: exactly 0.75 is a partial match.
    pub fn from_score(final_score: f64) -> Self {
        if final_score > 0.75 {
            Verdict::StrongMatch
        } else if final_score > 0.5 {
            Verdict::PartialMatch
        } else {
            Verdict::LowCompatibility
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Verdict::StrongMatch => "Strong match",
            Verdict::PartialMatch => "Partial match",
            Verdict::LowCompatibility => "Low compatibility",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FusionResult {
    /// Truncated percentage, 0..=100.
    pub percent: u8,
    pub final_score: f64,
    pub verdict: Verdict,
    pub weights: FusionWeights,
    pub branch: usize,
}

/// Fuses the three signals into a percentage and verdict.
pub fn fuse(scores: ScoreTriple) -> FusionResult {
    let scores = scores.clamped();
    let (weights, branch) = select_weights(&scores);
    let final_score = round4(weights.apply(&scores)).clamp(0.0, 1.0);
    // Truncation, not rounding.
    let percent = (final_score * 100.0) as u8;

    FusionResult {
        percent,
        final_score,
        verdict: Verdict::from_score(final_score),
        weights,
        branch,
    }
}
