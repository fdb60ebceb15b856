// Structured element extraction: turns CV / job-offer text into typed facts.
// Pure and synchronous; missing evidence yields sentinels and empty sets, never errors.

pub mod dictionary;
pub mod formation;
pub mod handlers;
pub mod languages;
pub mod normalize;
pub mod skills;
pub mod soft_skills;

use std::collections::BTreeSet;

use anyhow::Result;
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::extraction::dictionary::SkillDictionary;
use crate::extraction::formation::{extract_formation, FormationRecord};
use crate::extraction::languages::extract_languages;
use crate::extraction::skills::extract_technical_skills;
use crate::extraction::soft_skills::SoftSkillCatalog;

/// Typed facts extracted from one document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StructuredProfile {
    pub formation: FormationRecord,
    pub competences: BTreeSet<String>,
    pub soft_skills: BTreeSet<String>,
    pub languages: BTreeSet<String>,
}

/// Extractor holding the compiled skill dictionary and soft-skill catalog.
/// Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct Extractor {
    dictionary: SkillDictionary,
    soft_skills: SoftSkillCatalog,
}

impl Extractor {
    pub fn new(dictionary: SkillDictionary, soft_skills: SoftSkillCatalog) -> Self {
        Self {
            dictionary,
            soft_skills,
        }
    }

    /// Extractor with the bundled dictionary and soft-skill vocabulary.
    pub fn bundled() -> Result<Self> {
        Ok(Self::new(
            SkillDictionary::bundled()?,
            SoftSkillCatalog::bundled()?,
        ))
    }

    /// Extracts a profile, evaluating education dates against the local date.
    pub fn extract(&self, text: &str) -> StructuredProfile {
        self.extract_at(text, Local::now().date_naive())
    }

    pub fn extract_at(&self, text: &str, today: NaiveDate) -> StructuredProfile {
        StructuredProfile {
            formation: extract_formation(text, today),
            competences: extract_technical_skills(text, &self.dictionary),
            soft_skills: self.soft_skills.extract(text),
            languages: extract_languages(text),
        }
    }
}

/// Whether the text reads like a job offer rather than a CV.
pub fn is_job_offer(text: &str) -> bool {
    let lower = text.to_lowercase();
    ["job title", "requirements", "exigences"]
        .iter()
        .any(|marker| lower.contains(marker))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extraction::formation::FormationStatus;

    const CV: &str = r#"
        Jane Doe — Data Analyst
        Master en science des données (2021 - 2023)
        Compétences en communication, rigueur et esprit critique.
        Technical skills: Python, SQL, Power BI, Docker, CI/CD pipelines.
        Languages: French (native), English - fluent.
    "#;

    const JOB: &str = r#"
        Job title: Data Engineer
        Requirements: Python, SQL, Spark, Kubernetes. Strong teamwork and time management.
        English required.
    "#;

    #[test]
    fn test_extract_full_cv_profile() {
        let extractor = Extractor::bundled().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let profile = extractor.extract_at(CV, today);

        assert_eq!(profile.formation.title, "master");
        assert_eq!(profile.formation.status, FormationStatus::Completed);
        for skill in ["python", "sql", "power bi", "docker", "ci/cd"] {
            assert!(profile.competences.contains(skill), "missing {skill}");
        }
        assert!(profile.soft_skills.contains("communication"));
        assert!(profile.soft_skills.contains("rigueur"));
        assert!(profile.soft_skills.contains("esprit critique"));
        assert_eq!(
            profile.languages.iter().cloned().collect::<Vec<_>>(),
            vec!["anglais", "français"]
        );
    }

    #[test]
    fn test_extract_job_profile() {
        let extractor = Extractor::bundled().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        let profile = extractor.extract_at(JOB, today);

        assert_eq!(profile.formation.status, FormationStatus::Unspecified);
        assert!(profile.competences.contains("spark"));
        assert!(profile.competences.contains("kubernetes"));
        assert!(profile.soft_skills.contains("travail en équipe"));
        assert!(profile.languages.contains("anglais"));
    }

    #[test]
    fn test_empty_text_yields_empty_profile() {
        let extractor = Extractor::bundled().unwrap();
        let today = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
        assert_eq!(extractor.extract_at("", today), StructuredProfile::default());
    }

    #[test]
    fn test_is_job_offer() {
        assert!(is_job_offer(JOB));
        assert!(is_job_offer("Exigences du poste : SQL"));
        assert!(!is_job_offer(CV));
    }

    #[test]
    fn test_profile_serializes_status_snake_case() {
        let json = serde_json::to_value(StructuredProfile::default()).unwrap();
        assert_eq!(json["formation"]["status"], "unspecified");
        assert_eq!(json["formation"]["title"], "unspecified");
        assert!(json["competences"].as_array().unwrap().is_empty());
    }
}
