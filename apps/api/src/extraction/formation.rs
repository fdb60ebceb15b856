//! Education ("formation") detection: degree title and completion status.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

/// Title reported when no degree pattern matches.
pub const UNSPECIFIED_TITLE: &str = "unspecified";

/// Month from which a degree ending this year counts as obtained.
const GRADUATION_MONTH: u32 = 6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormationStatus {
    Completed,
    InProgress,
    Upcoming,
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormationRecord {
    pub title: String,
    pub status: FormationStatus,
}

impl Default for FormationRecord {
    fn default() -> Self {
        Self {
            title: UNSPECIFIED_TITLE.to_string(),
            status: FormationStatus::Unspecified,
        }
    }
}

impl FormationRecord {
    pub fn has_title(&self) -> bool {
        self.title != UNSPECIFIED_TITLE
    }
}

/// Degree categories, most specific first. The first category found anywhere wins.
static DEGREE_CATEGORIES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"(?i)\b(phd|doctorat)\b",
        r"(?i)\b(master spécialisé|master\b|bac\+5)",
        r"(?i)\b(licence professionnelle|licence\b|bachelor\b|bac\+3)",
        r"(?i)\b(bts\b|dut\b|technicien spécialisé|bac\+2)",
        r"(?i)\b(dipl[oô]me d[’'\s]\s*ing[ée]nieur|engineering degree)",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid degree regex"))
    .collect()
});

static RE_OBTAINED: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(obtenu en|obtention en|graduated in|obtained in)\s*([0-9]{4})")
        .expect("valid completion regex")
});
static RE_YEAR_RANGE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"([0-9]{4})\s*[–\-]\s*([0-9]{4})").expect("valid year range regex")
});
static RE_ONGOING: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(en cours|actuellement|ongoing|present|now)\b")
        .expect("valid ongoing regex")
});

/// Detects the degree title and its status as of `today`.
///
/// Status rules, first satisfied wins:
/// 1. explicit completion phrase with a past year (or this year, from June) → completed
/// 2. a `Y1–Y2` year range → completed / in progress / upcoming
/// 3. an ongoing keyword → in progress
/// 4. a degree title without dates → completed
/// 5. otherwise unspecified
pub fn extract_formation(text: &str, today: NaiveDate) -> FormationRecord {
    let mut formation = FormationRecord {
        title: detect_title(text).unwrap_or_else(|| UNSPECIFIED_TITLE.to_string()),
        status: FormationStatus::Unspecified,
    };
    let year = today.year();
    let past_graduation = today.month() >= GRADUATION_MONTH;
    let is_finished = |end: i32| end < year || (end == year && past_graduation);

    if let Some(obtained) = RE_OBTAINED
        .captures(text)
        .and_then(|c| c[2].parse::<i32>().ok())
    {
        if is_finished(obtained) {
            formation.status = FormationStatus::Completed;
            return formation;
        }
    }

    let range = RE_YEAR_RANGE
        .captures(text)
        .and_then(|c| Some((c[1].parse::<i32>().ok()?, c[2].parse::<i32>().ok()?)));

    formation.status = match range {
        Some((_, end)) if is_finished(end) => FormationStatus::Completed,
        Some((start, end)) if start <= year && year <= end => FormationStatus::InProgress,
        Some(_) => FormationStatus::Upcoming,
        None if RE_ONGOING.is_match(text) => FormationStatus::InProgress,
        None if formation.has_title() => FormationStatus::Completed,
        None => FormationStatus::Unspecified,
    };

    formation
}

fn detect_title(text: &str) -> Option<String> {
    DEGREE_CATEGORIES
        .iter()
        .find_map(|re| re.captures(text))
        .map(|c| c[1].to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 15).unwrap()
    }

    #[test]
    fn test_obtained_phrase_after_june_is_completed() {
        let f = extract_formation("Licence en gestion obtenu en 2022", date(2022, 7));
        assert_eq!(f.status, FormationStatus::Completed);
        assert_eq!(f.title, "licence");
    }

    #[test]
    fn test_obtained_phrase_same_year_before_june_falls_through() {
        let f = extract_formation("Master obtenu en 2022", date(2022, 3));
        // no range, no ongoing keyword, but a title → default completed
        assert_eq!(f.status, FormationStatus::Completed);

        let f = extract_formation("obtenu en 2022, formation 2020 - 2022", date(2022, 3));
        assert_eq!(f.status, FormationStatus::InProgress);
    }

    #[test]
    fn test_year_range_in_progress() {
        let f = extract_formation("Cycle ingénieur 2023 – 2026", date(2025, 2));
        assert_eq!(f.status, FormationStatus::InProgress);
    }

    #[test]
    fn test_year_range_finished() {
        let f = extract_formation("Bachelor 2019-2022", date(2025, 2));
        assert_eq!(f.status, FormationStatus::Completed);
        let f = extract_formation("Bachelor 2022-2025", date(2025, 6));
        assert_eq!(f.status, FormationStatus::Completed);
    }

    #[test]
    fn test_year_range_ending_this_year_before_june_is_in_progress() {
        let f = extract_formation("BTS 2023-2025", date(2025, 5));
        assert_eq!(f.status, FormationStatus::InProgress);
    }

    #[test]
    fn test_year_range_in_future_is_upcoming() {
        let f = extract_formation("Master 2027-2029", date(2025, 9));
        assert_eq!(f.status, FormationStatus::Upcoming);
    }

    #[test]
    fn test_ongoing_keyword() {
        let f = extract_formation("Master data science, en cours", date(2025, 9));
        assert_eq!(f.status, FormationStatus::InProgress);
        assert_eq!(f.title, "master");
    }

    #[test]
    fn test_ongoing_keyword_needs_word_boundary() {
        let f = extract_formation("knowledge of presentation tools", date(2025, 9));
        assert_eq!(f.status, FormationStatus::Unspecified);
    }

    #[test]
    fn test_title_without_dates_defaults_to_completed() {
        let f = extract_formation("Diplôme d'ingénieur en informatique", date(2025, 9));
        assert_eq!(f.title, "diplôme d'ingénieur");
        assert_eq!(f.status, FormationStatus::Completed);
    }

    #[test]
    fn test_no_evidence_is_unspecified() {
        let f = extract_formation("Five years of backend work", date(2025, 9));
        assert_eq!(f, FormationRecord::default());
    }

    #[test]
    fn test_title_priority_ignores_text_order() {
        // bachelor appears first in the text, but doctorate is more specific
        let f = extract_formation("Bachelor in CS, then PhD in ML", date(2025, 9));
        assert_eq!(f.title, "phd");
    }

    #[test]
    fn test_master_does_not_match_inside_words() {
        let f = extract_formation("Scrum master certified, licence pro", date(2025, 9));
        assert_eq!(f.title, "master");
        let f = extract_formation("mastered licence requirements", date(2025, 9));
        assert_eq!(f.title, "licence");
    }

    #[test]
    fn test_title_is_lowercased() {
        let f = extract_formation("MASTER SPÉCIALISÉ finance", date(2025, 9));
        assert_eq!(f.title, "master spécialisé");
    }
}
