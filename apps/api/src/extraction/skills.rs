//! Technical skill extraction against the skill dictionary.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::dictionary::{has_recruiting_boilerplate, SkillDictionary};
use crate::extraction::normalize::{collapse_whitespace, remove_elided_determiners};

static RE_CONTROL_WS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[\n\r\t]").expect("valid control regex"));
static RE_NON_TERM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s/]").expect("valid term regex"));

/// Folds text into the form dictionary patterns are matched against:
/// no elided articles, only word characters, spaces and `/`, lowercase.
pub fn normalize_for_skills(text: &str) -> String {
    let text = remove_elided_determiners(text);
    let text = RE_CONTROL_WS.replace_all(&text, " ");
    let text = RE_NON_TERM_CHARS.replace_all(&text, " ");
    collapse_whitespace(&text).to_lowercase()
}

/// Returns the display form of every dictionary term found in `text`, sorted.
pub fn extract_technical_skills(text: &str, dictionary: &SkillDictionary) -> BTreeSet<String> {
    let normalized = normalize_for_skills(text);
    // Computed once for the whole document, not per match.
    let suppress_boilerplate = has_recruiting_boilerplate(&normalized);

    dictionary
        .entries()
        .iter()
        .filter(|entry| entry.matches(&normalized, suppress_boilerplate))
        .map(|entry| entry.display())
        .collect()
}
