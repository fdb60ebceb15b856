//! Spoken-language detection. Presence only: proficiency levels are not recorded.

use std::collections::BTreeSet;
use std::sync::LazyLock;

use regex::Regex;

/// Canonical language name and the spellings that identify it.
const KNOWN_LANGUAGES: &[(&str, &[&str])] = &[
    ("français", &["français", "french"]),
    ("anglais", &["anglais", "english"]),
    ("arabe", &["arabe", "arabic", "arab"]),
    ("amazigh", &["amazigh"]),
    ("espagnol", &["espagnol", "spanish", "espagne"]),
    ("allemand", &["allemand", "german"]),
    ("turc", &["turc", "turkish"]),
    ("italien", &["italien", "italian"]),
    ("portugais", &["portugais", "portuguese"]),
    ("néerlandais", &["néerlandais", "dutch"]),
];

struct LanguagePattern {
    canonical: &'static str,
    variants: Vec<Regex>,
}

static LANGUAGE_PATTERNS: LazyLock<Vec<LanguagePattern>> = LazyLock::new(|| {
    KNOWN_LANGUAGES
        .iter()
        .map(|&(canonical, variants)| LanguagePattern {
            canonical,
            variants: variants
                .iter()
                .map(|v| {
                    // The level group is matched but never read.
                    Regex::new(&format!(
                        r"(?i)\b{}\s*[:\-]?\s*(native|fluent|intermediate|courant|débutant)?",
                        regex::escape(v)
                    ))
                    .expect("valid language regex")
                })
                .collect(),
        })
        .collect()
});

/// Returns the canonical names of every language mentioned in `text`.
pub fn extract_languages(text: &str) -> BTreeSet<String> {
    let text = text.to_lowercase().replace(['\n', '\r'], " ");
    LANGUAGE_PATTERNS
        .iter()
        .filter(|lang| lang.variants.iter().any(|re| re.is_match(&text)))
        .map(|lang| lang.canonical.to_string())
        .collect()
}
