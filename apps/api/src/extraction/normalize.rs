//! Text normalization passes applied before extraction and classification.

use std::sync::LazyLock;

use regex::Regex;

static RE_HYPHEN_BREAK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\w)-[ \t]*\r?\n\s*").expect("valid hyphen-break regex"));
static RE_NOISE_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s\-–+#:/.,'’]").expect("valid noise regex"));
static RE_PAGE_FURNITURE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(page\s*\d+|confidentiel|curriculum vitae)\b").expect("valid furniture regex")
});
static RE_WHITESPACE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("valid whitespace regex"));
static RE_BULLETS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[•▪●♦■▶→]").expect("valid bullet regex"));
static RE_LOOSE_PUNCT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s@.+]").expect("valid punctuation regex"));
static RE_GLUED_WORDS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([a-z])([A-Z])").expect("valid camel-case regex"));
static RE_ELIDED_ARTICLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b[ldLD][’']\s*").expect("valid elision regex"));

/// Lowercases and denoises CV or job-offer text before matching.
///
/// Keeps the characters that carry meaning in technical vocabulary
/// (`- + # : / . ,`), apostrophes for French elision and dashes in year
/// ranges. Rejoins words hyphen-broken across lines and removes page
/// furniture such as "page 2" or "curriculum vitae".
pub fn preprocess(text: &str) -> String {
    let text = text.to_lowercase();
    let text = RE_HYPHEN_BREAK.replace_all(&text, "$1");
    let text = text.replace(['\n', '\r'], " ");
    let text = RE_NOISE_CHARS.replace_all(&text, " ");
    let text = RE_PAGE_FURNITURE.replace_all(&text, "");
    RE_WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Cleans text coming out of a document parser before it is vectorized.
pub fn clean_extracted_text(text: &str) -> String {
    let text = RE_WHITESPACE.replace_all(text, " ");
    let text = RE_BULLETS.replace_all(&text, "");
    let text = RE_LOOSE_PUNCT.replace_all(&text, "");
    let text = RE_GLUED_WORDS.replace_all(&text, "$1 $2");
    text.trim().to_string()
}

/// Drops elided French articles ("l’optimisation" → "optimisation").
pub fn remove_elided_determiners(text: &str) -> String {
    RE_ELIDED_ARTICLE.replace_all(text, "").into_owned()
}

/// Collapses runs of whitespace into single spaces.
pub(crate) fn collapse_whitespace(text: &str) -> String {
    RE_WHITESPACE.replace_all(text, " ").into_owned()
}
