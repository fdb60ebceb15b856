//! Skill dictionary: the ordered list of technical terms the extractor looks for.
//!
//! The list format is whitespace-separated terms, with `_` standing for a space
//! inside a multi-word term (`machine_learning`). A term containing `/` is a
//! compound (`ci/cd`) that also matches when every part appears on its own.
//! Single-letter terms are context-gated, and a handful of generic recruiting
//! words can be suppressed when the document reads like a job advert.

use std::collections::HashSet;
use std::path::Path;
use std::sync::LazyLock;

use anyhow::{Context, Result};
use regex::Regex;
use tracing::warn;

const BUNDLED_SKILLS: &str = include_str!("../../data/skills_list.txt");

/// Single-letter terms and the co-occurring vocabulary that confirms them.
const CONTEXT_GATES: &[(&str, &str)] = &[
    (
        "r",
        r"\b(rstudio|tidyverse|ggplot2|r programming|r langage|langage r)\b",
    ),
    (
        "c",
        r"\b(c programming|embedded systems|c langage|langage c|gcc|clang|pointers|memory management)\b",
    ),
];

/// Generic job-ad words that are not skills when the text is recruiting copy.
const BOILERPLATE_TERMS: &[&str] = &["hiring", "recruiting", "job", "vacancy"];

static BOILERPLATE_CONTEXTS: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    [
        r"\bwe are hiring\b",
        r"\bjoin our team\b",
        r"\bapply now\b",
        r"\bwe are recruiting\b",
        r"\blooking for\b",
        r"\bjob opening\b",
        r"\bvacancy\b",
    ]
    .iter()
    .map(|p| Regex::new(p).expect("valid boilerplate regex"))
    .collect()
});

static RE_NON_TERM_CHARS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s/]").expect("valid term regex"));

/// One dictionary term with its precompiled matchers.
#[derive(Debug, Clone)]
pub struct SkillEntry {
    term: String,
    pattern: Regex,
    parts: Vec<Regex>,
    gate: Option<Regex>,
    boilerplate: bool,
}

impl SkillEntry {
    fn new(term: &str) -> Result<Self> {
        let lower = term.to_lowercase();
        let phrase = folded_phrase(term);
        anyhow::ensure!(!phrase.is_empty(), "term has no word characters");
        let pattern = word_regex(&phrase)?;

        let parts = if phrase.contains('/') {
            phrase
                .split('/')
                .map(str::trim)
                .filter(|p| !p.is_empty())
                .map(word_regex)
                .collect::<Result<Vec<_>>>()?
        } else {
            Vec::new()
        };

        let gate = CONTEXT_GATES
            .iter()
            .find(|(gated, _)| *gated == phrase)
            .map(|(_, context)| Regex::new(context))
            .transpose()?;

        Ok(Self {
            term: term.to_string(),
            pattern,
            parts,
            gate,
            boilerplate: BOILERPLATE_TERMS.contains(&lower.as_str()),
        })
    }

    /// The term as listed, e.g. `machine_learning`.
    pub fn term(&self) -> &str {
        &self.term
    }

    /// The term as shown to users, e.g. `machine learning`.
    pub fn display(&self) -> String {
        self.term.replace('_', " ")
    }

    pub fn is_compound(&self) -> bool {
        !self.parts.is_empty()
    }

    pub fn is_context_gated(&self) -> bool {
        self.gate.is_some()
    }

    pub fn is_boilerplate(&self) -> bool {
        self.boilerplate
    }

    /// Whether the entry is present in `text`, which must already be normalized.
    ///
    /// `suppress_boilerplate` is the document-wide recruiting-copy flag.
    pub fn matches(&self, text: &str, suppress_boilerplate: bool) -> bool {
        if let Some(gate) = &self.gate {
            if !gate.is_match(text) {
                return false;
            }
        }
        if self.boilerplate && suppress_boilerplate {
            return false;
        }
        if self.pattern.is_match(text) {
            return true;
        }
        self.is_compound() && self.parts.iter().all(|p| p.is_match(text))
    }
}

/// Ordered, deduplicated collection of skill entries.
#[derive(Debug, Clone)]
pub struct SkillDictionary {
    entries: Vec<SkillEntry>,
}

impl SkillDictionary {
    /// Builds a dictionary from raw terms; the first spelling of a duplicate term is kept.
    pub fn from_terms<'a, I>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut seen = HashSet::new();
        let mut entries = Vec::new();
        for term in terms {
            let term = term.trim();
            if term.is_empty() || !seen.insert(term.to_lowercase()) {
                continue;
            }
            // `++` or `_` fold to nothing and would match every document.
            if folded_phrase(term).is_empty() {
                warn!(term, "Skipping skill term without word characters");
                continue;
            }
            entries.push(
                SkillEntry::new(term).with_context(|| format!("invalid skill term '{term}'"))?,
            );
        }
        Ok(Self { entries })
    }

    /// Parses the whitespace-separated list format.
    pub fn parse(list: &str) -> Result<Self> {
        Self::from_terms(list.split_whitespace())
    }

    /// The dictionary compiled into the binary.
    pub fn bundled() -> Result<Self> {
        Self::parse(BUNDLED_SKILLS)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read skill dictionary {}", path.display()))?;
        Self::parse(&raw)
    }

    pub fn entries(&self) -> &[SkillEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// True when any recruiting boilerplate phrase appears anywhere in the normalized text.
pub fn has_recruiting_boilerplate(text: &str) -> bool {
    BOILERPLATE_CONTEXTS.iter().any(|re| re.is_match(text))
}

/// Lowercase phrase a term is matched as, after `_` and punctuation folding.
/// `c++` and `c#` fold to `c` and so share its context gate.
fn folded_phrase(term: &str) -> String {
    normalize_phrase(&term.to_lowercase().replace('_', " "))
}

/// Applies the same punctuation folding as the text side so `vue.js` matches `vue js`.
fn normalize_phrase(phrase: &str) -> String {
    RE_NON_TERM_CHARS
        .replace_all(phrase, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn word_regex(phrase: &str) -> Result<Regex> {
    Ok(Regex::new(&format!(r"\b{}\b", regex::escape(phrase)))?)
}
