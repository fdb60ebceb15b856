//! Soft-skill extraction and canonicalization (French and English vocabulary).
//!
//! The canonical mapping is declared as an ordered list of `(alias, tag)` pairs
//! and folded into a map in declaration order, so a later definition of the
//! same alias replaces an earlier one. Several aliases are deliberately
//! declared more than once; the last declaration is the one in effect.

use std::collections::{BTreeSet, HashMap};
use std::sync::LazyLock;

use regex::Regex;

use crate::extraction::normalize::collapse_whitespace;

/// Raw alias → canonical tag, applied in order (last write wins).
const CANONICAL_PAIRS: &[(&str, &str)] = &[
    ("team coordination", "coordination d’équipe"),
    ("coordination d’équipe", "coordination d’équipe"),
    ("client relationship", "sens du service"),
    ("relation client", "sens du service"),
    ("problem-solving", "résolution de problèmes"),
    ("problem solving", "résolution de problèmes"),
    ("résolution de problèmes", "résolution de problèmes"),
    ("resource management", "gestion des priorités"),
    ("gestion des priorités", "gestion des priorités"),
    ("teamwork", "travail en équipe"),
    ("travail en équipe", "esprit d'équipe"),
    ("travailler en équipe", "esprit d'équipe"),
    ("active listening", "écoute active"),
    ("écoute active", "écoute active"),
    ("time management", "gestion du temps"),
    ("gestion du temps", "gestion du temps"),
    ("analytical thinking", "esprit d’analyse"),
    ("esprit analytique", "esprit d’analyse"),
    ("esprit d’analyse", "esprit d’analyse"),
    ("esprit d'analyse", "esprit d’analyse"),
    ("initiative", "prise d’initiative"),
    ("prise d’initiative", "prise d’initiative"),
    ("attention to detail", "sens du détail"),
    ("sens du détail", "sens du détail"),
    ("autonomy", "autonomie"),
    ("analytical mindset", "esprit d’analyse"),
    ("curious", "curiosité"),
    ("curiosity", "curiosité"),
    ("curiosité", "curiosité"),
    ("passionate", "passionné(e)"),
    ("passion", "passion"),
    ("passionné", "passionné"),
    ("passionnée", "passionnée"),
    ("curiosité", "curieux"),
    ("curiosité", "curieuse"),
    ("leadership", "leadership"),
    ("créativité", "créativité"),
    ("creativity", "créativité"),
    ("créativité", "créative"),
    ("créativité", "creative"),
    ("créativité", "créatif"),
    ("empathie", "empathie"),
    ("empathy", "empathie"),
    ("adaptabilité", "adaptabilité"),
    ("adaptabilité", "rapidité d’adaptation"),
    ("adaptability", "adaptabilité"),
    ("rigueur", "rigueur"),
    ("rigor", "rigueur"),
    ("rigoureuse", "rigueur"),
    ("rigoureux", "rigueur"),
    ("sens du résultat", "sens du résultat"),
    ("réactivité", "réactivité"),
    ("responsiveness", "réactivité"),
    ("reactivity", "réactivité"),
    ("résistance au stress", "résistance au stress"),
    ("stress tolerance", "résistance au stress"),
    ("stress resilience", "résistance au stress"),
    ("ability to handle stress", "résistance au stress"),
    ("working under pressure", "travail sous pression"),
    ("work under pressure", "travail sous pression"),
    ("travail sous pression", "travail sous pression"),
    ("sens de l’organisation", "sens de l’organisation"),
    ("organizational skills", "sens de l’organisation"),
    ("sense of organization", "sens de l’organisation"),
    ("strong organizational skills", "sens de l’organisation"),
    ("organisation", "organisation"),
    ("organisation", "organisée"),
    ("organisation", "organisé"),
    ("organization", "organisation"),
    ("organizational ability", "organisation"),
    ("organizational skills", "organisation"),
    ("amélioration continue", "amélioration continue"),
    ("continuous improvement", "amélioration continue"),
    ("learning new technologies", "apprentissage des nouvelles technologies"),
    ("apprentissage des nouvelles technologies", "apprentissage des nouvelles technologies"),
    ("learn new technologies", "apprentissage des nouvelles technologies"),
    ("technological curiosity", "apprentissage des nouvelles technologies"),
    ("service orientation", "orientation service"),
    ("orientation service", "orientation service"),
    ("ability to manage priorities", "gestion des priorités"),
    ("esprit analytique", "esprit analytique"),
    ("forte discipline", "forte discipline"),
    ("strong discipline", "forte discipline"),
    ("high level of discipline", "forte discipline"),
    ("discipline", "discipline"),
    ("prise de parole en public", "prise de parole en public"),
    ("public speaking", "prise de parole en public"),
    ("compétences en présentation", "compétences en présentation"),
    ("presentation skills", "compétences en présentation"),
    ("ability to present", "compétences en présentation"),
    ("communication interfonctionnelle", "communication interfonctionnelle"),
    ("cross-functional communication", "communication interfonctionnelle"),
    ("interdepartmental communication", "communication interfonctionnelle"),
    ("esprit critique", "esprit critique"),
    ("critical thinking", "esprit critique"),
    ("orientation client", "orientation client"),
    ("customer orientation", "orientation client"),
    ("esprit d’équipe", "esprit d’équipe"),
    ("esprit d'équipe", "esprit d'équipe"),
    ("team spirit", "esprit d'équipe"),
    ("team mindset", "esprit d'équipe"),
    ("collaborative attitude", "esprit d'équipe"),
    ("cross-functional collaboration", "travail en équipe"),
    ("collaboration", "travail en équipe"),
    ("planning", "gestion du temps"),
    ("inventory", "gestion des priorités"),
    ("wise", "esprit critique"),
    ("wisdom", "esprit critique"),
    ("judgment", "esprit critique"),
    ("discernment", "esprit critique"),
    ("flexibility", "flexibilité"),
    ("flexibilité", "flexibilité"),
    ("adaptabilité professionnelle", "flexibilité"),
    ("adaptation rapide", "flexibilité"),
    ("sense of responsibility", "sens des responsabilités"),
    ("responsibility", "sens des responsabilités"),
    ("sens de responsabilité", "sens des responsabilités"),
    ("sens de responsabilité", "sens de responsabilité"),
    ("responsable", "sens des responsabilités"),
    ("disciplinary rigor", "rigueur disciplinaire"),
    ("rigueur disciplinaire", "rigueur disciplinaire"),
    ("discipline professionnelle", "rigueur disciplinaire"),
    ("welcoming attitude", "accueil"),
    ("accueil", "accueil"),
    ("reception skills", "accueil"),
    ("hospitality", "accueil"),
    ("social climate awareness", "gestion du climat social"),
    ("gestion du climat social", "gestion du climat social"),
    ("employee relations sensitivity", "gestion du climat social"),
    ("conflict management", "gestion des conflits"),
    ("gestion des conflits", "gestion des conflits"),
    ("conflict resolution", "gestion des conflits"),
    ("emotional intelligence", "intelligence émotionnelle"),
    ("intelligence émotionnelle", "intelligence émotionnelle"),
    ("emotional awareness", "intelligence émotionnelle"),
    ("professional ethics", "éthique professionnelle"),
    ("éthique professionnelle", "éthique professionnelle"),
    ("work ethics", "éthique professionnelle"),
    ("precision", "précision"),
    ("accuracy", "précision"),
    ("attention to accuracy", "précision"),
    ("précision", "précision"),
    ("autonome", "autonomie"),
    ("flexible", "flexibilité"),
    ("Sens de l’organisation", "organisation"),
    ("capacité d’adaptation", "adaptation"),
    ("capacité d'adaptation", "adaptation"),
    ("capacité de prioriser", "gestion des priorités"),
    ("priority management", "gestion des priorités"),
    ("multitâche", "multitâche"),
    ("sens du service", "sens du service"),
    ("service mindedness", "sens du service"),
    ("gestion du stress", "gestion du stress"),
    ("stress management", "gestion du stress"),
    ("ponctualité", "ponctualité"),
    ("ponctuelle", "ponctualité"),
    ("ponctuel", "ponctualité"),
    ("punctuality", "ponctualité"),
    ("punctual", "ponctualité"),
    ("service orientation", "sens du service"),
    ("confiance en soi", "confiance en soi"),
    ("self-confidence", "confiance en soi"),
    ("self-assurance", "confiance en soi"),
    ("confidence", "confiance en soi"),
    ("sérieuse", "sérieuse"),
    ("sérieux", "sérieux"),
    ("reliable", "sérieu(x/se)"),
    ("serious", "sérieu(x/se)"),
    ("conscientious", "sérieu(x/se)"),
    ("diligent", "sérieu(x/se)"),
    ("adaptable", "adaptabilité"),
    ("dynamisme", "dynamisme"),
    ("dynamique", "dynamisme"),
    ("interpersonal skills", "relationnel"),
    ("interpersonal", "relationnel"),
    ("communication aptitude", "relationnel"),
    ("relationnel", "relationnel"),
    ("reliability", "fiabilité"),
    ("trustworthiness", "fiabilité"),
    ("fiabilité", "fiabilité"),
    ("professionalism", "professionnalisme"),
    ("workplace ethics", "professionnalisme"),
    ("professionnalisme", "professionnalisme"),
    ("polyvalence", "polyvalence"),
    ("polyvalence", "polyvalente"),
    ("polyvalence", "polyvalent"),
];

/// Keywords searched for in the text. Matches are reported under their canonical tag.
const SOFT_KEYWORDS: &[&str] = &[
    // French
    "communication", "travail en équipe", "travailler en équipe", "autonomie", "autonome",
    "adaptabilité", "écoute active", "créative", "créatif", "créativité", "réactivité",
    "rigueur", "rigoureuse", "rigoureux", "esprit analytique", "esprit d’analyse",
    "curiosité", "curieux", "curieuse", "sens du résultat", "gestion du temps", "leadership",
    "résolution de problèmes", "empathie", "prise d’initiative", "résistance au stress",
    "organisée", "organisé", "coordination d’équipe", "gestion des priorités",
    "sens du service", "relation client", "sens de l’organisation", "sens du détail",
    "passion", "passionné", "passionnée", "organisation", "amélioration continue",
    "apprentissage des nouvelles technologies", "orientation service",
    "travail sous pression", "esprit critique", "orientation client", "forte discipline",
    "discipline", "prise de parole en public", "compétences en présentation",
    "communication interfonctionnelle", "esprit d’équipe", "flexibilité",
    "adaptabilité professionnelle", "adaptation rapide", "capacité d’adaptation",
    "capacité de prioriser", "multitâche", "gestion du stress", "sens des responsabilités",
    "sens de responsabilité", "responsable", "rigueur disciplinaire",
    "discipline professionnelle", "flexible", "ponctuelle", "ponctuel", "ponctualité",
    "confiance en soi", "sérieuse", "sérieux", "adaptable", "dynamisme", "dynamique",
    "relationnel", "fiabilité", "professionnalisme", "rapidité d’adaptation",
    "polyvalence", "polyvalente", "polyvalent", "accueil", "gestion du climat social",
    "gestion des conflits", "intelligence émotionnelle", "éthique professionnelle",
    "précision",
    // English
    "teamwork", "team spirit", "adaptability", "active listening", "time management",
    "problem solving", "problem-solving", "responsiveness", "reactivity", "creativity",
    "creative", "initiative", "empathy", "analytical thinking", "analytical mindset",
    "team coordination", "stress tolerance", "stress resilience", "ability to handle stress",
    "working under pressure", "work under pressure", "client relationship",
    "resource management", "autonomy", "curious", "curiosity", "passionate",
    "organizational skills", "strong organizational skills", "sense of organization",
    "organization", "organizational ability", "continuous improvement",
    "learning new technologies", "learn new technologies", "technological curiosity",
    "rigor", "service orientation", "ability to manage priorities", "strong discipline",
    "high level of discipline", "public speaking", "presentation skills",
    "ability to present", "cross-functional communication", "interdepartmental communication",
    "critical thinking", "customer orientation", "team mindset", "collaborative attitude",
    "cross-functional collaboration", "collaboration", "planning", "inventory", "wise",
    "wisdom", "judgment", "discernment", "flexibility", "sense of responsibility",
    "responsibility", "disciplinary rigor", "welcoming attitude", "reception skills",
    "hospitality", "social climate awareness", "employee relations sensitivity",
    "conflict management", "conflict resolution", "emotional intelligence",
    "emotional awareness", "professional ethics", "work ethics", "precision", "accuracy",
    "attention to accuracy", "attention to detail", "service mindedness",
    "stress management", "priority management", "punctuality", "punctual",
    "self-confidence", "self-assurance", "confidence", "reliable", "serious",
    "conscientious", "diligent", "interpersonal skills", "interpersonal",
    "communication aptitude", "reliability", "trustworthiness", "professionalism",
    "workplace ethics",
];

/// Lead-in phrases whose trailing clause is an explicit list of skills.
const TRIGGERS: &[&str] = &[
    "compétences en",
    "maîtrise de",
    "expérience en",
    "skills in",
    "proficiency in",
    "experience in",
];

static RE_CLAUSE_SPLIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[,\n;]| et | ainsi que | and ").expect("valid clause split regex")
});

/// Unifies typographic apostrophes so `d’équipe` and `d'équipe` compare equal.
pub fn unify_apostrophes(text: &str) -> String {
    text.replace(['’', '‘', '`'], "'")
}

/// Alias → canonical tag table with identity fallback.
#[derive(Debug, Clone)]
pub struct CanonicalMapping {
    table: HashMap<String, String>,
}

impl CanonicalMapping {
    /// Folds pairs into a map in order; a repeated alias keeps its last tag.
    ///
    /// Aliases keep their declared case while lookups are lowercased, so an
    /// alias declared with capitals is never reached.
    pub fn from_pairs<'a, I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut table = HashMap::new();
        for (alias, canonical) in pairs {
            table.insert(
                unify_apostrophes(alias.trim()),
                canonical.trim().to_string(),
            );
        }
        Self { table }
    }

    pub fn bundled() -> Self {
        Self::from_pairs(CANONICAL_PAIRS.iter().copied())
    }

    /// Canonical tag for `raw`, or `raw` lowercased when it has no mapping.
    pub fn canonicalize(&self, raw: &str) -> String {
        let key = unify_apostrophes(raw.trim()).to_lowercase();
        self.table.get(&key).cloned().unwrap_or(key)
    }

    pub fn len(&self) -> usize {
        self.table.len()
    }
}

/// Soft-skill keyword set plus its canonical mapping, compiled once.
#[derive(Debug, Clone)]
pub struct SoftSkillCatalog {
    keywords: Vec<(String, Regex)>,
    triggers: Vec<Regex>,
    mapping: CanonicalMapping,
}

impl SoftSkillCatalog {
    pub fn new(keywords: &[&str], mapping: CanonicalMapping) -> Result<Self, regex::Error> {
        let keywords = keywords
            .iter()
            .map(|kw| unify_apostrophes(kw.trim()).to_lowercase())
            .filter(|kw| !kw.is_empty())
            .map(|kw| {
                let re = Regex::new(&format!(r"\b{}\b", regex::escape(&kw)))?;
                Ok((kw, re))
            })
            .collect::<Result<Vec<_>, regex::Error>>()?;

        let triggers = TRIGGERS
            .iter()
            .map(|t| Regex::new(&format!(r"{}\s+([^.:\n]+)", regex::escape(t))))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            keywords,
            triggers,
            mapping,
        })
    }

    pub fn bundled() -> Result<Self, regex::Error> {
        Self::new(SOFT_KEYWORDS, CanonicalMapping::bundled())
    }

    pub fn mapping(&self) -> &CanonicalMapping {
        &self.mapping
    }

    /// Extracts canonical soft-skill tags from `text`.
    pub fn extract(&self, text: &str) -> BTreeSet<String> {
        let text = collapse_whitespace(&unify_apostrophes(text).to_lowercase());
        let mut raw: BTreeSet<&str> = BTreeSet::new();

        // Pass 1: clauses introduced by a trigger phrase.
        for trigger in &self.triggers {
            for caps in trigger.captures_iter(&text) {
                for part in RE_CLAUSE_SPLIT.split(&caps[1]) {
                    let part = part.trim();
                    for (kw, re) in &self.keywords {
                        if re.is_match(part) {
                            raw.insert(kw.as_str());
                        }
                    }
                }
            }
        }

        // Pass 2: whole-text scan.
        for (kw, re) in &self.keywords {
            if re.is_match(&text) {
                raw.insert(kw.as_str());
            }
        }

        raw.into_iter()
            .map(|kw| self.mapping.canonicalize(kw))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> SoftSkillCatalog {
        SoftSkillCatalog::bundled().unwrap()
    }

    #[test]
    fn test_last_definition_wins() {
        let mapping = CanonicalMapping::bundled();
        assert_eq!(mapping.canonicalize("curiosité"), "curieuse");
        assert_eq!(mapping.canonicalize("créativité"), "créatif");
        assert_eq!(mapping.canonicalize("polyvalence"), "polyvalent");
        assert_eq!(mapping.canonicalize("service orientation"), "sens du service");
        assert_eq!(mapping.canonicalize("organizational skills"), "organisation");
    }

    #[test]
    fn test_from_pairs_respects_declaration_order() {
        let mapping = CanonicalMapping::from_pairs([("calm", "sérénité"), ("calm", "zen")]);
        assert_eq!(mapping.canonicalize("Calm"), "zen");
        assert_eq!(mapping.len(), 1);
    }

    #[test]
    fn test_capitalised_alias_is_unreachable() {
        let mapping = CanonicalMapping::bundled();
        assert_eq!(
            mapping.canonicalize("sens de l’organisation"),
            "sens de l’organisation"
        );
        assert_eq!(
            mapping.canonicalize("Sens de l’organisation"),
            mapping.canonicalize("sens de l’organisation")
        );

        let mapping = CanonicalMapping::from_pairs([("calm", "sérénité"), ("Calm", "zen")]);
        assert_eq!(mapping.canonicalize("calm"), "sérénité");
        assert_eq!(mapping.canonicalize("CALM"), "sérénité");
    }

    #[test]
    fn test_unmapped_term_passes_through() {
        let mapping = CanonicalMapping::bundled();
        assert_eq!(mapping.canonicalize("communication"), "communication");
    }

    #[test]
    fn test_apostrophe_variants_share_a_key() {
        let mapping = CanonicalMapping::bundled();
        assert_eq!(mapping.canonicalize("esprit d’analyse"), "esprit d’analyse");
        assert_eq!(mapping.canonicalize("esprit d'analyse"), "esprit d’analyse");
    }

    #[test]
    fn test_english_synonyms_canonicalize_to_french_tags() {
        let skills = catalog().extract("Strong teamwork, critical thinking and time management.");
        assert!(skills.contains("travail en équipe"));
        assert!(skills.contains("esprit critique"));
        assert!(skills.contains("gestion du temps"));
    }

    #[test]
    fn test_trigger_clause_is_split_on_separators() {
        let skills = catalog().extract("Compétences en communication, rigueur et autonomie.");
        let expected: BTreeSet<String> = ["autonomie", "communication", "rigueur"]
            .into_iter()
            .map(String::from)
            .collect();
        assert_eq!(skills, expected);
    }

    #[test]
    fn test_typographic_apostrophe_in_text_matches() {
        let skills = catalog().extract("Un vrai esprit d’équipe");
        assert!(skills.contains("esprit d'équipe"));
    }

    #[test]
    fn test_word_boundaries_prevent_partial_hits() {
        // "wise" must not fire inside "otherwise"
        let skills = catalog().extract("otherwise unremarkable");
        assert!(skills.is_empty());
    }

    #[test]
    fn test_no_soft_skills_in_technical_text() {
        assert!(catalog().extract("python sql docker kubernetes").is_empty());
    }
}
