use std::sync::Arc;

use crate::domain::DomainEnsemble;
use crate::extraction::Extractor;
use crate::providers::{LanguageService, SemanticSimilarity, SkillVectors, TextVectorizer};

/// Shared application state injected into all route handlers via Axum extractors.
///
/// Every model behind these handles is loaded once at startup and only read afterwards.
#[derive(Clone)]
pub struct AppState {
    pub extractor: Arc<Extractor>,
    pub semantic: Arc<dyn SemanticSimilarity>,
    pub skill_vectors: Arc<dyn SkillVectors>,
    pub language: Arc<dyn LanguageService>,
    pub vectorizer: Arc<dyn TextVectorizer>,
    pub ensemble: Arc<DomainEnsemble>,
}
