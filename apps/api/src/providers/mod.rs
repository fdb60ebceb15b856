//! Model providers: the black-box inference services the engine consumes.
//!
//! Every model is reached through one of these traits so the scoring code can be
//! exercised with in-memory fakes. Implementations are built once at startup and
//! shared read-only across requests as `Arc<dyn Trait>`; they must not mutate
//! state on the inference path.

use async_trait::async_trait;
use thiserror::Error;

pub mod embedding_table;
pub mod model_client;

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Model server error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("{provider} returned an invalid response: {reason}")]
    InvalidResponse {
        provider: &'static str,
        reason: String,
    },
}

/// Dense-text similarity between two documents, in `[0, 1]`.
#[async_trait]
pub trait SemanticSimilarity: Send + Sync {
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, ProviderError>;
}

/// Skill embedding lookup. Unknown terms yield `Ok(None)`, not an error.
#[async_trait]
pub trait SkillVectors: Send + Sync {
    async fn skill_vector(&self, term: &str) -> Result<Option<Vec<f32>>, ProviderError>;
}

/// Turns raw text into the feature vector the domain classifiers were trained on.
#[async_trait]
pub trait TextVectorizer: Send + Sync {
    async fn vectorize(&self, text: &str) -> Result<Vec<f32>, ProviderError>;
}

/// A single pretrained domain classifier.
#[async_trait]
pub trait DomainModel: Send + Sync {
    async fn predict(&self, features: &[f32]) -> Result<String, ProviderError>;
}

/// Language detection and machine translation.
#[async_trait]
pub trait LanguageService: Send + Sync {
    /// Returns an ISO 639-1 code such as `"fr"` or `"en"`.
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError>;

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError>;
}

#[cfg(test)]
pub mod fakes {
    //! In-memory providers shared by the unit tests of the scoring modules.

    use std::collections::HashMap;
    use std::sync::Mutex;

    use super::*;

    pub struct FixedSimilarity(pub f64);

    #[async_trait]
    impl SemanticSimilarity for FixedSimilarity {
        async fn similarity(&self, _a: &str, _b: &str) -> Result<f64, ProviderError> {
            Ok(self.0)
        }
    }

    pub struct FailingSimilarity;

    #[async_trait]
    impl SemanticSimilarity for FailingSimilarity {
        async fn similarity(&self, _a: &str, _b: &str) -> Result<f64, ProviderError> {
            Err(ProviderError::Api {
                status: 503,
                message: "similarity model unavailable".to_string(),
            })
        }
    }

    #[derive(Default)]
    pub struct MapVectors(pub HashMap<String, Vec<f32>>);

    impl MapVectors {
        pub fn with(entries: &[(&str, &[f32])]) -> Self {
            Self(
                entries
                    .iter()
                    .map(|(term, v)| (term.to_string(), v.to_vec()))
                    .collect(),
            )
        }
    }

    #[async_trait]
    impl SkillVectors for MapVectors {
        async fn skill_vector(&self, term: &str) -> Result<Option<Vec<f32>>, ProviderError> {
            Ok(self.0.get(term).cloned())
        }
    }

    pub struct FixedVectorizer(pub Vec<f32>);

    #[async_trait]
    impl TextVectorizer for FixedVectorizer {
        async fn vectorize(&self, _text: &str) -> Result<Vec<f32>, ProviderError> {
            Ok(self.0.clone())
        }
    }

    pub struct FixedLabel(pub &'static str);

    #[async_trait]
    impl DomainModel for FixedLabel {
        async fn predict(&self, _features: &[f32]) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    pub struct BrokenModel;

    #[async_trait]
    impl DomainModel for BrokenModel {
        async fn predict(&self, _features: &[f32]) -> Result<String, ProviderError> {
            Err(ProviderError::InvalidResponse {
                provider: "classifier",
                reason: "missing label".to_string(),
            })
        }
    }

    /// Detects French when the text contains "le " and records every translated segment.
    #[derive(Default)]
    pub struct RecordingLanguage {
        pub fail_detection: bool,
        pub translated: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl LanguageService for RecordingLanguage {
        async fn detect_language(&self, text: &str) -> Result<String, ProviderError> {
            if self.fail_detection {
                return Err(ProviderError::Api {
                    status: 500,
                    message: "detector down".to_string(),
                });
            }
            Ok(if text.contains("le ") { "fr" } else { "en" }.to_string())
        }

        async fn translate(
            &self,
            text: &str,
            _source_lang: &str,
            target_lang: &str,
        ) -> Result<String, ProviderError> {
            self.translated
                .lock()
                .expect("translation log poisoned")
                .push(text.to_string());
            Ok(format!("[{target_lang}] {text}"))
        }
    }
}
