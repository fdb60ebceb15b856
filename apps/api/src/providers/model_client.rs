//! Model client: the single point of entry for every remote inference call.
//!
//! Talks JSON to a model server that hosts the sentence-similarity model, the
//! domain vectorizer, the four domain classifiers and the translation stack.
//! Calls are not retried: a failed call is a configuration or availability
//! fault and is surfaced to the caller as-is.

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;

use super::{
    DomainModel, LanguageService, ProviderError, SemanticSimilarity, TextVectorizer,
};

#[derive(Debug, Serialize)]
struct SimilarityRequest<'a> {
    text_a: &'a str,
    text_b: &'a str,
}

#[derive(Debug, Deserialize)]
struct SimilarityResponse {
    score: f64,
}

#[derive(Debug, Serialize)]
struct TextRequest<'a> {
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct VectorizeResponse {
    features: Vec<f32>,
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    features: &'a [f32],
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    label: String,
}

#[derive(Debug, Deserialize)]
struct DetectResponse {
    language: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    text: &'a str,
    source: &'a str,
    target: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ServerError {
    error: String,
}

/// HTTP client for the model server. Cheap to clone; the inner connection pool is shared.
#[derive(Clone)]
pub struct ModelClient {
    client: Client,
    base_url: String,
}

impl ModelClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        anyhow::ensure!(!base_url.trim().is_empty(), "missing model server URL");
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("failed to build model server HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns a classifier handle bound to `/classifiers/{name}/predict`.
    pub fn classifier(&self, name: &str) -> RemoteClassifier {
        RemoteClassifier {
            client: self.clone(),
            name: name.to_string(),
        }
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ProviderError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ServerError>(&body)
                .map(|e| e.error)
                .unwrap_or(body);
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed = response.json::<T>().await?;
        debug!("Model server call succeeded: {path}");
        Ok(parsed)
    }
}

#[async_trait]
impl SemanticSimilarity for ModelClient {
    async fn similarity(&self, text_a: &str, text_b: &str) -> Result<f64, ProviderError> {
        let response: SimilarityResponse = self
            .post_json("/similarity", &SimilarityRequest { text_a, text_b })
            .await?;
        if !response.score.is_finite() {
            return Err(ProviderError::InvalidResponse {
                provider: "similarity",
                reason: format!("non-finite score {}", response.score),
            });
        }
        Ok(response.score)
    }
}

#[async_trait]
impl TextVectorizer for ModelClient {
    async fn vectorize(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        let response: VectorizeResponse =
            self.post_json("/vectorize", &TextRequest { text }).await?;
        if response.features.is_empty() {
            return Err(ProviderError::InvalidResponse {
                provider: "vectorizer",
                reason: "empty feature vector".to_string(),
            });
        }
        Ok(response.features)
    }
}

#[async_trait]
impl LanguageService for ModelClient {
    async fn detect_language(&self, text: &str) -> Result<String, ProviderError> {
        let response: DetectResponse = self
            .post_json("/detect-language", &TextRequest { text })
            .await?;
        Ok(response.language)
    }

    async fn translate(
        &self,
        text: &str,
        source_lang: &str,
        target_lang: &str,
    ) -> Result<String, ProviderError> {
        let response: TranslateResponse = self
            .post_json(
                "/translate",
                &TranslateRequest {
                    text,
                    source: source_lang,
                    target: target_lang,
                },
            )
            .await?;
        Ok(response.text)
    }
}

/// One of the four domain classifiers served by the model server.
#[derive(Clone)]
pub struct RemoteClassifier {
    client: ModelClient,
    name: String,
}

impl RemoteClassifier {
    fn predict_path(&self) -> String {
        format!("/classifiers/{}/predict", self.name)
    }
}

#[async_trait]
impl DomainModel for RemoteClassifier {
    async fn predict(&self, features: &[f32]) -> Result<String, ProviderError> {
        let response: PredictResponse = self
            .client
            .post_json(&self.predict_path(), &PredictRequest { features })
            .await?;
        let label = response.label.trim();
        if label.is_empty() {
            return Err(ProviderError::InvalidResponse {
                provider: "classifier",
                reason: format!("{} returned an empty label", self.name),
            });
        }
        Ok(label.to_string())
    }
}
