use std::path::PathBuf;

use anyhow::{Context, Result};

/// Service configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the model server hosting similarity, vectorizer, classifiers and translation.
    pub model_server_url: String,
    /// JSON table of skill embeddings (`{ "term": [f32, ...] }`).
    pub skill_vectors_path: PathBuf,
    /// Optional replacement for the bundled skill dictionary.
    pub skill_dictionary_path: Option<PathBuf>,
    pub model_timeout_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            model_server_url: require_env("MODEL_SERVER_URL")?,
            skill_vectors_path: PathBuf::from(require_env("SKILL_VECTORS_PATH")?),
            skill_dictionary_path: std::env::var("SKILL_DICTIONARY_PATH")
                .ok()
                .filter(|p| !p.trim().is_empty())
                .map(PathBuf::from),
            model_timeout_secs: std::env::var("MODEL_TIMEOUT_SECS")
                .unwrap_or_else(|_| "60".to_string())
                .parse::<u64>()
                .context("MODEL_TIMEOUT_SECS must be a whole number of seconds")?,
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
