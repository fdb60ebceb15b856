mod config;
mod domain;
mod errors;
mod extraction;
mod matching;
mod providers;
mod routes;
mod state;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::domain::DomainEnsemble;
use crate::extraction::dictionary::SkillDictionary;
use crate::extraction::soft_skills::SoftSkillCatalog;
use crate::extraction::Extractor;
use crate::providers::embedding_table::EmbeddingTable;
use crate::providers::model_client::ModelClient;
use crate::providers::DomainModel;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting TalentMatch API v{}", env!("CARGO_PKG_VERSION"));

    // Skill dictionary (bundled unless overridden) and soft-skill vocabulary
    let dictionary = match &config.skill_dictionary_path {
        Some(path) => SkillDictionary::from_file(path)?,
        None => SkillDictionary::bundled()?,
    };
    info!("Skill dictionary loaded ({} terms)", dictionary.len());
    let soft_skills = SoftSkillCatalog::bundled().context("Invalid soft-skill vocabulary")?;
    info!(
        "Soft-skill catalog loaded ({} canonical aliases)",
        soft_skills.mapping().len()
    );
    let extractor = Arc::new(Extractor::new(dictionary, soft_skills));

    // Skill embeddings, held in memory for the process lifetime
    let skill_vectors = EmbeddingTable::from_json_file(&config.skill_vectors_path)?;
    info!(
        "Skill vectors loaded ({} terms, dimension {})",
        skill_vectors.len(),
        skill_vectors.dimension()
    );

    // Model server client: similarity, vectorizer, classifiers, translation
    let client = Arc::new(ModelClient::new(
        &config.model_server_url,
        Duration::from_secs(config.model_timeout_secs),
    )?);
    info!("Model client initialized ({})", client.base_url());

    let ensemble = DomainEnsemble::from_factory(|classifier| {
        Arc::new(client.classifier(classifier.model_name())) as Arc<dyn DomainModel>
    });

    // Build app state
    let state = AppState {
        extractor,
        semantic: client.clone(),
        skill_vectors: Arc::new(skill_vectors),
        language: client.clone(),
        vectorizer: client,
        ensemble: Arc::new(ensemble),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
