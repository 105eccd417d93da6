mod analysis;
mod config;
mod dashboard;
mod errors;
mod insight;
mod llm_client;
mod models;
mod routes;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::analyzer::JobAnalyzer;
use crate::analysis::cleaner::CleanOptions;
use crate::analysis::vocabulary::Vocabulary;
use crate::config::{Config, StoreBackend};
use crate::insight::llm::LlmInsightBackend;
use crate::insight::{InsightBackend, InsightGenerator};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::store::{InMemoryStore, JsonFileStore, ResultStore};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobLens API v{}", env!("CARGO_PKG_VERSION"));

    // Keyword vocabularies, loaded once and shared read-only
    let vocabulary = match &config.vocabulary_file {
        Some(path) => Vocabulary::from_file(path)?,
        None => Vocabulary::default(),
    };
    info!(
        "Vocabulary: {} technical, {} soft skill keywords",
        vocabulary.technical_skills.len(),
        vocabulary.soft_skills.len()
    );

    let store = build_store(&config);
    let insight = build_insight_generator(&config)?;

    let analyzer = JobAnalyzer::new(
        Arc::new(vocabulary),
        CleanOptions {
            remove_urls: config.remove_urls,
            remove_emails: config.remove_emails,
        },
        insight,
        store,
    );

    let state = AppState {
        analyzer: Arc::new(analyzer),
    };

    let app = build_router(state).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(CorsLayer::permissive()),
    );

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_store(config: &Config) -> Arc<dyn ResultStore> {
    match config.store_backend {
        StoreBackend::File => {
            let store = JsonFileStore::new(config.data_file.clone());
            info!("Result store: JSON file at {}", store.path().display());
            Arc::new(store)
        }
        StoreBackend::Memory => {
            warn!("Result store: in-memory, results are lost on restart");
            Arc::new(InMemoryStore::new())
        }
    }
}

/// The LLM backend is optional; without an API key every insight is the fallback.
fn build_insight_generator(config: &Config) -> Result<InsightGenerator> {
    let Some(api_key) = config.anthropic_api_key.clone() else {
        info!("ANTHROPIC_API_KEY not set, insights use the templated fallback");
        return Ok(InsightGenerator::fallback_only());
    };

    let llm = LlmClient::new(api_key, config.insight_timeout)?;
    let backend: Arc<dyn InsightBackend> = Arc::new(LlmInsightBackend::new(llm));
    info!(
        "Insight backend: {} (timeout {}s)",
        llm_client::MODEL,
        config.insight_timeout.as_secs()
    );
    Ok(InsightGenerator::new(Some(backend), config.insight_timeout))
}
