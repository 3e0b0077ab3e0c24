mod analytics;
mod config;
mod errors;
mod hr;
mod jobs;
mod llm_client;
mod models;
mod notifications;
mod resume;
mod routes;
mod scheduling;
mod screening;
mod state;
mod store;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::{ChatModel, LlmClient};
use crate::routes::build_router;
use crate::screening::scoring::WeightedScorer;
use crate::state::AppState;
use crate::store::JsonStore;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Recruit API v{}", env!("CARGO_PKG_VERSION"));

    config.ensure_dirs().await?;
    let store = JsonStore::new(&config.data_dir);
    info!("JSON store at {}", config.data_dir.display());

    // Chat stays off without an API key; everything else works offline.
    let chat: Option<Arc<dyn ChatModel>> = match &config.google_api_key {
        Some(key) => {
            let client = LlmClient::new(
                key.clone(),
                config.llm_model.clone(),
                config.llm_temperature,
                config.llm_max_tokens,
            )?;
            info!("LLM client initialized (model: {})", client.model());
            Some(Arc::new(client))
        }
        None => {
            warn!("GOOGLE_API_KEY not set; resume chat is disabled");
            None
        }
    };

    let state = AppState {
        store,
        config: config.clone(),
        scorer: Arc::new(WeightedScorer),
        chat,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once a frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
