mod auth;
mod config;
mod document;
mod errors;
mod jobs;
mod llm_client;
mod models;
mod routes;
mod screening;
mod state;
mod store;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::http::HeaderValue;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::auth::JwtService;
use crate::config::Config;
use crate::llm_client::{CompletionBackend, LlmClient};
use crate::routes::build_router;
use crate::screening::extractor::{LlmResumeExtractor, PlaceholderResumeExtractor, ResumeExtractor};
use crate::screening::profile::{
    LlmProfileGenerator, PlaceholderProfileGenerator, StandardProfileGenerator,
};
use crate::state::AppState;
use crate::store::ProfileStore;

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

    info!("Starting SuperHire API v{}", env!("CARGO_PKG_VERSION"));

    // Screening strategies: LLM-backed when a key is configured, placeholders otherwise
    let (extractor, profiles): (Arc<dyn ResumeExtractor>, Arc<dyn StandardProfileGenerator>) =
        match &config.anthropic_api_key {
            Some(key) => {
                let llm: Arc<dyn CompletionBackend> =
                    Arc::new(LlmClient::new(key.clone(), config.llm_timeout)?);
                info!(
                    "LLM client initialized (model: {}, timeout: {:?})",
                    llm_client::MODEL,
                    config.llm_timeout
                );
                (
                    Arc::new(LlmResumeExtractor::new(llm.clone())),
                    Arc::new(LlmProfileGenerator::new(llm)),
                )
            }
            None => {
                warn!("ANTHROPIC_API_KEY not set; using placeholder resume extraction and profiles");
                (
                    Arc::new(PlaceholderResumeExtractor),
                    Arc::new(PlaceholderProfileGenerator),
                )
            }
        };
    info!(
        "Screening backends: extractor={}, profiles={}",
        extractor.backend(),
        profiles.backend()
    );

    // Build app state
    let state = AppState {
        store: Arc::new(ProfileStore::new()),
        extractor,
        profiles,
        jwt: Arc::new(JwtService::new(&config.jwt_secret)),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(build_cors(&config)?);

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_cors(config: &Config) -> Result<CorsLayer> {
    let origins = config
        .cors_origins
        .iter()
        .map(|origin| {
            origin
                .parse::<HeaderValue>()
                .with_context(|| format!("Invalid CORS origin '{origin}'"))
        })
        .collect::<Result<Vec<_>>>()?;
    info!("CORS origins: {:?}", config.cors_origins);

    Ok(CorsLayer::new()
        .allow_origin(origins)
        .allow_methods(tower_http::cors::Any)
        .allow_headers(tower_http::cors::Any))
}
