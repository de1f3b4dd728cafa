mod config;
mod errors;
mod export;
mod gateway;
mod llm_client;
mod models;
mod routes;
mod state;
mod workspace;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::gateway::ResumeGateway;
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::workspace::Workspace;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on a missing GEMINI_API_KEY)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume Studio API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the text-generation client
    let llm = LlmClient::new(
        config.gemini_api_key.clone(),
        config.gemini_model.clone(),
        config.gemini_api_base.clone(),
    )
    .context("Failed to build the AI service HTTP client")?;
    info!("LLM client initialized (model: {})", llm.model());

    // Build app state
    let state = AppState {
        gateway: ResumeGateway::new(Arc::new(llm)),
        workspace: Arc::new(Workspace::new()),
        config: config.clone(),
    };

    // Build router
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
