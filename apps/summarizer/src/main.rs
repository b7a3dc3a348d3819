mod assessment;
mod config;
mod errors;
mod llm_client;
mod routes;
mod spreadsheet;
mod state;
mod summary;

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;
use crate::summary::assembler::PromptAssembler;
use crate::summary::batch::BatchDriver;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on malformed env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting summarizer v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let gemini = GeminiClient::new(config.llm_request_timeout)
        .context("Failed to build the Gemini HTTP client")?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);
    if config.default_api_key.is_none() {
        info!("GEMINI_API_KEY not set; every request must supply its own key");
    }

    // The instruction document is rendered once and shared by every batch
    let assembler = PromptAssembler::new();
    info!(
        "Instruction document ready ({} chars)",
        assembler.instructions().len()
    );

    let driver = BatchDriver::new(assembler, Arc::new(gemini), config.row_timeout);

    // Build app state
    let state = AppState {
        driver,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict allowed origins once the upload UI has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
