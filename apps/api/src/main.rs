mod analysis;
mod config;
mod document;
mod errors;
mod llm_client;
mod routes;
mod state;
#[cfg(test)]
mod test_support;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::analysis::Analyzer;
use crate::config::Config;
use crate::document::LopdfReader;
use crate::llm_client::GeminiClient;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting ATS API v{}", env!("CARGO_PKG_VERSION"));

    // Text-generation backend. No key here; every request authenticates on its own.
    let gemini = GeminiClient::new(
        config.gemini_base_url.clone(),
        config.gemini_model.clone(),
        config.backend_policy(),
    )?;
    info!(
        "Gemini client initialized (model: {}, timeout: {:?}, retries: {})",
        gemini.model(),
        config.backend_timeout,
        config.backend_max_retries
    );

    let state = AppState {
        analyzer: Analyzer::new(Arc::new(LopdfReader), Arc::new(gemini)),
        config: config.clone(),
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
