// =============================================================================
// ta-snapshot — Main Entry Point
// =============================================================================
//
// Serves one analysis endpoint: fetch a price series for a ticker, run the
// technical-analysis pipeline over it, return the summary as JSON.
// =============================================================================

// ── Module declarations ──────────────────────────────────────────────────────
mod analysis;
mod api;
mod app_state;
mod error;
mod indicators;
mod market_data;
mod provider;
mod runtime_config;
mod types;

use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::app_state::AppState;
use crate::provider::YahooChartClient;
use crate::runtime_config::RuntimeConfig;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // ── 1. Environment & config ──────────────────────────────────────────
    let _ = dotenv::dotenv();

    let config_path = std::env::var("TA_CONFIG").unwrap_or_else(|_| "ta_config.json".into());
    let (mut config, load_error) = match RuntimeConfig::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (RuntimeConfig::default(), Some(e)),
    };
    config.apply_env_overrides();

    // ── 2. Logging ───────────────────────────────────────────────────────
    let default_level = if config.debug { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();

    if let Some(e) = load_error {
        warn!(path = %config_path, error = %e, "Failed to load config, using defaults");
    }

    config.validate()?;

    info!(
        bind_addr = %config.bind_addr,
        provider = %config.provider.base_url,
        interval = %config.provider.interval,
        debug = config.debug,
        "ta-snapshot starting"
    );

    // ── 3. Provider & shared state ───────────────────────────────────────
    let provider =
        YahooChartClient::new(&config.provider).context("failed to build chart API client")?;
    let bind_addr = config.bind_addr.clone();
    let state = Arc::new(AppState::new(config, Arc::new(provider)));

    // ── 4. API server ────────────────────────────────────────────────────
    let app = api::rest::router(state);
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind API server on {bind_addr}"))?;
    info!(addr = %bind_addr, "API server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("API server failed")?;

    info!("ta-snapshot shut down complete.");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        // Without a signal handler the server runs until the process is killed.
        error!(error = %e, "failed to listen for Ctrl+C");
        std::future::pending::<()>().await;
    }
    warn!("Shutdown signal received, stopping gracefully");
}
