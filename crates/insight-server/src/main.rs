//! Insight Explorer API server binary.

use anyhow::Context;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use insight_server::{AppState, Settings, metrics::init_metrics, run_server_with_state};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let settings = Settings::load().context("failed to load settings")?;
    let addr = settings.addr()?;

    tracing::info!(
        "Starting Insight Explorer API v{}",
        env!("CARGO_PKG_VERSION")
    );
    tracing::info!("Node RPC: {}", settings.node.rpc_url);
    tracing::info!(
        "Currency ticker: {} (refresh every {} min)",
        settings.currency.ticker_url,
        settings.currency.refresh_minutes
    );

    let prometheus_handle = init_metrics().context("failed to initialize metrics")?;

    let state = AppState::from_settings(&settings).context("failed to build application state")?;

    // Warm the rate cache; a failure here is retried on the first request
    if let Err(e) = state.rate().get().await {
        tracing::warn!(error = %e, "Initial currency fetch failed");
    }

    run_server_with_state(&settings.server, addr, state, prometheus_handle).await?;

    Ok(())
}
