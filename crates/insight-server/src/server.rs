use std::net::SocketAddr;

use axum::{Router, middleware, routing::get};
use metrics_exporter_prometheus::PrometheusHandle;

use crate::handlers::{
    api, currency::get_currency, health::health_check, metrics::metrics_handler, status,
};
use crate::middleware::{with_cors, with_middleware};
use crate::settings::ServerSettings;
use crate::state::AppState;

/// Creates the explorer routes without the `/metrics` endpoint.
pub fn create_app_router(state: AppState) -> Router {
    let app_router = Router::new()
        .route("/health", get(health_check))
        .route("/currency", get(get_currency))
        // Status routes
        .route("/status", get(status::show_status))
        .route("/sync", get(status::sync))
        .route("/peer", get(status::peer))
        .route("/version", get(status::version))
        // Raw node passthrough
        .route("/api/coinsupply", get(api::coin_supply))
        .route("/api/getblockcount", get(api::block_count))
        .route("/api/getblock", get(api::block))
        .route("/api/getblockhash", get(api::block_hash))
        .route("/api/getdifficulty", get(api::difficulty))
        .route("/api/getnetworkhashps", get(api::network_hash_ps))
        .route("/api/getpeerinfo", get(api::peer_info))
        .with_state(state);

    instrument(app_router)
}

/// Creates a router with the given application state and metrics handle.
pub fn create_router_with_state(state: AppState, prometheus_handle: PrometheusHandle) -> Router {
    // Router for metrics endpoint (different state)
    let metrics_router = Router::new()
        .route("/metrics", get(metrics_handler))
        .with_state(prometheus_handle);

    Router::new()
        .merge(create_app_router(state))
        .merge(instrument(metrics_router))
}

/// Creates a router without state (for testing only - health endpoint).
pub fn create_router() -> Router {
    instrument(Router::new().route("/health", get(health_check)))
}

fn instrument(router: Router) -> Router {
    with_middleware(router.layer(middleware::from_fn(
        crate::metrics::http::http_metrics_middleware,
    )))
}

/// Runs the server with the given state and metrics handle.
pub async fn run_server_with_state(
    settings: &ServerSettings,
    addr: SocketAddr,
    state: AppState,
    prometheus_handle: PrometheusHandle,
) -> Result<(), std::io::Error> {
    let mut app = create_router_with_state(state, prometheus_handle);
    if settings.cors {
        app = with_cors(app);
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Server listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
