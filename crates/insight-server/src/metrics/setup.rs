//! Metrics setup and initialization.

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tracing::info;

use super::http::register_http_metrics;

/// Inicializa el sistema de metricas y retorna el handle para el endpoint.
///
/// Instala el recorder global, por lo que solo debe llamarse una vez.
pub fn init_metrics() -> Result<PrometheusHandle, BuildError> {
    // Buckets en segundos; el ticker y el nodo responden en 10ms..10s
    let handle = PrometheusBuilder::new()
        .set_buckets(&[0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0])?
        .install_recorder()?;

    register_http_metrics();
    insight_cache::register_cache_metrics();

    info!("Metrics system initialized");
    Ok(handle)
}
