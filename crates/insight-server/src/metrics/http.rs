//! HTTP metrics middleware.

use axum::{body::Body, extract::MatchedPath, http::Request, middleware::Next, response::Response};
use metrics::{Unit, counter, histogram};
use std::time::Instant;

const REQUESTS_TOTAL: &str = "insight_http_requests_total";
const REQUEST_DURATION: &str = "insight_http_request_duration_seconds";

/// Registra contador y latencia por ruta, metodo y status.
///
/// Usa la ruta del router (`/api/getblock`) y no la URI, para que los
/// parametros no generen series nuevas.
pub async fn http_metrics_middleware(
    matched_path: Option<MatchedPath>,
    request: Request<Body>,
    next: Next,
) -> Response {
    let started = Instant::now();
    let route = matched_path
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());
    let method = request.method().as_str().to_owned();

    let response = next.run(request).await;
    let elapsed = started.elapsed().as_secs_f64();

    histogram!(REQUEST_DURATION, "method" => method.clone(), "path" => route.clone())
        .record(elapsed);
    counter!(
        REQUESTS_TOTAL,
        "method" => method,
        "path" => route,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

/// Describe las metricas HTTP para el exporter.
pub fn register_http_metrics() {
    metrics::describe_counter!(REQUESTS_TOTAL, Unit::Count, "HTTP requests served");
    metrics::describe_histogram!(
        REQUEST_DURATION,
        Unit::Seconds,
        "Time from request received to response produced"
    );
}
