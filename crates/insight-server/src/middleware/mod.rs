//! Middleware stack para el servidor HTTP.
//!
//! Se aplica a todas las requests:
//! - `SetRequestIdLayer` / `PropagateRequestIdLayer`: genera o propaga X-Request-Id
//! - `TraceLayer`: logging estructurado con el request id en el span

use axum::{Router, body::Body, http::{HeaderName, Request}};
use tower::ServiceBuilder;
use tower_http::{
    LatencyUnit,
    cors::CorsLayer,
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::{DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::{Level, Span, info_span};

/// Header name for request ID.
pub static REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Wraps `router` with the request id and tracing layers.
pub fn with_middleware(router: Router) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::new(
                REQUEST_ID_HEADER.clone(),
                MakeRequestUuid,
            ))
            .layer(
                TraceLayer::new_for_http()
                    .make_span_with(make_request_span)
                    .on_request(DefaultOnRequest::new().level(Level::DEBUG))
                    .on_response(
                        DefaultOnResponse::new()
                            .level(Level::INFO)
                            .latency_unit(LatencyUnit::Millis),
                    ),
            )
            .layer(PropagateRequestIdLayer::new(REQUEST_ID_HEADER.clone())),
    )
}

/// Adds permissive CORS headers.
pub fn with_cors(router: Router) -> Router {
    router.layer(CorsLayer::permissive())
}

fn make_request_span(request: &Request<Body>) -> Span {
    // Set by SetRequestIdLayer, which runs first
    let request_id = request
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown");

    info_span!(
        "http_request",
        request_id = %request_id,
        method = %request.method(),
        path = %request.uri().path(),
    )
}
