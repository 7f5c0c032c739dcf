use axum::Json;
use serde::Serialize;

/// Liveness body. Does not touch the node or the ticker, so the service
/// reports UP even while its upstreams are down.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

impl HealthResponse {
    pub const UP: Self = Self { status: "UP" };
}

/// GET /health
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::UP)
}
