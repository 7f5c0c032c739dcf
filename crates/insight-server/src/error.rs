use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use insight_cache::CacheError;
use insight_node::NodeError;
use serde::Serialize;

#[derive(Debug)]
pub enum AppError {
    /// Bloque o altura inexistente
    NotFound,

    /// Parametros invalidos o rechazados por el nodo
    BadRequest(String),

    /// Dependencia externa no disponible (nodo, ticker)
    Unavailable(String),

    /// Error interno
    Internal(String),
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
    message: String,
}

impl From<NodeError> for AppError {
    fn from(err: NodeError) -> Self {
        if err.is_not_found() {
            return AppError::NotFound;
        }

        let message = err.to_string();
        match err {
            NodeError::Rpc { .. } => AppError::BadRequest(message),
            NodeError::InvalidConfig(_) => AppError::Internal(message),
            _ => {
                tracing::error!(error = %message, "Node request failed");
                AppError::Unavailable(message)
            },
        }
    }
}

impl From<CacheError> for AppError {
    fn from(err: CacheError) -> Self {
        let message = err.to_string();
        match err {
            CacheError::FetchFailed { .. } => AppError::Unavailable(message),
            CacheError::InvalidConfig(_) => AppError::Internal(message),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error, message) = match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "Not Found", "Not found".to_string()),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "Bad Request", msg),
            AppError::Unavailable(msg) => {
                (StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", msg)
            },
            AppError::Internal(msg) => (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Internal Server Error",
                msg,
            ),
        };

        let body = Json(ErrorResponse {
            error: error.to_string(),
            message,
        });

        (status, body).into_response()
    }
}
