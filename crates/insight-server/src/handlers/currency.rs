//! Currency endpoint.

use axum::{Json, extract::State};
use tracing::instrument;

use crate::error::AppError;
use crate::handlers::response::CurrencyResponse;
use crate::state::AppState;

/// GET /currency
///
/// Serves the cached USD rate. Once a rate has been fetched it is served
/// (stale if need be) even while the ticker is down; before that, a ticker
/// failure is a 503.
#[instrument(skip(state))]
pub async fn get_currency(
    State(state): State<AppState>,
) -> Result<Json<CurrencyResponse>, AppError> {
    let rate = state.rate().get().await?;

    Ok(Json(CurrencyResponse::ok(rate)))
}
