//! Raw node passthrough endpoints under `/api`.

use axum::{
    Json,
    extract::{RawQuery, State},
    response::{IntoResponse, Response},
};
use insight_node::CoinSupply;
use serde_json::Value;
use tracing::instrument;

use crate::error::AppError;
use crate::extractors::param_value;
use crate::handlers::response::InvalidParamResponse;
use crate::state::AppState;

/// Heights this long can't be real and are rejected before reaching the node.
const MAX_INDEX_LEN: usize = 40;

/// GET /api/coinsupply
pub async fn coin_supply(State(state): State<AppState>) -> Result<Json<CoinSupply>, AppError> {
    Ok(Json(state.chain().coin_supply().await?))
}

/// GET /api/getblockcount
pub async fn block_count(State(state): State<AppState>) -> Result<Json<u64>, AppError> {
    Ok(Json(state.chain().block_count().await?))
}

/// GET /api/getblock?hash=
#[instrument(skip(state))]
pub async fn block(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let Some(hash) = param_value(query.as_deref(), "hash") else {
        return Ok(Json(InvalidParamResponse::default()).into_response());
    };

    let block = state.chain().block(&hash).await?;
    Ok(Json(block).into_response())
}

/// GET /api/getblockhash?index=
#[instrument(skip(state))]
pub async fn block_hash(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, AppError> {
    let Some(height) = param_value(query.as_deref(), "index").and_then(|i| parse_height(&i))
    else {
        return Ok(Json(InvalidParamResponse::default()).into_response());
    };

    let hash = state.chain().block_hash(height).await?;
    Ok(Json(hash).into_response())
}

/// GET /api/getdifficulty
///
/// Difficulty is returned as a JSON string.
pub async fn difficulty(State(state): State<AppState>) -> Result<Json<String>, AppError> {
    let info = state.chain().info().await?;

    Ok(Json(js_number_string(info.difficulty)))
}

/// GET /api/getnetworkhashps
pub async fn network_hash_ps(State(state): State<AppState>) -> Result<Json<f64>, AppError> {
    Ok(Json(state.chain().mining_info().await?.networkhashps))
}

/// GET /api/getpeerinfo
pub async fn peer_info(State(state): State<AppState>) -> Result<Json<Vec<Value>>, AppError> {
    Ok(Json(state.chain().peer_info().await?))
}

/// Formats `value` the way explorer clients print numbers: positional
/// from 1e-6 up to 1e21, exponent with an explicit sign outside it.
fn js_number_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        let sign = if value < 0.0 { "-" } else { "" };
        return format!("{}Infinity", sign);
    }

    let magnitude = value.abs();
    if magnitude == 0.0 {
        return "0".to_string();
    }
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let scientific = format!("{:e}", value);
    match scientific.split_once('e') {
        Some((mantissa, exp)) if !exp.starts_with('-') => format!("{}e+{}", mantissa, exp),
        _ => scientific,
    }
}

fn parse_height(index: &str) -> Option<u64> {
    if index.len() >= MAX_INDEX_LEN || !index.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    index.parse().ok()
}
