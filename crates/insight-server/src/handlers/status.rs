//! Chain status endpoints backed by the node.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use tracing::{debug, instrument};

use crate::error::AppError;
use crate::extractors::{StatusOption, StatusQuery};
use crate::handlers::response::{
    BestBlockHashResponse, CoinSupplyResponse, DifficultyResponse, InfoResponse,
    LastBlockHashResponse, MiningInfoResponse, PeerResponse, SyncResponse, VersionResponse,
};
use crate::state::AppState;

/// GET /status?q=
#[instrument(skip(state))]
pub async fn show_status(
    State(state): State<AppState>,
    Query(query): Query<StatusQuery>,
) -> Result<Response, AppError> {
    let chain = state.chain();
    let option = query.option();
    debug!(?option, "Status requested");

    let response = match option {
        StatusOption::Info => Json(InfoResponse {
            info: chain.info().await?,
        })
        .into_response(),
        StatusOption::Difficulty => Json(DifficultyResponse {
            difficulty: chain.info().await?.difficulty,
        })
        .into_response(),
        StatusOption::BestBlockHash => Json(BestBlockHashResponse {
            bestblockhash: chain.best_block_hash().await?,
        })
        .into_response(),
        StatusOption::LastBlockHash => {
            Json(LastBlockHashResponse::new(chain.best_block_hash().await?)).into_response()
        },
        StatusOption::MiningInfo => {
            Json(MiningInfoResponse::from(chain.mining_info().await?)).into_response()
        },
        StatusOption::CoinSupply => {
            Json(CoinSupplyResponse::from(chain.coin_supply().await?)).into_response()
        },
    };

    Ok(response)
}

/// GET /sync
#[instrument(skip(state))]
pub async fn sync(State(state): State<AppState>) -> Result<Json<SyncResponse>, AppError> {
    let progress = state.chain().sync_progress().await?;

    Ok(Json(SyncResponse::from(progress)))
}

/// GET /peer
pub async fn peer() -> Json<PeerResponse> {
    Json(PeerResponse::default())
}

/// GET /version
pub async fn version() -> Json<VersionResponse> {
    Json(VersionResponse {
        version: crate::version(),
    })
}
