//! Response bodies for the explorer endpoints.

use insight_node::{CoinSupply, MiningInfo, NodeInfo, SyncProgress};
use serde::Serialize;

/// Body of `GET /currency`.
#[derive(Debug, Serialize)]
pub struct CurrencyResponse {
    pub status: u16,
    pub data: CurrencyData,
}

#[derive(Debug, Serialize)]
pub struct CurrencyData {
    pub bitstamp: f64,
}

impl CurrencyResponse {
    pub fn ok(rate: f64) -> Self {
        Self {
            status: 200,
            data: CurrencyData { bitstamp: rate },
        }
    }
}

#[derive(Debug, Serialize)]
pub struct InfoResponse {
    pub info: NodeInfo,
}

#[derive(Debug, Serialize)]
pub struct DifficultyResponse {
    pub difficulty: f64,
}

#[derive(Debug, Serialize)]
pub struct BestBlockHashResponse {
    pub bestblockhash: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LastBlockHashResponse {
    pub sync_tip_hash: String,
    pub lastblockhash: String,
}

impl LastBlockHashResponse {
    pub fn new(hash: String) -> Self {
        Self {
            sync_tip_hash: hash.clone(),
            lastblockhash: hash,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MiningInfoResponse {
    pub mininginfo: MiningSummary,
}

#[derive(Debug, Serialize)]
pub struct MiningSummary {
    pub stakingsupply: Option<f64>,
    pub networkhashps: f64,
}

impl From<MiningInfo> for MiningInfoResponse {
    fn from(info: MiningInfo) -> Self {
        Self {
            mininginfo: MiningSummary {
                stakingsupply: info.stakingsupply,
                networkhashps: info.networkhashps,
            },
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoinSupplyResponse {
    pub coin_supply: SupplySummary,
}

#[derive(Debug, Serialize)]
pub struct SupplySummary {
    pub supply: f64,
    pub zfunds: f64,
    pub total: f64,
}

impl From<CoinSupply> for CoinSupplyResponse {
    fn from(supply: CoinSupply) -> Self {
        Self {
            coin_supply: SupplySummary {
                supply: supply.supply,
                zfunds: supply.zfunds,
                total: supply.total,
            },
        }
    }
}

/// Body of `GET /sync`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SyncResponse {
    pub status: &'static str,
    pub block_chain_height: u64,
    pub sync_percentage: u64,
    pub height: u64,
    pub error: Option<String>,
    #[serde(rename = "type")]
    pub kind: &'static str,
}

impl From<SyncProgress> for SyncResponse {
    fn from(progress: SyncProgress) -> Self {
        let status = if progress.is_synced() {
            "finished"
        } else {
            "syncing"
        };

        Self {
            status,
            block_chain_height: progress.blocks,
            sync_percentage: progress.percentage().round() as u64,
            height: progress.blocks,
            error: None,
            kind: "bitcore node",
        }
    }
}

/// Body of `GET /peer`.
#[derive(Debug, Serialize)]
pub struct PeerResponse {
    pub connected: bool,
    pub host: &'static str,
    pub port: Option<u16>,
}

impl Default for PeerResponse {
    fn default() -> Self {
        Self {
            connected: true,
            host: "127.0.0.1",
            port: None,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct VersionResponse {
    pub version: &'static str,
}

/// Body returned by `/api/*` lookups given an unusable parameter.
#[derive(Debug, Serialize)]
pub struct InvalidParamResponse {
    pub error: bool,
}

impl Default for InvalidParamResponse {
    fn default() -> Self {
        Self { error: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_currency_shape() {
        let value = serde_json::to_value(CurrencyResponse::ok(8.23)).unwrap();

        assert_eq!(value, json!({ "status": 200, "data": { "bitstamp": 8.23 } }));
    }

    #[test]
    fn test_sync_shape() {
        let progress = SyncProgress {
            blocks: 1000,
            headers: 2000,
            verificationprogress: 0.4567,
        };

        let value = serde_json::to_value(SyncResponse::from(progress)).unwrap();

        assert_eq!(
            value,
            json!({
                "status": "syncing",
                "blockChainHeight": 1000,
                "syncPercentage": 46,
                "height": 1000,
                "error": null,
                "type": "bitcore node"
            })
        );
    }

    #[test]
    fn test_sync_finished() {
        let progress = SyncProgress {
            blocks: 2000,
            headers: 2000,
            verificationprogress: 0.99999,
        };

        let response = SyncResponse::from(progress);

        assert_eq!(response.status, "finished");
        assert_eq!(response.sync_percentage, 100);
    }

    #[test]
    fn test_last_block_hash_shape() {
        let value = serde_json::to_value(LastBlockHashResponse::new("00ab".to_string())).unwrap();

        assert_eq!(value, json!({ "syncTipHash": "00ab", "lastblockhash": "00ab" }));
    }

    #[test]
    fn test_peer_shape() {
        let value = serde_json::to_value(PeerResponse::default()).unwrap();

        assert_eq!(value, json!({ "connected": true, "host": "127.0.0.1", "port": null }));
    }
}
