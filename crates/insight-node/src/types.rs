//! Node responses consumed by the explorer.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Minimum sync percentage at which the node is reported as synchronized.
pub const SYNCED_THRESHOLD: f64 = 99.99;

/// Result of `getinfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeInfo {
    pub version: u64,
    #[serde(default)]
    pub protocolversion: u64,
    pub blocks: u64,
    #[serde(default)]
    pub timeoffset: i64,
    #[serde(default)]
    pub connections: u64,
    #[serde(default)]
    pub proxy: String,
    pub difficulty: f64,
    #[serde(default)]
    pub testnet: bool,
    #[serde(default)]
    pub relayfee: f64,
    #[serde(default)]
    pub errors: String,
    /// Not every node reports a network name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// Result of `getmininginfo`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MiningInfo {
    pub networkhashps: f64,
    /// Only reported by chains with staking.
    #[serde(default)]
    pub stakingsupply: Option<f64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of `coinsupply`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CoinSupply {
    pub supply: f64,
    #[serde(default)]
    pub zfunds: f64,
    pub total: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Subset of `getblockchaininfo` describing sync state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncProgress {
    pub blocks: u64,
    #[serde(default)]
    pub headers: u64,
    #[serde(default)]
    pub verificationprogress: f64,
}

impl SyncProgress {
    /// Verification progress as a percentage in `0..=100`.
    pub fn percentage(&self) -> f64 {
        (self.verificationprogress * 100.0).clamp(0.0, 100.0)
    }

    pub fn is_synced(&self) -> bool {
        self.percentage() >= SYNCED_THRESHOLD
    }
}
