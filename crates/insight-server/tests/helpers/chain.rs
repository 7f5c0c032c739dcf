//! In-memory node used by the router tests.

use async_trait::async_trait;
use insight_node::{ChainSource, CoinSupply, MiningInfo, NodeError, NodeInfo, SyncProgress};
use serde_json::{Map, Value, json};

pub const GENESIS_HASH: &str = "027e3758c3a65b12aa1046462b486d0a63bfa1beae327897f56c5cfb7daaae71";
pub const BEST_HASH: &str = "0000000011b2e6ab1f6c7d4ac4a3c5ed01b8e4e6d12f9a5b8c3d2e1f0a9b8c7d";

#[derive(Clone)]
enum Failure {
    Transport,
    Rpc(i64, String),
}

/// Node at height 1000 whose genesis block is the only block it knows.
pub struct MockChain {
    failure: Option<Failure>,
    progress: f64,
}

impl MockChain {
    pub fn healthy() -> Self {
        Self {
            failure: None,
            progress: 1.0,
        }
    }

    /// Node still verifying blocks.
    pub fn syncing(progress: f64) -> Self {
        Self {
            failure: None,
            progress,
        }
    }

    /// Every call fails as if the node were down.
    pub fn unreachable() -> Self {
        Self {
            failure: Some(Failure::Transport),
            progress: 0.0,
        }
    }

    /// Every call fails with the given RPC error.
    pub fn rejecting(code: i64, message: &str) -> Self {
        Self {
            failure: Some(Failure::Rpc(code, message.to_string())),
            progress: 0.0,
        }
    }

    fn check(&self) -> Result<(), NodeError> {
        match &self.failure {
            None => Ok(()),
            Some(Failure::Transport) => Err(NodeError::transport("connection refused")),
            Some(Failure::Rpc(code, message)) => Err(NodeError::rpc(*code, message.clone())),
        }
    }
}

#[async_trait]
impl ChainSource for MockChain {
    async fn info(&self) -> Result<NodeInfo, NodeError> {
        self.check()?;
        Ok(NodeInfo {
            version: 1001550,
            protocolversion: 170009,
            blocks: 1000,
            connections: 8,
            difficulty: 98765432.1,
            relayfee: 0.000001,
            ..Default::default()
        })
    }

    async fn mining_info(&self) -> Result<MiningInfo, NodeError> {
        self.check()?;
        let mut extra = Map::new();
        extra.insert("blocks".to_string(), json!(1000));
        Ok(MiningInfo {
            networkhashps: 4.5e9,
            stakingsupply: Some(1250.5),
            extra,
        })
    }

    async fn coin_supply(&self) -> Result<CoinSupply, NodeError> {
        self.check()?;
        let mut extra = Map::new();
        extra.insert("coin".to_string(), json!("KMD"));
        Ok(CoinSupply {
            supply: 129000000.25,
            zfunds: 1200.5,
            total: 129001200.75,
            extra,
        })
    }

    async fn best_block_hash(&self) -> Result<String, NodeError> {
        self.check()?;
        Ok(BEST_HASH.to_string())
    }

    async fn block_count(&self) -> Result<u64, NodeError> {
        self.check()?;
        Ok(1000)
    }

    async fn block(&self, hash: &str) -> Result<Value, NodeError> {
        self.check()?;
        if hash == GENESIS_HASH {
            Ok(json!({ "hash": GENESIS_HASH, "height": 0, "confirmations": 1001 }))
        } else {
            Err(NodeError::rpc(-5, "Block not found"))
        }
    }

    async fn block_hash(&self, height: u64) -> Result<String, NodeError> {
        self.check()?;
        if height == 0 {
            Ok(GENESIS_HASH.to_string())
        } else {
            Err(NodeError::rpc(-8, "Block height out of range"))
        }
    }

    async fn peer_info(&self) -> Result<Vec<Value>, NodeError> {
        self.check()?;
        Ok(vec![json!({ "id": 1, "addr": "10.0.0.2:7770" })])
    }

    async fn sync_progress(&self) -> Result<SyncProgress, NodeError> {
        self.check()?;
        Ok(SyncProgress {
            blocks: 1000,
            headers: 1000,
            verificationprogress: self.progress,
        })
    }

    fn name(&self) -> &str {
        "mock"
    }
}
