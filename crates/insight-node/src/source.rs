//! Chain source trait definition.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::NodeError;
use crate::types::{CoinSupply, MiningInfo, NodeInfo, SyncProgress};

/// A source of blockchain state.
///
/// Abstracts over the full node so HTTP handlers can be exercised against an
/// in-memory implementation.
///
/// # Implementors
///
/// - `RpcClient` - Queries a node over JSON-RPC
#[async_trait]
pub trait ChainSource: Send + Sync {
    /// General node information (`getinfo`).
    async fn info(&self) -> Result<NodeInfo, NodeError>;

    /// Mining information (`getmininginfo`).
    async fn mining_info(&self) -> Result<MiningInfo, NodeError>;

    /// Coin supply at the current tip (`coinsupply`).
    async fn coin_supply(&self) -> Result<CoinSupply, NodeError>;

    /// Hash of the best block (`getbestblockhash`).
    async fn best_block_hash(&self) -> Result<String, NodeError>;

    /// Height of the best block (`getblockcount`).
    async fn block_count(&self) -> Result<u64, NodeError>;

    /// Block by hash (`getblock`).
    ///
    /// # Errors
    ///
    /// An unknown hash yields a `NodeError::Rpc` for which
    /// [`NodeError::is_not_found`] is true.
    async fn block(&self, hash: &str) -> Result<Value, NodeError>;

    /// Hash of the block at `height` (`getblockhash`).
    async fn block_hash(&self, height: u64) -> Result<String, NodeError>;

    /// Connected peers (`getpeerinfo`).
    async fn peer_info(&self) -> Result<Vec<Value>, NodeError>;

    /// Verification progress (`getblockchaininfo`).
    async fn sync_progress(&self) -> Result<SyncProgress, NodeError>;

    /// Returns the name of this source, for logging.
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct FixedChain;

    #[async_trait]
    impl ChainSource for FixedChain {
        async fn info(&self) -> Result<NodeInfo, NodeError> {
            Ok(NodeInfo {
                blocks: 42,
                ..Default::default()
            })
        }

        async fn mining_info(&self) -> Result<MiningInfo, NodeError> {
            Ok(MiningInfo::default())
        }

        async fn coin_supply(&self) -> Result<CoinSupply, NodeError> {
            Ok(CoinSupply::default())
        }

        async fn best_block_hash(&self) -> Result<String, NodeError> {
            Ok("00ab".to_string())
        }

        async fn block_count(&self) -> Result<u64, NodeError> {
            Ok(42)
        }

        async fn block(&self, hash: &str) -> Result<Value, NodeError> {
            if hash == "00ab" {
                Ok(json!({ "hash": hash, "height": 42 }))
            } else {
                Err(NodeError::rpc(-5, "Block not found"))
            }
        }

        async fn block_hash(&self, height: u64) -> Result<String, NodeError> {
            if height == 42 {
                Ok("00ab".to_string())
            } else {
                Err(NodeError::rpc(-8, "Block height out of range"))
            }
        }

        async fn peer_info(&self) -> Result<Vec<Value>, NodeError> {
            Ok(vec![])
        }

        async fn sync_progress(&self) -> Result<SyncProgress, NodeError> {
            Ok(SyncProgress {
                blocks: 42,
                headers: 42,
                verificationprogress: 1.0,
            })
        }

        fn name(&self) -> &str {
            "fixed"
        }
    }

    #[tokio::test]
    async fn test_trait_object_dispatch() {
        let chain: Box<dyn ChainSource> = Box::new(FixedChain);

        assert_eq!(chain.block_count().await.unwrap(), 42);
        assert_eq!(chain.info().await.unwrap().blocks, 42);
        assert!(chain.sync_progress().await.unwrap().is_synced());
        assert_eq!(chain.name(), "fixed");
    }

    #[tokio::test]
    async fn test_unknown_block_is_not_found() {
        let chain = FixedChain;

        assert!(chain.block("ffff").await.unwrap_err().is_not_found());
        assert!(chain.block_hash(7).await.unwrap_err().is_not_found());
        assert_eq!(chain.block("00ab").await.unwrap()["height"], 42);
    }
}
