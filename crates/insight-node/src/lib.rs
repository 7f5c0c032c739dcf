//! # Insight Node
//!
//! Full-node collaborator for the Insight explorer API.
//!
//! The explorer never validates or stores blocks itself; every chain query is
//! answered by an already running node reached over its JSON-RPC interface.
//! This crate provides the trait the HTTP layer talks to and a thin HTTP
//! client implementing it.
//!
//! ## Example
//!
//! ```ignore
//! use insight_node::{ChainSource, RpcClient, RpcConfig};
//!
//! let config = RpcConfig::builder()
//!     .url("http://127.0.0.1:7771")
//!     .basic_auth("rpcuser", "rpcpassword")
//!     .build()?;
//!
//! let node = RpcClient::new(config)?;
//! let height = node.block_count().await?;
//! ```

pub mod error;
pub mod rpc;
pub mod source;
pub mod types;

// Re-exports
pub use error::NodeError;
pub use rpc::{RpcClient, RpcConfig, RpcConfigBuilder};
pub use source::ChainSource;
pub use types::{CoinSupply, MiningInfo, NodeInfo, SyncProgress};
