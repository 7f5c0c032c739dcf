//! JSON-RPC client for the full node.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use tracing::{debug, instrument};

use crate::error::NodeError;
use crate::source::ChainSource;
use crate::types::{CoinSupply, MiningInfo, NodeInfo, SyncProgress};

fn default_timeout() -> Duration {
    Duration::from_secs(30)
}

/// Connection settings for the node's RPC endpoint.
#[derive(Debug, Clone)]
pub struct RpcConfig {
    url: String,
    username: Option<String>,
    password: Option<String>,
    timeout: Duration,
}

impl RpcConfig {
    /// Creates a new builder for RpcConfig.
    pub fn builder() -> RpcConfigBuilder {
        RpcConfigBuilder::default()
    }

    /// Returns the RPC endpoint URL.
    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    pub fn password(&self) -> Option<&str> {
        self.password.as_deref()
    }

    /// Returns the per-request timeout.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder for RpcConfig.
#[derive(Debug, Default)]
pub struct RpcConfigBuilder {
    url: Option<String>,
    username: Option<String>,
    password: Option<String>,
    timeout: Option<Duration>,
}

impl RpcConfigBuilder {
    /// Sets the RPC endpoint URL.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets basic authentication credentials.
    pub fn basic_auth(mut self, username: impl Into<String>, password: impl Into<String>) -> Self {
        self.username = Some(username.into());
        self.password = Some(password.into());
        self
    }

    /// Sets the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Builds the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is missing or the timeout is zero.
    pub fn build(self) -> Result<RpcConfig, NodeError> {
        let url = self
            .url
            .filter(|u| !u.trim().is_empty())
            .ok_or_else(|| NodeError::InvalidConfig("url is required".to_string()))?;

        let timeout = self.timeout.unwrap_or_else(default_timeout);
        if timeout.is_zero() {
            return Err(NodeError::InvalidConfig(
                "timeout must be positive".to_string(),
            ));
        }

        Ok(RpcConfig {
            url,
            username: self.username,
            password: self.password,
            timeout,
        })
    }
}

/// JSON-RPC error object.
#[derive(Debug, Deserialize)]
struct RpcErrorBody {
    code: i64,
    message: String,
}

/// JSON-RPC response envelope.
#[derive(Debug, Deserialize)]
struct RpcResponse {
    #[serde(default)]
    result: Value,
    #[serde(default)]
    error: Option<RpcErrorBody>,
}

impl RpcResponse {
    fn into_result<T: DeserializeOwned>(self, method: &str) -> Result<T, NodeError> {
        if let Some(error) = self.error {
            return Err(NodeError::rpc(error.code, error.message));
        }

        serde_json::from_value(self.result)
            .map_err(|e| NodeError::decode(format!("{}: {}", method, e)))
    }
}

/// [`ChainSource`] backed by a node's JSON-RPC interface.
///
/// Nodes report RPC failures with an HTTP error status *and* a JSON-RPC
/// body, so the envelope is decoded whatever the status. Only when no
/// envelope can be read does the status itself become the error.
pub struct RpcClient {
    http: reqwest::Client,
    config: RpcConfig,
    next_id: AtomicU64,
}

impl RpcClient {
    /// Creates a client for the given endpoint.
    pub fn new(config: RpcConfig) -> Result<Self, NodeError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| NodeError::InvalidConfig(e.to_string()))?;

        Ok(Self {
            http,
            config,
            next_id: AtomicU64::new(1),
        })
    }

    /// Returns the client configuration.
    pub fn config(&self) -> &RpcConfig {
        &self.config
    }

    /// Performs a single RPC call and decodes its result.
    #[instrument(skip(self, params), fields(url = %self.config.url()))]
    pub async fn call<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Vec<Value>,
    ) -> Result<T, NodeError> {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        let body = json!({
            "jsonrpc": "1.0",
            "id": id,
            "method": method,
            "params": params,
        });

        let mut request = self.http.post(self.config.url()).json(&body);
        if let Some(username) = self.config.username() {
            request = request.basic_auth(username, self.config.password());
        }

        let response = request
            .send()
            .await
            .map_err(|e| NodeError::transport(e.to_string()))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| NodeError::transport(e.to_string()))?;

        debug!(status = status.as_u16(), len = bytes.len(), "RPC response received");

        let envelope: RpcResponse = match serde_json::from_slice(&bytes) {
            Ok(envelope) => envelope,
            Err(e) if status.is_success() => {
                return Err(NodeError::decode(format!("{}: {}", method, e)));
            },
            Err(_) => return Err(NodeError::Http(status.as_u16())),
        };

        envelope.into_result(method)
    }
}

#[async_trait]
impl ChainSource for RpcClient {
    async fn info(&self) -> Result<NodeInfo, NodeError> {
        self.call("getinfo", vec![]).await
    }

    async fn mining_info(&self) -> Result<MiningInfo, NodeError> {
        self.call("getmininginfo", vec![]).await
    }

    async fn coin_supply(&self) -> Result<CoinSupply, NodeError> {
        self.call("coinsupply", vec![]).await
    }

    async fn best_block_hash(&self) -> Result<String, NodeError> {
        self.call("getbestblockhash", vec![]).await
    }

    async fn block_count(&self) -> Result<u64, NodeError> {
        self.call("getblockcount", vec![]).await
    }

    async fn block(&self, hash: &str) -> Result<Value, NodeError> {
        self.call("getblock", vec![json!(hash)]).await
    }

    async fn block_hash(&self, height: u64) -> Result<String, NodeError> {
        self.call("getblockhash", vec![json!(height)]).await
    }

    async fn peer_info(&self) -> Result<Vec<Value>, NodeError> {
        self.call("getpeerinfo", vec![]).await
    }

    async fn sync_progress(&self) -> Result<SyncProgress, NodeError> {
        self.call("getblockchaininfo", vec![]).await
    }

    fn name(&self) -> &str {
        "rpc"
    }
}
