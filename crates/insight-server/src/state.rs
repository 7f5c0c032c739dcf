//! Application state.

use std::sync::Arc;
use std::time::Duration;

use insight_cache::{DerivedValue, TimedFetchCache, ValueSource};
use insight_node::{ChainSource, RpcClient, RpcConfig};

use crate::rates::TickerSource;
use crate::settings::Settings;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// The full node answering status queries.
    chain: Arc<dyn ChainSource>,
    /// Ticker rate times the constant multiplier.
    rate: DerivedValue<f64>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(chain: Arc<dyn ChainSource>, rate: DerivedValue<f64>) -> Self {
        Self { chain, rate }
    }

    /// Builds the RPC client and the currency caches described by `settings`.
    pub fn from_settings(settings: &Settings) -> anyhow::Result<Self> {
        let mut rpc = RpcConfig::builder()
            .url(&settings.node.rpc_url)
            .timeout(Duration::from_secs(settings.node.timeout_secs));
        if let Some(user) = &settings.node.rpc_user {
            rpc = rpc.basic_auth(user, settings.node.rpc_password.clone().unwrap_or_default());
        }
        let chain = RpcClient::new(rpc.build()?)?;

        let ticker = TickerSource::new(
            &settings.currency.ticker_url,
            Duration::from_secs(settings.currency.timeout_secs),
        )?;

        let rate = Self::currency_rate(
            settings.currency_ttl(),
            Arc::new(ticker),
            settings.currency.multiplier,
        )?;

        Ok(Self::new(Arc::new(chain), rate))
    }

    /// Wraps `ticker` in a timed cache and pairs it with a constant
    /// multiplier cache.
    pub fn currency_rate(
        ttl: Duration,
        ticker: Arc<dyn ValueSource<f64>>,
        multiplier: f64,
    ) -> Result<DerivedValue<f64>, insight_cache::CacheError> {
        let base = TimedFetchCache::with_shared_source(ttl, ticker)?;
        Ok(DerivedValue::new(base, TimedFetchCache::constant(multiplier)))
    }

    /// Returns a reference to the chain source.
    pub fn chain(&self) -> &dyn ChainSource {
        self.chain.as_ref()
    }

    /// Returns the combined currency rate.
    pub fn rate(&self) -> &DerivedValue<f64> {
        &self.rate
    }
}
