//! Server settings loaded with the `config` crate.
//!
//! Precedence (lowest first): built-in defaults, optional `insight.toml`
//! (or the file named by `INSIGHT_CONFIG`), `INSIGHT__*` environment
//! variables using `__` as the nesting separator, e.g.
//! `INSIGHT__NODE__RPC_URL=http://127.0.0.1:7771`.

use std::net::SocketAddr;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError, Environment, File, FileFormat};
use serde::Deserialize;

/// Default currency refresh, in minutes.
pub const DEFAULT_CURRENCY_REFRESH: u64 = 10;

const DEFAULT_TICKER_URL: &str = "https://api.coinmarketcap.com/v1/ticker/komodo/";

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub server: ServerSettings,
    pub node: NodeSettings,
    pub currency: CurrencySettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
    /// Adds permissive CORS headers for browser explorers.
    pub cors: bool,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NodeSettings {
    pub rpc_url: String,
    pub rpc_user: Option<String>,
    pub rpc_password: Option<String>,
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrencySettings {
    /// Minutes between ticker refreshes.
    pub refresh_minutes: u64,
    pub ticker_url: String,
    pub timeout_secs: u64,
    /// Constant factor applied to the ticker rate.
    pub multiplier: f64,
}

impl Settings {
    /// Loads settings from the default file and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("INSIGHT_CONFIG").unwrap_or_else(|_| "insight".to_string());

        let settings: Settings = Self::defaults()?
            .add_source(File::with_name(&path).required(false))
            .add_source(
                Environment::with_prefix("INSIGHT")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    /// Loads settings from a TOML document layered over the defaults.
    pub fn from_toml(toml: &str) -> Result<Self, ConfigError> {
        let settings: Settings = Self::defaults()?
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize()?;

        settings.validate()?;
        Ok(settings)
    }

    fn defaults() -> Result<ConfigBuilder<DefaultState>, ConfigError> {
        Config::builder()
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3001_i64)?
            .set_default("server.cors", true)?
            .set_default("node.rpc_url", "http://127.0.0.1:7771")?
            .set_default("node.timeout_secs", 30_i64)?
            .set_default("currency.refresh_minutes", DEFAULT_CURRENCY_REFRESH as i64)?
            .set_default("currency.ticker_url", DEFAULT_TICKER_URL)?
            .set_default("currency.timeout_secs", 10_i64)?
            .set_default("currency.multiplier", 1.0_f64)
    }

    /// Rejects values that would make the service misbehave at runtime.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.currency.refresh_minutes == 0 {
            return Err(ConfigError::Message(
                "currency.refresh_minutes must be greater than zero".to_string(),
            ));
        }
        if self.currency.refresh_minutes.checked_mul(60).is_none() {
            return Err(ConfigError::Message(
                "currency.refresh_minutes is too large".to_string(),
            ));
        }
        if !self.currency.multiplier.is_finite() {
            return Err(ConfigError::Message(
                "currency.multiplier must be a finite number".to_string(),
            ));
        }
        if self.node.timeout_secs == 0 || self.currency.timeout_secs == 0 {
            return Err(ConfigError::Message(
                "timeouts must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }

    /// Returns the address to bind.
    pub fn addr(&self) -> Result<SocketAddr, ConfigError> {
        format!("{}:{}", self.server.host, self.server.port)
            .parse()
            .map_err(|e| ConfigError::Message(format!("invalid server address: {}", e)))
    }

    /// Returns the validity window of the cached ticker rate.
    pub fn currency_ttl(&self) -> Duration {
        Duration::from_secs(self.currency.refresh_minutes.saturating_mul(60))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::from_toml("").unwrap();

        assert_eq!(settings.server.port, 3001);
        assert!(settings.server.cors);
        assert_eq!(settings.node.rpc_url, "http://127.0.0.1:7771");
        assert!(settings.node.rpc_user.is_none());
        assert_eq!(settings.currency.refresh_minutes, DEFAULT_CURRENCY_REFRESH);
        assert_eq!(settings.currency.multiplier, 1.0);
        assert_eq!(settings.currency_ttl(), Duration::from_secs(600));
    }

    #[test]
    fn test_file_overrides_defaults() {
        let settings = Settings::from_toml(
            r#"
            [server]
            port = 8080

            [node]
            rpc_url = "http://node:8232"
            rpc_user = "explorer"
            rpc_password = "secret"

            [currency]
            refresh_minutes = 5
            "#,
        )
        .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.node.rpc_user.as_deref(), Some("explorer"));
        assert_eq!(settings.currency_ttl(), Duration::from_secs(300));
    }

    #[test]
    fn test_zero_refresh_is_rejected() {
        let result = Settings::from_toml("[currency]\nrefresh_minutes = 0\n");

        assert!(result.is_err());
    }

    #[test]
    fn test_overflowing_refresh_is_rejected() {
        let toml = format!("[currency]\nrefresh_minutes = {}\n", i64::MAX);

        assert!(Settings::from_toml(&toml).is_err());
    }

    #[test]
    fn test_long_refresh_is_accepted() {
        // One century
        let settings = Settings::from_toml("[currency]\nrefresh_minutes = 52596000\n").unwrap();

        assert_eq!(settings.currency_ttl(), Duration::from_secs(52_596_000 * 60));
    }

    #[test]
    fn test_addr() {
        let settings = Settings::from_toml("[server]\nhost = \"127.0.0.1\"\nport = 3001\n").unwrap();

        assert_eq!(settings.addr().unwrap().to_string(), "127.0.0.1:3001");
    }
}
