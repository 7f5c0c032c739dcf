//! USD price from a public ticker API.

use std::time::Duration;

use async_trait::async_trait;
use insight_cache::{SourceError, ValueSource};
use reqwest::StatusCode;
use serde_json::Value;
use tracing::{debug, instrument};

/// Fetches the coin's USD price from a ticker endpoint returning
/// `[{"price_usd": "8.23", ...}]`.
///
/// Anything other than a 200 response with a parsable price is a fetch
/// failure.
pub struct TickerSource {
    http: reqwest::Client,
    url: String,
}

impl TickerSource {
    /// Creates a source for `url` with the given request timeout.
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, SourceError> {
        let http = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| SourceError::other(e.to_string()))?;

        Ok(Self {
            http,
            url: url.into(),
        })
    }

    /// Returns the ticker URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl ValueSource<f64> for TickerSource {
    #[instrument(skip(self), fields(url = %self.url))]
    async fn fetch(&self) -> Result<f64, SourceError> {
        let response = self
            .http
            .get(&self.url)
            .send()
            .await
            .map_err(|e| SourceError::transport(e.to_string()))?;

        if response.status() != StatusCode::OK {
            return Err(SourceError::Status {
                status: response.status().as_u16(),
            });
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| SourceError::parse(e.to_string()))?;

        let price = parse_price_usd(&body)?;
        debug!(price, "Ticker price received");
        Ok(price)
    }

    fn name(&self) -> &str {
        "ticker"
    }
}

/// Reads `price_usd` from the first element of a ticker response.
///
/// The field may be a JSON string or a number.
pub fn parse_price_usd(body: &Value) -> Result<f64, SourceError> {
    let field = body
        .get(0)
        .and_then(|ticker| ticker.get("price_usd"))
        .ok_or_else(|| SourceError::parse("response has no price_usd"))?;

    let price = match field {
        Value::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| SourceError::parse(format!("price_usd '{}': {}", s, e)))?,
        Value::Number(n) => n
            .as_f64()
            .ok_or_else(|| SourceError::parse("price_usd is not a float"))?,
        other => {
            return Err(SourceError::parse(format!(
                "price_usd has unexpected type: {}",
                other
            )));
        },
    };

    if !price.is_finite() {
        return Err(SourceError::parse("price_usd is not finite"));
    }

    Ok(price)
}
