use serde::Deserialize;

/// Query parameters for `/status`.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct StatusQuery {
    /// Which status view to return.
    pub q: Option<String>,
}

/// Status views selectable with `?q=`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusOption {
    Info,
    Difficulty,
    BestBlockHash,
    LastBlockHash,
    MiningInfo,
    CoinSupply,
}

impl StatusQuery {
    /// Unknown or missing values fall back to [`StatusOption::Info`].
    pub fn option(&self) -> StatusOption {
        match self.q.as_deref() {
            Some("getDifficulty") => StatusOption::Difficulty,
            Some("getBestBlockHash") => StatusOption::BestBlockHash,
            Some("getLastBlockHash") => StatusOption::LastBlockHash,
            Some("getMiningInfo") => StatusOption::MiningInfo,
            Some("getcoinSupply") => StatusOption::CoinSupply,
            _ => StatusOption::Info,
        }
    }
}

/// Extracts a single value from a raw query string.
///
/// Accepts both `name=value` and a bare `value`; anything after the first
/// `&` is ignored. Returns `None` for an empty query.
pub fn param_value(raw: Option<&str>, name: &str) -> Option<String> {
    let raw = raw?.trim();
    let value = raw
        .strip_prefix(name)
        .and_then(|rest| rest.strip_prefix('='))
        .unwrap_or(raw);
    let value = value.split('&').next().unwrap_or_default();

    let decoded = urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string());

    if decoded.is_empty() { None } else { Some(decoded) }
}
