//! Error types for the fetch cache.

use std::sync::Arc;

/// Errors produced by an upstream [`ValueSource`](crate::ValueSource).
///
/// Every variant is treated the same way by the cache: the fetch failed and
/// the previously cached value, if any, stays in place.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// Upstream answered with a status other than 200.
    #[error("unexpected HTTP status {status}")]
    Status { status: u16 },

    /// The request could not be completed.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body could not be turned into a value.
    #[error("parse error: {0}")]
    Parse(String),

    /// Any other upstream failure.
    #[error("{0}")]
    Other(String),
}

impl SourceError {
    /// Creates a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Creates a new parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Creates a generic upstream error.
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns true if a later attempt might succeed without any change on
    /// our side.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Transport(_) => true,
            Self::Status { status } => *status >= 500 || *status == 429,
            Self::Parse(_) | Self::Other(_) => false,
        }
    }
}

/// Errors returned by [`TimedFetchCache`](crate::TimedFetchCache).
///
/// Cloneable so that every caller waiting on a shared fetch receives the
/// same outcome.
#[derive(Debug, Clone, thiserror::Error)]
pub enum CacheError {
    /// The cache was built with an unusable configuration.
    #[error("invalid cache configuration: {0}")]
    InvalidConfig(String),

    /// The upstream fetch failed and there is no cached value to fall back on.
    #[error("fetch from '{source_name}' failed: {cause}")]
    FetchFailed {
        /// Name of the source that failed.
        source_name: String,
        /// Underlying upstream error.
        #[source]
        cause: Arc<SourceError>,
    },
}

impl CacheError {
    /// Creates an InvalidConfig error.
    pub fn invalid_config(msg: impl Into<String>) -> Self {
        Self::InvalidConfig(msg.into())
    }

    /// Creates a FetchFailed error.
    pub fn fetch_failed(source_name: impl Into<String>, cause: SourceError) -> Self {
        Self::FetchFailed {
            source_name: source_name.into(),
            cause: Arc::new(cause),
        }
    }

    /// Returns true if this error comes from a failed upstream fetch.
    pub fn is_fetch_failed(&self) -> bool {
        matches!(self, Self::FetchFailed { .. })
    }

    /// Returns the upstream error, if any.
    pub fn cause(&self) -> Option<&SourceError> {
        match self {
            Self::FetchFailed { cause, .. } => Some(cause.as_ref()),
            Self::InvalidConfig(_) => None,
        }
    }
}
