//! # Insight Cache
//!
//! Read-through caching for values produced by an expensive or rate-limited
//! upstream fetch (exchange-rate tickers, price APIs, ...).
//!
//! ## Features
//!
//! - At most one refresh per TTL window
//! - Single-flight: concurrent callers share one in-flight upstream fetch
//! - Stale-on-failure: a failed refresh keeps serving the last good value
//! - Constant caches that never expire, for fixed conversion factors
//! - Composition of two caches into a derived value
//!
//! ## Example
//!
//! ```ignore
//! use std::time::Duration;
//! use insight_cache::{DerivedValue, FnSource, TimedFetchCache};
//!
//! let usd = TimedFetchCache::new(
//!     Duration::from_secs(600),
//!     FnSource::new("ticker", || async { Ok(8.23_f64) }),
//! )?;
//! let rate = DerivedValue::new(usd, TimedFetchCache::constant(1.00));
//!
//! let value = rate.get().await?;
//! ```

pub mod cache;
pub mod derived;
pub mod error;
pub mod source;
pub mod stats;

// Re-exports
pub use cache::{DEFAULT_TTL, TimedFetchCache};
pub use derived::{DerivedValue, combine};
pub use error::{CacheError, SourceError};
pub use source::{ConstantSource, FnSource, ValueSource};
pub use stats::{CacheMetrics, register_cache_metrics};
