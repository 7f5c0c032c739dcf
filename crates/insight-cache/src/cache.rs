//! Time-gated read-through cache with single-flight refresh.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use parking_lot::RwLock;
use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::{debug, warn};

use crate::error::CacheError;
use crate::source::{ConstantSource, ValueSource};
use crate::stats::CacheMetrics;

/// Default validity window for upstream values (10 minutes).
pub const DEFAULT_TTL: Duration = Duration::from_secs(10 * 60);

/// Last successful value and the instant its fetch was started.
struct Slot<V> {
    value: Option<V>,
    fetched_at: Option<Instant>,
}

struct Inner<V> {
    name: String,
    /// `None` means the value never expires.
    ttl: Option<Duration>,
    source: Arc<dyn ValueSource<V>>,
    slot: RwLock<Slot<V>>,
    /// Serializes fetch-and-update. Holds the outcome of the last completed
    /// fetch so callers queued behind it can adopt it.
    flight: Mutex<Option<Result<V, CacheError>>>,
    /// Number of completed fetches.
    epoch: AtomicU64,
    metrics: CacheMetrics,
}

/// Read-through cache for a single value produced by an upstream fetch.
///
/// - A value is refreshed at most once per TTL window.
/// - Concurrent readers that find the value expired share a single upstream
///   fetch and all observe its outcome.
/// - A failed fetch never discards the last good value; it is served stale
///   until the next window. Only when nothing was ever cached does the
///   failure reach the caller.
///
/// Before the first success every read retries upstream. After it, a failed
/// refresh restarts the window like a successful one, so the stale value is
/// served and upstream is retried only once the window expires again.
///
/// Cloning is cheap and yields a handle to the same cache.
///
/// # Examples
///
/// ```no_run
/// use std::time::Duration;
/// use insight_cache::{FnSource, SourceError, TimedFetchCache};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), insight_cache::CacheError> {
/// let cache = TimedFetchCache::new(
///     Duration::from_secs(600),
///     FnSource::new("ticker", || async { Ok::<f64, SourceError>(8.23) }),
/// )?;
///
/// let rate = cache.get().await?;
/// # Ok(())
/// # }
/// ```
pub struct TimedFetchCache<V> {
    inner: Arc<Inner<V>>,
}

impl<V> Clone for TimedFetchCache<V> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<V> TimedFetchCache<V>
where
    V: Clone + Send + Sync + 'static,
{
    /// Creates an empty cache refreshing from `source` every `ttl`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::InvalidConfig` if `ttl` is zero.
    pub fn new<S>(ttl: Duration, source: S) -> Result<Self, CacheError>
    where
        S: ValueSource<V> + 'static,
    {
        Self::with_shared_source(ttl, Arc::new(source))
    }

    /// Same as [`new`](Self::new) for a source that is already shared.
    pub fn with_shared_source(
        ttl: Duration,
        source: Arc<dyn ValueSource<V>>,
    ) -> Result<Self, CacheError> {
        if ttl.is_zero() {
            return Err(CacheError::invalid_config(format!(
                "ttl for '{}' must be a positive duration",
                source.name()
            )));
        }

        Ok(Self::build(Some(ttl), source, None))
    }

    /// Creates a cache fixed at `value` that never expires and never calls
    /// upstream.
    pub fn constant(value: V) -> Self {
        let seed = value.clone();
        Self::build(None, Arc::new(ConstantSource::new(value)), Some(seed))
    }

    fn build(ttl: Option<Duration>, source: Arc<dyn ValueSource<V>>, seed: Option<V>) -> Self {
        let name = source.name().to_string();
        let fetched_at = seed.as_ref().map(|_| Instant::now());

        Self {
            inner: Arc::new(Inner {
                metrics: CacheMetrics::new(&name),
                name,
                ttl,
                source,
                slot: RwLock::new(Slot {
                    value: seed,
                    fetched_at,
                }),
                flight: Mutex::new(None),
                epoch: AtomicU64::new(0),
            }),
        }
    }

    /// Returns the cached value, refreshing it first if it is missing or
    /// expired.
    ///
    /// If another caller is already refreshing, waits for that fetch and
    /// returns its outcome instead of calling upstream again.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::FetchFailed` only when the fetch failed and no
    /// value has ever been cached.
    pub async fn get(&self) -> Result<V, CacheError> {
        let inner = &self.inner;
        let observed = inner.epoch.load(Ordering::Acquire);

        if let Some(value) = self.fresh_value(Instant::now()) {
            inner.metrics.record_hit();
            return Ok(value);
        }

        let mut flight = inner.flight.lock().await;

        // A fetch completed while we were queued on the guard
        if inner.epoch.load(Ordering::Acquire) != observed {
            if let Some(outcome) = flight.as_ref() {
                inner.metrics.record_shared();
                return outcome.clone();
            }
        }

        inner.metrics.record_miss();
        let outcome = self.refresh().await;

        *flight = Some(outcome.clone());
        inner.epoch.fetch_add(1, Ordering::Release);

        outcome
    }

    /// Calls upstream once and applies the result. Must run under `flight`.
    async fn refresh(&self) -> Result<V, CacheError> {
        let inner = &self.inner;
        let started = Instant::now();

        debug!(cache = %inner.name, "Fetching fresh value from upstream");

        match inner.source.fetch().await {
            Ok(value) => {
                {
                    let mut slot = inner.slot.write();
                    slot.value = Some(value.clone());
                    slot.fetched_at = Some(started);
                }
                inner.metrics.record_fetch(started.elapsed());
                debug!(cache = %inner.name, "Cache refreshed");
                Ok(value)
            },
            Err(e) => {
                inner.metrics.record_fetch_failure();
                let stale = {
                    let mut slot = inner.slot.write();
                    // Nothing cached yet keeps `fetched_at` unset so the next
                    // read retries; otherwise the window restarts
                    if slot.value.is_some() {
                        slot.fetched_at = Some(started);
                    }
                    slot.value.clone()
                };

                match stale {
                    Some(value) => {
                        warn!(cache = %inner.name, error = %e, "Upstream fetch failed, serving stale value");
                        Ok(value)
                    },
                    None => {
                        warn!(cache = %inner.name, error = %e, "Upstream fetch failed and nothing is cached");
                        Err(CacheError::fetch_failed(&inner.name, e))
                    },
                }
            },
        }
    }

    fn fresh_value(&self, now: Instant) -> Option<V> {
        let slot = self.inner.slot.read();
        let fetched_at = slot.fetched_at?;

        // An expiry past the clock's range never arrives
        let expired = self
            .inner
            .ttl
            .is_some_and(|ttl| fetched_at.checked_add(ttl).is_some_and(|exp| now >= exp));

        if expired { None } else { slot.value.clone() }
    }

    /// Returns the cached value without touching upstream, even if expired.
    pub fn peek(&self) -> Option<V> {
        self.inner.slot.read().value.clone()
    }

    /// Returns when the current value's fetch was started.
    pub fn fetched_at(&self) -> Option<Instant> {
        self.inner.slot.read().fetched_at
    }

    /// Returns true if a `get` right now would be served from the cache.
    pub fn is_fresh(&self) -> bool {
        self.fresh_value(Instant::now()).is_some()
    }

    /// Returns the validity window, `None` for constant caches.
    pub fn ttl(&self) -> Option<Duration> {
        self.inner.ttl
    }

    /// Returns the name of the wrapped source.
    pub fn name(&self) -> &str {
        &self.inner.name
    }

    /// Returns the metrics for external access.
    pub fn metrics(&self) -> &CacheMetrics {
        &self.inner.metrics
    }
}

impl<V> fmt::Debug for TimedFetchCache<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TimedFetchCache")
            .field("name", &self.inner.name)
            .field("ttl", &self.inner.ttl)
            .field("fetched_at", &self.inner.slot.read().fetched_at)
            .finish_non_exhaustive()
    }
}
