//! Cache metrics recording.

use metrics::{counter, histogram};
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Describes the cache metrics. Call once at startup, after the recorder is
/// installed.
pub fn register_cache_metrics() {
    metrics::describe_counter!("insight_cache_hits_total", "Total number of cache hits");
    metrics::describe_counter!(
        "insight_cache_misses_total",
        "Total number of reads that found the cache expired or empty"
    );
    metrics::describe_counter!(
        "insight_cache_shared_total",
        "Total number of reads served by another caller's in-flight fetch"
    );
    metrics::describe_counter!(
        "insight_cache_fetch_failures_total",
        "Total number of failed upstream fetches"
    );
    metrics::describe_histogram!(
        "insight_cache_fetch_seconds",
        "Time spent on successful upstream fetches"
    );
}

/// Per-cache counters.
///
/// Keeps local atomics (for tests and hit-rate logging) and forwards every
/// event to the global `metrics` recorder labelled with the cache name.
#[derive(Debug, Clone)]
pub struct CacheMetrics {
    name: Arc<str>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
    shared: Arc<AtomicU64>,
    fetches: Arc<AtomicU64>,
    failures: Arc<AtomicU64>,
}

impl CacheMetrics {
    pub fn new(name: &str) -> Self {
        Self {
            name: Arc::from(name),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
            shared: Arc::new(AtomicU64::new(0)),
            fetches: Arc::new(AtomicU64::new(0)),
            failures: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        counter!("insight_cache_hits_total", "cache" => self.name.to_string()).increment(1);
    }

    pub fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
        counter!("insight_cache_misses_total", "cache" => self.name.to_string()).increment(1);
    }

    /// A caller adopted the outcome of a fetch it did not start.
    pub fn record_shared(&self) {
        self.shared.fetch_add(1, Ordering::Relaxed);
        counter!("insight_cache_shared_total", "cache" => self.name.to_string()).increment(1);
    }

    pub fn record_fetch(&self, duration: Duration) {
        self.fetches.fetch_add(1, Ordering::Relaxed);
        histogram!("insight_cache_fetch_seconds", "cache" => self.name.to_string())
            .record(duration.as_secs_f64());
    }

    pub fn record_fetch_failure(&self) {
        self.failures.fetch_add(1, Ordering::Relaxed);
        counter!("insight_cache_fetch_failures_total", "cache" => self.name.to_string())
            .increment(1);
    }

    /// Fraction of reads answered without an upstream call.
    pub fn hit_rate(&self) -> f64 {
        let served = (self.hits() + self.shared()) as f64;
        let total = served + self.misses() as f64;
        if total == 0.0 { 0.0 } else { served / total }
    }

    pub fn hits(&self) -> u64 {
        self.hits.load(Ordering::Relaxed)
    }

    pub fn misses(&self) -> u64 {
        self.misses.load(Ordering::Relaxed)
    }

    pub fn shared(&self) -> u64 {
        self.shared.load(Ordering::Relaxed)
    }

    /// Number of successful upstream fetches.
    pub fn fetches(&self) -> u64 {
        self.fetches.load(Ordering::Relaxed)
    }

    pub fn failures(&self) -> u64 {
        self.failures.load(Ordering::Relaxed)
    }
}
