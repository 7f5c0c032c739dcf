//! Upstream value sources.

use std::future::Future;

use async_trait::async_trait;

use crate::error::SourceError;

/// Something that can produce a fresh value on demand.
///
/// This trait abstracts over the upstream a [`TimedFetchCache`](crate::TimedFetchCache)
/// wraps, so the cache never knows whether the value comes from an HTTP
/// ticker, a node RPC call or a hard-coded constant.
///
/// # Example
///
/// ```ignore
/// use insight_cache::{SourceError, ValueSource};
///
/// struct Ticker;
///
/// #[async_trait]
/// impl ValueSource<f64> for Ticker {
///     async fn fetch(&self) -> Result<f64, SourceError> {
///         Ok(8.23)
///     }
///
///     fn name(&self) -> &str {
///         "ticker"
///     }
/// }
/// ```
#[async_trait]
pub trait ValueSource<V: Send>: Send + Sync {
    /// Fetches a fresh value from upstream.
    ///
    /// Non-success statuses, transport failures and unparsable payloads must
    /// all be reported as `Err`; the cache treats them uniformly.
    async fn fetch(&self) -> Result<V, SourceError>;

    /// Returns the name of this source, used in logs and metric labels.
    fn name(&self) -> &str;
}

/// Adapts an async closure into a [`ValueSource`].
pub struct FnSource<F> {
    name: String,
    fetch: F,
}

impl<F> FnSource<F> {
    /// Creates a named source backed by `fetch`.
    pub fn new(name: impl Into<String>, fetch: F) -> Self {
        Self {
            name: name.into(),
            fetch,
        }
    }
}

#[async_trait]
impl<V, F, Fut> ValueSource<V> for FnSource<F>
where
    V: Send + 'static,
    F: Fn() -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<V, SourceError>> + Send + 'static,
{
    async fn fetch(&self) -> Result<V, SourceError> {
        (self.fetch)().await
    }

    fn name(&self) -> &str {
        &self.name
    }
}

/// A source that always yields the same value.
#[derive(Debug, Clone)]
pub struct ConstantSource<V> {
    value: V,
}

impl<V> ConstantSource<V> {
    /// Creates a source fixed at `value`.
    pub fn new(value: V) -> Self {
        Self { value }
    }

    /// Returns the fixed value.
    pub fn value(&self) -> &V {
        &self.value
    }
}

#[async_trait]
impl<V> ValueSource<V> for ConstantSource<V>
where
    V: Clone + Send + Sync + 'static,
{
    async fn fetch(&self) -> Result<V, SourceError> {
        Ok(self.value.clone())
    }

    fn name(&self) -> &str {
        "constant"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    #[tokio::test]
    async fn test_fn_source_calls_closure_each_time() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = Arc::clone(&calls);

        let source = FnSource::new("counter", move || {
            let counter = Arc::clone(&counter);
            async move { Ok::<u32, SourceError>(counter.fetch_add(1, Ordering::SeqCst) + 1) }
        });

        assert_eq!(source.fetch().await.unwrap(), 1);
        assert_eq!(source.fetch().await.unwrap(), 2);
        assert_eq!(source.name(), "counter");
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[tokio::test]
    async fn test_fn_source_propagates_errors() {
        let source = FnSource::new("broken", || async {
            Err::<f64, _>(SourceError::Status { status: 500 })
        });

        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Status { status: 500 }));
    }

    #[tokio::test]
    async fn test_constant_source() {
        let source = ConstantSource::new(1.00_f64);

        assert_eq!(source.fetch().await.unwrap(), 1.00);
        assert_eq!(*source.value(), 1.00);
        assert_eq!(source.name(), "constant");
    }
}
