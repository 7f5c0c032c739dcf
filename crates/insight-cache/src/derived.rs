//! Values derived from two independently cached inputs.

use std::ops::Mul;

use crate::cache::TimedFetchCache;
use crate::error::CacheError;

/// Combines two cached quantities into the displayed one.
///
/// ```
/// use insight_cache::combine;
///
/// assert_eq!(combine(8.23_f64, 1.00), 8.23);
/// ```
pub fn combine<V: Mul<Output = V>>(a: V, b: V) -> V {
    a * b
}

/// A value computed from the latest reads of two caches.
///
/// Each input keeps its own TTL; reading the derived value reads both
/// caches, so it changes as soon as either input is refreshed.
#[derive(Debug, Clone)]
pub struct DerivedValue<V> {
    base: TimedFetchCache<V>,
    factor: TimedFetchCache<V>,
}

impl<V> DerivedValue<V>
where
    V: Clone + Send + Sync + Mul<Output = V> + 'static,
{
    pub fn new(base: TimedFetchCache<V>, factor: TimedFetchCache<V>) -> Self {
        Self { base, factor }
    }

    /// Reads both inputs and combines them.
    ///
    /// # Errors
    ///
    /// Fails if either input has no value and its fetch fails.
    pub async fn get(&self) -> Result<V, CacheError> {
        let base = self.base.get().await?;
        let factor = self.factor.get().await?;
        Ok(combine(base, factor))
    }

    pub fn base(&self) -> &TimedFetchCache<V> {
        &self.base
    }

    pub fn factor(&self) -> &TimedFetchCache<V> {
        &self.factor
    }
}
