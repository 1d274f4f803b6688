//! No-op cache implementation.

use async_trait::async_trait;
use fred_core::{RawSeries, Result, SeriesCache};
use std::time::Duration;
use tracing::trace;

/// A no-op cache that doesn't store anything.
///
/// `get_series` always returns `Ok(None)` and `put_series` returns `Ok(())`.
/// Useful for disabling caching or testing code paths without cache hits.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCache;

impl NoopCache {
    /// Create a new no-op cache.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SeriesCache for NoopCache {
    async fn get_series(&self, _provider: &str, _id: &str) -> Result<Option<RawSeries>> {
        trace!("NoopCache: get_series called, returning None");
        Ok(None)
    }

    async fn put_series(&self, _provider: &str, _series: &RawSeries) -> Result<()> {
        trace!("NoopCache: put_series called, doing nothing");
        Ok(())
    }

    async fn invalidate_stale(&self, _ttl: Duration) -> Result<usize> {
        trace!("NoopCache: invalidate_stale called, returning 0");
        Ok(0)
    }

    async fn clear(&self) -> Result<()> {
        trace!("NoopCache: clear called, doing nothing");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use fred_core::SeriesMetadata;

    #[tokio::test]
    async fn test_noop_cache_stores_nothing() {
        let cache = NoopCache::new();
        let raw = RawSeries {
            metadata: SeriesMetadata::new("GDPC1"),
            frequency: "Quarterly".to_string(),
            dates: vec!["2020-01-01".to_string()],
            values: vec![19_000.0],
        };

        assert!(cache.put_series("FRED", &raw).await.is_ok());
        assert!(cache.get_series("FRED", "GDPC1").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_noop_cache_management() {
        let cache = NoopCache::new();

        let removed = cache
            .invalidate_stale(Duration::from_secs(3600))
            .await
            .unwrap();
        assert_eq!(removed, 0);

        assert!(cache.clear().await.is_ok());
    }
}
