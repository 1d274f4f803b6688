//! In-memory cache implementation.

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use fred_core::{RawSeries, Result, SeriesCache};
use std::collections::HashMap;
use std::time::Duration;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

/// Cache entry with timestamp for TTL-based invalidation.
#[derive(Debug, Clone)]
struct CacheEntry {
    series: RawSeries,
    cached_at: DateTime<Utc>,
}

impl CacheEntry {
    fn new(series: RawSeries) -> Self {
        Self {
            series,
            cached_at: Utc::now(),
        }
    }

    fn is_stale(&self, ttl: Duration) -> bool {
        let age = Utc::now().signed_duration_since(self.cached_at);
        age > TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX)
    }
}

/// Key for cached series.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct SeriesKey {
    provider: String,
    id: String,
}

impl SeriesKey {
    fn new(provider: &str, id: &str) -> Self {
        Self {
            provider: provider.to_string(),
            id: id.to_string(),
        }
    }
}

/// Simple in-memory cache for testing and development.
///
/// Series are stored in a `RwLock`-protected `HashMap` and are lost when the
/// cache is dropped. Entries are cloned on get/put operations.
#[derive(Debug, Default)]
pub struct InMemoryCache {
    series: RwLock<HashMap<SeriesKey, CacheEntry>>,
}

impl InMemoryCache {
    /// Create a new empty in-memory cache.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of cached series.
    pub async fn len(&self) -> usize {
        self.series.read().await.len()
    }

    /// Returns true if nothing is cached.
    pub async fn is_empty(&self) -> bool {
        self.series.read().await.is_empty()
    }
}

#[async_trait]
impl SeriesCache for InMemoryCache {
    #[instrument(skip(self), fields(provider = %provider, id = %id))]
    async fn get_series(&self, provider: &str, id: &str) -> Result<Option<RawSeries>> {
        let cache = self.series.read().await;
        match cache.get(&SeriesKey::new(provider, id)) {
            Some(entry) => {
                debug!("Cache hit for series");
                Ok(Some(entry.series.clone()))
            }
            None => {
                debug!("Cache miss for series");
                Ok(None)
            }
        }
    }

    #[instrument(skip(self, series), fields(provider = %provider, id = %series.metadata.id))]
    async fn put_series(&self, provider: &str, series: &RawSeries) -> Result<()> {
        let key = SeriesKey::new(provider, &series.metadata.id);
        let mut cache = self.series.write().await;
        cache.insert(key, CacheEntry::new(series.clone()));
        debug!("Cached {} observations", series.dates.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let mut cache = self.series.write().await;
        let before = cache.len();
        cache.retain(|_, entry| !entry.is_stale(ttl));
        let removed = before - cache.len();

        if removed > 0 {
            debug!("Invalidated {} stale cache entries", removed);
        }

        Ok(removed)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        self.series.write().await.clear();
        debug!("Cleared all cache entries");
        Ok(())
    }
}
