//! Cache trait for storing fetched series.
//!
//! This module defines the [`SeriesCache`] trait that stores raw provider
//! responses so repeated lookups (population series for per-capita
//! conversions, yield-curve sets) avoid repeated downloads.

use async_trait::async_trait;
use std::time::Duration;

use crate::{error::Result, provider::RawSeries};

/// Trait for caching raw series keyed by provider and identifier.
#[async_trait]
pub trait SeriesCache: Send + Sync {
    /// Retrieves a cached series.
    ///
    /// Returns `Ok(Some(raw))` if cached data exists, `Ok(None)` if not cached.
    async fn get_series(&self, provider: &str, id: &str) -> Result<Option<RawSeries>>;

    /// Stores a series, replacing any previous entry for the same key.
    async fn put_series(&self, provider: &str, series: &RawSeries) -> Result<()>;

    /// Removes cache entries older than the specified TTL.
    ///
    /// Returns the number of entries invalidated.
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize>;

    /// Clears all cached data.
    async fn clear(&self) -> Result<()>;
}
