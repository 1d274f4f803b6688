//! SQLite-based cache implementation.

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use fred_core::{FredError, RawSeries, Result, SeriesCache, SeriesMetadata};
use rusqlite::{Connection, OptionalExtension, params};
use std::path::Path;
use std::sync::Mutex;
use std::time::Duration;
use tracing::{debug, instrument};

/// Fixed-width UTC timestamp, so `cached_at` compares correctly as text.
fn timestamp(at: chrono::DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// SQLite-based cache for downloaded series.
///
/// Stores one row per series (metadata and frequency) plus one row per
/// observation, providing persistence across application restarts. Missing
/// observations are stored as `NULL`.
#[derive(Debug)]
pub struct SqliteCache {
    conn: Mutex<Connection>,
}

impl SqliteCache {
    /// Create a new SQLite cache at the given path.
    ///
    /// # Arguments
    /// * `path` - Path to the SQLite database file
    ///
    /// # Errors
    /// Returns an error if the database cannot be opened or schema creation fails.
    pub fn new(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path).map_err(|e| FredError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Create an in-memory SQLite cache.
    ///
    /// Useful for testing; data is lost when the cache is dropped.
    ///
    /// # Errors
    /// Returns an error if schema creation fails.
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| FredError::Cache(e.to_string()))?;
        let cache = Self {
            conn: Mutex::new(conn),
        };
        cache.initialize_schema()?;
        Ok(cache)
    }

    /// Initialize the database schema.
    fn initialize_schema(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FredError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS series_cache (
                provider TEXT NOT NULL,
                id TEXT NOT NULL,
                frequency TEXT NOT NULL,
                metadata_json TEXT NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (provider, id)
            )",
            [],
        )
        .map_err(|e| FredError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE TABLE IF NOT EXISTS observation_cache (
                provider TEXT NOT NULL,
                id TEXT NOT NULL,
                date TEXT NOT NULL,
                value REAL,
                PRIMARY KEY (provider, id, date)
            )",
            [],
        )
        .map_err(|e| FredError::Cache(e.to_string()))?;

        conn.execute(
            "CREATE INDEX IF NOT EXISTS idx_series_cached_at
             ON series_cache(cached_at)",
            [],
        )
        .map_err(|e| FredError::Cache(e.to_string()))?;

        debug!("SQLite cache schema initialized");
        Ok(())
    }
}

#[async_trait]
impl SeriesCache for SqliteCache {
    #[instrument(skip(self), fields(provider = %provider, id = %id))]
    async fn get_series(&self, provider: &str, id: &str) -> Result<Option<RawSeries>> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FredError::Cache(e.to_string()))?;

        let header = conn
            .query_row(
                "SELECT frequency, metadata_json FROM series_cache
                 WHERE provider = ?1 AND id = ?2",
                params![provider, id],
                |row| Ok((row.get::<_, String>(0)?, row.get::<_, String>(1)?)),
            )
            .optional()
            .map_err(|e| FredError::Cache(e.to_string()))?;

        let Some((frequency, metadata_json)) = header else {
            debug!("No cached series found");
            return Ok(None);
        };
        let metadata: SeriesMetadata =
            serde_json::from_str(&metadata_json).map_err(|e| FredError::Parse(e.to_string()))?;

        let mut stmt = conn
            .prepare(
                "SELECT date, value FROM observation_cache
                 WHERE provider = ?1 AND id = ?2
                 ORDER BY date ASC",
            )
            .map_err(|e| FredError::Cache(e.to_string()))?;

        let rows = stmt
            .query_map(params![provider, id], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, Option<f64>>(1)?))
            })
            .map_err(|e| FredError::Cache(e.to_string()))?;

        let mut dates = Vec::new();
        let mut values = Vec::new();
        for row in rows {
            let (date, value) = row.map_err(|e| FredError::Cache(e.to_string()))?;
            dates.push(date);
            values.push(value.unwrap_or(f64::NAN));
        }

        debug!("Found {} cached observations", dates.len());
        Ok(Some(RawSeries {
            metadata,
            frequency,
            dates,
            values,
        }))
    }

    #[instrument(skip(self, series), fields(provider = %provider, id = %series.metadata.id))]
    async fn put_series(&self, provider: &str, series: &RawSeries) -> Result<()> {
        if series.dates.len() != series.values.len() {
            return Err(FredError::Cache(format!(
                "{}: {} dates but {} values",
                series.metadata.id,
                series.dates.len(),
                series.values.len()
            )));
        }

        let cached_at = timestamp(Utc::now());
        let id = series.metadata.id.as_str();
        let metadata_json =
            serde_json::to_string(&series.metadata).map_err(|e| FredError::Parse(e.to_string()))?;

        let conn = self
            .conn
            .lock()
            .map_err(|e| FredError::Cache(e.to_string()))?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| FredError::Cache(e.to_string()))?;

        tx.execute(
            "INSERT OR REPLACE INTO series_cache
             (provider, id, frequency, metadata_json, cached_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![provider, id, series.frequency, metadata_json, cached_at],
        )
        .map_err(|e| FredError::Cache(e.to_string()))?;

        // A revised download may drop dates, so replace the whole series.
        tx.execute(
            "DELETE FROM observation_cache WHERE provider = ?1 AND id = ?2",
            params![provider, id],
        )
        .map_err(|e| FredError::Cache(e.to_string()))?;

        {
            let mut insert = tx
                .prepare(
                    "INSERT OR REPLACE INTO observation_cache (provider, id, date, value)
                     VALUES (?1, ?2, ?3, ?4)",
                )
                .map_err(|e| FredError::Cache(e.to_string()))?;
            for (date, value) in series.dates.iter().zip(&series.values) {
                let value = value.is_finite().then_some(*value);
                insert
                    .execute(params![provider, id, date, value])
                    .map_err(|e| FredError::Cache(e.to_string()))?;
            }
        }

        tx.commit().map_err(|e| FredError::Cache(e.to_string()))?;
        debug!("Cached {} observations", series.dates.len());
        Ok(())
    }

    #[instrument(skip(self))]
    async fn invalidate_stale(&self, ttl: Duration) -> Result<usize> {
        let cutoff = Utc::now()
            - chrono::Duration::from_std(ttl)
                .map_err(|e| FredError::Cache(format!("Invalid TTL duration: {e}")))?;
        let cutoff_str = timestamp(cutoff);

        let conn = self
            .conn
            .lock()
            .map_err(|e| FredError::Cache(e.to_string()))?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| FredError::Cache(e.to_string()))?;

        tx.execute(
            "DELETE FROM observation_cache WHERE (provider, id) IN
             (SELECT provider, id FROM series_cache WHERE cached_at < ?1)",
            params![cutoff_str],
        )
        .map_err(|e| FredError::Cache(e.to_string()))?;

        let deleted = tx
            .execute(
                "DELETE FROM series_cache WHERE cached_at < ?1",
                params![cutoff_str],
            )
            .map_err(|e| FredError::Cache(e.to_string()))?;

        tx.commit().map_err(|e| FredError::Cache(e.to_string()))?;

        if deleted > 0 {
            debug!("Invalidated {} stale cache entries", deleted);
        }

        Ok(deleted)
    }

    #[instrument(skip(self))]
    async fn clear(&self) -> Result<()> {
        let conn = self
            .conn
            .lock()
            .map_err(|e| FredError::Cache(e.to_string()))?;

        conn.execute("DELETE FROM observation_cache", [])
            .map_err(|e| FredError::Cache(e.to_string()))?;
        conn.execute("DELETE FROM series_cache", [])
            .map_err(|e| FredError::Cache(e.to_string()))?;

        debug!("Cleared all cache entries");
        Ok(())
    }
}
