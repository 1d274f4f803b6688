#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fred/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! FRED series provider.
//!
//! This crate provides [`FredProvider`], which implements the
//! [`SeriesProvider`] trait from `fred-core`.
//!
//! # Example
//!
//! ```no_run
//! use fred_client::FredProvider;
//! use fred_core::SeriesProvider;
//!
//! # async fn example() -> fred_core::Result<()> {
//! let provider = FredProvider::new();
//! let gdp = provider.fetch_series("GDPC1").await?;
//! println!("Fetched {} observations of {}", gdp.len(), gdp.title());
//! # Ok(())
//! # }
//! ```

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use fred_core::{FredError, RawSeries, Result, SeriesProvider};
use tokio::time::sleep;
use tracing::debug;

mod text;

/// Base URL of the FRED plain-text downloads.
pub const DEFAULT_BASE_URL: &str = "https://fred.stlouisfed.org/data";

/// Default rate limit delay in milliseconds.
const DEFAULT_RATE_LIMIT_MS: u64 = 500;

/// Provider name used in errors and cache keys.
const PROVIDER_NAME: &str = "FRED";

/// FRED series provider.
#[derive(Debug)]
pub struct FredProvider {
    client: reqwest::Client,
    base_url: String,
    rate_limit_ms: u64,
    last_request_time: AtomicU64,
}

impl FredProvider {
    /// Create a new FRED provider with default settings.
    ///
    /// Uses built-in rate limiting of one request per 500 ms.
    #[must_use]
    pub fn new() -> Self {
        Self::with_rate_limit(Duration::from_millis(DEFAULT_RATE_LIMIT_MS))
    }

    /// Create a new FRED provider with a custom HTTP client.
    ///
    /// Rate limiting is still applied.
    #[must_use]
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Create a new FRED provider with custom rate limiting.
    #[must_use]
    pub fn with_rate_limit(rate_limit: Duration) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        Self {
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
            rate_limit_ms: rate_limit.as_millis() as u64,
            last_request_time: AtomicU64::new(0),
        }
    }

    /// Replace the base URL (e.g. a mirror or a local test server).
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Apply rate limiting before making a request.
    async fn apply_rate_limit(&self) {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap_or_default()
            .as_millis() as u64;

        let last = self.last_request_time.load(Ordering::Relaxed);
        let elapsed = now.saturating_sub(last);

        if elapsed < self.rate_limit_ms {
            let wait_time = self.rate_limit_ms - elapsed;
            debug!("Rate limiting: waiting {}ms", wait_time);
            sleep(Duration::from_millis(wait_time)).await;
        }

        self.last_request_time.store(
            std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default()
                .as_millis() as u64,
            Ordering::Relaxed,
        );
    }

    /// Build the download URL for a series.
    fn series_url(&self, id: &str) -> String {
        format!("{}/{}.txt", self.base_url, id.trim().to_ascii_uppercase())
    }
}

impl Default for FredProvider {
    fn default() -> Self {
        Self::new()
    }
}

/// Map a non-success HTTP status to an error.
fn status_error(status: reqwest::StatusCode, id: &str) -> FredError {
    match status {
        reqwest::StatusCode::TOO_MANY_REQUESTS => FredError::RateLimited {
            provider: PROVIDER_NAME.to_string(),
            retry_after: Some(Duration::from_secs(60)),
        },
        reqwest::StatusCode::NOT_FOUND => FredError::SeriesNotFound(id.to_string()),
        _ => FredError::Network(format!("HTTP {status} for {id}")),
    }
}

#[async_trait]
impl SeriesProvider for FredProvider {
    fn name(&self) -> &str {
        PROVIDER_NAME
    }

    fn description(&self) -> &str {
        "Federal Reserve Bank of St. Louis economic data (plain-text downloads)"
    }

    async fn fetch_raw(&self, id: &str) -> Result<RawSeries> {
        if id.trim().is_empty() {
            return Err(FredError::InvalidParameter(
                "series identifier is empty".to_string(),
            ));
        }

        self.apply_rate_limit().await;

        let url = self.series_url(id);
        debug!("Fetching series: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FredError::Network(e.to_string()))?;

        if !response.status().is_success() {
            return Err(status_error(response.status(), id));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FredError::Network(e.to_string()))?;

        let raw = text::parse_series_text(id, &body)?;
        debug!(
            series = %raw.metadata.id,
            observations = raw.dates.len(),
            "Parsed series"
        );
        Ok(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_creation() {
        let provider = FredProvider::new();
        assert_eq!(provider.name(), "FRED");
        assert_eq!(provider.rate_limit_ms, DEFAULT_RATE_LIMIT_MS);
    }

    #[test]
    fn test_custom_rate_limit() {
        let provider = FredProvider::with_rate_limit(Duration::from_millis(50));
        assert_eq!(provider.rate_limit_ms, 50);
    }

    #[test]
    fn test_series_url() {
        let provider = FredProvider::new();
        assert_eq!(
            provider.series_url("gdpc1"),
            "https://fred.stlouisfed.org/data/GDPC1.txt"
        );
        let mirrored = FredProvider::new().with_base_url("http://localhost:8080/data/");
        assert_eq!(
            mirrored.series_url("UNRATE"),
            "http://localhost:8080/data/UNRATE.txt"
        );
    }

    #[test]
    fn test_status_mapping() {
        assert!(matches!(
            status_error(reqwest::StatusCode::NOT_FOUND, "NOPE"),
            FredError::SeriesNotFound(id) if id == "NOPE"
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::TOO_MANY_REQUESTS, "X"),
            FredError::RateLimited { .. }
        ));
        assert!(matches!(
            status_error(reqwest::StatusCode::BAD_GATEWAY, "X"),
            FredError::Network(_)
        ));
    }

    #[tokio::test]
    async fn test_empty_id_rejected() {
        let provider = FredProvider::with_rate_limit(Duration::ZERO);
        assert!(matches!(
            provider.fetch_raw("  ").await,
            Err(FredError::InvalidParameter(_))
        ));
    }

    #[tokio::test]
    async fn test_rate_limit_spacing() {
        let provider = FredProvider::with_rate_limit(Duration::from_millis(20));
        let start = std::time::Instant::now();
        provider.apply_rate_limit().await;
        provider.apply_rate_limit().await;
        assert!(start.elapsed() >= Duration::from_millis(15));
    }
}
