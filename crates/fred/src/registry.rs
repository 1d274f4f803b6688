//! Series registry for managing multiple providers with fallback behavior.

use std::sync::Arc;

use futures::future::try_join_all;
use tracing::{debug, warn};

use fred_core::{FredError, Result, SeriesCache, SeriesProvider, TimeSeries};
use fred_transform::{Population, TREASURY_MATURITIES, YieldCurveSet, per_capita, window_equalize};

/// Registry for fetching series from multiple providers with automatic fallback.
///
/// Providers are tried in registration order until one succeeds. When a cache
/// is configured it is consulted first and filled on every successful fetch.
///
/// # Example
///
/// ```rust,ignore
/// use fred::SeriesRegistry;
///
/// let registry = SeriesRegistry::new().with_fred();
/// let [gdp, population] = registry.fetch_equalized(&["GDPC1", "CNP16OV"]).await?[..] else {
///     unreachable!()
/// };
/// ```
#[derive(Default)]
pub struct SeriesRegistry {
    providers: Vec<Arc<dyn SeriesProvider>>,
    cache: Option<Arc<dyn SeriesCache>>,
}

impl std::fmt::Debug for SeriesRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SeriesRegistry")
            .field(
                "providers",
                &self.providers.iter().map(|p| p.name()).collect::<Vec<_>>(),
            )
            .field("cache", &self.cache.as_ref().map(|_| "configured"))
            .finish()
    }
}

impl SeriesRegistry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new registry with a cache.
    #[must_use]
    pub fn with_cache(cache: Arc<dyn SeriesCache>) -> Self {
        Self {
            cache: Some(cache),
            ..Default::default()
        }
    }

    /// Set the cache for this registry.
    #[must_use]
    pub fn set_cache(mut self, cache: Arc<dyn SeriesCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Register a provider after those already registered.
    pub fn register(&mut self, provider: Arc<dyn SeriesProvider>) {
        debug!(provider = provider.name(), "Registering series provider");
        self.providers.push(provider);
    }

    /// Builder form of [`register`](Self::register).
    #[must_use]
    pub fn with_provider(mut self, provider: Arc<dyn SeriesProvider>) -> Self {
        self.register(provider);
        self
    }

    /// Add the FRED download provider.
    #[cfg(feature = "client")]
    #[must_use]
    pub fn with_fred(self) -> Self {
        self.with_provider(Arc::new(fred_client::FredProvider::new()))
    }

    /// Names of the registered providers, in fallback order.
    pub fn provider_names(&self) -> impl Iterator<Item = &str> {
        self.providers.iter().map(|p| p.name())
    }

    /// Fetch a series, trying providers in order until one succeeds.
    ///
    /// Identifiers are case-insensitive. If a cache is configured, it will be
    /// checked first and results will be cached on success.
    ///
    /// # Errors
    /// [`FredError::ProviderNotConfigured`] without providers, otherwise
    /// [`FredError::Retrieval`] carrying the error of the last provider tried.
    pub async fn fetch(&self, id: &str) -> Result<TimeSeries> {
        if self.providers.is_empty() {
            return Err(FredError::ProviderNotConfigured(
                "No series providers registered".to_string(),
            ));
        }
        let id = id.trim().to_ascii_uppercase();

        // Check cache first
        if let Some(cache) = &self.cache {
            for provider in &self.providers {
                if let Ok(Some(cached)) = cache.get_series(provider.name(), &id).await {
                    match TimeSeries::try_from(cached) {
                        Ok(series) => {
                            debug!(provider = provider.name(), id = %id, "Cache hit for series");
                            return Ok(series);
                        }
                        Err(e) => warn!(
                            provider = provider.name(),
                            id = %id,
                            error = %e,
                            "Discarding unreadable cache entry"
                        ),
                    }
                }
            }
        }

        // Try each provider in order
        let mut last_error = None;
        for provider in &self.providers {
            debug!(provider = provider.name(), id = %id, "Fetching series");

            let fetched = match provider.fetch_raw(&id).await {
                Ok(raw) => TimeSeries::try_from(raw.clone()).map(|series| (raw, series)),
                Err(e) => Err(e),
            };
            match fetched {
                Ok((raw, series)) => {
                    if !series.frequency().matches_spacing(series.dates()) {
                        warn!(
                            provider = provider.name(),
                            id = %id,
                            frequency = %series.frequency(),
                            "Observation spacing does not match the published frequency"
                        );
                    }

                    // Cache the result
                    if let Some(cache) = &self.cache {
                        if let Err(e) = cache.put_series(provider.name(), &raw).await {
                            warn!(
                                provider = provider.name(),
                                error = %e,
                                "Failed to cache series"
                            );
                        }
                    }
                    return Ok(series);
                }
                Err(e) => {
                    warn!(
                        provider = provider.name(),
                        error = %e,
                        "Provider failed, trying next"
                    );
                    last_error = Some(e);
                }
            }
        }

        let reason = last_error.map_or_else(
            || "all providers failed with no error".to_string(),
            |e| e.to_string(),
        );
        Err(FredError::Retrieval { id, reason })
    }

    /// Fetch several series concurrently, in the order given.
    ///
    /// # Errors
    /// The first failure among the individual fetches.
    pub async fn fetch_many(&self, ids: &[&str]) -> Result<Vec<TimeSeries>> {
        debug!(count = ids.len(), "Fetching series batch");
        try_join_all(ids.iter().map(|id| self.fetch(id))).await
    }

    /// Fetch several series and restrict them to their common date window.
    ///
    /// # Errors
    /// The first failure among the individual fetches.
    pub async fn fetch_equalized(&self, ids: &[&str]) -> Result<Vec<TimeSeries>> {
        Ok(window_equalize(&self.fetch_many(ids).await?))
    }

    /// Divide `series` by the chosen population measure, fetched through
    /// this registry.
    ///
    /// # Errors
    /// Retrieval failures of the population series, or the errors of
    /// [`fred_transform::per_capita`].
    pub async fn per_capita(
        &self,
        series: &TimeSeries,
        population: Population,
    ) -> Result<TimeSeries> {
        let denominator = self.fetch(population.series_id()).await?;
        per_capita(series, &denominator)
    }

    /// Fetch a yield curve set from `(identifier, maturity in years)` pairs,
    /// shortest maturity first.
    ///
    /// # Errors
    /// Retrieval failures, or [`FredError::InvalidParameter`] for an empty
    /// or unordered maturity list.
    pub async fn yield_curve_set(&self, members: &[(&str, f64)]) -> Result<YieldCurveSet> {
        let ids: Vec<&str> = members.iter().map(|(id, _)| *id).collect();
        let series = self.fetch_many(&ids).await?;
        YieldCurveSet::new(
            members
                .iter()
                .map(|(_, maturity)| *maturity)
                .zip(series)
                .collect(),
        )
    }

    /// Fetch the Treasury constant-maturity yield curve set.
    ///
    /// # Errors
    /// Retrieval failures of any member series.
    pub async fn treasury_yield_curve_set(&self) -> Result<YieldCurveSet> {
        self.yield_curve_set(&TREASURY_MATURITIES).await
    }
}
