//! Provider trait for retrieving raw series observations.
//!
//! A [`SeriesProvider`] is the retrieval collaborator: given a series
//! identifier it returns a [`RawSeries`], which is converted into a validated
//! [`TimeSeries`] before any transform touches it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt::Debug;

use crate::{
    date::parse_iso_date,
    error::{FredError, Result},
    frequency::Frequency,
    metadata::SeriesMetadata,
    series::TimeSeries,
};

/// Missing-value sentinel used by FRED downloads.
pub const MISSING_SENTINEL: &str = ".";

/// Raw observations and metadata as delivered by a provider.
///
/// Dates are `YYYY-MM-DD` strings; values have already had the missing-value
/// sentinel mapped to `NaN`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSeries {
    /// Descriptive metadata.
    pub metadata: SeriesMetadata,
    /// Frequency label as published (e.g. `"Monthly"`).
    pub frequency: String,
    /// Observation dates in `YYYY-MM-DD` format.
    pub dates: Vec<String>,
    /// Observation values.
    pub values: Vec<f64>,
}

impl RawSeries {
    /// Parses one published value, mapping the missing sentinel to `NaN`.
    ///
    /// # Errors
    /// Returns [`FredError::Parse`] for anything that is neither a number nor
    /// the sentinel.
    pub fn parse_value(raw: &str) -> Result<f64> {
        let trimmed = raw.trim();
        if trimmed == MISSING_SENTINEL || trimmed.is_empty() {
            return Ok(f64::NAN);
        }
        trimmed
            .parse::<f64>()
            .map_err(|e| FredError::Parse(format!("Invalid value '{trimmed}': {e}")))
    }
}

impl TryFrom<RawSeries> for TimeSeries {
    type Error = FredError;

    fn try_from(raw: RawSeries) -> Result<Self> {
        let frequency = Frequency::from_label(&raw.frequency).ok_or_else(|| {
            FredError::Parse(format!(
                "{}: unknown frequency '{}'",
                raw.metadata.id, raw.frequency
            ))
        })?;
        let dates = raw
            .dates
            .iter()
            .map(|s| parse_iso_date(s))
            .collect::<Result<Vec<_>>>()?;
        Self::new(dates, raw.values, frequency, raw.metadata)
    }
}

/// Source of raw series observations.
///
/// Implementations fetch by identifier and fail with
/// [`FredError::SeriesNotFound`] for unknown identifiers, or
/// [`FredError::Network`] / [`FredError::RateLimited`] when the service is
/// unavailable. The registry reports the last provider failure as
/// [`FredError::Retrieval`]. The core never retries.
#[async_trait]
pub trait SeriesProvider: Send + Sync + Debug {
    /// Returns the name of this provider (e.g. "FRED").
    fn name(&self) -> &str;

    /// Returns a description of this provider.
    fn description(&self) -> &str;

    /// Fetches the raw observations and metadata for `id`.
    async fn fetch_raw(&self, id: &str) -> Result<RawSeries>;

    /// Fetches and validates a series.
    async fn fetch_series(&self, id: &str) -> Result<TimeSeries> {
        TimeSeries::try_from(self.fetch_raw(id).await?)
    }
}
