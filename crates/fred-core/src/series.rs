//! The [`TimeSeries`] value type.
//!
//! A series holds parallel arrays of dates and observations plus descriptive
//! metadata. It is immutable from the caller's perspective: every transform
//! builds and returns a new instance, and `clone()` yields a structurally
//! independent copy (arrays are duplicated, never aliased).

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Range;

use crate::error::{FredError, Result};
use crate::frequency::Frequency;
use crate::metadata::SeriesMetadata;

/// Cycle and trend arrays produced by a decomposition, aligned to the dates
/// of the series that carries them.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ComponentsRepr")]
pub struct Components {
    cycle: Vec<f64>,
    trend: Vec<f64>,
}

/// Unvalidated wire form of [`Components`].
#[derive(Deserialize)]
struct ComponentsRepr {
    cycle: Vec<f64>,
    trend: Vec<f64>,
}

impl TryFrom<ComponentsRepr> for Components {
    type Error = FredError;

    fn try_from(repr: ComponentsRepr) -> Result<Self> {
        Self::new(repr.cycle, repr.trend)
    }
}

impl Components {
    /// Creates a component pair.
    ///
    /// # Errors
    /// Returns [`FredError::InvalidSeries`] if the arrays differ in length.
    pub fn new(cycle: Vec<f64>, trend: Vec<f64>) -> Result<Self> {
        if cycle.len() != trend.len() {
            return Err(FredError::InvalidSeries(format!(
                "cycle has {} values but trend has {}",
                cycle.len(),
                trend.len()
            )));
        }
        Ok(Self { cycle, trend })
    }

    /// Deviation-from-trend values.
    #[must_use]
    pub fn cycle(&self) -> &[f64] {
        &self.cycle
    }

    /// Trend values.
    #[must_use]
    pub fn trend(&self) -> &[f64] {
        &self.trend
    }

    /// Number of values in each component.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cycle.len()
    }

    /// Returns true if the components are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cycle.is_empty()
    }

    fn slice(&self, range: Range<usize>) -> Self {
        Self {
            cycle: self.cycle[range.clone()].to_vec(),
            trend: self.trend[range].to_vec(),
        }
    }
}

/// First and last observation dates of a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateRange {
    /// The series has at least one observation.
    Span {
        /// First observation date.
        start: NaiveDate,
        /// Last observation date.
        end: NaiveDate,
    },
    /// The series is empty.
    Null,
}

impl fmt::Display for DateRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Span { start, end } => write!(f, "{start} to {end}"),
            Self::Null => f.write_str("Null"),
        }
    }
}

/// A date-indexed sequence of observations for one economic variable.
///
/// Missing observations are stored as `NaN` and propagate through arithmetic.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TimeSeriesRepr")]
pub struct TimeSeries {
    dates: Vec<NaiveDate>,
    observations: Vec<f64>,
    frequency: Frequency,
    metadata: SeriesMetadata,
    components: Option<Components>,
}

/// Unvalidated wire form of [`TimeSeries`].
#[derive(Deserialize)]
struct TimeSeriesRepr {
    dates: Vec<NaiveDate>,
    observations: Vec<f64>,
    frequency: Frequency,
    metadata: SeriesMetadata,
    #[serde(default)]
    components: Option<Components>,
}

impl TryFrom<TimeSeriesRepr> for TimeSeries {
    type Error = FredError;

    fn try_from(repr: TimeSeriesRepr) -> Result<Self> {
        let series = Self::new(repr.dates, repr.observations, repr.frequency, repr.metadata)?;
        match repr.components {
            Some(components) => series.with_components(components),
            None => Ok(series),
        }
    }
}

impl TimeSeries {
    /// Creates a series from parallel date and observation arrays.
    ///
    /// # Errors
    /// Returns [`FredError::InvalidSeries`] if the arrays differ in length or
    /// the dates are not strictly increasing.
    pub fn new(
        dates: Vec<NaiveDate>,
        observations: Vec<f64>,
        frequency: Frequency,
        metadata: SeriesMetadata,
    ) -> Result<Self> {
        if dates.len() != observations.len() {
            return Err(FredError::InvalidSeries(format!(
                "{}: {} dates but {} observations",
                metadata.id,
                dates.len(),
                observations.len()
            )));
        }
        if let Some(w) = dates.windows(2).find(|w| w[0] >= w[1]) {
            return Err(FredError::InvalidSeries(format!(
                "{}: dates not strictly increasing at {} -> {}",
                metadata.id, w[0], w[1]
            )));
        }
        Ok(Self {
            dates,
            observations,
            frequency,
            metadata,
            components: None,
        })
    }

    /// Creates an empty series.
    #[must_use]
    pub const fn empty(frequency: Frequency, metadata: SeriesMetadata) -> Self {
        Self {
            dates: Vec::new(),
            observations: Vec::new(),
            frequency,
            metadata,
            components: None,
        }
    }

    /// Builds a new series that keeps this series' frequency and metadata but
    /// replaces its dates and observations. Components are dropped because
    /// they would no longer be aligned.
    ///
    /// # Errors
    /// Same as [`TimeSeries::new`].
    pub fn derive(&self, dates: Vec<NaiveDate>, observations: Vec<f64>) -> Result<Self> {
        Self::new(dates, observations, self.frequency, self.metadata.clone())
    }

    /// An empty series sharing this series' frequency and metadata.
    #[must_use]
    pub fn empty_like(&self) -> Self {
        Self::empty(self.frequency, self.metadata.clone())
    }

    /// Attaches decomposition components.
    ///
    /// # Errors
    /// Returns [`FredError::InvalidSeries`] if the components are not aligned
    /// with the dates.
    pub fn with_components(mut self, components: Components) -> Result<Self> {
        if components.len() != self.len() {
            return Err(FredError::InvalidSeries(format!(
                "{}: components have {} values for {} dates",
                self.metadata.id,
                components.len(),
                self.len()
            )));
        }
        self.components = Some(components);
        Ok(self)
    }

    /// Removes decomposition components.
    #[must_use]
    pub fn without_components(mut self) -> Self {
        self.components = None;
        self
    }

    /// Replaces the metadata.
    #[must_use]
    pub fn with_metadata(mut self, metadata: SeriesMetadata) -> Self {
        self.metadata = metadata;
        self
    }

    /// Applies `f` to the metadata.
    #[must_use]
    pub fn map_metadata(mut self, f: impl FnOnce(&mut SeriesMetadata)) -> Self {
        f(&mut self.metadata);
        self
    }

    /// Replaces the frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Returns the observations in `range`, with components sliced alike.
    ///
    /// # Panics
    /// Panics if `range` is out of bounds, as slice indexing does.
    #[must_use]
    pub fn slice(&self, range: Range<usize>) -> Self {
        Self {
            dates: self.dates[range.clone()].to_vec(),
            observations: self.observations[range.clone()].to_vec(),
            frequency: self.frequency,
            metadata: self.metadata.clone(),
            components: self.components.as_ref().map(|c| c.slice(range)),
        }
    }

    /// Observation dates.
    #[must_use]
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Observation values; `NaN` marks a missing value.
    #[must_use]
    pub fn observations(&self) -> &[f64] {
        &self.observations
    }

    /// Observation frequency.
    #[must_use]
    pub const fn frequency(&self) -> Frequency {
        self.frequency
    }

    /// Descriptive metadata.
    #[must_use]
    pub const fn metadata(&self) -> &SeriesMetadata {
        &self.metadata
    }

    /// Series identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.metadata.id
    }

    /// Series title.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    /// Series units.
    #[must_use]
    pub fn units(&self) -> &str {
        &self.metadata.units
    }

    /// Decomposition components, if this series came from a decomposition.
    #[must_use]
    pub const fn components(&self) -> Option<&Components> {
        self.components.as_ref()
    }

    /// Number of observations.
    #[must_use]
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    /// Returns true if there are no observations.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First observation date.
    #[must_use]
    pub fn first_date(&self) -> Option<NaiveDate> {
        self.dates.first().copied()
    }

    /// Last observation date.
    #[must_use]
    pub fn last_date(&self) -> Option<NaiveDate> {
        self.dates.last().copied()
    }

    /// Span covered by the observations, or [`DateRange::Null`] when empty.
    #[must_use]
    pub fn date_range(&self) -> DateRange {
        match (self.first_date(), self.last_date()) {
            (Some(start), Some(end)) => DateRange::Span { start, end },
            _ => DateRange::Null,
        }
    }

    /// Returns true if both series have element-for-element identical dates.
    #[must_use]
    pub fn is_aligned_with(&self, other: &Self) -> bool {
        self.dates == other.dates
    }

    /// Value observed on `date`, if that date is present.
    #[must_use]
    pub fn value_at(&self, date: NaiveDate) -> Option<f64> {
        self.dates
            .binary_search(&date)
            .ok()
            .map(|i| self.observations[i])
    }

    /// Number of missing (`NaN`) observations.
    #[must_use]
    pub fn missing_count(&self) -> usize {
        self.observations.iter().filter(|v| v.is_nan()).count()
    }

    /// Iterates over `(date, value)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (NaiveDate, f64)> + '_ {
        self.dates
            .iter()
            .copied()
            .zip(self.observations.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, 1).unwrap()
    }

    fn sample() -> TimeSeries {
        TimeSeries::new(
            vec![d(2020, 1), d(2020, 2), d(2020, 3)],
            vec![1.0, f64::NAN, 3.0],
            Frequency::Monthly,
            SeriesMetadata::new("TEST").with_title("Test"),
        )
        .unwrap()
    }

    #[test]
    fn test_new_rejects_length_mismatch() {
        let result = TimeSeries::new(
            vec![d(2020, 1)],
            vec![1.0, 2.0],
            Frequency::Monthly,
            SeriesMetadata::new("X"),
        );
        assert!(matches!(result, Err(FredError::InvalidSeries(_))));
    }

    #[test]
    fn test_new_rejects_unordered_dates() {
        let result = TimeSeries::new(
            vec![d(2020, 2), d(2020, 2)],
            vec![1.0, 2.0],
            Frequency::Monthly,
            SeriesMetadata::new("X"),
        );
        assert!(matches!(result, Err(FredError::InvalidSeries(_))));
    }

    #[test]
    fn test_clone_is_independent() {
        let original = sample()
            .with_components(Components::new(vec![0.0; 3], vec![1.0; 3]).unwrap())
            .unwrap();
        let copy = original.clone();
        let mutated = copy.map_metadata(|m| m.title = "Changed".to_string());
        assert_eq!(original.title(), "Test");
        assert_eq!(mutated.title(), "Changed");
        assert_eq!(mutated.components(), original.components());
    }

    #[test]
    fn test_slice_carries_components() {
        let series = sample()
            .with_components(Components::new(vec![0.1, 0.2, 0.3], vec![1.0, 2.0, 3.0]).unwrap())
            .unwrap();
        let sliced = series.slice(1..3);
        assert_eq!(sliced.dates(), &[d(2020, 2), d(2020, 3)]);
        let components = sliced.components().unwrap();
        assert_eq!(components.cycle(), &[0.2, 0.3]);
        assert_eq!(components.trend(), &[2.0, 3.0]);
    }

    #[test]
    fn test_with_components_checks_length() {
        let result = sample().with_components(Components::new(vec![0.0], vec![0.0]).unwrap());
        assert!(result.is_err());
        assert!(Components::new(vec![0.0], vec![]).is_err());
    }

    #[test]
    fn test_date_range_and_lookup() {
        let series = sample();
        assert_eq!(series.date_range().to_string(), "2020-01-01 to 2020-03-01");
        assert_eq!(series.empty_like().date_range(), DateRange::Null);
        assert_eq!(series.empty_like().date_range().to_string(), "Null");
        assert_eq!(series.value_at(d(2020, 3)), Some(3.0));
        assert_eq!(series.value_at(d(2021, 3)), None);
        assert_eq!(series.missing_count(), 1);
    }

    #[test]
    fn test_derive_drops_components() {
        let series = sample()
            .with_components(Components::new(vec![0.0; 3], vec![0.0; 3]).unwrap())
            .unwrap();
        let derived = series.derive(vec![d(2020, 1)], vec![5.0]).unwrap();
        assert!(derived.components().is_none());
        assert_eq!(derived.id(), "TEST");
        assert_eq!(derived.frequency(), Frequency::Monthly);
    }

    #[test]
    fn test_deserialize_rejects_ragged_series() {
        let ragged = r#"{
            "dates": ["2020-01-01", "2020-02-01", "2020-03-01"],
            "observations": [1.0],
            "frequency": "Monthly",
            "metadata": {"id": "X", "title": "", "units": "", "source": "",
                         "seasonal_adjustment": "", "updated": ""},
            "components": null
        }"#;
        assert!(serde_json::from_str::<TimeSeries>(ragged).is_err());

        let unordered = ragged
            .replace("\"2020-03-01\"", "\"2019-12-01\"")
            .replace("[1.0]", "[1.0, 2.0, 3.0]");
        assert!(serde_json::from_str::<TimeSeries>(&unordered).is_err());
    }

    #[test]
    fn test_deserialize_checks_components() {
        let series = sample()
            .with_components(Components::new(vec![0.1, 0.2, 0.3], vec![1.0, 2.0, 3.0]).unwrap())
            .unwrap();
        let mut value = serde_json::to_value(&series).unwrap();
        value["observations"] = serde_json::json!([1.0, 2.0, 3.0]);
        let restored: TimeSeries = serde_json::from_value(value.clone()).unwrap();
        assert_eq!(restored.components(), series.components());
        assert_eq!(restored.len(), 3);

        value["components"]["trend"] = serde_json::json!([1.0]);
        assert!(serde_json::from_value::<TimeSeries>(value.clone()).is_err());
        value["components"] = serde_json::json!({"cycle": [0.0], "trend": [0.0]});
        assert!(serde_json::from_value::<TimeSeries>(value).is_err());
    }
}
