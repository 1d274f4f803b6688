//! Date-window restriction and alignment of several series.

use chrono::NaiveDate;
use fred_core::{Result, TimeSeries, parse_date};
use tracing::debug;

/// Keeps observations dated within `[min, max]`.
///
/// Components are sliced alongside the observations. An empty result reports
/// a [`DateRange::Null`](fred_core::DateRange::Null) date range.
#[must_use]
pub fn window(series: &TimeSeries, min: NaiveDate, max: NaiveDate) -> TimeSeries {
    let dates = series.dates();
    let lo = dates.partition_point(|d| *d < min);
    let hi = dates.partition_point(|d| *d <= max).max(lo);
    series.slice(lo..hi)
}

/// [`window`] with bounds given as `YYYY-MM-DD` or `MM-DD-YYYY` strings.
///
/// # Errors
/// Returns [`FredError::Parse`](fred_core::FredError::Parse) if either bound
/// is not a date.
pub fn window_str(series: &TimeSeries, min: &str, max: &str) -> Result<TimeSeries> {
    Ok(window(series, parse_date(min)?, parse_date(max)?))
}

/// Restricts every series to the window shared by all of them: the latest
/// first date through the earliest last date.
///
/// If any series is empty there is no shared window and every result is
/// empty.
#[must_use]
pub fn window_equalize(series: &[TimeSeries]) -> Vec<TimeSeries> {
    let bounds = series
        .iter()
        .map(|s| s.first_date().zip(s.last_date()))
        .collect::<Option<Vec<_>>>();

    let Some(bounds) = bounds else {
        debug!(count = series.len(), "empty series in set, no common window");
        return series.iter().map(TimeSeries::empty_like).collect();
    };

    let start = bounds.iter().map(|(first, _)| *first).max();
    let end = bounds.iter().map(|(_, last)| *last).min();
    match start.zip(end) {
        Some((start, end)) => {
            debug!(%start, %end, count = series.len(), "equalizing windows");
            series.iter().map(|s| window(s, start, end)).collect()
        }
        None => Vec::new(),
    }
}

/// Keeps the most recent `n` observations.
#[must_use]
pub fn recent(series: &TimeSeries, n: usize) -> TimeSeries {
    let len = series.len();
    series.slice(len.saturating_sub(n)..len)
}
