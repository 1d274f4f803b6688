//! Conversion to a lower frequency.
//!
//! Groups anchor on calendar boundaries: quarters run January-March,
//! April-June, July-September and October-December and are dated by their
//! first month; years start in January. A group is emitted only when all of
//! its periods are present and consecutive, so incomplete trailing groups
//! and groups broken by a gap are dropped.

use chrono::{Datelike, NaiveDate};
use fred_core::{Frequency, Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// How the observations of one group are reduced to a single value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Aggregation {
    /// Mean of the group.
    #[default]
    Average,
    /// Sum of the group.
    Sum,
    /// Last value of the group.
    End,
}

impl Aggregation {
    fn reduce(self, group: &[f64]) -> f64 {
        match self {
            Self::Average => group.iter().sum::<f64>() / group.len() as f64,
            Self::Sum => group.iter().sum(),
            Self::End => group.last().copied().unwrap_or(f64::NAN),
        }
    }
}

/// Shape of one frequency conversion.
#[derive(Debug)]
struct Grouping {
    source: Frequency,
    target: Frequency,
    size: usize,
    step_months: i32,
    anchor_months: &'static [u32],
}

const MONTH_TO_QUARTER: Grouping = Grouping {
    source: Frequency::Monthly,
    target: Frequency::Quarterly,
    size: 3,
    step_months: 1,
    anchor_months: &[1, 4, 7, 10],
};

const QUARTER_TO_YEAR: Grouping = Grouping {
    source: Frequency::Quarterly,
    target: Frequency::Annual,
    size: 4,
    step_months: 3,
    anchor_months: &[1],
};

const MONTH_TO_YEAR: Grouping = Grouping {
    source: Frequency::Monthly,
    target: Frequency::Annual,
    size: 12,
    step_months: 1,
    anchor_months: &[1],
};

fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

fn downsample(series: &TimeSeries, grouping: &Grouping, method: Aggregation) -> Result<TimeSeries> {
    if series.frequency() != grouping.source {
        warn!(
            series = %series.id(),
            expected = %grouping.source,
            actual = %series.frequency(),
            "series frequency does not match conversion source"
        );
    }

    let dates = series.dates();
    let x = series.observations();
    let mut out_dates = Vec::new();
    let mut out_values = Vec::new();

    let mut i = 0;
    while i < dates.len() {
        if !grouping.anchor_months.contains(&dates[i].month()) {
            i += 1;
            continue;
        }
        let end = i + grouping.size;
        if end > dates.len() {
            break;
        }
        let consecutive = dates[i..end]
            .windows(2)
            .all(|w| month_index(w[1]) - month_index(w[0]) == grouping.step_months);
        if !consecutive {
            debug!(series = %series.id(), anchor = %dates[i], "dropping group broken by a gap");
            i += 1;
            continue;
        }

        out_dates.push(dates[i]);
        out_values.push(method.reduce(&x[i..end]));
        i = end;
    }

    Ok(series
        .derive(out_dates, out_values)?
        .with_frequency(grouping.target))
}

/// Monthly to quarterly.
///
/// # Errors
/// Only fails if the result series cannot be constructed.
pub fn monthly_to_quarterly(series: &TimeSeries, method: Aggregation) -> Result<TimeSeries> {
    downsample(series, &MONTH_TO_QUARTER, method)
}

/// Quarterly to annual.
///
/// # Errors
/// Only fails if the result series cannot be constructed.
pub fn quarterly_to_annual(series: &TimeSeries, method: Aggregation) -> Result<TimeSeries> {
    downsample(series, &QUARTER_TO_YEAR, method)
}

/// Monthly to annual.
///
/// # Errors
/// Only fails if the result series cannot be constructed.
pub fn monthly_to_annual(series: &TimeSeries, method: Aggregation) -> Result<TimeSeries> {
    downsample(series, &MONTH_TO_YEAR, method)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{month_starts, monthly, quarterly, series_of, ym};

    #[test]
    fn test_monthly_to_quarterly_sum() {
        let s = monthly(2020, 1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let q = monthly_to_quarterly(&s, Aggregation::Sum).unwrap();
        assert_eq!(q.observations(), &[6.0, 15.0]);
        assert_eq!(q.dates(), &[ym(2020, 1), ym(2020, 4)]);
        assert_eq!(q.frequency(), Frequency::Quarterly);
    }

    #[test]
    fn test_monthly_to_quarterly_skips_leading_partial_and_trailing_partial() {
        // Starts in February, ends in August.
        let s = monthly(2020, 2, &[2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let q = monthly_to_quarterly(&s, Aggregation::Average).unwrap();
        assert_eq!(q.dates(), &[ym(2020, 4)]);
        assert_eq!(q.observations(), &[5.0]);
    }

    #[test]
    fn test_end_method_takes_last_value() {
        let s = quarterly(2019, 1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0]);
        let a = quarterly_to_annual(&s, Aggregation::End).unwrap();
        assert_eq!(a.observations(), &[4.0, 8.0]);
        assert_eq!(a.dates(), &[ym(2019, 1), ym(2020, 1)]);
        assert_eq!(a.frequency(), Frequency::Annual);
    }

    #[test]
    fn test_monthly_to_annual_average() {
        let values: Vec<f64> = (1..=30).map(f64::from).collect();
        let s = monthly(2020, 1, &values);
        let a = monthly_to_annual(&s, Aggregation::Average).unwrap();
        assert_eq!(a.observations(), &[6.5, 18.5]);
        assert_eq!(a.last_date(), Some(ym(2021, 1)));
    }

    #[test]
    fn test_gap_breaks_group() {
        // 2020-01, 2020-02, 2020-04, 2020-05, 2020-06: March is missing.
        let mut dates = month_starts(2020, 1, 1, 2);
        dates.extend(month_starts(2020, 4, 1, 3));
        let s = series_of(Frequency::Monthly, dates, &[1.0, 2.0, 4.0, 5.0, 6.0]);
        let q = monthly_to_quarterly(&s, Aggregation::Sum).unwrap();
        assert_eq!(q.dates(), &[ym(2020, 4)]);
        assert_eq!(q.observations(), &[15.0]);
    }

    #[test]
    fn test_missing_values_propagate() {
        let s = monthly(2020, 1, &[1.0, f64::NAN, 3.0]);
        assert!(monthly_to_quarterly(&s, Aggregation::Average).unwrap().observations()[0].is_nan());
        assert_eq!(
            monthly_to_quarterly(&s, Aggregation::End).unwrap().observations(),
            &[3.0]
        );
    }

    #[test]
    fn test_wrong_source_frequency_proceeds() {
        let s = quarterly(2020, 1, &[1.0, 2.0, 3.0]);
        // Quarterly dates are not consecutive months, so no group survives.
        let q = monthly_to_quarterly(&s, Aggregation::Sum).unwrap();
        assert!(q.is_empty());
        assert_eq!(q.frequency(), Frequency::Quarterly);
    }
}
