//! Fixtures shared by the transform tests.

use chrono::{Datelike, NaiveDate};
use fred_core::{Frequency, SeriesMetadata, TimeSeries};

pub(crate) fn ym(year: i32, month: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

/// First-of-month dates starting at `year`-`month`, `step` months apart.
pub(crate) fn month_starts(year: i32, month: u32, step: u32, count: usize) -> Vec<NaiveDate> {
    let start = ym(year, month);
    (0..count)
        .map(|i| {
            let offset = start.month0() + step * i as u32;
            ym(start.year() + (offset / 12) as i32, offset % 12 + 1)
        })
        .collect()
}

pub(crate) fn series_of(
    frequency: Frequency,
    dates: Vec<NaiveDate>,
    values: &[f64],
) -> TimeSeries {
    TimeSeries::new(
        dates,
        values.to_vec(),
        frequency,
        SeriesMetadata::new("TEST")
            .with_title("Test Series")
            .with_units("Index"),
    )
    .unwrap()
}

pub(crate) fn monthly(year: i32, month: u32, values: &[f64]) -> TimeSeries {
    series_of(
        Frequency::Monthly,
        month_starts(year, month, 1, values.len()),
        values,
    )
}

pub(crate) fn quarterly(year: i32, month: u32, values: &[f64]) -> TimeSeries {
    series_of(
        Frequency::Quarterly,
        month_starts(year, month, 3, values.len()),
        values,
    )
}

pub(crate) fn annual(year: i32, values: &[f64]) -> TimeSeries {
    series_of(
        Frequency::Annual,
        month_starts(year, 1, 12, values.len()),
        values,
    )
}
