//! Method syntax for the transforms.

use chrono::NaiveDate;
use fred_core::{Result, TimeSeries};

use crate::{
    aggregate::{self, Aggregation},
    change::{self, Direction},
    combine,
    decompose::{self, Decomposition},
    params::{BandPassParams, CfParams, HpParams},
    per_capita, smooth, window,
};

/// Extension trait exposing every transform as a method on [`TimeSeries`].
///
/// ```rust,ignore
/// use fred_transform::{Aggregation, Direction, SeriesExt};
///
/// let growth = gdp
///     .monthly_to_quarterly(Aggregation::Average)?
///     .percent_change(true, Direction::Backward, true)?;
/// ```
pub trait SeriesExt {
    /// See [`combine::add`].
    fn plus(&self, other: &TimeSeries) -> Result<TimeSeries>;
    /// See [`combine::subtract`].
    fn minus(&self, other: &TimeSeries) -> Result<TimeSeries>;
    /// See [`combine::multiply`].
    fn times(&self, other: &TimeSeries) -> Result<TimeSeries>;
    /// See [`combine::divide`].
    fn divided_by(&self, other: &TimeSeries) -> Result<TimeSeries>;

    /// See [`window::window`].
    fn window(&self, min: NaiveDate, max: NaiveDate) -> TimeSeries;
    /// See [`window::window_str`].
    fn window_str(&self, min: &str, max: &str) -> Result<TimeSeries>;
    /// See [`window::recent`].
    fn recent(&self, n: usize) -> TimeSeries;

    /// See [`change::log`].
    fn log(&self) -> Result<TimeSeries>;
    /// See [`change::percent_change`].
    fn percent_change(&self, use_log: bool, direction: Direction, annualize: bool)
    -> Result<TimeSeries>;
    /// See [`change::annual_percent_change`].
    fn annual_percent_change(&self, use_log: bool, direction: Direction) -> Result<TimeSeries>;

    /// See [`decompose::bp_filter`].
    fn bp_filter(&self, params: BandPassParams) -> Result<Decomposition>;
    /// See [`decompose::cf_filter`].
    fn cf_filter(&self, params: CfParams) -> Result<Decomposition>;
    /// See [`decompose::hp_filter`].
    fn hp_filter(&self, params: HpParams) -> Result<Decomposition>;
    /// See [`decompose::first_difference`].
    fn first_difference(&self) -> Result<Decomposition>;
    /// See [`decompose::linear_trend`].
    fn linear_trend(&self) -> Result<Decomposition>;

    /// See [`smooth::moving_average_one_sided`].
    fn moving_average_one_sided(&self, length: usize) -> Result<TimeSeries>;
    /// See [`smooth::moving_average_two_sided`].
    fn moving_average_two_sided(&self, length: usize) -> Result<TimeSeries>;

    /// See [`aggregate::monthly_to_quarterly`].
    fn monthly_to_quarterly(&self, method: Aggregation) -> Result<TimeSeries>;
    /// See [`aggregate::quarterly_to_annual`].
    fn quarterly_to_annual(&self, method: Aggregation) -> Result<TimeSeries>;
    /// See [`aggregate::monthly_to_annual`].
    fn monthly_to_annual(&self, method: Aggregation) -> Result<TimeSeries>;

    /// See [`per_capita::per_capita`].
    fn per_capita(&self, population: &TimeSeries) -> Result<TimeSeries>;
}

impl SeriesExt for TimeSeries {
    fn plus(&self, other: &Self) -> Result<Self> {
        combine::add(self, other)
    }

    fn minus(&self, other: &Self) -> Result<Self> {
        combine::subtract(self, other)
    }

    fn times(&self, other: &Self) -> Result<Self> {
        combine::multiply(self, other)
    }

    fn divided_by(&self, other: &Self) -> Result<Self> {
        combine::divide(self, other)
    }

    fn window(&self, min: NaiveDate, max: NaiveDate) -> Self {
        window::window(self, min, max)
    }

    fn window_str(&self, min: &str, max: &str) -> Result<Self> {
        window::window_str(self, min, max)
    }

    fn recent(&self, n: usize) -> Self {
        window::recent(self, n)
    }

    fn log(&self) -> Result<Self> {
        change::log(self)
    }

    fn percent_change(
        &self,
        use_log: bool,
        direction: Direction,
        annualize: bool,
    ) -> Result<Self> {
        change::percent_change(self, use_log, direction, annualize)
    }

    fn annual_percent_change(&self, use_log: bool, direction: Direction) -> Result<Self> {
        change::annual_percent_change(self, use_log, direction)
    }

    fn bp_filter(&self, params: BandPassParams) -> Result<Decomposition> {
        decompose::bp_filter(self, params)
    }

    fn cf_filter(&self, params: CfParams) -> Result<Decomposition> {
        decompose::cf_filter(self, params)
    }

    fn hp_filter(&self, params: HpParams) -> Result<Decomposition> {
        decompose::hp_filter(self, params)
    }

    fn first_difference(&self) -> Result<Decomposition> {
        decompose::first_difference(self)
    }

    fn linear_trend(&self) -> Result<Decomposition> {
        decompose::linear_trend(self)
    }

    fn moving_average_one_sided(&self, length: usize) -> Result<Self> {
        smooth::moving_average_one_sided(self, length)
    }

    fn moving_average_two_sided(&self, length: usize) -> Result<Self> {
        smooth::moving_average_two_sided(self, length)
    }

    fn monthly_to_quarterly(&self, method: Aggregation) -> Result<Self> {
        aggregate::monthly_to_quarterly(self, method)
    }

    fn quarterly_to_annual(&self, method: Aggregation) -> Result<Self> {
        aggregate::quarterly_to_annual(self, method)
    }

    fn monthly_to_annual(&self, method: Aggregation) -> Result<Self> {
        aggregate::monthly_to_annual(self, method)
    }

    fn per_capita(&self, population: &Self) -> Result<Self> {
        per_capita::per_capita(self, population)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::monthly;

    #[test]
    fn test_chained_transforms() {
        let values: Vec<f64> = (0..24).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let s = monthly(2020, 1, &values);
        let growth = s
            .monthly_to_quarterly(Aggregation::End)
            .unwrap()
            .percent_change(false, Direction::Backward, false)
            .unwrap();
        assert_eq!(growth.len(), 7);
        for v in growth.observations() {
            assert!((v - 100.0 * (1.01_f64.powi(3) - 1.0)).abs() < 1e-9);
        }
        let zero = s.minus(&s.recent(24)).unwrap();
        assert!(zero.observations().iter().all(|v| *v == 0.0));
    }
}
