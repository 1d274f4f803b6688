//! Trend/cycle decompositions.
//!
//! Each decomposition returns a [`Decomposition`] whose two series share the
//! same (possibly trimmed) date axis and both carry the
//! [`Components`] they were built from. Input too short for a filter
//! produces empty series rather than an error.

use std::ops::Range;

use fred_core::{Components, FredError, Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::params::{BandPassParams, CfParams, HpParams, check_convention};

const CYCLE_UNITS: &str = "Deviation relative to trend";

/// Cycle and trend of a decomposed series.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Decomposition {
    /// Deviation from trend.
    pub cycle: TimeSeries,
    /// Trend component.
    pub trend: TimeSeries,
}

impl Decomposition {
    /// Builds both series over `series.dates()[range]`.
    fn assemble(
        series: &TimeSeries,
        range: Range<usize>,
        cycle: Vec<f64>,
        trend: Vec<f64>,
        label: &str,
    ) -> Result<Self> {
        let dates = series.dates()[range].to_vec();
        let components = Components::new(cycle.clone(), trend.clone())?;

        let title = series.title();
        let cycle_title = format!("{title} - deviation relative to trend ({label})");
        let trend_title = format!("{title} - trend ({label})");

        let cycle = series
            .derive(dates.clone(), cycle)?
            .with_components(components.clone())?
            .map_metadata(|m| {
                m.title = cycle_title;
                m.units = CYCLE_UNITS.to_string();
            });
        let trend = series
            .derive(dates, trend)?
            .with_components(components)?
            .map_metadata(|m| m.title = trend_title);

        Ok(Self { cycle, trend })
    }

    fn empty(series: &TimeSeries, label: &str, required: usize) -> Result<Self> {
        debug!(
            series = %series.id(),
            filter = label,
            required,
            observations = series.len(),
            "too few observations, returning empty decomposition"
        );
        Self::assemble(series, 0..0, Vec::new(), Vec::new(), label)
    }
}

/// Baxter-King band-pass decomposition.
///
/// Loses `lead_lag` observations at each end of the sample.
///
/// # Errors
/// Returns [`FredError::InvalidParameter`] for an invalid band.
pub fn bp_filter(series: &TimeSeries, params: BandPassParams) -> Result<Decomposition> {
    const LABEL: &str = "bandpass filtered";
    check_convention(series, &params, "bandpass");

    let x = series.observations();
    let k = params.lead_lag;
    let cycle = match fred_numerics::bk_filter(x, params.low, params.high, k) {
        Ok(cycle) => cycle,
        Err(FredError::InsufficientData { required, .. }) => {
            return Decomposition::empty(series, LABEL, required);
        }
        Err(e) => return Err(e),
    };

    let range = k..series.len() - k;
    let trend = x[range.clone()]
        .iter()
        .zip(&cycle)
        .map(|(v, c)| v - c)
        .collect();
    Decomposition::assemble(series, range, cycle, trend, LABEL)
}

/// Christiano-Fitzgerald band-pass decomposition over the full sample.
///
/// # Errors
/// Returns [`FredError::InvalidParameter`] for an invalid band.
pub fn cf_filter(series: &TimeSeries, params: CfParams) -> Result<Decomposition> {
    const LABEL: &str = "CF filtered";
    check_convention(series, &params, "christiano-fitzgerald");

    match fred_numerics::cf_filter(series.observations(), params.low, params.high) {
        Ok((cycle, trend)) => {
            Decomposition::assemble(series, 0..series.len(), cycle, trend, LABEL)
        }
        Err(FredError::InsufficientData { required, .. }) => {
            Decomposition::empty(series, LABEL, required)
        }
        Err(e) => Err(e),
    }
}

/// Hodrick-Prescott decomposition over the full sample.
///
/// # Errors
/// Returns [`FredError::InvalidParameter`] for a non-positive λ, or
/// [`FredError::Numerics`] if the smoothing system cannot be solved.
pub fn hp_filter(series: &TimeSeries, params: HpParams) -> Result<Decomposition> {
    const LABEL: &str = "HP filtered";
    check_convention(series, &params, "hodrick-prescott");

    let (cycle, trend) = fred_numerics::hp_filter(series.observations(), params.lambda)?;
    Decomposition::assemble(series, 0..series.len(), cycle, trend, LABEL)
}

/// First-difference decomposition.
///
/// The trend at `t` is the previous observation `x[t-1]`; the cycle is the
/// first difference less its sample mean. Missing differences are excluded
/// from the mean. The first observation is lost.
///
/// # Errors
/// Only fails if the result series cannot be constructed.
pub fn first_difference(series: &TimeSeries) -> Result<Decomposition> {
    const LABEL: &str = "first difference filtered";
    let x = series.observations();
    if x.len() < 2 {
        return Decomposition::empty(series, LABEL, 2);
    }

    let diffs: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
    let (sum, count) = diffs
        .iter()
        .filter(|d| d.is_finite())
        .fold((0.0, 0usize), |(s, c), d| (s + d, c + 1));
    let mean = if count == 0 {
        f64::NAN
    } else {
        sum / count as f64
    };

    let cycle = diffs.iter().map(|d| d - mean).collect();
    let trend = x[..x.len() - 1].to_vec();
    Decomposition::assemble(series, 1..x.len(), cycle, trend, LABEL)
}

/// Linear-trend decomposition: OLS of the observations on a constant and a
/// time index. Trend is the fitted line, cycle the residual.
///
/// # Errors
/// Returns [`FredError::Numerics`] if the regression cannot be solved.
pub fn linear_trend(series: &TimeSeries) -> Result<Decomposition> {
    const LABEL: &str = "linearly filtered via OLS";
    let x = series.observations();

    let trend = match fred_numerics::linear_trend(x) {
        Ok(trend) => trend,
        Err(FredError::InsufficientData { required, .. }) => {
            return Decomposition::empty(series, LABEL, required);
        }
        Err(e) => return Err(e),
    };
    let cycle = x.iter().zip(&trend).map(|(v, t)| v - t).collect();
    Decomposition::assemble(series, 0..x.len(), cycle, trend, LABEL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{annual, monthly, quarterly, ym};

    fn business_cycle(n: usize) -> TimeSeries {
        let values: Vec<f64> = (0..n)
            .map(|t| {
                let t = t as f64;
                100.0 + 0.5 * t + 2.0 * (2.0 * std::f64::consts::PI * t / 16.0).sin()
            })
            .collect();
        quarterly(1960, 1, &values)
    }

    #[test]
    fn test_bp_filter_trims_and_labels() {
        let s = business_cycle(60);
        let d = bp_filter(&s, BandPassParams::QUARTERLY).unwrap();
        assert_eq!(d.cycle.len(), 60 - 24);
        assert_eq!(d.cycle.dates(), &s.dates()[12..48]);
        assert!(d.cycle.is_aligned_with(&d.trend));
        assert_eq!(
            d.cycle.title(),
            "Test Series - deviation relative to trend (bandpass filtered)"
        );
        assert_eq!(d.cycle.units(), "Deviation relative to trend");
        assert_eq!(d.trend.title(), "Test Series - trend (bandpass filtered)");
        assert_eq!(d.trend.units(), "Index");

        let components = d.cycle.components().unwrap();
        for (i, (c, t)) in components.cycle().iter().zip(components.trend()).enumerate() {
            assert!((c + t - s.observations()[i + 12]).abs() < 1e-9);
        }
        assert_eq!(d.trend.components(), d.cycle.components());
    }

    #[test]
    fn test_bp_filter_short_series_is_empty() {
        let s = quarterly(2000, 1, &[1.0; 20]);
        let d = bp_filter(&s, BandPassParams::QUARTERLY).unwrap();
        assert!(d.cycle.is_empty());
        assert!(d.trend.is_empty());
        assert!(bp_filter(&s, BandPassParams::new(8.0, 4.0, 2)).is_err());
    }

    #[test]
    fn test_cf_filter_keeps_every_date() {
        let s = business_cycle(40);
        let d = cf_filter(&s, CfParams::QUARTERLY).unwrap();
        assert_eq!(d.cycle.dates(), s.dates());
        assert_eq!(d.trend.title(), "Test Series - trend (CF filtered)");
        for ((c, t), v) in d
            .cycle
            .observations()
            .iter()
            .zip(d.trend.observations())
            .zip(s.observations())
        {
            assert!((c + t - v).abs() < 1e-9);
        }
    }

    #[test]
    fn test_hp_filter_on_wrong_frequency_still_runs() {
        let s = monthly(2000, 1, &[1.0, 3.0, 2.0, 4.0, 3.0, 5.0]);
        let d = hp_filter(&s, HpParams::QUARTERLY).unwrap();
        assert_eq!(d.cycle.len(), 6);
        assert_eq!(
            d.cycle.title(),
            "Test Series - deviation relative to trend (HP filtered)"
        );
        assert!(hp_filter(&s, HpParams::new(-1.0)).is_err());
    }

    #[test]
    fn test_first_difference() {
        let s = annual(2000, &[1.0, 2.0, 4.0, 7.0]);
        let d = first_difference(&s).unwrap();
        assert_eq!(d.cycle.first_date(), Some(ym(2001, 1)));
        assert_eq!(d.trend.observations(), &[1.0, 2.0, 4.0]);
        // Differences 1, 2, 3 with mean 2.
        assert_eq!(d.cycle.observations(), &[-1.0, 0.0, 1.0]);
        assert!(first_difference(&annual(2000, &[1.0])).unwrap().cycle.is_empty());
    }

    #[test]
    fn test_linear_trend_residuals() {
        let s = annual(2000, &[1.0, 4.0, 5.0, 8.0]);
        let d = linear_trend(&s).unwrap();
        assert_eq!(d.trend.len(), 4);
        let residual_sum: f64 = d.cycle.observations().iter().sum();
        assert!(residual_sum.abs() < 1e-9);
        assert_eq!(
            d.trend.title(),
            "Test Series - trend (linearly filtered via OLS)"
        );
        assert!(linear_trend(&annual(2000, &[1.0])).unwrap().trend.is_empty());
    }

    #[test]
    fn test_other_transforms_do_not_carry_components() {
        let s = business_cycle(40);
        let d = hp_filter(&s, HpParams::QUARTERLY).unwrap();
        let logged = crate::change::log(&d.trend).unwrap();
        assert!(logged.components().is_none());
        assert!(d.trend.clone().components().is_some());
    }
}
