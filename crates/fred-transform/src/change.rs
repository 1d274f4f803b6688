//! Logarithms and percentage changes.

use fred_core::{Result, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Which date labels a computed change.
///
/// The same pair of observations is differenced either way; only the date
/// attached to the result moves.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Label the change from `t - lag` to `t` with date `t`.
    #[default]
    Backward,
    /// Label the change from `t` to `t + lag` with date `t`.
    Forward,
}

/// Natural logarithm of every observation.
///
/// # Errors
/// Only fails if the derived series cannot be constructed.
pub fn log(series: &TimeSeries) -> Result<TimeSeries> {
    let observations = series.observations().iter().map(|v| v.ln()).collect();
    let title = format!("Log {}", series.title());
    let units = format!("log {}", series.units());
    Ok(series
        .derive(series.dates().to_vec(), observations)?
        .map_metadata(|m| {
            m.title = title;
            m.units = units;
        }))
}

/// Percentage change from the preceding period.
///
/// With `use_log` the change is `100·ln(x[t]/x[t-1])`, otherwise
/// `100·(x[t]/x[t-1] - 1)`. `annualize` scales the result by the number of
/// periods per year. A series with fewer than two observations yields an
/// empty series.
///
/// # Errors
/// Only fails if the derived series cannot be constructed.
pub fn percent_change(
    series: &TimeSeries,
    use_log: bool,
    direction: Direction,
    annualize: bool,
) -> Result<TimeSeries> {
    let scale = if annualize {
        series.frequency().periods_per_year() as f64
    } else {
        1.0
    };
    let title = format!("Percentage Change in {}", series.title());
    change_over(series, 1, use_log, direction, scale, title)
}

/// Percentage change over one year, i.e. with a lag of
/// [`periods_per_year`](fred_core::Frequency::periods_per_year) observations.
///
/// # Errors
/// Only fails if the derived series cannot be constructed.
pub fn annual_percent_change(
    series: &TimeSeries,
    use_log: bool,
    direction: Direction,
) -> Result<TimeSeries> {
    let lag = series.frequency().periods_per_year();
    let title = format!("Annual Percentage Change in {}", series.title());
    change_over(series, lag, use_log, direction, 1.0, title)
}

fn change_over(
    series: &TimeSeries,
    lag: usize,
    use_log: bool,
    direction: Direction,
    scale: f64,
    title: String,
) -> Result<TimeSeries> {
    let n = series.len();
    let changed = if n <= lag {
        debug!(
            series = %series.id(),
            lag,
            observations = n,
            "too few observations for percentage change"
        );
        series.empty_like()
    } else {
        let x = series.observations();
        let observations = (lag..n)
            .map(|t| {
                let ratio = x[t] / x[t - lag];
                let change = if use_log {
                    100.0 * ratio.ln()
                } else {
                    100.0 * (ratio - 1.0)
                };
                scale * change
            })
            .collect();
        let dates = match direction {
            Direction::Backward => series.dates()[lag..].to_vec(),
            Direction::Forward => series.dates()[..n - lag].to_vec(),
        };
        series.derive(dates, observations)?
    };

    Ok(changed.map_metadata(|m| {
        m.title = title;
        m.units = "Percent".to_string();
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{monthly, quarterly, ym};

    #[test]
    fn test_percent_change_simple_backward() {
        let s = monthly(2020, 1, &[100.0, 110.0]);
        let pc = percent_change(&s, false, Direction::Backward, false).unwrap();
        assert_eq!(pc.len(), 1);
        assert!((pc.observations()[0] - 10.0).abs() < 1e-12);
        assert_eq!(pc.dates(), &[ym(2020, 2)]);
        assert_eq!(pc.title(), "Percentage Change in Test Series");
        assert_eq!(pc.units(), "Percent");
    }

    #[test]
    fn test_percent_change_forward_labels_earlier_date() {
        let s = monthly(2020, 1, &[100.0, 110.0, 121.0]);
        let pc = percent_change(&s, false, Direction::Forward, false).unwrap();
        assert_eq!(pc.dates(), &[ym(2020, 1), ym(2020, 2)]);
        assert!((pc.observations()[1] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_change_log_annualized() {
        let s = quarterly(2020, 1, &[100.0, 100.0 * 1.01_f64.exp()]);
        let pc = percent_change(&s, true, Direction::Backward, true).unwrap();
        // ln growth of 0.01 per quarter, times 100, times 4.
        assert!((pc.observations()[0] - 4.0).abs() < 1e-9);
    }

    #[test]
    fn test_percent_change_short_series_is_empty() {
        let s = monthly(2020, 1, &[100.0]);
        let pc = percent_change(&s, true, Direction::Backward, false).unwrap();
        assert!(pc.is_empty());
        assert_eq!(pc.title(), "Percentage Change in Test Series");
    }

    #[test]
    fn test_annual_percent_change_uses_year_lag() {
        let s = quarterly(2019, 1, &[100.0, 101.0, 102.0, 103.0, 105.0, 106.0]);
        let apc = annual_percent_change(&s, false, Direction::Backward).unwrap();
        assert_eq!(apc.len(), 2);
        assert_eq!(apc.first_date(), Some(ym(2020, 1)));
        assert!((apc.observations()[0] - 5.0).abs() < 1e-9);
        assert_eq!(apc.title(), "Annual Percentage Change in Test Series");
        assert!(
            annual_percent_change(&quarterly(2019, 1, &[1.0; 4]), true, Direction::Forward)
                .unwrap()
                .is_empty()
        );
    }

    #[test]
    fn test_annual_percent_change_forward_labels_start_of_year() {
        let values: Vec<f64> = (0..14).map(|i| 100.0 * 1.01_f64.powi(i)).collect();
        let s = monthly(2020, 1, &values);
        let apc = annual_percent_change(&s, false, Direction::Forward).unwrap();
        assert_eq!(apc.len(), 2);
        assert_eq!(apc.dates(), &s.dates()[..2]);
        let expected = 100.0 * (1.01_f64.powi(12) - 1.0);
        assert!(apc.observations().iter().all(|v| (v - expected).abs() < 1e-9));
    }

    #[test]
    fn test_log_labels_and_missing() {
        let s = monthly(2020, 1, &[1.0, f64::NAN]);
        let logged = log(&s).unwrap();
        assert_eq!(logged.observations()[0], 0.0);
        assert!(logged.observations()[1].is_nan());
        assert_eq!(logged.title(), "Log Test Series");
        assert_eq!(logged.units(), "log Index");
    }

    #[test]
    fn test_input_untouched() {
        let s = monthly(2020, 1, &[100.0, 110.0]);
        let before = s.clone();
        percent_change(&s, true, Direction::Backward, true).unwrap();
        log(&s).unwrap();
        assert_eq!(s, before);
    }
}
