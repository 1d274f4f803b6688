//! Moving averages.

use fred_core::{FredError, Result, TimeSeries};
use tracing::debug;

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

fn check_length(length: usize) -> Result<()> {
    if length == 0 {
        return Err(FredError::InvalidParameter(
            "moving average length must be at least 1".to_string(),
        ));
    }
    Ok(())
}

/// Trailing average of `length` observations.
///
/// The value dated `t` is the mean of `x[t-length+1..=t]`, so the first
/// `length - 1` dates are lost.
///
/// # Errors
/// Returns [`FredError::InvalidParameter`] if `length` is zero.
pub fn moving_average_one_sided(series: &TimeSeries, length: usize) -> Result<TimeSeries> {
    check_length(length)?;
    let title = format!("{} (1-sided moving average)", series.title());
    let x = series.observations();

    let smoothed = if x.len() < length {
        debug!(series = %series.id(), length, observations = x.len(), "series shorter than window");
        series.empty_like()
    } else {
        let values = x.windows(length).map(mean).collect();
        series.derive(series.dates()[length - 1..].to_vec(), values)?
    };
    Ok(smoothed.map_metadata(|m| m.title = title))
}

/// Centered average over `2 * length` observations.
///
/// The value dated `t` is the mean of `x[t-length..t+length]`; `length`
/// dates are lost at each end.
///
/// # Errors
/// Returns [`FredError::InvalidParameter`] if `length` is zero.
pub fn moving_average_two_sided(series: &TimeSeries, length: usize) -> Result<TimeSeries> {
    check_length(length)?;
    let title = format!("{} (2-sided moving average)", series.title());
    let x = series.observations();
    let span = 2 * length;

    let smoothed = if x.len() <= span {
        debug!(series = %series.id(), length, observations = x.len(), "series shorter than window");
        series.empty_like()
    } else {
        let n = x.len();
        let values = (0..n - span).map(|s| mean(&x[s..s + span])).collect();
        series.derive(series.dates()[length..n - length].to_vec(), values)?
    };
    Ok(smoothed.map_metadata(|m| m.title = title))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{monthly, ym};

    #[test]
    fn test_one_sided_example() {
        let s = monthly(2020, 1, &[2.0, 4.0, 6.0, 8.0]);
        let ma = moving_average_one_sided(&s, 2).unwrap();
        assert_eq!(ma.observations(), &[3.0, 5.0, 7.0]);
        assert_eq!(ma.dates(), &s.dates()[1..]);
        assert_eq!(ma.title(), "Test Series (1-sided moving average)");
    }

    #[test]
    fn test_one_sided_length_one_is_identity() {
        let s = monthly(2020, 1, &[2.0, 4.0, 6.0]);
        let ma = moving_average_one_sided(&s, 1).unwrap();
        assert_eq!(ma.observations(), s.observations());
        assert_eq!(ma.dates(), s.dates());
    }

    #[test]
    fn test_two_sided() {
        let s = monthly(2020, 1, &[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);
        let ma = moving_average_two_sided(&s, 1).unwrap();
        // Means of [1,2], [2,3], [3,4], [4,5] at dates 1..5.
        assert_eq!(ma.observations(), &[1.5, 2.5, 3.5, 4.5]);
        assert_eq!(ma.first_date(), Some(ym(2020, 2)));
        assert_eq!(ma.last_date(), Some(ym(2020, 5)));
        assert_eq!(ma.title(), "Test Series (2-sided moving average)");
    }

    #[test]
    fn test_short_series_and_zero_length() {
        let s = monthly(2020, 1, &[1.0, 2.0]);
        assert!(moving_average_one_sided(&s, 3).unwrap().is_empty());
        assert!(moving_average_two_sided(&s, 1).unwrap().is_empty());
        assert!(matches!(
            moving_average_one_sided(&s, 0),
            Err(FredError::InvalidParameter(_))
        ));
        assert!(moving_average_two_sided(&s, 0).is_err());
    }
}
