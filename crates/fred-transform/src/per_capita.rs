//! Per-capita conversion against a monthly population series.

use fred_core::{FredError, Frequency, Result, TimeSeries};
use serde::{Deserialize, Serialize};

use crate::aggregate::{Aggregation, monthly_to_annual, monthly_to_quarterly};
use crate::window::window_equalize;

/// US population measure used as the denominator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Population {
    /// Civilian noninstitutional population, 16 years and over.
    #[default]
    Civilian,
    /// Total population, all ages.
    Total,
}

impl Population {
    /// FRED identifier of the population series.
    #[must_use]
    pub const fn series_id(&self) -> &'static str {
        match self {
            Self::Civilian => "CNP16OV",
            Self::Total => "POP",
        }
    }
}

/// Divides `series` by `population`.
///
/// The monthly population series is averaged to the frequency of `series`,
/// both are restricted to their common window and the observations are
/// divided elementwise. Population is published in thousands, hence the
/// `" Per Thousand People"` units suffix.
///
/// # Errors
/// - [`FredError::InvalidParameter`] if `series` is daily or weekly.
/// - [`FredError::Alignment`] if the windowed date axes still differ.
pub fn per_capita(series: &TimeSeries, population: &TimeSeries) -> Result<TimeSeries> {
    let population = match series.frequency() {
        Frequency::Monthly => population.clone(),
        Frequency::Quarterly => monthly_to_quarterly(population, Aggregation::Average)?,
        Frequency::Annual => monthly_to_annual(population, Aggregation::Average)?,
        other => {
            return Err(FredError::InvalidParameter(format!(
                "per-capita conversion needs monthly or lower frequency, {} is {other}",
                series.id()
            )));
        }
    };

    let windowed = window_equalize(&[series.clone(), population]);
    let [numerator, denominator] = windowed.as_slice() else {
        return Err(FredError::Other("window equalization lost a series".to_string()));
    };
    if !numerator.is_aligned_with(denominator) {
        return Err(FredError::Alignment {
            left: numerator.id().to_string(),
            right: denominator.id().to_string(),
        });
    }

    let observations = numerator
        .observations()
        .iter()
        .zip(denominator.observations())
        .map(|(v, p)| v / p)
        .collect();
    Ok(numerator
        .derive(numerator.dates().to_vec(), observations)?
        .map_metadata(|m| {
            m.title.push_str(" Per Capita");
            m.units.push_str(" Per Thousand People");
        }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{annual, monthly, quarterly, ym};

    fn population() -> TimeSeries {
        let values: Vec<f64> = (0..36).map(|i| 100.0 + f64::from(i)).collect();
        monthly(2019, 1, &values).map_metadata(|m| m.id = "CNP16OV".to_string())
    }

    #[test]
    fn test_population_ids() {
        assert_eq!(Population::Civilian.series_id(), "CNP16OV");
        assert_eq!(Population::Total.series_id(), "POP");
    }

    #[test]
    fn test_quarterly_per_capita() {
        // 2020Q1 through 2022Q4; population covers 2019-01 to 2021-12.
        let gdp = quarterly(2020, 1, &[1000.0; 12]);
        let pc = per_capita(&gdp, &population()).unwrap();
        assert_eq!(pc.first_date(), Some(ym(2020, 1)));
        assert_eq!(pc.last_date(), Some(ym(2021, 10)));
        assert_eq!(pc.frequency(), Frequency::Quarterly);
        // 2020Q1 population averages 112, 113, 114.
        assert!((pc.observations()[0] - 1000.0 / 113.0).abs() < 1e-12);
        assert_eq!(pc.title(), "Test Series Per Capita");
        assert_eq!(pc.units(), "Index Per Thousand People");
    }

    #[test]
    fn test_annual_and_monthly_per_capita() {
        let a = per_capita(&annual(2018, &[500.0, 500.0, 500.0]), &population()).unwrap();
        assert_eq!(a.dates(), &[ym(2019, 1), ym(2020, 1)]);
        assert!((a.observations()[0] - 500.0 / 105.5).abs() < 1e-12);

        let m = per_capita(&monthly(2021, 11, &[10.0, 10.0, 10.0]), &population()).unwrap();
        assert_eq!(m.len(), 2);
        assert!((m.observations()[1] - 10.0 / 135.0).abs() < 1e-12);
    }

    #[test]
    fn test_daily_rejected() {
        let daily = crate::test_util::series_of(Frequency::Daily, vec![ym(2020, 1)], &[1.0]);
        assert!(matches!(
            per_capita(&daily, &population()),
            Err(FredError::InvalidParameter(_))
        ));
    }
}
