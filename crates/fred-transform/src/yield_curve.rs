//! Yield curves from a set of constant-maturity yield series.
//!
//! A [`YieldCurveSet`] is fetched once, constructed explicitly and then
//! sampled at any number of dates.

use chrono::NaiveDate;
use fred_core::{FredError, Result, TimeSeries};
use serde::{Deserialize, Serialize};

/// Treasury yield identifiers and their maturities in years, shortest first.
pub const TREASURY_MATURITIES: [(&str, f64); 8] = [
    ("DTB4WK", 1.0 / 12.0),
    ("DTB3", 0.25),
    ("DTB6", 0.5),
    ("DGS1", 1.0),
    ("DGS5", 5.0),
    ("DGS10", 10.0),
    ("DGS20", 20.0),
    ("DGS30", 30.0),
];

/// Yield series keyed by maturity.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "YieldCurveSetRepr")]
pub struct YieldCurveSet {
    members: Vec<(f64, TimeSeries)>,
}

#[derive(Deserialize)]
struct YieldCurveSetRepr {
    members: Vec<(f64, TimeSeries)>,
}

impl TryFrom<YieldCurveSetRepr> for YieldCurveSet {
    type Error = FredError;

    fn try_from(repr: YieldCurveSetRepr) -> Result<Self> {
        Self::new(repr.members)
    }
}

impl YieldCurveSet {
    /// Creates a set from `(maturity in years, series)` pairs.
    ///
    /// # Errors
    /// Returns [`FredError::InvalidParameter`] if the set is empty, or a
    /// maturity is not positive or not strictly increasing.
    pub fn new(members: Vec<(f64, TimeSeries)>) -> Result<Self> {
        if members.is_empty() {
            return Err(FredError::InvalidParameter(
                "yield curve set needs at least one series".to_string(),
            ));
        }
        if let Some((maturity, series)) = members
            .iter()
            .find(|(m, _)| !(m.is_finite() && *m > 0.0))
        {
            return Err(FredError::InvalidParameter(format!(
                "invalid maturity {maturity} for {}",
                series.id()
            )));
        }
        if members.windows(2).any(|w| w[0].0 >= w[1].0) {
            return Err(FredError::InvalidParameter(
                "maturities must be strictly increasing".to_string(),
            ));
        }
        Ok(Self { members })
    }

    /// Maturities in years.
    pub fn maturities(&self) -> impl Iterator<Item = f64> + '_ {
        self.members.iter().map(|(m, _)| *m)
    }

    /// The member series, shortest maturity first.
    pub fn series(&self) -> impl Iterator<Item = &TimeSeries> {
        self.members.iter().map(|(_, s)| s)
    }

    /// Number of maturities.
    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Always false; a set holds at least one series.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// The curve observed on `date`. Maturities with no observation on that
    /// date are reported as `NaN`.
    #[must_use]
    pub fn curve(&self, date: NaiveDate) -> YieldCurve {
        let points = self
            .members
            .iter()
            .map(|(maturity, series)| YieldPoint {
                id: series.id().to_string(),
                maturity: *maturity,
                value: series.value_at(date).unwrap_or(f64::NAN),
            })
            .collect();
        YieldCurve { date, points }
    }
}

/// One maturity on a curve.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YieldPoint {
    /// Identifier of the yield series.
    pub id: String,
    /// Maturity in years.
    pub maturity: f64,
    /// Yield in percent; `NaN` when not observed.
    pub value: f64,
}

/// Yields across maturities on a single date.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct YieldCurve {
    /// Observation date.
    pub date: NaiveDate,
    /// Points ordered by maturity.
    pub points: Vec<YieldPoint>,
}

impl YieldCurve {
    /// Points that were actually observed.
    pub fn observed(&self) -> impl Iterator<Item = &YieldPoint> {
        self.points.iter().filter(|p| p.value.is_finite())
    }

    /// Date formatted for display, e.g. `"January 14, 1981"`.
    #[must_use]
    pub fn label(&self) -> String {
        self.date.format("%B %d, %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::ym;
    use fred_core::{Frequency, SeriesMetadata};

    fn daily(id: &str, values: &[(NaiveDate, f64)]) -> TimeSeries {
        TimeSeries::new(
            values.iter().map(|(d, _)| *d).collect(),
            values.iter().map(|(_, v)| *v).collect(),
            Frequency::Daily,
            SeriesMetadata::new(id),
        )
        .unwrap()
    }

    #[test]
    fn test_curve_with_missing_maturity() {
        let set = YieldCurveSet::new(vec![
            (0.25, daily("DTB3", &[(ym(1981, 1), 14.0), (ym(1981, 2), 14.5)])),
            (10.0, daily("DGS10", &[(ym(1981, 2), 12.5)])),
        ])
        .unwrap();
        let curve = set.curve(ym(1981, 1));
        assert_eq!(curve.points.len(), 2);
        assert_eq!(curve.points[0].value, 14.0);
        assert!(curve.points[1].value.is_nan());
        assert_eq!(curve.observed().count(), 1);
        assert_eq!(curve.label(), "January 01, 1981");
        assert_eq!(set.curve(ym(1981, 2)).observed().count(), 2);
    }

    #[test]
    fn test_set_validation() {
        let s = daily("X", &[(ym(2000, 1), 1.0)]);
        assert!(YieldCurveSet::new(Vec::new()).is_err());
        assert!(YieldCurveSet::new(vec![(0.0, s.clone())]).is_err());
        assert!(YieldCurveSet::new(vec![(5.0, s.clone()), (1.0, s.clone())]).is_err());
        let set = YieldCurveSet::new(vec![(1.0, s.clone()), (5.0, s)]).unwrap();
        assert_eq!(set.maturities().collect::<Vec<_>>(), vec![1.0, 5.0]);
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_treasury_maturities_increase() {
        assert!(TREASURY_MATURITIES.windows(2).all(|w| w[0].1 < w[1].1));
    }

    #[test]
    fn test_deserialize_validates_maturities() {
        let s = daily("DGS1", &[(ym(2000, 1), 6.0)]);
        let set = YieldCurveSet::new(vec![(1.0, s.clone()), (5.0, s)]).unwrap();
        let mut value = serde_json::to_value(&set).unwrap();
        assert_eq!(serde_json::from_value::<YieldCurveSet>(value.clone()).unwrap(), set);

        value["members"][1][0] = serde_json::json!(0.5);
        assert!(serde_json::from_value::<YieldCurveSet>(value).is_err());
    }
}
