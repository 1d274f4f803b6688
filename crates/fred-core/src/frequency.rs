//! Observation frequency definitions.
//!
//! This module defines [`Frequency`], the nominal spacing between observations
//! of a series together with its periods-per-year constant.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FredError;

/// Nominal spacing between observations of a series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    /// One observation per calendar or business day.
    Daily,
    /// One observation per week.
    Weekly,
    /// One observation per month.
    Monthly,
    /// One observation per quarter.
    Quarterly,
    /// One observation per year.
    Annual,
}

impl Frequency {
    /// All frequencies, highest to lowest.
    pub const ALL: [Self; 5] = [
        Self::Daily,
        Self::Weekly,
        Self::Monthly,
        Self::Quarterly,
        Self::Annual,
    ];

    /// Number of observations per year (365, 52, 12, 4, 1).
    ///
    /// Used for annualization, year-over-year lags and filter defaults.
    #[must_use]
    pub const fn periods_per_year(&self) -> usize {
        match self {
            Self::Daily => 365,
            Self::Weekly => 52,
            Self::Monthly => 12,
            Self::Quarterly => 4,
            Self::Annual => 1,
        }
    }

    /// Human readable label as published by FRED.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Monthly => "Monthly",
            Self::Quarterly => "Quarterly",
            Self::Annual => "Annual",
        }
    }

    /// Parses a FRED frequency label.
    ///
    /// Labels carry qualifiers such as `"Weekly, Ending Friday"` or
    /// `"Daily, Close"`, so only the leading word is significant.
    #[must_use]
    pub fn from_label(label: &str) -> Option<Self> {
        let head = label
            .trim()
            .split(|c: char| c == ',' || c.is_whitespace())
            .next()
            .unwrap_or_default();
        Self::ALL
            .into_iter()
            .find(|f| f.label().eq_ignore_ascii_case(head))
    }

    /// Inclusive range of day gaps regarded as one period.
    const fn gap_days(&self) -> (i64, i64) {
        match self {
            Self::Daily => (1, 4),
            Self::Weekly => (6, 8),
            Self::Monthly => (28, 31),
            Self::Quarterly => (89, 92),
            Self::Annual => (365, 366),
        }
    }

    /// Returns true if the median spacing of `dates` is consistent with this
    /// frequency. Fewer than two dates are always consistent.
    #[must_use]
    pub fn matches_spacing(&self, dates: &[NaiveDate]) -> bool {
        if dates.len() < 2 {
            return true;
        }
        let mut gaps: Vec<i64> = dates.windows(2).map(|w| (w[1] - w[0]).num_days()).collect();
        gaps.sort_unstable();
        let median = gaps[gaps.len() / 2];
        let (lo, hi) = self.gap_days();
        (lo..=hi).contains(&median)
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Frequency {
    type Err = FredError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_label(s).ok_or_else(|| FredError::Parse(format!("Unknown frequency: {s}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_per_year() {
        let expected = [365, 52, 12, 4, 1];
        for (freq, n) in Frequency::ALL.iter().zip(expected) {
            assert_eq!(freq.periods_per_year(), n);
        }
    }

    #[test]
    fn test_from_label_with_qualifiers() {
        assert_eq!(
            Frequency::from_label("Weekly, Ending Friday"),
            Some(Frequency::Weekly)
        );
        assert_eq!(Frequency::from_label("Daily, Close"), Some(Frequency::Daily));
        assert_eq!(Frequency::from_label("Quarterly"), Some(Frequency::Quarterly));
        assert_eq!(Frequency::from_label("Biweekly"), None);
        assert!("Fortnightly".parse::<Frequency>().is_err());
    }

    #[test]
    fn test_matches_spacing() {
        let monthly: Vec<NaiveDate> = (1..=6)
            .map(|m| NaiveDate::from_ymd_opt(2020, m, 1).unwrap())
            .collect();
        assert!(Frequency::Monthly.matches_spacing(&monthly));
        assert!(!Frequency::Quarterly.matches_spacing(&monthly));
        assert!(Frequency::Annual.matches_spacing(&monthly[..1]));
    }
}
