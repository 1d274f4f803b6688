//! Filter parameters and their conventional per-frequency defaults.
//!
//! Defaults are conventions, not requirements: passing one frequency's
//! defaults to a series of another frequency logs a warning and the filter
//! runs with the parameters as given.

use fred_core::{Frequency, TimeSeries};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// Baxter-King band-pass parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct BandPassParams {
    /// Shortest period (in observations) passed by the filter.
    pub low: f64,
    /// Longest period (in observations) passed by the filter.
    pub high: f64,
    /// Lead-lag length; this many observations are lost at each end.
    pub lead_lag: usize,
}

impl BandPassParams {
    /// Monthly convention: 24 to 84 months, 84 leads and lags.
    pub const MONTHLY: Self = Self::new(24.0, 84.0, 84);
    /// Quarterly convention: 6 to 32 quarters, 12 leads and lags.
    pub const QUARTERLY: Self = Self::new(6.0, 32.0, 12);
    /// Annual convention: 3 to 8 years, 1 lead and lag.
    pub const ANNUAL: Self = Self::new(3.0, 8.0, 1);

    /// Creates band-pass parameters.
    #[must_use]
    pub const fn new(low: f64, high: f64, lead_lag: usize) -> Self {
        Self {
            low,
            high,
            lead_lag,
        }
    }

    /// Conventional parameters for `frequency`, if there are any.
    #[must_use]
    pub const fn for_frequency(frequency: Frequency) -> Option<Self> {
        match frequency {
            Frequency::Monthly => Some(Self::MONTHLY),
            Frequency::Quarterly => Some(Self::QUARTERLY),
            Frequency::Annual => Some(Self::ANNUAL),
            Frequency::Daily | Frequency::Weekly => None,
        }
    }
}

impl Default for BandPassParams {
    fn default() -> Self {
        Self::QUARTERLY
    }
}

/// Christiano-Fitzgerald band parameters.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct CfParams {
    /// Shortest period (in observations) passed by the filter.
    pub low: f64,
    /// Longest period (in observations) passed by the filter.
    pub high: f64,
}

impl CfParams {
    /// Quarterly convention: 6 to 32 quarters.
    pub const QUARTERLY: Self = Self::new(6.0, 32.0);

    /// Creates band parameters.
    #[must_use]
    pub const fn new(low: f64, high: f64) -> Self {
        Self { low, high }
    }
}

impl Default for CfParams {
    fn default() -> Self {
        Self::QUARTERLY
    }
}

/// Hodrick-Prescott smoothing parameter.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct HpParams {
    /// Penalty on the squared second difference of the trend.
    pub lambda: f64,
}

impl HpParams {
    /// Monthly convention, λ = 129600.
    pub const MONTHLY: Self = Self::new(129_600.0);
    /// Quarterly convention, λ = 1600.
    pub const QUARTERLY: Self = Self::new(1600.0);
    /// Annual convention, λ = 6.25.
    pub const ANNUAL: Self = Self::new(6.25);

    /// Creates a smoothing parameter.
    #[must_use]
    pub const fn new(lambda: f64) -> Self {
        Self { lambda }
    }

    /// Conventional λ for `frequency`, if there is one.
    #[must_use]
    pub const fn for_frequency(frequency: Frequency) -> Option<Self> {
        match frequency {
            Frequency::Monthly => Some(Self::MONTHLY),
            Frequency::Quarterly => Some(Self::QUARTERLY),
            Frequency::Annual => Some(Self::ANNUAL),
            Frequency::Daily | Frequency::Weekly => None,
        }
    }
}

impl Default for HpParams {
    fn default() -> Self {
        Self::QUARTERLY
    }
}

/// Parameters with a known per-frequency convention.
pub(crate) trait Conventional {
    /// Frequency whose conventional defaults these parameters are.
    fn conventional_frequency(&self) -> Option<Frequency>;
}

const CONVENTIONAL: [Frequency; 3] = [Frequency::Monthly, Frequency::Quarterly, Frequency::Annual];

impl Conventional for BandPassParams {
    fn conventional_frequency(&self) -> Option<Frequency> {
        CONVENTIONAL
            .into_iter()
            .find(|f| Self::for_frequency(*f).as_ref() == Some(self))
    }
}

impl Conventional for CfParams {
    fn conventional_frequency(&self) -> Option<Frequency> {
        (*self == Self::QUARTERLY).then_some(Frequency::Quarterly)
    }
}

impl Conventional for HpParams {
    fn conventional_frequency(&self) -> Option<Frequency> {
        CONVENTIONAL
            .into_iter()
            .find(|f| Self::for_frequency(*f).as_ref() == Some(self))
    }
}

/// Warns when `params` are another frequency's defaults. Returns true if a
/// warning was emitted.
pub(crate) fn check_convention(
    series: &TimeSeries,
    params: &impl Conventional,
    filter: &'static str,
) -> bool {
    match params.conventional_frequency() {
        Some(expected) if expected != series.frequency() => {
            warn!(
                series = %series.id(),
                filter,
                expected = %expected,
                actual = %series.frequency(),
                "filter parameters are the defaults for a different frequency"
            );
            true
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_util::{monthly, quarterly};

    #[test]
    fn test_defaults_by_frequency() {
        assert_eq!(
            BandPassParams::for_frequency(Frequency::Monthly),
            Some(BandPassParams::new(24.0, 84.0, 84))
        );
        assert_eq!(HpParams::for_frequency(Frequency::Annual).unwrap().lambda, 6.25);
        assert!(HpParams::for_frequency(Frequency::Daily).is_none());
        assert_eq!(BandPassParams::default(), BandPassParams::QUARTERLY);
        assert_eq!(CfParams::default(), CfParams::new(6.0, 32.0));
    }

    #[test]
    fn test_convention_mismatch_detected() {
        let q = quarterly(2000, 1, &[1.0; 4]);
        let m = monthly(2000, 1, &[1.0; 4]);
        assert!(!check_convention(&q, &HpParams::QUARTERLY, "hp"));
        assert!(check_convention(&m, &HpParams::QUARTERLY, "hp"));
        assert!(check_convention(&q, &BandPassParams::MONTHLY, "bk"));
        assert!(check_convention(&m, &CfParams::QUARTERLY, "cf"));
        // Custom parameters carry no convention.
        assert!(!check_convention(&m, &HpParams::new(100.0), "hp"));
        assert!(!check_convention(&m, &CfParams::new(2.0, 20.0), "cf"));
    }
}
