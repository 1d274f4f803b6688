#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fred/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Transform engine for economic time series.
//!
//! Every operation is a pure function from one or two
//! [`TimeSeries`](fred_core::TimeSeries) to a new series; inputs are never
//! modified, so transforms may run concurrently on shared data.
//!
//! - [`combine`] - Elementwise arithmetic on date-aligned series
//! - [`window`] - Date windows and multi-series alignment
//! - [`change`] - Logarithms and percentage changes
//! - [`decompose`] - Trend/cycle decompositions
//! - [`smooth`] - Moving averages
//! - [`aggregate`] - Frequency conversion
//! - [`per_capita`] - Division by population
//! - [`yield_curve`] - Cross-maturity curves

/// Frequency conversion.
pub mod aggregate;
/// Logarithms and percentage changes.
pub mod change;
/// Elementwise arithmetic.
pub mod combine;
/// Trend/cycle decompositions.
pub mod decompose;
/// Method syntax via [`SeriesExt`].
pub mod ext;
/// Filter parameters.
pub mod params;
/// Per-capita conversion.
pub mod per_capita;
/// Moving averages.
pub mod smooth;
/// Date windows.
pub mod window;
/// Yield curves.
pub mod yield_curve;

#[cfg(test)]
mod test_util;

pub use aggregate::{Aggregation, monthly_to_annual, monthly_to_quarterly, quarterly_to_annual};
pub use change::{Direction, annual_percent_change, log, percent_change};
pub use combine::{add, combine, divide, multiply, subtract};
pub use decompose::{Decomposition, bp_filter, cf_filter, first_difference, hp_filter, linear_trend};
pub use ext::SeriesExt;
pub use params::{BandPassParams, CfParams, HpParams};
pub use per_capita::{Population, per_capita};
pub use smooth::{moving_average_one_sided, moving_average_two_sided};
pub use window::{recent, window, window_equalize, window_str};
pub use yield_curve::{TREASURY_MATURITIES, YieldCurve, YieldCurveSet, YieldPoint};
