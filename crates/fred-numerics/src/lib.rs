#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fred/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Numerical primitives behind the series decompositions.
//!
//! Everything here works on plain `f64` slices; date bookkeeping and
//! metadata belong to the transform layer.

/// Baxter-King and Christiano-Fitzgerald band-pass filters.
pub mod bandpass;
/// Hodrick-Prescott filter.
pub mod hp;
/// Least-squares fitting.
pub mod ols;

pub use bandpass::{bk_filter, cf_filter};
pub use hp::hp_filter;
pub use ols::{OlsFit, linear_trend, ols_fit};
