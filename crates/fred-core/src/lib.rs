#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fred/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! Core series model, traits and types for FRED economic data.
//!
//! This crate provides the foundational abstractions:
//!
//! - [`TimeSeries`](series::TimeSeries) - Date-indexed observations with metadata
//! - [`Frequency`](frequency::Frequency) - Observation spacing and periods per year
//! - [`SeriesMetadata`](metadata::SeriesMetadata) - Provenance and its composition rules
//! - [`SeriesProvider`](provider::SeriesProvider) - Retrieval of raw observations
//! - [`SeriesCache`](cache::SeriesCache) - Caching abstraction
//! - [`RecessionTable`](recession::RecessionTable) - Recession intervals for shading

/// Cache trait for storing fetched series.
pub mod cache;
/// Date parsing for boundary inputs.
pub mod date;
/// Error types for series operations.
pub mod error;
/// Observation frequency definitions.
pub mod frequency;
/// Descriptive metadata and binary-operation naming.
pub mod metadata;
/// Provider trait for fetching raw series.
pub mod provider;
/// Recession reference table.
pub mod recession;
/// The time series value type.
pub mod series;

mod frame;

// Re-export commonly used items at crate root
pub use cache::SeriesCache;
pub use date::{parse_date, parse_iso_date};
pub use error::{FredError, Result};
pub use frequency::Frequency;
pub use metadata::{BinaryOp, SeriesMetadata};
pub use provider::{RawSeries, SeriesProvider};
pub use recession::{Recession, RecessionInterval, RecessionTable};
pub use series::{Components, DateRange, TimeSeries};
