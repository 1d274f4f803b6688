#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/factordynamics/fred/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

//! FRED economic time series.
//!
//! This crate re-exports the core types, the transform engine and the cache
//! implementations, and provides a [`SeriesRegistry`] for fetching series
//! from multiple providers with automatic fallback.
//!
//! # Features
//!
//! - `client` - FRED download provider
//! - `cache-sqlite` - SQLite-based caching
//!
//! # Example
//!
//! ```rust,ignore
//! use fred::{Direction, SeriesExt, SeriesRegistry};
//!
//! #[tokio::main]
//! async fn main() -> fred::Result<()> {
//!     let registry = SeriesRegistry::new().with_fred();
//!
//!     let payrolls = registry.fetch("PAYEMS").await?;
//!     let growth = payrolls.annual_percent_change(true, Direction::Backward)?;
//!     println!("{}", growth.to_dataframe()?);
//!
//!     Ok(())
//! }
//! ```

// Core types and traits
pub use fred_core::*;

// Transform engine
pub use fred_transform as transform;
pub use fred_transform::{
    Aggregation, BandPassParams, CfParams, Decomposition, Direction, HpParams, Population,
    SeriesExt, TREASURY_MATURITIES, YieldCurve, YieldCurveSet, YieldPoint,
};

// Numerical primitives
pub use fred_numerics as numerics;

// Cache implementations
#[cfg(feature = "cache-sqlite")]
pub use fred_cache::SqliteCache;
pub use fred_cache::{InMemoryCache, NoopCache};

// Providers
#[cfg(feature = "client")]
pub use fred_client::FredProvider;

mod registry;
pub use registry::SeriesRegistry;
