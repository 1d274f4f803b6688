//! Error types for series operations.
//!
//! This module defines [`FredError`] which covers every failure that can occur
//! while retrieving, caching, constructing or transforming an economic series.

use thiserror::Error;

/// Errors that can occur during series operations.
#[derive(Error, Debug)]
pub enum FredError {
    /// Two series passed to a binary operation do not share a date axis.
    #[error("Alignment error: series do not share an observation-date axis ({left} vs {right})")]
    Alignment {
        /// Identifier of the left-hand series.
        left: String,
        /// Identifier of the right-hand series.
        right: String,
    },

    /// The data source could not supply the requested series.
    #[error("Retrieval error for {id}: {reason}")]
    Retrieval {
        /// The series identifier that was requested.
        id: String,
        /// What went wrong.
        reason: String,
    },

    /// The requested series identifier does not exist.
    #[error("Series not found: {0}")]
    SeriesNotFound(String),

    /// Network-related errors (connection failures, timeouts, etc.).
    #[error("Network error: {0}")]
    Network(String),

    /// Rate limit exceeded by a provider.
    #[error("Rate limited by {provider}: retry after {retry_after:?}")]
    RateLimited {
        /// The provider that rate limited the request.
        provider: String,
        /// Suggested time to wait before retrying.
        retry_after: Option<std::time::Duration>,
    },

    /// Error parsing dates, values or a provider payload.
    #[error("Parse error: {0}")]
    Parse(String),

    /// A series was constructed with inconsistent dates or observations.
    #[error("Invalid series: {0}")]
    InvalidSeries(String),

    /// An invalid parameter was provided.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// A numerical routine needs more observations than it was given.
    #[error("Insufficient data: need at least {required} observations, got {actual}")]
    InsufficientData {
        /// Minimum number of observations required.
        required: usize,
        /// Number of observations supplied.
        actual: usize,
    },

    /// A numerical routine failed (singular system, non-finite output).
    #[error("Numerics error: {0}")]
    Numerics(String),

    /// Error interacting with the cache.
    #[error("Cache error: {0}")]
    Cache(String),

    /// No provider is configured for the request.
    #[error("Provider not configured: {0}")]
    ProviderNotConfigured(String),

    /// Any other error.
    #[error("{0}")]
    Other(String),
}

/// Result type alias using [`FredError`].
pub type Result<T> = std::result::Result<T, FredError>;
