//! Elementwise arithmetic between date-aligned series.
//!
//! Both operands must share an identical date axis. Units are never checked:
//! dividing dollars by hours is allowed and the caller's responsibility.

use fred_core::{BinaryOp, FredError, Result, SeriesMetadata, TimeSeries};

/// Applies `op` elementwise to two date-aligned series.
///
/// Dates and frequency come from `left`; metadata is composed with
/// [`SeriesMetadata::combine`]. Missing values propagate.
///
/// # Errors
/// Returns [`FredError::Alignment`] if the date axes differ.
pub fn combine(left: &TimeSeries, right: &TimeSeries, op: BinaryOp) -> Result<TimeSeries> {
    if !left.is_aligned_with(right) {
        return Err(FredError::Alignment {
            left: left.id().to_string(),
            right: right.id().to_string(),
        });
    }

    let observations = left
        .observations()
        .iter()
        .zip(right.observations())
        .map(|(a, b)| op.apply(*a, *b))
        .collect();
    let metadata = SeriesMetadata::combine(left.metadata(), right.metadata(), op);

    Ok(left
        .derive(left.dates().to_vec(), observations)?
        .with_metadata(metadata))
}

/// `left + right`.
///
/// # Errors
/// Returns [`FredError::Alignment`] if the date axes differ.
pub fn add(left: &TimeSeries, right: &TimeSeries) -> Result<TimeSeries> {
    combine(left, right, BinaryOp::Add)
}

/// `left - right`.
///
/// # Errors
/// Returns [`FredError::Alignment`] if the date axes differ.
pub fn subtract(left: &TimeSeries, right: &TimeSeries) -> Result<TimeSeries> {
    combine(left, right, BinaryOp::Subtract)
}

/// `left * right`.
///
/// # Errors
/// Returns [`FredError::Alignment`] if the date axes differ.
pub fn multiply(left: &TimeSeries, right: &TimeSeries) -> Result<TimeSeries> {
    combine(left, right, BinaryOp::Multiply)
}

/// `left / right`.
///
/// # Errors
/// Returns [`FredError::Alignment`] if the date axes differ.
pub fn divide(left: &TimeSeries, right: &TimeSeries) -> Result<TimeSeries> {
    combine(left, right, BinaryOp::Divide)
}
