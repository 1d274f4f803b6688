//! Descriptive series metadata and its composition rules.
//!
//! Metadata is provenance: it is carried through transformations and consumed
//! by renderers, never by numeric code.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Descriptive information attached to a series.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeriesMetadata {
    /// Unique series identifier (e.g. `GDPC1`).
    pub id: String,
    /// Title of the series.
    pub title: String,
    /// Units of the observations.
    pub units: String,
    /// Original source of the data.
    pub source: String,
    /// Seasonal adjustment description.
    pub seasonal_adjustment: String,
    /// Date the series was last updated by its source.
    pub updated: String,
}

impl SeriesMetadata {
    /// Creates metadata with the given identifier and empty descriptive fields.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    /// Sets the title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Sets the units.
    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = units.into();
        self
    }

    /// Sets the source.
    #[must_use]
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = source.into();
        self
    }

    /// Sets the seasonal adjustment description.
    #[must_use]
    pub fn with_seasonal_adjustment(mut self, seasonal_adjustment: impl Into<String>) -> Self {
        self.seasonal_adjustment = seasonal_adjustment.into();
        self
    }

    /// Sets the last-updated stamp.
    #[must_use]
    pub fn with_updated(mut self, updated: impl Into<String>) -> Self {
        self.updated = updated.into();
        self
    }

    /// Composes the metadata of `op(left, right)`.
    ///
    /// - title: `"{left} {word} {right}"`
    /// - units: `"{left} {symbol} {right}"`
    /// - source and updated: kept when equal, otherwise `"{left} and {right}"`
    /// - id: always `"{left} and {right}"`
    /// - seasonal adjustment: taken from `left`
    #[must_use]
    pub fn combine(left: &Self, right: &Self, op: BinaryOp) -> Self {
        Self {
            id: format!("{} and {}", left.id, right.id),
            title: format!("{} {} {}", left.title, op.word(), right.title),
            units: format!("{} {} {}", left.units, op.symbol(), right.units),
            source: fold(&left.source, &right.source),
            seasonal_adjustment: left.seasonal_adjustment.clone(),
            updated: fold(&left.updated, &right.updated),
        }
    }
}

fn fold(left: &str, right: &str) -> String {
    if left == right {
        left.to_string()
    } else {
        format!("{left} and {right}")
    }
}

/// Elementwise arithmetic between two date-aligned series.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `left + right`.
    Add,
    /// `left - right`.
    Subtract,
    /// `left * right`.
    Multiply,
    /// `left / right`.
    Divide,
}

impl BinaryOp {
    /// Applies the operation. NaN inputs propagate.
    #[must_use]
    pub fn apply(&self, left: f64, right: f64) -> f64 {
        match self {
            Self::Add => left + right,
            Self::Subtract => left - right,
            Self::Multiply => left * right,
            Self::Divide => left / right,
        }
    }

    /// Word used when composing titles.
    #[must_use]
    pub const fn word(&self) -> &'static str {
        match self {
            Self::Add => "plus",
            Self::Subtract => "minus",
            Self::Multiply => "times",
            Self::Divide => "divided by",
        }
    }

    /// Symbol used when composing units.
    #[must_use]
    pub const fn symbol(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "x",
            Self::Divide => "/",
        }
    }
}

impl fmt::Display for BinaryOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word())
    }
}
