//! Recession intervals for chart shading.
//!
//! [`RecessionTable`] is an immutable table of business-cycle peak/trough
//! pairs. Renderers ask it for the intervals overlapping a series' date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::{FredError, Result};
use crate::series::{DateRange, TimeSeries};

/// NBER reference dates as `(peak year, peak month, trough year, trough month)`.
const NBER_DATES: [(i32, u32, i32, u32); 34] = [
    (1857, 6, 1858, 12),
    (1860, 10, 1861, 6),
    (1865, 4, 1867, 12),
    (1869, 6, 1870, 12),
    (1873, 10, 1879, 3),
    (1882, 3, 1885, 5),
    (1887, 3, 1888, 4),
    (1890, 7, 1891, 5),
    (1893, 1, 1894, 6),
    (1895, 12, 1897, 6),
    (1899, 6, 1900, 12),
    (1902, 9, 1904, 8),
    (1907, 5, 1908, 6),
    (1910, 1, 1912, 1),
    (1913, 1, 1914, 12),
    (1918, 8, 1919, 3),
    (1920, 1, 1921, 7),
    (1923, 5, 1924, 7),
    (1926, 10, 1927, 11),
    (1929, 8, 1933, 3),
    (1937, 5, 1938, 6),
    (1945, 2, 1945, 10),
    (1948, 11, 1949, 10),
    (1953, 7, 1954, 5),
    (1957, 8, 1958, 4),
    (1960, 4, 1961, 2),
    (1969, 12, 1970, 11),
    (1973, 11, 1975, 3),
    (1980, 1, 1980, 7),
    (1981, 7, 1982, 11),
    (1990, 7, 1991, 3),
    (2001, 3, 2001, 11),
    (2007, 12, 2009, 6),
    (2020, 2, 2020, 4),
];

/// One peak-to-trough contraction. An ongoing recession has no trough.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recession {
    /// Business-cycle peak.
    pub peak: NaiveDate,
    /// Business-cycle trough, if the recession has ended.
    pub trough: Option<NaiveDate>,
}

/// A shaded interval, clamped to the range it was requested for.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RecessionInterval {
    /// Start of shading.
    pub start: NaiveDate,
    /// End of shading.
    pub end: NaiveDate,
}

/// Immutable table of recessions ordered by peak date.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RecessionTableRepr")]
pub struct RecessionTable {
    recessions: Vec<Recession>,
}

#[derive(Deserialize)]
struct RecessionTableRepr {
    recessions: Vec<Recession>,
}

impl TryFrom<RecessionTableRepr> for RecessionTable {
    type Error = FredError;

    fn try_from(repr: RecessionTableRepr) -> Result<Self> {
        Self::new(repr.recessions)
    }
}

impl RecessionTable {
    /// Creates a table from arbitrary recessions.
    ///
    /// # Errors
    /// Returns [`FredError::InvalidParameter`] if a trough precedes its peak,
    /// peaks are not strictly increasing, or an ongoing recession is not last.
    pub fn new(mut recessions: Vec<Recession>) -> Result<Self> {
        recessions.sort_by_key(|r| r.peak);
        for (i, r) in recessions.iter().enumerate() {
            match r.trough {
                Some(trough) if trough < r.peak => {
                    return Err(FredError::InvalidParameter(format!(
                        "recession trough {trough} precedes peak {}",
                        r.peak
                    )));
                }
                None if i + 1 != recessions.len() => {
                    return Err(FredError::InvalidParameter(format!(
                        "only the latest recession may be ongoing (peak {})",
                        r.peak
                    )));
                }
                _ => {}
            }
        }
        if let Some(w) = recessions.windows(2).find(|w| w[0].peak == w[1].peak) {
            return Err(FredError::InvalidParameter(format!(
                "duplicate recession peak {}",
                w[0].peak
            )));
        }
        Ok(Self { recessions })
    }

    /// US business-cycle contractions as dated by the NBER.
    #[must_use]
    pub fn nber() -> Self {
        let recessions = NBER_DATES
            .iter()
            .filter_map(|&(py, pm, ty, tm)| {
                Some(Recession {
                    peak: NaiveDate::from_ymd_opt(py, pm, 1)?,
                    trough: Some(NaiveDate::from_ymd_opt(ty, tm, 1)?),
                })
            })
            .collect();
        Self { recessions }
    }

    /// All recessions in the table.
    #[must_use]
    pub fn recessions(&self) -> &[Recession] {
        &self.recessions
    }

    /// Intervals overlapping `[start, end]`, clamped to that range.
    ///
    /// An ongoing recession extends to `end`.
    #[must_use]
    pub fn intervals_within(&self, start: NaiveDate, end: NaiveDate) -> Vec<RecessionInterval> {
        if start > end {
            return Vec::new();
        }
        self.recessions
            .iter()
            .filter_map(|r| {
                let trough = r.trough.unwrap_or(end);
                if r.peak > end || trough < start {
                    return None;
                }
                Some(RecessionInterval {
                    start: r.peak.max(start),
                    end: trough.min(end),
                })
            })
            .collect()
    }

    /// Intervals overlapping the observation range of `series`.
    #[must_use]
    pub fn for_series(&self, series: &TimeSeries) -> Vec<RecessionInterval> {
        match series.date_range() {
            DateRange::Span { start, end } => self.intervals_within(start, end),
            DateRange::Null => Vec::new(),
        }
    }
}

impl TimeSeries {
    /// Recession intervals from `table` overlapping this series' dates.
    #[must_use]
    pub fn recessions(&self, table: &RecessionTable) -> Vec<RecessionInterval> {
        table.for_series(self)
    }
}
