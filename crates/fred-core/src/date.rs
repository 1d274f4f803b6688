//! Date parsing for boundary inputs.
//!
//! Dates exchanged with providers use `YYYY-MM-DD`. Window bounds supplied by
//! callers may also use `MM-DD-YYYY`; both are normalized to [`NaiveDate`].

use chrono::NaiveDate;

use crate::error::{FredError, Result};

/// Canonical date format used at every boundary.
pub const ISO_FORMAT: &str = "%Y-%m-%d";

/// Alternative month-first format accepted for window bounds.
pub const US_FORMAT: &str = "%m-%d-%Y";

/// Parses a date in `YYYY-MM-DD` or `MM-DD-YYYY` format.
///
/// # Errors
/// Returns [`FredError::Parse`] if the string matches neither format.
pub fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, ISO_FORMAT)
        .or_else(|_| NaiveDate::parse_from_str(s, US_FORMAT))
        .map_err(|e| FredError::Parse(format!("Invalid date '{s}': {e}")))
}

/// Parses a date in strict `YYYY-MM-DD` format.
///
/// # Errors
/// Returns [`FredError::Parse`] if the string is not an ISO date.
pub fn parse_iso_date(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), ISO_FORMAT)
        .map_err(|e| FredError::Parse(format!("Invalid date '{s}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_both_formats() {
        let expected = NaiveDate::from_ymd_opt(2008, 9, 15).unwrap();
        assert_eq!(parse_date("2008-09-15").unwrap(), expected);
        assert_eq!(parse_date("09-15-2008").unwrap(), expected);
        assert_eq!(parse_date(" 2008-09-15 ").unwrap(), expected);
    }

    #[test]
    fn test_parse_invalid() {
        assert!(parse_date("15/09/2008").is_err());
        assert!(parse_date("2008-13-01").is_err());
        assert!(parse_iso_date("09-15-2008").is_err());
    }
}
