//! Parser for the FRED plain-text series download.
//!
//! ```text
//! Title:               Real Gross Domestic Product
//! Series ID:           GDPC1
//! Source:              U.S. Bureau of Economic Analysis
//! Release:             Gross Domestic Product
//! Seasonal Adjustment: Seasonally Adjusted Annual Rate
//! Frequency:           Quarterly
//! Units:               Billions of Chained 2012 Dollars
//! Date Range:          1947-01-01 to 2019-07-01
//! Last Updated:        2019-10-30 7:53 AM CDT
//! Notes:               BEA Account Code: A191RX
//!                      (continuation lines)
//!
//! DATE          VALUE
//! 1947-01-01   2033.061
//! ```

use fred_core::{FredError, RawSeries, Result, SeriesMetadata};

/// Returns true for the column header that separates metadata from rows.
fn is_table_header(line: &str) -> bool {
    let mut words = line.split_whitespace();
    matches!(
        (words.next(), words.next(), words.next()),
        (Some(date), Some(value), None)
            if date.eq_ignore_ascii_case("DATE") && value.eq_ignore_ascii_case("VALUE")
    )
}

/// Parses a downloaded series. `requested_id` is used when the header has no
/// `Series ID:` line.
pub(crate) fn parse_series_text(requested_id: &str, text: &str) -> Result<RawSeries> {
    let mut metadata = SeriesMetadata::new(requested_id);
    let mut frequency = None;
    let mut lines = text.lines();

    let mut found_table = false;
    for line in lines.by_ref() {
        if is_table_header(line) {
            found_table = true;
            break;
        }
        // Notes continuation lines are indented and carry no key.
        if line.starts_with(char::is_whitespace) {
            continue;
        }
        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let value = value.trim().to_string();
        match key.trim() {
            "Title" => metadata.title = value,
            "Series ID" => metadata.id = value,
            "Source" => metadata.source = value,
            "Seasonal Adjustment" => metadata.seasonal_adjustment = value,
            "Frequency" => frequency = Some(value),
            "Units" => metadata.units = value,
            "Last Updated" => metadata.updated = value,
            _ => {}
        }
    }

    if !found_table {
        return Err(FredError::Parse(format!(
            "{requested_id}: no DATE VALUE table in response"
        )));
    }
    let frequency = frequency
        .ok_or_else(|| FredError::Parse(format!("{requested_id}: missing Frequency header")))?;

    let mut dates = Vec::new();
    let mut values = Vec::new();
    for (offset, line) in lines.enumerate() {
        let mut fields = line.split_whitespace();
        let Some(date) = fields.next() else {
            continue;
        };
        let raw = fields.next().ok_or_else(|| {
            FredError::Parse(format!(
                "{requested_id}: row {} has no value: '{line}'",
                offset + 1
            ))
        })?;
        dates.push(date.to_string());
        values.push(RawSeries::parse_value(raw)?);
    }

    Ok(RawSeries {
        metadata,
        frequency,
        dates,
        values,
    })
}
