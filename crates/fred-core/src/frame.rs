//! Export of series to polars DataFrames for rendering and file output.

use chrono::NaiveDate;
use polars::prelude::*;

use crate::error::{FredError, Result};
use crate::series::TimeSeries;

fn to_nullable(values: &[f64]) -> Vec<Option<f64>> {
    values
        .iter()
        .map(|v| if v.is_nan() { None } else { Some(*v) })
        .collect()
}

impl TimeSeries {
    /// Converts the series into a DataFrame.
    ///
    /// Columns: `date` (Date), `value`, plus `cycle` and `trend` when the
    /// series carries decomposition components. Missing values become nulls.
    ///
    /// # Errors
    /// Returns [`FredError::Other`] if polars rejects the columns.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let epoch = NaiveDate::default();
        let days: Vec<i32> = self
            .dates()
            .iter()
            .map(|d| d.signed_duration_since(epoch).num_days() as i32)
            .collect();

        let date_col = Column::new("date".into(), days)
            .cast(&DataType::Date)
            .map_err(|e| FredError::Other(e.to_string()))?;

        let mut columns = vec![
            date_col,
            Column::new("value".into(), to_nullable(self.observations())),
        ];
        if let Some(components) = self.components() {
            columns.push(Column::new("cycle".into(), to_nullable(components.cycle())));
            columns.push(Column::new("trend".into(), to_nullable(components.trend())));
        }

        DataFrame::new(columns).map_err(|e| FredError::Other(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Components, Frequency, SeriesMetadata};

    fn series() -> TimeSeries {
        TimeSeries::new(
            vec![
                NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2020, 4, 1).unwrap(),
            ],
            vec![1.5, f64::NAN],
            Frequency::Quarterly,
            SeriesMetadata::new("X"),
        )
        .unwrap()
    }

    #[test]
    fn test_to_dataframe_columns() {
        let df = series().to_dataframe().unwrap();
        assert_eq!(df.height(), 2);
        assert_eq!(df.get_column_names().len(), 2);
        let values = df.column("value").unwrap().f64().unwrap();
        assert_eq!(values.get(0), Some(1.5));
        assert_eq!(values.get(1), None);
        assert_eq!(df.column("date").unwrap().dtype(), &DataType::Date);
    }

    #[test]
    fn test_to_dataframe_with_components() {
        let with = series()
            .with_components(Components::new(vec![0.1, 0.2], vec![1.4, 1.3]).unwrap())
            .unwrap();
        let df = with.to_dataframe().unwrap();
        assert_eq!(df.get_column_names().len(), 4);
        assert!(df.column("trend").is_ok());
    }
}
