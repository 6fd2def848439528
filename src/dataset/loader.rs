//! Reads the daily climate CSV produced by the archive fetch into a [`ClimateDataset`].
//!
//! Expected header: `time,temperature_2m_max,temperature_2m_min,precipitation_sum`.
//! Extra columns are ignored; the derived temperature fields are always recomputed.

use crate::dataset::climate_dataset::ClimateDataset;
use crate::dataset::error::DatasetError;
use crate::types::daily_record::RawObservation;
use chrono::NaiveDate;
use log::info;
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;

pub const DATE_COLUMN: &str = "time";
pub const TEMPERATURE_MAX_COLUMN: &str = "temperature_2m_max";
pub const TEMPERATURE_MIN_COLUMN: &str = "temperature_2m_min";
pub const PRECIPITATION_COLUMN: &str = "precipitation_sum";

const DATE_FORMAT: &str = "%Y-%m-%d";
const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Reads and cleans the CSV file at `path`.
pub fn read_climate_csv(path: &Path) -> Result<ClimateDataset, DatasetError> {
    let bytes =
        std::fs::read(path).map_err(|e| DatasetError::FileRead(path.to_path_buf(), e))?;
    let dataset = parse_climate_csv(&bytes)?;
    info!(
        "Loaded {} days ({} to {}) from {}",
        dataset.len(),
        dataset.first_date(),
        dataset.last_date(),
        path.display()
    );
    Ok(dataset)
}

/// Parses CSV bytes (with header) and cleans them into a dataset.
pub fn parse_climate_csv(bytes: &[u8]) -> Result<ClimateDataset, DatasetError> {
    let df = CsvReadOptions::default()
        .with_has_header(true)
        .into_reader_with_file_handle(Cursor::new(bytes))
        .finish()
        .map_err(DatasetError::Csv)?;
    let observations = extract_observations(&df)?;
    ClimateDataset::from_observations(observations)
}

/// Converts a frame with the expected columns into raw, unfilled observations.
pub fn extract_observations(df: &DataFrame) -> Result<Vec<RawObservation>, DatasetError> {
    let dates = date_column(df, DATE_COLUMN)?;
    let temperature_max = float_column(df, TEMPERATURE_MAX_COLUMN)?;
    let temperature_min = float_column(df, TEMPERATURE_MIN_COLUMN)?;
    let precipitation = float_column(df, PRECIPITATION_COLUMN)?;

    Ok(dates
        .into_iter()
        .zip(temperature_max)
        .zip(temperature_min)
        .zip(precipitation)
        .map(|(((date, tmax), tmin), prcp)| RawObservation::new(date, tmax, tmin, prcp))
        .collect())
}

fn get_column<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Column, DatasetError> {
    df.column(name)
        .map_err(|e| DatasetError::MissingColumn(name.to_string(), e))
}

fn float_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
    let column_error = |source| DatasetError::ColumnOperation {
        column: name.to_string(),
        source,
    };
    // integer-looking columns (e.g. all whole millimetres) are inferred as i64
    let casted = get_column(df, name)?
        .cast(&DataType::Float64)
        .map_err(column_error)?;
    let values = casted.f64().map_err(column_error)?;
    Ok(values.into_iter().collect())
}

fn date_column(df: &DataFrame, name: &str) -> Result<Vec<NaiveDate>, DatasetError> {
    let column_error = |source| DatasetError::ColumnOperation {
        column: name.to_string(),
        source,
    };
    let casted = get_column(df, name)?
        .cast(&DataType::String)
        .map_err(column_error)?;
    let values = casted.str().map_err(column_error)?;
    values
        .into_iter()
        .enumerate()
        .map(|(row, value)| {
            let value = value.ok_or(DatasetError::MissingDate(row))?;
            parse_date(value).ok_or_else(|| DatasetError::InvalidDate {
                row,
                value: value.to_string(),
            })
        })
        .collect()
}

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .or_else(|| {
            chrono::NaiveDateTime::parse_from_str(value, DATETIME_FORMAT)
                .ok()
                .map(|dt| dt.date())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const CSV: &str = "time,temperature_2m_max,temperature_2m_min,precipitation_sum,temperature_avg
2014-01-01,5.2,1.0,12.3,3.1
2014-01-02,,0.4,0.0,
2014-01-03,4.0,-1.0,,1.5
";

    #[test]
    fn parses_and_fills_the_csv() -> Result<(), Box<dyn std::error::Error>> {
        let dataset = parse_climate_csv(CSV.as_bytes())?;
        assert_eq!(dataset.len(), 3);

        let records = dataset.records();
        assert_eq!(records[0].date, NaiveDate::from_ymd_opt(2014, 1, 1).unwrap());
        assert_eq!(records[1].temperature_max, 5.2);
        assert_eq!(records[2].precipitation, 0.0);
        assert!((records[0].temperature_avg - 3.1).abs() < 1e-12);
        assert_eq!(dataset.fill_summary().total(), 2);
        Ok(())
    }

    #[test]
    fn integer_columns_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
        let csv = "time,temperature_2m_max,temperature_2m_min,precipitation_sum
2014-01-01,5,1,0
2014-01-02,6,2,3
";
        let dataset = parse_climate_csv(csv.as_bytes())?;
        assert_eq!(dataset.records()[1].precipitation, 3.0);
        assert_eq!(dataset.records()[1].temperature_avg, 4.0);
        Ok(())
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = "time,temperature_2m_max,temperature_2m_min
2014-01-01,5.0,1.0
";
        assert!(matches!(
            parse_climate_csv(csv.as_bytes()),
            Err(DatasetError::MissingColumn(name, _)) if name == PRECIPITATION_COLUMN
        ));
    }

    #[test]
    fn bad_date_is_reported() {
        let csv = "time,temperature_2m_max,temperature_2m_min,precipitation_sum
2014-01-01,5.0,1.0,0.0
not-a-date,5.0,1.0,0.0
";
        assert!(matches!(
            parse_climate_csv(csv.as_bytes()),
            Err(DatasetError::InvalidDate { row: 1, .. })
        ));
    }

    #[test]
    fn datetime_stamps_are_truncated_to_days() {
        assert_eq!(
            parse_date("2014-01-05 00:00:00"),
            NaiveDate::from_ymd_opt(2014, 1, 5)
        );
        assert_eq!(parse_date("05/01/2014"), None);
    }

    #[test]
    fn reads_from_disk() -> Result<(), Box<dyn std::error::Error>> {
        let mut file = NamedTempFile::new()?;
        file.write_all(CSV.as_bytes())?;
        file.flush()?;

        let dataset = read_climate_csv(file.path())?;
        assert_eq!(dataset.len(), 3);
        Ok(())
    }

    #[test]
    fn unreadable_file_is_reported() {
        let result = read_climate_csv(Path::new("/definitely/not/here.csv"));
        assert!(matches!(result, Err(DatasetError::FileRead(..))));
    }
}
