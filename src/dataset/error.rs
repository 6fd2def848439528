use chrono::NaiveDate;
use polars::error::PolarsError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DatasetError {
    #[error("Failed to read climate data file '{0}'")]
    FileRead(PathBuf, #[source] std::io::Error),

    #[error("Failed to parse climate CSV data")]
    Csv(#[source] PolarsError),

    #[error("Required column '{0}' not found in climate data")]
    MissingColumn(String, #[source] PolarsError),

    #[error("Failed processing column '{column}'")]
    ColumnOperation {
        column: String,
        #[source]
        source: PolarsError,
    },

    #[error("Row {row} has an invalid date '{value}'")]
    InvalidDate { row: usize, value: String },

    #[error("Row {0} has no date")]
    MissingDate(usize),

    #[error("Climate data contains no rows")]
    Empty,

    #[error("Date {0} appears more than once")]
    DuplicateDate(NaiveDate),

    #[error("Dates are not in ascending order: {next} follows {previous}")]
    UnorderedDates {
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("No record for the days between {previous} and {next}")]
    MissingDay {
        previous: NaiveDate,
        next: NaiveDate,
    },

    #[error("Column '{0}' has no values to fill gaps from")]
    EmptyColumn(&'static str),

    #[error("Column '{column}' has a non-finite value on {date}")]
    NonFiniteValue {
        column: &'static str,
        date: NaiveDate,
    },

    #[error("Negative precipitation {value} mm on {date}")]
    NegativePrecipitation { date: NaiveDate, value: f64 },
}
