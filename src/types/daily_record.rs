use crate::types::period::{Year, YearMonth};
use crate::types::season::Season;
use chrono::{Datelike, NaiveDate};
use serde::Serialize;

/// One row of the source table before missing values are filled.
#[derive(Debug, PartialEq, Clone)]
pub struct RawObservation {
    pub date: NaiveDate,                 // time
    pub temperature_max: Option<f64>,    // temperature_2m_max (°C)
    pub temperature_min: Option<f64>,    // temperature_2m_min (°C)
    pub precipitation: Option<f64>,      // precipitation_sum (mm)
}

impl RawObservation {
    pub fn new(
        date: NaiveDate,
        temperature_max: Option<f64>,
        temperature_min: Option<f64>,
        precipitation: Option<f64>,
    ) -> Self {
        Self {
            date,
            temperature_max,
            temperature_min,
            precipitation,
        }
    }
}

/// A cleaned calendar day with every derived field already computed.
///
/// Records are only produced by [`crate::ClimateDataset`], after missing
/// measurements have been filled, so no field is ever undefined.
#[derive(Debug, PartialEq, Clone, Serialize)]
pub struct DailyRecord {
    pub date: NaiveDate,
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub precipitation: f64,
    pub temperature_avg: f64,
    pub temperature_range: f64,
    pub year: i32,
    pub month: u32,
    pub season: Season,
}

impl DailyRecord {
    pub(crate) fn derive(
        date: NaiveDate,
        temperature_max: f64,
        temperature_min: f64,
        precipitation: f64,
    ) -> Self {
        let month = date.month();
        Self {
            date,
            temperature_max,
            temperature_min,
            precipitation,
            temperature_avg: (temperature_max + temperature_min) / 2.0,
            temperature_range: temperature_max - temperature_min,
            year: date.year(),
            month,
            // chrono months are always 1..=12
            season: Season::from_month(month).unwrap_or(Season::Winter),
        }
    }

    pub fn year(&self) -> Year {
        Year(self.year)
    }

    pub fn year_month(&self) -> YearMonth {
        YearMonth::of(self.date)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_fields_follow_the_measurements() {
        let date = NaiveDate::from_ymd_opt(2021, 12, 5).unwrap();
        let record = DailyRecord::derive(date, 6.0, -2.0, 3.4);
        assert_eq!(record.temperature_avg, 2.0);
        assert_eq!(record.temperature_range, 8.0);
        assert_eq!(record.year(), Year(2021));
        assert_eq!(record.year_month(), YearMonth(2021, 12));
        assert_eq!(record.season, Season::Winter);
    }
}
