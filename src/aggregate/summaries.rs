//! Whole-period summaries: headline statistics, extremes, rainfall
//! distribution and the year-over-year comparison.

use crate::aggregate::aggregator::AggregateTable;
use crate::aggregate::error::AggregateError;
use crate::aggregate::group::GroupBy;
use crate::aggregate::stats::{self, Description};
use crate::types::daily_record::DailyRecord;
use crate::types::field::{Field, Reduction};
use crate::types::period::Year;
use crate::types::rain_category::RainCategory;
use chrono::NaiveDate;
use ordered_float::OrderedFloat;
use serde::Serialize;
use std::cmp::Reverse;

/// Days with more precipitation than this (mm) count as heavy-rain days.
///
/// Independent of the `Heavy` bin of [`crate::PRECIPITATION_CATEGORY_EDGES`],
/// even though both currently sit at 15 mm.
pub const HEAVY_RAIN_THRESHOLD_MM: f64 = 15.0;

/// Headline numbers for a slice of days.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct KeyStats {
    pub days: usize,
    pub average_temperature: f64,
    pub total_precipitation: f64,
    pub mean_daily_precipitation: f64,
    pub highest_temperature: f64,
    pub lowest_temperature: f64,
}

impl KeyStats {
    pub fn of(records: &[DailyRecord]) -> Result<KeyStats, AggregateError> {
        let values = |field: Field| -> Vec<f64> { records.iter().map(|r| field.value(r)).collect() };
        let averages = values(Field::TemperatureAvg);
        let precipitation = values(Field::Precipitation);
        Ok(KeyStats {
            days: records.len(),
            average_temperature: stats::mean(&averages).ok_or(AggregateError::EmptyInput)?,
            total_precipitation: stats::sum(&precipitation),
            mean_daily_precipitation: stats::mean(&precipitation)
                .ok_or(AggregateError::EmptyInput)?,
            highest_temperature: stats::max(&values(Field::TemperatureMax))
                .ok_or(AggregateError::EmptyInput)?,
            lowest_temperature: stats::min(&values(Field::TemperatureMin))
                .ok_or(AggregateError::EmptyInput)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ExtremeDay {
    pub date: NaiveDate,
    pub value: f64,
}

/// The most extreme days of a period. Ties resolve to the earliest day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeEvents {
    /// Highest daily maximum temperature.
    pub hottest_day: ExtremeDay,
    /// Lowest daily minimum temperature.
    pub coldest_day: ExtremeDay,
    /// Largest daily precipitation total.
    pub wettest_day: ExtremeDay,
    /// Days with precipitation above [`HEAVY_RAIN_THRESHOLD_MM`].
    pub heavy_rain_days: usize,
}

impl ExtremeEvents {
    pub fn of(records: &[DailyRecord]) -> Result<ExtremeEvents, AggregateError> {
        let highest = |field: Field| {
            records
                .iter()
                .min_by_key(|r| Reverse(OrderedFloat(field.value(r))))
                .map(|r| ExtremeDay {
                    date: r.date,
                    value: field.value(r),
                })
                .ok_or(AggregateError::EmptyInput)
        };
        let coldest_day = records
            .iter()
            .min_by_key(|r| OrderedFloat(r.temperature_min))
            .map(|r| ExtremeDay {
                date: r.date,
                value: r.temperature_min,
            })
            .ok_or(AggregateError::EmptyInput)?;

        Ok(ExtremeEvents {
            hottest_day: highest(Field::TemperatureMax)?,
            coldest_day,
            wettest_day: highest(Field::Precipitation)?,
            heavy_rain_days: records
                .iter()
                .filter(|r| r.precipitation > HEAVY_RAIN_THRESHOLD_MM)
                .count(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RainCategoryShare {
    pub category: RainCategory,
    pub days: usize,
    /// Share of all days in the period, in percent.
    pub percentage: f64,
}

/// Number of days in every [`RainCategory`], in category order.
///
/// Categories without days are listed with a zero count. Percentages are
/// relative to all days of the period.
pub fn rain_distribution(records: &[DailyRecord]) -> Result<Vec<RainCategoryShare>, AggregateError> {
    if records.is_empty() {
        return Err(AggregateError::EmptyInput);
    }
    let mut counts = [0usize; RainCategory::ALL.len()];
    for category in records
        .iter()
        .filter_map(|r| RainCategory::classify(r.precipitation))
    {
        counts[category as usize] += 1;
    }
    let total = records.len() as f64;
    Ok(RainCategory::ALL
        .into_iter()
        .zip(counts)
        .map(|(category, days)| RainCategoryShare {
            category,
            days,
            percentage: days as f64 / total * 100.0,
        })
        .collect())
}

/// `describe`-style statistics of one field over a period.
pub fn describe(records: &[DailyRecord], field: Field) -> Result<Description, AggregateError> {
    let values: Vec<f64> = records.iter().map(|r| field.value(r)).collect();
    Description::of(&values).ok_or(AggregateError::EmptyInput)
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct YearValue {
    pub year: Year,
    pub value: f64,
}

/// First-to-last-year changes and the record years of an annual table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct YearOverYear {
    pub first_year: Year,
    pub last_year: Year,
    /// Annual mean temperature of the last year minus that of the first (°C).
    pub temperature_change: f64,
    /// Annual precipitation total of the last year minus that of the first (mm).
    pub precipitation_change: f64,
    pub warmest_year: YearValue,
    pub coldest_year: YearValue,
    pub wettest_year: YearValue,
    pub driest_year: YearValue,
}

impl YearOverYear {
    /// Compares the years of a table grouped by [`GroupBy::Year`] that holds
    /// the mean of `temperature_avg` and the sum of `precipitation_sum`
    /// (both [`crate::ReductionSpec::annual_summary`] and
    /// [`crate::ReductionSpec::annual_trend`] do).
    ///
    /// # Errors
    ///
    /// * [`AggregateError::NotAnnual`] for any other grouping.
    /// * [`AggregateError::InsufficientData`] with fewer than two years.
    /// * [`AggregateError::MissingCell`] when a required reduction is absent.
    pub fn of(annual: &AggregateTable) -> Result<YearOverYear, AggregateError> {
        let temperature = annual_series(annual, Field::TemperatureAvg, Reduction::Mean)?;
        let precipitation = annual_series(annual, Field::Precipitation, Reduction::Sum)?;
        if temperature.len() < 2 {
            return Err(AggregateError::InsufficientData {
                required: 2,
                actual: temperature.len(),
            });
        }
        let first = temperature[0];
        let last = temperature[temperature.len() - 1];

        Ok(YearOverYear {
            first_year: first.year,
            last_year: last.year,
            temperature_change: last.value - first.value,
            precipitation_change: precipitation[precipitation.len() - 1].value
                - precipitation[0].value,
            warmest_year: first_max(&temperature).ok_or(AggregateError::EmptyInput)?,
            coldest_year: first_min(&temperature).ok_or(AggregateError::EmptyInput)?,
            wettest_year: first_max(&precipitation).ok_or(AggregateError::EmptyInput)?,
            driest_year: first_min(&precipitation).ok_or(AggregateError::EmptyInput)?,
        })
    }
}

/// `(year, value)` pairs of one cell of an annual table, in year order.
pub fn annual_series(
    annual: &AggregateTable,
    field: Field,
    reduction: Reduction,
) -> Result<Vec<YearValue>, AggregateError> {
    if annual.group_by() != GroupBy::Year {
        return Err(AggregateError::NotAnnual(annual.group_by()));
    }
    annual
        .rows()
        .iter()
        .filter_map(|row| row.key.year().map(|year| (year, row)))
        .map(|(year, row)| {
            row.number(field, reduction)
                .map(|value| YearValue { year, value })
                .ok_or(AggregateError::MissingCell { field, reduction })
        })
        .collect()
}

fn first_max(series: &[YearValue]) -> Option<YearValue> {
    series
        .iter()
        .copied()
        .min_by_key(|v| Reverse(OrderedFloat(v.value)))
}

fn first_min(series: &[YearValue]) -> Option<YearValue> {
    series.iter().copied().min_by_key(|v| OrderedFloat(v.value))
}
