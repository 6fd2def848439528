//! Contains `ClimateDataset`, the immutable, cleaned daily table every analysis runs on.

use crate::dataset::error::DatasetError;
use crate::dataset::fill::{fill_forward_backward, FillReport};
use crate::types::daily_record::{DailyRecord, RawObservation};
use crate::types::period::{DatePeriod, Year};
use chrono::NaiveDate;
use log::{debug, warn};

/// Imputation counts per measurement column, produced while building a dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FillSummary {
    pub temperature_max: FillReport,
    pub temperature_min: FillReport,
    pub precipitation: FillReport,
}

impl FillSummary {
    pub fn total(&self) -> usize {
        self.temperature_max.total() + self.temperature_min.total() + self.precipitation.total()
    }
}

/// A validated, gap-filled daily series for a single location.
///
/// The dataset guarantees exactly one [`DailyRecord`] per calendar day between
/// its first and last date, sorted ascending. It is never mutated after
/// construction; share it behind an `Arc` (see [`crate::DatasetCache`]).
///
/// # Examples
///
/// ```
/// use chrono::NaiveDate;
/// use climate_trends::{ClimateDataset, RawObservation};
///
/// let day = |d| NaiveDate::from_ymd_opt(2020, 1, d).unwrap();
/// let dataset = ClimateDataset::from_observations(vec![
///     RawObservation::new(day(1), Some(4.0), Some(0.0), Some(1.2)),
///     RawObservation::new(day(2), None, Some(-1.0), Some(0.0)),
/// ])?;
///
/// // The missing maximum is filled from the previous day.
/// assert_eq!(dataset.records()[1].temperature_max, 4.0);
/// assert_eq!(dataset.records()[1].temperature_avg, 1.5);
/// # Ok::<(), climate_trends::DatasetError>(())
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ClimateDataset {
    records: Vec<DailyRecord>,
    fill_summary: FillSummary,
}

impl ClimateDataset {
    /// Validates the raw rows, fills missing measurements and derives the
    /// calendar and temperature fields.
    ///
    /// # Errors
    ///
    /// * [`DatasetError::Empty`] when no rows are given.
    /// * [`DatasetError::DuplicateDate`], [`DatasetError::UnorderedDates`] or
    ///   [`DatasetError::MissingDay`] when the rows are not one per consecutive day.
    /// * [`DatasetError::EmptyColumn`] when a measurement has no value on any day.
    /// * [`DatasetError::NonFiniteValue`] when a measurement is NaN or infinite.
    /// * [`DatasetError::NegativePrecipitation`] when a filled precipitation total is below zero.
    pub fn from_observations(observations: Vec<RawObservation>) -> Result<Self, DatasetError> {
        if observations.is_empty() {
            return Err(DatasetError::Empty);
        }
        check_consecutive_days(&observations)?;

        let (temperature_max, max_report) = fill_column(&observations, "temperature_2m_max", |o| {
            o.temperature_max
        })?;
        let (temperature_min, min_report) = fill_column(&observations, "temperature_2m_min", |o| {
            o.temperature_min
        })?;
        let (precipitation, precipitation_report) =
            fill_column(&observations, "precipitation_sum", |o| o.precipitation)?;

        let records = observations
            .iter()
            .enumerate()
            .map(|(i, observation)| {
                if precipitation[i] < 0.0 {
                    return Err(DatasetError::NegativePrecipitation {
                        date: observation.date,
                        value: precipitation[i],
                    });
                }
                Ok(DailyRecord::derive(
                    observation.date,
                    temperature_max[i],
                    temperature_min[i],
                    precipitation[i],
                ))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let fill_summary = FillSummary {
            temperature_max: max_report,
            temperature_min: min_report,
            precipitation: precipitation_report,
        };
        debug!(
            "Built climate dataset with {} days ({} imputed values)",
            records.len(),
            fill_summary.total()
        );
        Ok(Self {
            records,
            fill_summary,
        })
    }

    /// All records, one per day, in date order. Never empty.
    pub fn records(&self) -> &[DailyRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn fill_summary(&self) -> FillSummary {
        self.fill_summary
    }

    pub fn first_date(&self) -> NaiveDate {
        self.records[0].date
    }

    pub fn last_date(&self) -> NaiveDate {
        self.records[self.records.len() - 1].date
    }

    /// First and last calendar year covered by the dataset.
    pub fn year_bounds(&self) -> (Year, Year) {
        (
            Year(self.records[0].year),
            Year(self.records[self.records.len() - 1].year),
        )
    }

    /// Records between `start` and `end` (inclusive). An empty slice when the
    /// range does not overlap the dataset.
    pub fn get_range(&self, start: NaiveDate, end: NaiveDate) -> &[DailyRecord] {
        let from = self.records.partition_point(|r| r.date < start);
        let to = self.records.partition_point(|r| r.date <= end);
        if from >= to {
            return &[];
        }
        &self.records[from..to]
    }

    /// Records within a calendar period, a [`Year`] or a [`crate::YearMonth`].
    pub fn get_for_period(&self, period: impl DatePeriod) -> &[DailyRecord] {
        match period.get_date_period() {
            Some(p) => self.get_range(p.start, p.end),
            None => &[],
        }
    }

    /// Records whose year lies within `start..=end`.
    pub fn filter_years(&self, start: Year, end: Year) -> &[DailyRecord] {
        let from = self.records.partition_point(|r| r.year < start.get());
        let to = self.records.partition_point(|r| r.year <= end.get());
        if from >= to {
            return &[];
        }
        &self.records[from..to]
    }
}

fn check_consecutive_days(observations: &[RawObservation]) -> Result<(), DatasetError> {
    for pair in observations.windows(2) {
        let (previous, next) = (pair[0].date, pair[1].date);
        if next == previous {
            return Err(DatasetError::DuplicateDate(next));
        }
        if next < previous {
            return Err(DatasetError::UnorderedDates { previous, next });
        }
        if previous.succ_opt() != Some(next) {
            return Err(DatasetError::MissingDay { previous, next });
        }
    }
    Ok(())
}

fn fill_column(
    observations: &[RawObservation],
    column: &'static str,
    get: impl Fn(&RawObservation) -> Option<f64>,
) -> Result<(Vec<f64>, FillReport), DatasetError> {
    let raw: Vec<Option<f64>> = observations.iter().map(get).collect();
    let (filled, report) = fill_forward_backward(&raw).ok_or(DatasetError::EmptyColumn(column))?;
    if let Some(position) = filled.iter().position(|value| !value.is_finite()) {
        return Err(DatasetError::NonFiniteValue {
            column,
            date: observations[position].date,
        });
    }
    if report.backward_filled > 0 {
        warn!(
            "Column '{}' is missing its first {} value(s); back-filled from a later day",
            column, report.backward_filled
        );
    }
    if report.forward_filled > 0 {
        warn!(
            "Column '{}' had {} gap(s) forward-filled from the previous day",
            column, report.forward_filled
        );
    }
    Ok((filled, report))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::period::YearMonth;
    use crate::types::season::Season;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn full(d: NaiveDate, tmax: f64, tmin: f64, prcp: f64) -> RawObservation {
        RawObservation::new(d, Some(tmax), Some(tmin), Some(prcp))
    }

    fn consecutive(start: NaiveDate, days: usize) -> Vec<RawObservation> {
        start
            .iter_days()
            .take(days)
            .enumerate()
            .map(|(i, d)| full(d, 10.0 + i as f64, 2.0, 0.5))
            .collect()
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            ClimateDataset::from_observations(vec![]),
            Err(DatasetError::Empty)
        ));
    }

    #[test]
    fn duplicate_and_unordered_dates_are_rejected() {
        let duplicated = vec![
            full(date(2020, 1, 1), 1.0, 0.0, 0.0),
            full(date(2020, 1, 1), 1.0, 0.0, 0.0),
        ];
        assert!(matches!(
            ClimateDataset::from_observations(duplicated),
            Err(DatasetError::DuplicateDate(d)) if d == date(2020, 1, 1)
        ));

        let unordered = vec![
            full(date(2020, 1, 2), 1.0, 0.0, 0.0),
            full(date(2020, 1, 1), 1.0, 0.0, 0.0),
        ];
        assert!(matches!(
            ClimateDataset::from_observations(unordered),
            Err(DatasetError::UnorderedDates { .. })
        ));
    }

    #[test]
    fn gaps_between_days_are_rejected() {
        let gap = vec![
            full(date(2020, 1, 1), 1.0, 0.0, 0.0),
            full(date(2020, 1, 3), 1.0, 0.0, 0.0),
        ];
        assert!(matches!(
            ClimateDataset::from_observations(gap),
            Err(DatasetError::MissingDay { previous, next })
                if previous == date(2020, 1, 1) && next == date(2020, 1, 3)
        ));
    }

    #[test]
    fn missing_values_are_filled_before_deriving() -> Result<(), Box<dyn std::error::Error>> {
        let dataset = ClimateDataset::from_observations(vec![
            RawObservation::new(date(2020, 2, 28), None, Some(-2.0), None),
            RawObservation::new(date(2020, 2, 29), Some(6.0), None, Some(3.0)),
            RawObservation::new(date(2020, 3, 1), None, Some(1.0), None),
        ])?;
        let records = dataset.records();

        assert_eq!(records[0].temperature_max, 6.0); // back-filled
        assert_eq!(records[0].precipitation, 3.0);
        assert_eq!(records[1].temperature_min, -2.0); // forward-filled
        assert_eq!(records[2].temperature_max, 6.0);
        assert_eq!(records[2].precipitation, 3.0);
        assert_eq!(records[2].temperature_avg, 3.5);
        assert_eq!(records[2].temperature_range, 5.0);
        assert_eq!(records[2].season, Season::Spring);
        assert_eq!(records[1].season, Season::Winter);

        let summary = dataset.fill_summary();
        assert_eq!(summary.temperature_max.backward_filled, 1);
        assert_eq!(summary.temperature_max.forward_filled, 1);
        assert_eq!(summary.total(), 5);
        Ok(())
    }

    #[test]
    fn column_without_values_is_rejected() {
        let observations = vec![
            RawObservation::new(date(2020, 1, 1), Some(1.0), Some(0.0), None),
            RawObservation::new(date(2020, 1, 2), Some(1.0), Some(0.0), None),
        ];
        assert!(matches!(
            ClimateDataset::from_observations(observations),
            Err(DatasetError::EmptyColumn("precipitation_sum"))
        ));
    }

    #[test]
    fn negative_precipitation_is_rejected() {
        let observations = vec![full(date(2020, 1, 1), 1.0, 0.0, -0.2)];
        assert!(matches!(
            ClimateDataset::from_observations(observations),
            Err(DatasetError::NegativePrecipitation { .. })
        ));
    }

    #[test]
    fn non_finite_measurements_are_rejected() {
        let observations = vec![
            full(date(2020, 1, 1), 1.0, 0.0, 0.0),
            full(date(2020, 1, 2), 1.0, 0.0, f64::NAN),
        ];
        assert!(matches!(
            ClimateDataset::from_observations(observations),
            Err(DatasetError::NonFiniteValue { column: "precipitation_sum", date: day })
                if day == date(2020, 1, 2)
        ));

        let observations = vec![full(date(2020, 1, 1), f64::INFINITY, 0.0, 0.0)];
        assert!(matches!(
            ClimateDataset::from_observations(observations),
            Err(DatasetError::NonFiniteValue { column: "temperature_2m_max", .. })
        ));
    }

    #[test]
    fn range_queries_slice_the_series() -> Result<(), Box<dyn std::error::Error>> {
        // 2019-12-30 .. 2021-01-02
        let dataset = ClimateDataset::from_observations(consecutive(date(2019, 12, 30), 370))?;
        assert_eq!(dataset.year_bounds(), (Year(2019), Year(2021)));
        assert_eq!(dataset.first_date(), date(2019, 12, 30));

        let year_2020 = dataset.get_for_period(Year(2020));
        assert_eq!(year_2020.len(), 366);
        assert!(year_2020.iter().all(|r| r.year == 2020));

        let february = dataset.get_for_period(YearMonth(2020, 2));
        assert_eq!(february.len(), 29);

        let span = dataset.filter_years(Year(2020), Year(2021));
        assert_eq!(span.len(), 368);
        assert_eq!(span[0].date, date(2020, 1, 1));

        assert!(dataset.filter_years(Year(2030), Year(2031)).is_empty());
        assert!(dataset
            .get_range(date(2021, 1, 2), date(2020, 1, 1))
            .is_empty());
        Ok(())
    }
}
