use crate::dataset::climate_dataset::ClimateDataset;
use crate::types::daily_record::RawObservation;
use chrono::NaiveDate;

pub(crate) fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

/// A consecutive series starting at `start`, one row per value triple
/// `(temperature_max, temperature_min, precipitation)`.
pub(crate) fn dataset(start: NaiveDate, days: &[(f64, f64, f64)]) -> ClimateDataset {
    let observations = start
        .iter_days()
        .zip(days)
        .map(|(d, &(tmax, tmin, prcp))| RawObservation::new(d, Some(tmax), Some(tmin), Some(prcp)))
        .collect();
    ClimateDataset::from_observations(observations).unwrap()
}

/// Whole calendar years where every day of year `y` has the given average
/// temperature (max = avg + 1, min = avg - 1) and `rain` mm of precipitation.
pub(crate) fn yearly_dataset(years: &[(i32, f64, f64)]) -> ClimateDataset {
    let start = date(years[0].0, 1, 1);
    let observations = years
        .iter()
        .flat_map(|&(year, avg, rain)| {
            date(year, 1, 1)
                .iter_days()
                .take_while(move |d| *d <= date(year, 12, 31))
                .map(move |d| RawObservation::new(d, Some(avg + 1.0), Some(avg - 1.0), Some(rain)))
        })
        .collect::<Vec<_>>();
    assert_eq!(observations[0].date, start);
    ClimateDataset::from_observations(observations).unwrap()
}
