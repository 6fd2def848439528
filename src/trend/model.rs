//! Ordinary least squares trend lines over annual values.

use crate::aggregate::aggregator::AggregateTable;
use crate::aggregate::stats::population_std;
use crate::aggregate::summaries::annual_series;
use crate::trend::confidence::ConfidenceLevel;
use crate::trend::error::TrendError;
use crate::trend::forecast::ForecastPoint;
use crate::types::field::{Field, Reduction};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Annual quantity a trend is fitted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendMetric {
    /// Annual mean of the daily average temperature (°C).
    Temperature,
    /// Annual precipitation total (mm).
    Precipitation,
}

impl TrendMetric {
    /// Aggregate cell holding the metric in an annual table.
    pub fn source(&self) -> (Field, Reduction) {
        match self {
            TrendMetric::Temperature => (Field::TemperatureAvg, Reduction::Mean),
            TrendMetric::Precipitation => (Field::Precipitation, Reduction::Sum),
        }
    }

    /// Largest absolute slope per year still classified as stable.
    pub fn stable_threshold(&self) -> f64 {
        match self {
            TrendMetric::Temperature => 0.05,
            TrendMetric::Precipitation => 10.0,
        }
    }

    /// Human readable wording of a direction for this metric.
    pub fn label(&self, direction: TrendDirection) -> &'static str {
        match (self, direction) {
            (TrendMetric::Temperature, TrendDirection::Increasing) => "Warming",
            (TrendMetric::Temperature, TrendDirection::Decreasing) => "Cooling",
            (TrendMetric::Precipitation, TrendDirection::Increasing) => "Increasing",
            (TrendMetric::Precipitation, TrendDirection::Decreasing) => "Decreasing",
            (_, TrendDirection::Stable) => "Stable",
        }
    }
}

impl fmt::Display for TrendMetric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendMetric::Temperature => write!(f, "temperature"),
            TrendMetric::Precipitation => write!(f, "precipitation"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TrendDirection {
    Increasing,
    Stable,
    Decreasing,
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TrendDirection::Increasing => write!(f, "increasing"),
            TrendDirection::Stable => write!(f, "stable"),
            TrendDirection::Decreasing => write!(f, "decreasing"),
        }
    }
}

/// A straight line `value = slope * year + intercept` fitted on annual values.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendModel {
    pub metric: TrendMetric,
    /// Change per year, in the metric's unit.
    pub slope: f64,
    pub intercept: f64,
    pub r_squared: f64,
    /// Population standard deviation of the training residuals.
    pub residual_std: f64,
    /// `(year, value)` pairs the line was fitted on, in year order.
    pub observations: Vec<(i32, f64)>,
}

impl TrendModel {
    pub fn predict(&self, year: i32) -> f64 {
        self.slope * year as f64 + self.intercept
    }

    pub fn direction(&self) -> TrendDirection {
        let threshold = self.metric.stable_threshold();
        if self.slope > threshold {
            TrendDirection::Increasing
        } else if self.slope < -threshold {
            TrendDirection::Decreasing
        } else {
            TrendDirection::Stable
        }
    }

    pub fn label(&self) -> &'static str {
        self.metric.label(self.direction())
    }

    pub fn first_year(&self) -> i32 {
        self.observations.first().map_or(0, |(year, _)| *year)
    }

    /// Last observed year; forecasts start right after it.
    pub fn last_year(&self) -> i32 {
        self.observations.last().map_or(0, |(year, _)| *year)
    }

    pub fn last_value(&self) -> f64 {
        self.observations.last().map_or(f64::NAN, |(_, value)| *value)
    }

    /// Half width of the prediction band at `confidence`.
    pub fn margin(&self, confidence: ConfidenceLevel) -> f64 {
        confidence.z_score() * self.residual_std
    }

    /// The fitted line with its band over the observed years.
    pub fn fitted_band(&self, confidence: ConfidenceLevel) -> Vec<ForecastPoint> {
        let margin = self.margin(confidence);
        self.observations
            .iter()
            .map(|(year, _)| ForecastPoint::new(*year, self.predict(*year), margin))
            .collect()
    }
}

/// Fits `metric` on an annual aggregate table.
///
/// # Errors
///
/// * [`TrendError::InvalidParameter`] when the table is not grouped by year
///   or lacks the metric's cell (see [`TrendMetric::source`]).
/// * [`TrendError::InsufficientData`] with fewer than two distinct years.
pub fn fit(annual: &AggregateTable, metric: TrendMetric) -> Result<TrendModel, TrendError> {
    let (field, reduction) = metric.source();
    let series = annual_series(annual, field, reduction)
        .map_err(|e| TrendError::InvalidParameter(e.to_string()))?;
    let points: Vec<(i32, f64)> = series.iter().map(|v| (v.year.get(), v.value)).collect();
    fit_points(&points, metric)
}

/// Fits `metric` on raw `(year, value)` pairs.
///
/// Points are sorted by year before fitting. Repeated years are kept as
/// separate observations but count once towards the minimum of two years.
pub fn fit_points(points: &[(i32, f64)], metric: TrendMetric) -> Result<TrendModel, TrendError> {
    let distinct_years = points.iter().map(|(year, _)| *year).collect::<BTreeSet<_>>().len();
    if distinct_years < 2 {
        return Err(TrendError::InsufficientData {
            required: 2,
            actual: distinct_years,
        });
    }
    if let Some((year, _)) = points.iter().find(|(_, value)| !value.is_finite()) {
        return Err(TrendError::InvalidParameter(format!(
            "{} value for {} is not finite",
            metric, year
        )));
    }

    let mut observations = points.to_vec();
    observations.sort_by_key(|(year, _)| *year);

    let n = observations.len() as f64;
    let x_mean = observations.iter().map(|(x, _)| *x as f64).sum::<f64>() / n;
    let y_mean = observations.iter().map(|(_, y)| *y).sum::<f64>() / n;
    let (sxy, sxx) = observations.iter().fold((0.0, 0.0), |(sxy, sxx), (x, y)| {
        let dx = *x as f64 - x_mean;
        (sxy + dx * (y - y_mean), sxx + dx * dx)
    });
    let slope = sxy / sxx;
    let intercept = y_mean - slope * x_mean;

    let residuals: Vec<f64> = observations
        .iter()
        .map(|(x, y)| y - (slope * *x as f64 + intercept))
        .collect();
    let ss_res: f64 = residuals.iter().map(|r| r * r).sum();
    let ss_tot: f64 = observations.iter().map(|(_, y)| (y - y_mean).powi(2)).sum();
    let r_squared = if ss_tot == 0.0 {
        if ss_res == 0.0 {
            1.0
        } else {
            0.0
        }
    } else {
        1.0 - ss_res / ss_tot
    };

    Ok(TrendModel {
        metric,
        slope,
        intercept,
        r_squared,
        residual_std: population_std(&residuals).unwrap_or(0.0),
        observations,
    })
}
