use crate::trend::confidence::ConfidenceLevel;
use crate::trend::error::TrendError;
use crate::trend::model::TrendModel;
use serde::Serialize;

/// Observed values from this year on form the baseline of the decadal change.
pub const DECADE_BASELINE_START_YEAR: i32 = 2020;

/// Number of trailing forecast years averaged for the decadal change.
const DECADE_YEARS: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ForecastPoint {
    pub year: i32,
    pub prediction: f64,
    pub lower: f64,
    pub upper: f64,
}

impl ForecastPoint {
    pub(crate) fn new(year: i32, prediction: f64, margin: f64) -> Self {
        Self {
            year,
            prediction,
            lower: prediction - margin,
            upper: prediction + margin,
        }
    }
}

/// Extrapolated values for the years following the last observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ForecastSeries {
    pub confidence: ConfidenceLevel,
    /// Half width of every band, `z * residual_std`.
    pub margin: f64,
    pub points: Vec<ForecastPoint>,
}

impl ForecastSeries {
    pub fn last(&self) -> Option<&ForecastPoint> {
        self.points.last()
    }
}

/// Extends `model` over `horizon_years` years after its last observed year.
///
/// `confidence` is a percentage: 90, 95 or 99.
///
/// # Examples
///
/// ```
/// use climate_trends::{fit_points, forecast, TrendMetric};
///
/// let model = fit_points(&[(2018, 7.0), (2019, 7.5), (2020, 8.0)], TrendMetric::Temperature)?;
/// let series = forecast(&model, 2, 95)?;
///
/// assert_eq!(series.points[0].year, 2021);
/// assert!((series.points[1].prediction - 9.0).abs() < 1e-6);
/// assert!(forecast(&model, 0, 95).is_err());
/// # Ok::<(), climate_trends::TrendError>(())
/// ```
pub fn forecast(
    model: &TrendModel,
    horizon_years: u32,
    confidence: u32,
) -> Result<ForecastSeries, TrendError> {
    if horizon_years < 1 {
        return Err(TrendError::InvalidParameter(
            "forecast horizon must be at least one year".to_string(),
        ));
    }
    let confidence = ConfidenceLevel::try_from(confidence)?;
    let margin = model.margin(confidence);
    let last_year = model.last_year();
    let horizon_end = i32::try_from(horizon_years)
        .ok()
        .and_then(|offset| last_year.checked_add(offset))
        .ok_or_else(|| {
            TrendError::InvalidParameter(format!(
                "forecast horizon of {} years after {} exceeds the supported year range",
                horizon_years, last_year
            ))
        })?;
    let points = (last_year + 1..=horizon_end)
        .map(|year| ForecastPoint::new(year, model.predict(year), margin))
        .collect();

    Ok(ForecastSeries {
        confidence,
        margin,
        points,
    })
}

/// Headline changes implied by a forecast.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectionSummary {
    pub horizon_end_year: i32,
    /// Last forecast prediction minus the last observed value.
    pub change_by_horizon_end: f64,
    /// Mean of the last (up to) ten predictions minus the mean of the values
    /// observed from [`DECADE_BASELINE_START_YEAR`] on.
    pub decadal_change: f64,
}

impl ProjectionSummary {
    pub fn of(model: &TrendModel, series: &ForecastSeries) -> Result<Self, TrendError> {
        let last = series.last().ok_or_else(|| {
            TrendError::InvalidParameter("forecast series has no points".to_string())
        })?;

        let recent: Vec<f64> = model
            .observations
            .iter()
            .filter(|(year, _)| *year >= DECADE_BASELINE_START_YEAR)
            .map(|(_, value)| *value)
            .collect();
        let baseline = if recent.is_empty() {
            mean(model.observations.iter().map(|(_, value)| *value))
        } else {
            mean(recent.into_iter())
        };
        let tail = series.points.len().saturating_sub(DECADE_YEARS);
        let projected = mean(series.points[tail..].iter().map(|p| p.prediction));

        Ok(ProjectionSummary {
            horizon_end_year: last.year,
            change_by_horizon_end: last.prediction - model.last_value(),
            decadal_change: projected - baseline,
        })
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(sum, n), v| (sum + v, n + 1));
    sum / n as f64
}
