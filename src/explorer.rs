//! The main entry point: a loaded dataset plus the operations a climate
//! dashboard asks of it.

use crate::aggregate::aggregator::{aggregate as aggregate_records, AggregateTable};
use crate::aggregate::group::GroupBy;
use crate::aggregate::reduction_spec::ReductionSpec;
use crate::aggregate::stats::Description;
use crate::aggregate::summaries::{
    describe, rain_distribution, ExtremeEvents, KeyStats, RainCategoryShare, YearOverYear,
};
use crate::config::ExplorerConfig;
use crate::dataset::cache::DatasetCache;
use crate::dataset::climate_dataset::ClimateDataset;
use crate::error::ClimateError;
use crate::trend::forecast::{forecast, ForecastSeries, ProjectionSummary};
use crate::trend::model::{fit, TrendMetric, TrendModel};
use crate::types::daily_record::DailyRecord;
use crate::types::field::Field;
use crate::types::period::Year;
use bon::bon;
use log::{info, warn};
use serde::Serialize;
use std::sync::Arc;

/// Headline statistics, extremes and rainfall distribution of a year range.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PeriodOverview {
    pub first_year: Year,
    pub last_year: Year,
    pub key_stats: KeyStats,
    pub extremes: ExtremeEvents,
    pub rain_distribution: Vec<RainCategoryShare>,
}

/// A fitted trend with its forecast and the changes it projects.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendReport {
    pub model: TrendModel,
    pub forecast: ForecastSeries,
    pub projection: ProjectionSummary,
}

/// Read-only view over one cleaned dataset.
///
/// Every method optionally narrows the data to a year range; both ends are
/// inclusive and default to the first and last year of the dataset.
///
/// # Examples
///
/// ```
/// use chrono::{Datelike, NaiveDate};
/// use climate_trends::{ClimateDataset, ClimateExplorer, ExplorerConfig, RawObservation, TrendMetric};
///
/// let start = NaiveDate::from_ymd_opt(2018, 1, 1).unwrap();
/// let end = NaiveDate::from_ymd_opt(2020, 12, 31).unwrap();
/// let observations = start
///     .iter_days()
///     .take_while(|d| *d <= end)
///     .map(|d| {
///         let warming = (d.year() - 2018) as f64 * 0.5;
///         RawObservation::new(d, Some(8.0 + warming), Some(6.0 + warming), Some(3.0))
///     })
///     .collect();
/// let explorer = ClimateExplorer::from_dataset(
///     ClimateDataset::from_observations(observations)?,
///     ExplorerConfig::default(),
/// );
///
/// let report = explorer
///     .forecast()
///     .metric(TrendMetric::Temperature)
///     .horizon_years(2)
///     .call()?;
/// assert_eq!(report.model.label(), "Warming");
/// assert!((report.forecast.points[1].prediction - 9.0).abs() < 1e-6);
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
#[derive(Debug, Clone)]
pub struct ClimateExplorer {
    dataset: Arc<ClimateDataset>,
    config: ExplorerConfig,
}

#[bon]
impl ClimateExplorer {
    pub fn from_dataset(dataset: impl Into<Arc<ClimateDataset>>, config: ExplorerConfig) -> Self {
        Self {
            dataset: dataset.into(),
            config,
        }
    }

    /// Loads `config.data_path` through `cache`, so explorers over the same
    /// file share one dataset.
    ///
    /// # Errors
    ///
    /// [`ClimateError::Dataset`] when the file cannot be read, parsed or
    /// cleaned.
    pub fn load(cache: &DatasetCache, config: ExplorerConfig) -> Result<Self, ClimateError> {
        let dataset = cache.get_or_load(&config.data_path)?;
        info!(
            "Exploring {} days of {} climate data ({} to {})",
            dataset.len(),
            config.location.name,
            dataset.first_date(),
            dataset.last_date()
        );
        Ok(Self::from_dataset(dataset, config))
    }

    pub fn dataset(&self) -> &ClimateDataset {
        &self.dataset
    }

    pub fn config(&self) -> &ExplorerConfig {
        &self.config
    }

    /// Groups the selected years by `group_by` and applies `reductions`.
    #[builder]
    pub fn aggregate(
        &self,
        group_by: GroupBy,
        reductions: &ReductionSpec,
        start_year: Option<Year>,
        end_year: Option<Year>,
    ) -> Result<AggregateTable, ClimateError> {
        let records = self.records_between(start_year, end_year);
        Ok(aggregate_records(records, group_by, reductions)?)
    }

    /// Key statistics, extreme events and the rainfall distribution.
    #[builder]
    pub fn overview(
        &self,
        start_year: Option<Year>,
        end_year: Option<Year>,
    ) -> Result<PeriodOverview, ClimateError> {
        let records = self.records_between(start_year, end_year);
        let (first_year, last_year) = self.resolve_years(start_year, end_year);
        Ok(PeriodOverview {
            first_year,
            last_year,
            key_stats: KeyStats::of(records)?,
            extremes: ExtremeEvents::of(records)?,
            rain_distribution: rain_distribution(records)?,
        })
    }

    #[builder]
    pub fn describe(
        &self,
        field: Field,
        start_year: Option<Year>,
        end_year: Option<Year>,
    ) -> Result<Description, ClimateError> {
        Ok(describe(self.records_between(start_year, end_year), field)?)
    }

    #[builder]
    pub fn year_over_year(
        &self,
        start_year: Option<Year>,
        end_year: Option<Year>,
    ) -> Result<YearOverYear, ClimateError> {
        let annual = self
            .aggregate()
            .group_by(GroupBy::Year)
            .reductions(&ReductionSpec::annual_summary())
            .maybe_start_year(start_year)
            .maybe_end_year(end_year)
            .call()?;
        Ok(YearOverYear::of(&annual)?)
    }

    /// Fits a linear trend of `metric` on the annual values of the selected years.
    ///
    /// Logs a warning when fewer days than `config.min_days_for_trend` back
    /// the fit.
    #[builder]
    pub fn trend(
        &self,
        metric: TrendMetric,
        start_year: Option<Year>,
        end_year: Option<Year>,
    ) -> Result<TrendModel, ClimateError> {
        let records = self.records_between(start_year, end_year);
        if records.len() < self.config.min_days_for_trend {
            warn!(
                "Only {} days available for the {} trend, results may be unreliable",
                records.len(),
                metric
            );
        }
        let annual = aggregate_records(records, GroupBy::Year, &ReductionSpec::annual_trend())?;
        Ok(fit(&annual, metric)?)
    }

    /// Fits `metric` and extends it `horizon_years` past the last observed year.
    ///
    /// `horizon_years` and `confidence` (90, 95 or 99) fall back to the config.
    #[builder]
    pub fn forecast(
        &self,
        metric: TrendMetric,
        horizon_years: Option<u32>,
        confidence: Option<u32>,
        start_year: Option<Year>,
        end_year: Option<Year>,
    ) -> Result<TrendReport, ClimateError> {
        let model = self
            .trend()
            .metric(metric)
            .maybe_start_year(start_year)
            .maybe_end_year(end_year)
            .call()?;
        let horizon_years = horizon_years.unwrap_or(self.config.forecast_horizon_years);
        let confidence = confidence.unwrap_or(self.config.confidence.percent());
        let series = forecast(&model, horizon_years, confidence)?;
        let projection = ProjectionSummary::of(&model, &series)?;
        Ok(TrendReport {
            model,
            forecast: series,
            projection,
        })
    }

    fn resolve_years(&self, start_year: Option<Year>, end_year: Option<Year>) -> (Year, Year) {
        let (first, last) = self.dataset.year_bounds();
        (start_year.unwrap_or(first), end_year.unwrap_or(last))
    }

    fn records_between(&self, start_year: Option<Year>, end_year: Option<Year>) -> &[DailyRecord] {
        let (start, end) = self.resolve_years(start_year, end_year);
        self.dataset.filter_years(start, end)
    }
}
