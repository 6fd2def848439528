mod aggregate;
mod config;
mod dataset;
mod error;
mod explorer;
mod trend;
mod types;

#[cfg(test)]
mod test_support;

pub use error::ClimateError;
pub use explorer::*;

pub use config::{
    ExplorerConfig, Location, DEFAULT_DATA_PATH, DEFAULT_FORECAST_HORIZON_YEARS,
    DEFAULT_MIN_DAYS_FOR_TREND,
};

pub use dataset::cache::DatasetCache;
pub use dataset::climate_dataset::{ClimateDataset, FillSummary};
pub use dataset::error::DatasetError;
pub use dataset::fill::{fill_forward_backward, FillReport};
pub use dataset::loader::{extract_observations, parse_climate_csv, read_climate_csv};

pub use types::daily_record::{DailyRecord, RawObservation};
pub use types::field::{Field, Reduction};
pub use types::period::{DatePeriod, StartEndDate, Year, YearMonth};
pub use types::rain_category::{RainCategory, PRECIPITATION_CATEGORY_EDGES};
pub use types::season::Season;

pub use aggregate::aggregator::{aggregate, AggregateRow, AggregateTable, Cell, ReducedValue};
pub use aggregate::error::AggregateError;
pub use aggregate::group::{GroupBy, GroupKey};
pub use aggregate::reduction_spec::ReductionSpec;
pub use aggregate::stats::Description;
pub use aggregate::summaries::{
    annual_series, describe, rain_distribution, ExtremeDay, ExtremeEvents, KeyStats,
    RainCategoryShare, YearOverYear, YearValue, HEAVY_RAIN_THRESHOLD_MM,
};

pub use trend::confidence::ConfidenceLevel;
pub use trend::error::TrendError;
pub use trend::forecast::{
    forecast, ForecastPoint, ForecastSeries, ProjectionSummary, DECADE_BASELINE_START_YEAR,
};
pub use trend::model::{fit, fit_points, TrendDirection, TrendMetric, TrendModel};
