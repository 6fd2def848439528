//! Defaults for the [`crate::ClimateExplorer`] facade.

use crate::trend::confidence::ConfidenceLevel;
use bon::Builder;
use std::path::PathBuf;

pub const DEFAULT_DATA_PATH: &str = "data/bergen_climate_data.csv";
pub const DEFAULT_FORECAST_HORIZON_YEARS: u32 = 20;

/// Fewer days than this make a trend fit unreliable; the explorer warns but
/// still fits.
pub const DEFAULT_MIN_DAYS_FOR_TREND: usize = 365;

/// Where the observations were taken.
///
/// # Examples
///
/// ```
/// use climate_trends::Location;
///
/// let bergen = Location::default();
/// assert_eq!(bergen.latitude, 60.3913);
/// assert_eq!(bergen.timezone, "Europe/Oslo");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Location {
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
    pub timezone: String,
}

impl Default for Location {
    fn default() -> Self {
        Self {
            name: "Bergen".to_string(),
            latitude: 60.3913,
            longitude: 5.3221,
            timezone: "Europe/Oslo".to_string(),
        }
    }
}

/// Settings of a [`crate::ClimateExplorer`].
///
/// # Examples
///
/// ```
/// use climate_trends::{ConfidenceLevel, ExplorerConfig};
///
/// let config = ExplorerConfig::builder()
///     .data_path("data/oslo.csv")
///     .forecast_horizon_years(10)
///     .build();
/// assert_eq!(config.forecast_horizon_years, 10);
/// assert_eq!(config.confidence, ConfidenceLevel::P95);
/// ```
#[derive(Debug, Clone, PartialEq, Builder)]
pub struct ExplorerConfig {
    #[builder(into, default = PathBuf::from(DEFAULT_DATA_PATH))]
    pub data_path: PathBuf,
    #[builder(default)]
    pub location: Location,
    #[builder(default = DEFAULT_FORECAST_HORIZON_YEARS)]
    pub forecast_horizon_years: u32,
    #[builder(default)]
    pub confidence: ConfidenceLevel,
    #[builder(default = DEFAULT_MIN_DAYS_FOR_TREND)]
    pub min_days_for_trend: usize,
}

impl Default for ExplorerConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_describe_bergen() {
        let config = ExplorerConfig::default();
        assert_eq!(config.data_path, PathBuf::from("data/bergen_climate_data.csv"));
        assert_eq!(config.location.longitude, 5.3221);
        assert_eq!(config.forecast_horizon_years, 20);
        assert_eq!(config.confidence.percent(), 95);
        assert_eq!(config.min_days_for_trend, 365);
    }
}
