//! The numeric schema of a daily record and the reductions that can be applied to it.

use crate::aggregate::error::AggregateError;
use crate::types::daily_record::DailyRecord;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// A numeric column of [`DailyRecord`].
///
/// The string names match the column names of the source CSV (and the derived
/// columns computed at load time), so requests coming from a loosely typed
/// caller can be resolved with [`Field::from_str`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Field {
    /// Daily maximum temperature in °C (`temperature_2m_max`).
    TemperatureMax,
    /// Daily minimum temperature in °C (`temperature_2m_min`).
    TemperatureMin,
    /// Mean of daily maximum and minimum in °C (`temperature_avg`).
    TemperatureAvg,
    /// Daily maximum minus minimum in °C (`temperature_range`).
    TemperatureRange,
    /// Daily precipitation total in mm (`precipitation_sum`).
    Precipitation,
}

impl Field {
    pub const ALL: [Field; 5] = [
        Field::TemperatureMax,
        Field::TemperatureMin,
        Field::TemperatureAvg,
        Field::TemperatureRange,
        Field::Precipitation,
    ];

    pub fn column_name(&self) -> &'static str {
        match self {
            Field::TemperatureMax => "temperature_2m_max",
            Field::TemperatureMin => "temperature_2m_min",
            Field::TemperatureAvg => "temperature_avg",
            Field::TemperatureRange => "temperature_range",
            Field::Precipitation => "precipitation_sum",
        }
    }

    /// Reads this field from a record.
    pub fn value(&self, record: &DailyRecord) -> f64 {
        match self {
            Field::TemperatureMax => record.temperature_max,
            Field::TemperatureMin => record.temperature_min,
            Field::TemperatureAvg => record.temperature_avg,
            Field::TemperatureRange => record.temperature_range,
            Field::Precipitation => record.precipitation,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.column_name())
    }
}

impl FromStr for Field {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.column_name() == s)
            .ok_or_else(|| AggregateError::UnknownField(s.to_string()))
    }
}

/// A reduction applied to the values of one field within a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Reduction {
    Mean,
    Sum,
    Min,
    Max,
    /// Sample standard deviation (divides by n - 1).
    Std,
    Count,
}

impl Reduction {
    pub const ALL: [Reduction; 6] = [
        Reduction::Mean,
        Reduction::Sum,
        Reduction::Min,
        Reduction::Max,
        Reduction::Std,
        Reduction::Count,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Reduction::Mean => "mean",
            Reduction::Sum => "sum",
            Reduction::Min => "min",
            Reduction::Max => "max",
            Reduction::Std => "std",
            Reduction::Count => "count",
        }
    }
}

impl fmt::Display for Reduction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Reduction {
    type Err = AggregateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Reduction::ALL
            .into_iter()
            .find(|reduction| reduction.name() == s)
            .ok_or_else(|| AggregateError::UnknownReduction(s.to_string()))
    }
}
