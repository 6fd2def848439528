//! Grouping keys for aggregation.

use crate::types::daily_record::DailyRecord;
use crate::types::period::{Year, YearMonth};
use crate::types::season::Season;
use serde::Serialize;
use std::fmt;

/// Which calendar unit records are grouped by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum GroupBy {
    Year,
    YearMonth,
    Season,
}

impl GroupBy {
    /// The key `record` falls under for this grouping.
    pub fn key_of(&self, record: &DailyRecord) -> GroupKey {
        match self {
            GroupBy::Year => GroupKey::Year(record.year()),
            GroupBy::YearMonth => GroupKey::YearMonth(record.year_month()),
            GroupBy::Season => GroupKey::Season(record.season),
        }
    }
}

/// Identifier of one aggregate row.
///
/// Keys of the same kind order chronologically (years, year-months) or
/// canonically (Spring, Summer, Autumn, Winter).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum GroupKey {
    Year(Year),
    YearMonth(YearMonth),
    Season(Season),
}

impl GroupKey {
    pub fn year(&self) -> Option<Year> {
        match self {
            GroupKey::Year(year) => Some(*year),
            _ => None,
        }
    }

    pub fn year_month(&self) -> Option<YearMonth> {
        match self {
            GroupKey::YearMonth(year_month) => Some(*year_month),
            _ => None,
        }
    }

    pub fn season(&self) -> Option<Season> {
        match self {
            GroupKey::Season(season) => Some(*season),
            _ => None,
        }
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GroupKey::Year(year) => write!(f, "{}", year),
            GroupKey::YearMonth(year_month) => write!(f, "{}", year_month),
            GroupKey::Season(season) => write!(f, "{}", season),
        }
    }
}
