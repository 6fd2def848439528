//! Defines the meteorological `Season` derived from a calendar month.

use serde::Serialize;
use std::fmt;

/// Meteorological season of the northern hemisphere.
///
/// Variants are declared in the canonical display order used by seasonal
/// summaries (Spring, Summer, Autumn, Winter), so the derived `Ord` sorts
/// seasons the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Season {
    /// March, April and May.
    Spring,
    /// June, July and August.
    Summer,
    /// September, October and November.
    Autumn,
    /// December, January and February.
    Winter,
}

impl Season {
    /// All seasons in canonical order.
    pub const ALL: [Season; 4] = [Season::Spring, Season::Summer, Season::Autumn, Season::Winter];

    /// Maps a calendar month (1-12) to its season. Returns `None` for any other number.
    ///
    /// # Examples
    ///
    /// ```
    /// use climate_trends::Season;
    ///
    /// assert_eq!(Season::from_month(12), Some(Season::Winter));
    /// assert_eq!(Season::from_month(4), Some(Season::Spring));
    /// assert_eq!(Season::from_month(13), None);
    /// ```
    pub fn from_month(month: u32) -> Option<Season> {
        match month {
            12 | 1 | 2 => Some(Season::Winter),
            3..=5 => Some(Season::Spring),
            6..=8 => Some(Season::Summer),
            9..=11 => Some(Season::Autumn),
            _ => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Autumn => "Autumn",
            Season::Winter => "Winter",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
