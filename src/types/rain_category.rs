//! Daily precipitation intensity categories.

use serde::Serialize;
use std::fmt;

/// Bin edges (mm) for [`RainCategory`]. The last bin is open-ended.
///
/// Intervals are right-closed and the first one also includes its lower edge:
/// `[0, 1]`, `(1, 5]`, `(5, 15]`, `(15, 50]`, `(50, ∞]`.
pub const PRECIPITATION_CATEGORY_EDGES: [f64; 6] = [0.0, 1.0, 5.0, 15.0, 50.0, f64::INFINITY];

/// Intensity class of a single day's precipitation total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum RainCategory {
    NoRain,
    Light,
    Moderate,
    Heavy,
    VeryHeavy,
}

impl RainCategory {
    pub const ALL: [RainCategory; 5] = [
        RainCategory::NoRain,
        RainCategory::Light,
        RainCategory::Moderate,
        RainCategory::Heavy,
        RainCategory::VeryHeavy,
    ];

    /// Places a precipitation total into its bin.
    ///
    /// Returns `None` for values outside the edges (negative totals or NaN).
    ///
    /// # Examples
    ///
    /// ```
    /// use climate_trends::RainCategory;
    ///
    /// assert_eq!(RainCategory::classify(0.0), Some(RainCategory::NoRain));
    /// assert_eq!(RainCategory::classify(1.0), Some(RainCategory::NoRain));
    /// assert_eq!(RainCategory::classify(1.1), Some(RainCategory::Light));
    /// assert_eq!(RainCategory::classify(-0.5), None);
    /// ```
    pub fn classify(precipitation_mm: f64) -> Option<RainCategory> {
        let edges = PRECIPITATION_CATEGORY_EDGES;
        if precipitation_mm.is_nan() || precipitation_mm < edges[0] {
            return None;
        }
        Self::ALL
            .into_iter()
            .zip(edges.windows(2))
            .find(|(_, bounds)| precipitation_mm <= bounds[1])
            .map(|(category, _)| category)
    }

    pub fn label(&self) -> &'static str {
        match self {
            RainCategory::NoRain => "No Rain (0-1mm)",
            RainCategory::Light => "Light (1-5mm)",
            RainCategory::Moderate => "Moderate (5-15mm)",
            RainCategory::Heavy => "Heavy (15-50mm)",
            RainCategory::VeryHeavy => "Very Heavy (50+mm)",
        }
    }
}

impl fmt::Display for RainCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}
