use crate::trend::error::TrendError;
use serde::Serialize;
use std::fmt;

/// Two-sided confidence level of a prediction band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ConfidenceLevel {
    P90,
    #[default]
    P95,
    P99,
}

impl ConfidenceLevel {
    pub const ALL: [ConfidenceLevel; 3] = [
        ConfidenceLevel::P90,
        ConfidenceLevel::P95,
        ConfidenceLevel::P99,
    ];

    /// Standard normal quantile for the level.
    pub fn z_score(&self) -> f64 {
        match self {
            ConfidenceLevel::P90 => 1.645,
            ConfidenceLevel::P95 => 1.96,
            ConfidenceLevel::P99 => 2.576,
        }
    }

    pub fn percent(&self) -> u32 {
        match self {
            ConfidenceLevel::P90 => 90,
            ConfidenceLevel::P95 => 95,
            ConfidenceLevel::P99 => 99,
        }
    }
}

impl TryFrom<u32> for ConfidenceLevel {
    type Error = TrendError;

    fn try_from(percent: u32) -> Result<Self, Self::Error> {
        match percent {
            90 => Ok(ConfidenceLevel::P90),
            95 => Ok(ConfidenceLevel::P95),
            99 => Ok(ConfidenceLevel::P99),
            other => Err(TrendError::InvalidParameter(format!(
                "confidence level must be 90, 95 or 99, got {}",
                other
            ))),
        }
    }
}

impl fmt::Display for ConfidenceLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_round_trips() {
        for level in ConfidenceLevel::ALL {
            assert_eq!(ConfidenceLevel::try_from(level.percent()), Ok(level));
        }
        assert_eq!(ConfidenceLevel::P99.to_string(), "99%");
    }

    #[test]
    fn unsupported_levels_are_rejected() {
        for percent in [0, 50, 80, 94, 100] {
            assert!(matches!(
                ConfidenceLevel::try_from(percent),
                Err(TrendError::InvalidParameter(_))
            ));
        }
    }

    #[test]
    fn wider_levels_have_larger_z() {
        assert!(ConfidenceLevel::P90.z_score() < ConfidenceLevel::P95.z_score());
        assert!(ConfidenceLevel::P95.z_score() < ConfidenceLevel::P99.z_score());
    }
}
