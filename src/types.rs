//! Core types and constants

use serde::{Deserialize, Serialize};
use std::fmt;

/// Ticker identifier, unique within the fundamentals universe
pub type Ticker = String;

/// Price type (using f64 for precision)
pub type Price = f64;

/// Quantity/volume type
pub type Quantity = f64;

/// Composite score produced by summing sub-ranks (lower is better)
pub type Rate = usize;

/// Discrete direction of a smoothed price series at its latest point.
///
/// Serialized as the integers `1` and `-1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "i8", try_from = "i8")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    /// Classify a first difference of a smoothed series.
    ///
    /// `diff >= 0` (zero included) is `Up`, negative is `Down`. A non-finite
    /// difference has no direction and yields `None`.
    pub fn from_difference(diff: f64) -> Option<Self> {
        if !diff.is_finite() {
            None
        } else if diff >= 0.0 {
            Some(Trend::Up)
        } else {
            Some(Trend::Down)
        }
    }

    /// Signed value of the trend (`+1` or `-1`)
    pub fn as_i8(self) -> i8 {
        match self {
            Trend::Up => 1,
            Trend::Down => -1,
        }
    }
}

impl From<Trend> for i8 {
    fn from(trend: Trend) -> Self {
        trend.as_i8()
    }
}

impl TryFrom<i8> for Trend {
    type Error = String;

    fn try_from(value: i8) -> std::result::Result<Self, Self::Error> {
        match value {
            1 => Ok(Trend::Up),
            -1 => Ok(Trend::Down),
            other => Err(format!("invalid trend value {}, expected 1 or -1", other)),
        }
    }
}

impl fmt::Display for Trend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trend::Up => write!(f, "up"),
            Trend::Down => write!(f, "down"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_difference_is_up() {
        assert_eq!(Trend::from_difference(0.0), Some(Trend::Up));
        assert_eq!(Trend::from_difference(-0.0), Some(Trend::Up));
        assert_eq!(Trend::from_difference(1e-12), Some(Trend::Up));
        assert_eq!(Trend::from_difference(-1e-12), Some(Trend::Down));
    }

    #[test]
    fn test_non_finite_difference_has_no_trend() {
        assert_eq!(Trend::from_difference(f64::NAN), None);
        assert_eq!(Trend::from_difference(f64::INFINITY), None);
    }

    #[test]
    fn test_trend_serializes_as_signed_integer() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "1");
        assert_eq!(serde_json::to_string(&Trend::Down).unwrap(), "-1");
        assert_eq!(serde_json::from_str::<Trend>("-1").unwrap(), Trend::Down);
        assert!(serde_json::from_str::<Trend>("0").is_err());
    }
}
