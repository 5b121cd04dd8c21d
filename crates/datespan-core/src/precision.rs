//! Input precision classification.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The finest unit of time information present in a parsed input.
///
/// Precision is decided by which format or epoch unit matched the input,
/// not by inspecting the resulting instant: `"2022-01-02"` is day precision
/// even though the instant it resolves to has nanosecond fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Precision {
    /// Calendar date only.
    Day,
    /// Wall clock down to the minute.
    Minute,
    /// Wall clock down to the second.
    Second,
    /// Sub-second, thousandths.
    Millisecond,
    /// Sub-second, millionths.
    Microsecond,
    /// Sub-second, billionths.
    Nanosecond,
}

impl Precision {
    /// Returns the precision as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Minute => "minute",
            Self::Second => "second",
            Self::Millisecond => "millisecond",
            Self::Microsecond => "microsecond",
            Self::Nanosecond => "nanosecond",
        }
    }

    /// Returns all precision levels, coarsest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Day,
            Self::Minute,
            Self::Second,
            Self::Millisecond,
            Self::Microsecond,
            Self::Nanosecond,
        ]
    }

    /// Classifies a sub-second value (in nanoseconds) into the coarsest
    /// tier that still represents it exactly.
    ///
    /// Serves numeric inputs with no written fraction to measure: an
    /// Excel serial's sub-second remainder is millisecond precision when
    /// it sits on a whole millisecond, however the float prints.
    #[must_use]
    pub(crate) const fn from_subsec_nanos(nanos: u32) -> Self {
        if nanos % 1_000_000 == 0 {
            Self::Millisecond
        } else if nanos % 1_000 == 0 {
            Self::Microsecond
        } else {
            Self::Nanosecond
        }
    }
}

impl std::fmt::Display for Precision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Precision {
    type Err = PrecisionParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "d" => Ok(Self::Day),
            "minute" | "min" => Ok(Self::Minute),
            "second" | "s" | "sec" => Ok(Self::Second),
            "millisecond" | "ms" => Ok(Self::Millisecond),
            "microsecond" | "us" => Ok(Self::Microsecond),
            "nanosecond" | "ns" => Ok(Self::Nanosecond),
            _ => Err(PrecisionParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid precision string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrecisionParseError(String);

impl std::fmt::Display for PrecisionParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid precision '{}', expected one of: day, minute, second, millisecond, microsecond, nanosecond",
            self.0
        )
    }
}

impl std::error::Error for PrecisionParseError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_precision_ordering() {
        assert!(Precision::Day < Precision::Minute);
        assert!(Precision::Second < Precision::Nanosecond);
    }

    #[test]
    fn test_precision_parse() {
        assert_eq!("day".parse::<Precision>().unwrap(), Precision::Day);
        assert_eq!("MS".parse::<Precision>().unwrap(), Precision::Millisecond);
        assert!("fortnight".parse::<Precision>().is_err());
    }

    #[test]
    fn test_subsec_tiering() {
        assert_eq!(
            Precision::from_subsec_nanos(500_000_000),
            Precision::Millisecond
        );
        assert_eq!(
            Precision::from_subsec_nanos(123_400_000),
            Precision::Microsecond
        );
        assert_eq!(
            Precision::from_subsec_nanos(123_456_700),
            Precision::Nanosecond
        );
        assert_eq!(Precision::from_subsec_nanos(0), Precision::Millisecond);
    }
}
