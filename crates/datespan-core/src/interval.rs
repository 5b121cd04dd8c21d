//! Sampling interval grammar.
//!
//! Resolution strings follow market-data conventions: bare digits are
//! minutes, the suffix `m` means months, and minutes must be spelled
//! `min`. The one unit-less form is `d`, one day.

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The unit of an [`Interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalUnit {
    /// One second.
    Second,
    /// One minute.
    Minute,
    /// One hour.
    Hour,
    /// One day.
    Day,
    /// One week.
    Week,
    /// Thirty days. An approximation, not a calendar month.
    Month,
    /// 365 days. An approximation, not a calendar year.
    Year,
}

impl IntervalUnit {
    /// Returns the unit as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Second => "second",
            Self::Minute => "minute",
            Self::Hour => "hour",
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Returns all units, shortest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::Second,
            Self::Minute,
            Self::Hour,
            Self::Day,
            Self::Week,
            Self::Month,
            Self::Year,
        ]
    }

    /// The canonical suffix used when formatting intervals.
    #[must_use]
    pub const fn suffix(&self) -> &'static str {
        match self {
            Self::Second => "s",
            Self::Minute => "min",
            Self::Hour => "h",
            Self::Day => "d",
            Self::Week => "w",
            Self::Month => "m",
            Self::Year => "y",
        }
    }

    const fn seconds(self) -> i64 {
        match self {
            Self::Second => 1,
            Self::Minute => 60,
            Self::Hour => 3_600,
            Self::Day => 86_400,
            Self::Week => 604_800,
            Self::Month => 2_592_000,
            Self::Year => 31_536_000,
        }
    }
}

impl std::fmt::Display for IntervalUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A sampling resolution, an amount of some unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Interval {
    /// Number of units.
    pub amount: u32,
    /// The unit being counted.
    pub unit: IntervalUnit,
}

impl Interval {
    /// Builds an interval from its parts.
    #[must_use]
    pub const fn new(amount: u32, unit: IntervalUnit) -> Self {
        Self { amount, unit }
    }

    /// The interval as elapsed time, using the 30-day month and 365-day
    /// year approximations.
    ///
    /// # Panics
    ///
    /// Panics when the total seconds exceed [`TimeDelta`]'s range. Parsing
    /// never builds such an interval; only a hand-assembled amount past
    /// roughly 292 million years can reach the limit.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        TimeDelta::seconds(i64::from(self.amount) * self.unit.seconds())
    }
}

impl std::fmt::Display for Interval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.amount, self.unit.suffix())
    }
}

impl FromStr for Interval {
    type Err = IntervalParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits_end = trimmed
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(trimmed.len());
        let (digits, rest) = trimmed.split_at(digits_end);
        let suffix = rest.trim_start();

        if digits.is_empty() {
            // The only unit-less form is the bare day marker.
            if suffix.eq_ignore_ascii_case("d") {
                return Ok(Self::new(1, IntervalUnit::Day));
            }
            return Err(IntervalParseError(s.to_string()));
        }
        let amount: u32 = digits
            .parse()
            .map_err(|_| IntervalParseError(s.to_string()))?;

        let unit = if suffix.is_empty() {
            IntervalUnit::Minute
        } else {
            match suffix.to_lowercase().as_str() {
                "s" | "sec" | "second" | "seconds" => IntervalUnit::Second,
                "min" | "minute" | "minutes" => IntervalUnit::Minute,
                "h" | "hour" | "hours" => IntervalUnit::Hour,
                "d" | "day" | "days" => IntervalUnit::Day,
                "w" | "week" | "weeks" => IntervalUnit::Week,
                "m" | "month" | "months" => IntervalUnit::Month,
                "y" | "year" | "years" => IntervalUnit::Year,
                _ => return Err(IntervalParseError(s.to_string())),
            }
        };

        // Every parsed interval has a representable duration.
        if TimeDelta::try_seconds(i64::from(amount) * unit.seconds()).is_none() {
            return Err(IntervalParseError(s.to_string()));
        }
        Ok(Self::new(amount, unit))
    }
}

/// Error returned when parsing an invalid interval string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IntervalParseError(String);

impl std::fmt::Display for IntervalParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid interval: {:?}", self.0)
    }
}

impl std::error::Error for IntervalParseError {}
