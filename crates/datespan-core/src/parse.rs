//! Date input resolution.
//!
//! One entry point, [`parse_instant`], turns any accepted input shape into
//! a timezone-aware instant plus the precision the input actually carried.
//! Resolution tries, in order: typed instants, the keywords `now`, `today`
//! and `yesterday`, numeric epochs classified by digit count, and finally
//! the format catalog. The first class that claims the input decides the
//! outcome; a claimed-but-invalid input fails rather than falling through.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;

use crate::catalog::TimeFormatEntry;
use crate::error::ParseError;
use crate::excel;
use crate::precision::Precision;
use crate::zone;

/// A date input value accepted by [`parse_instant`].
///
/// Replaces dynamic-typing tricks with an explicit union: callers hand in
/// strings, epoch numbers, or already-typed instants via `From`.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Textual input: keywords, numeric strings, or a catalog layout.
    Text(String),
    /// Integer epoch, classified by digit count.
    Int(i64),
    /// Fractional epoch, always an Excel serial day count.
    Float(f64),
    /// Already-resolved instant.
    Instant(DateTime<Tz>),
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for DateInput {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for DateInput {
    fn from(v: i32) -> Self {
        Self::Int(v.into())
    }
}

impl From<u32> for DateInput {
    fn from(v: u32) -> Self {
        Self::Int(v.into())
    }
}

impl From<f64> for DateInput {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<f32> for DateInput {
    fn from(v: f32) -> Self {
        Self::Float(v.into())
    }
}

impl From<DateTime<Tz>> for DateInput {
    fn from(dt: DateTime<Tz>) -> Self {
        Self::Instant(dt)
    }
}

impl From<DateTime<Utc>> for DateInput {
    fn from(dt: DateTime<Utc>) -> Self {
        Self::Instant(dt.with_timezone(&Tz::UTC))
    }
}

/// Resolves a date input to an instant and its precision.
///
/// `tz` is the interpretation zone for wall-clock inputs and the display
/// zone for inputs that carry their own timezone. Typed instants pass
/// through untouched with second precision.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDateInput`] when no input class matches,
/// or when the matching class rejects the value (unknown epoch digit
/// count, out-of-calendar serial).
pub fn parse_instant(
    input: impl Into<DateInput>,
    tz: Tz,
) -> Result<(DateTime<Tz>, Precision), ParseError> {
    match input.into() {
        DateInput::Instant(dt) => Ok((dt, Precision::Second)),
        DateInput::Int(v) => parse_epoch(v, tz),
        DateInput::Float(v) => excel::parse_excel_serial(v, tz),
        DateInput::Text(s) => parse_text(s.trim(), tz),
    }
}

fn parse_text(s: &str, tz: Tz) -> Result<(DateTime<Tz>, Precision), ParseError> {
    if s.is_empty() {
        return Err(ParseError::InvalidDateInput(s.to_string()));
    }

    if s.eq_ignore_ascii_case("now") {
        return Ok((Utc::now().with_timezone(&tz), Precision::Second));
    }
    if s.eq_ignore_ascii_case("today") {
        let today = Utc::now().with_timezone(&tz).date_naive();
        return Ok((zone::start_of_day(today, tz), Precision::Day));
    }
    if s.eq_ignore_ascii_case("yesterday") {
        let today = Utc::now().with_timezone(&tz).date_naive();
        let yesterday = today.pred_opt().unwrap();
        return Ok((zone::start_of_day(yesterday, tz), Precision::Day));
    }

    if let Ok(v) = s.parse::<i64>() {
        return parse_epoch(v, tz);
    }
    if let Ok(v) = s.parse::<f64>() {
        return excel::parse_excel_serial(v, tz);
    }

    TimeFormatEntry::all()
        .iter()
        .find_map(|entry| entry.try_parse(s, tz))
        .ok_or_else(|| ParseError::InvalidDateInput(s.to_string()))
}

/// Classifies an integer epoch by the digit count of its absolute value:
/// up to 5 digits is an Excel serial, 6-10 seconds, 13 milliseconds, 16
/// microseconds, 19 nanoseconds. Other widths are ambiguous and rejected.
fn parse_epoch(v: i64, tz: Tz) -> Result<(DateTime<Tz>, Precision), ParseError> {
    let invalid = || ParseError::InvalidDateInput(v.to_string());
    let (dt, precision) = match digit_count(v) {
        1..=5 => return excel::parse_excel_serial(v as f64, tz),
        6..=10 => (
            DateTime::from_timestamp(v, 0).ok_or_else(invalid)?,
            Precision::Second,
        ),
        13 => (
            DateTime::from_timestamp_millis(v).ok_or_else(invalid)?,
            Precision::Millisecond,
        ),
        16 => (
            DateTime::from_timestamp_micros(v).ok_or_else(invalid)?,
            Precision::Microsecond,
        ),
        19 => (DateTime::from_timestamp_nanos(v), Precision::Nanosecond),
        _ => return Err(invalid()),
    };
    Ok((dt.with_timezone(&tz), precision))
}

const fn digit_count(v: i64) -> u32 {
    let abs = v.unsigned_abs();
    if abs == 0 { 1 } else { abs.ilog10() + 1 }
}
