//! Excel serial day timestamps.
//!
//! Spreadsheet exports encode instants as fractional days since the Excel
//! epoch, 1899-12-30 (day 25569 is the Unix epoch). The serial is a
//! wall-clock reading: day 44562 in New York is midnight New York time,
//! not midnight UTC.

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeDelta};
use chrono_tz::Tz;

use crate::error::ParseError;
use crate::precision::Precision;
use crate::zone;

const MICROS_PER_DAY: f64 = 86_400.0 * 1e6;

/// Serials past this bound leave the supported calendar.
const MAX_SERIAL_DAYS: f64 = 100_000_000.0;

fn epoch() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(1899, 12, 30)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Converts an Excel serial to an instant in `tz`.
///
/// The day count and the day fraction are applied separately so the
/// fraction keeps the serial's full resolution. Even then an f64 at
/// modern day numbers resolves nothing below a microsecond, so the
/// fraction is read at microsecond grain; rounding there strips the
/// float noise that a nanosecond reading would mistake for content.
///
/// Precision reflects the finest unit present in the fraction: none is
/// day, whole seconds are second, then millisecond or microsecond.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDateInput`] for non-finite serials and
/// serials outside the supported calendar.
pub fn parse_excel_serial(serial: f64, tz: Tz) -> Result<(DateTime<Tz>, Precision), ParseError> {
    let invalid = || ParseError::InvalidDateInput(serial.to_string());
    if !serial.is_finite() || serial.abs() >= MAX_SERIAL_DAYS {
        return Err(invalid());
    }

    let days = serial.trunc();
    let subday_micros = ((serial - days) * MICROS_PER_DAY).round() as i64;

    let naive = TimeDelta::try_days(days as i64)
        .and_then(|whole| epoch().checked_add_signed(whole))
        .and_then(|dt| dt.checked_add_signed(TimeDelta::microseconds(subday_micros)))
        .ok_or_else(invalid)?;

    Ok((zone::resolve_local(naive, tz), serial_precision(subday_micros)))
}

/// Converts an instant back to an Excel serial, reading the wall clock in
/// the instant's own timezone.
#[must_use]
pub fn to_excel_serial(dt: &DateTime<Tz>) -> f64 {
    let delta = dt.naive_local() - epoch();
    let seconds = delta.num_seconds() as f64 + f64::from(delta.subsec_nanos()) * 1e-9;
    seconds / 86_400.0
}

fn serial_precision(subday_micros: i64) -> Precision {
    let subday = subday_micros.unsigned_abs();
    if subday == 0 {
        Precision::Day
    } else if subday % 1_000_000 == 0 {
        Precision::Second
    } else {
        Precision::from_subsec_nanos(((subday % 1_000_000) * 1_000) as u32)
    }
}
