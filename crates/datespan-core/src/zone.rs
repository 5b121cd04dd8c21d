//! Wall-clock resolution against named timezones.
//!
//! Timezone-less inputs and bucket key boundaries are wall-clock readings
//! that must be pinned to a real instant in some zone. DST makes that
//! mapping partial: some wall clocks happen twice (fall back) and some
//! never happen (spring forward). The policy here is fixed so that every
//! reading resolves deterministically:
//!
//! - unique wall clock: that instant
//! - ambiguous wall clock: the earlier of the two instants
//! - nonexistent wall clock: the reading shifted by the offset in force,
//!   landing just past the gap (02:30 EST during the spring-forward gap
//!   becomes 03:30 EDT)

use chrono::{DateTime, LocalResult, NaiveDate, NaiveDateTime, Offset, TimeDelta, TimeZone, Utc};
use chrono_tz::Tz;

/// Resolves a wall-clock reading to an instant in `tz`.
#[must_use]
pub fn resolve_local(naive: NaiveDateTime, tz: Tz) -> DateTime<Tz> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(dt) => dt,
        LocalResult::Ambiguous(earliest, _) => earliest,
        LocalResult::None => {
            // Inside a DST gap. Interpret the reading with the offset a UTC
            // clock showing the same digits would map to, which normalizes
            // past the gap.
            let offset = tz.offset_from_utc_datetime(&naive).fix();
            let shifted = naive - TimeDelta::seconds(i64::from(offset.local_minus_utc()));
            Utc.from_utc_datetime(&shifted).with_timezone(&tz)
        }
    }
}

/// The first instant of `date` in `tz`.
#[must_use]
pub fn start_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    resolve_local(date.and_hms_opt(0, 0, 0).unwrap(), tz)
}

/// The last representable instant of `date` in `tz`, 23:59:59.999999999.
///
/// Range ends sit on this bound so that inclusive comparisons cover the
/// whole day.
#[must_use]
pub fn end_of_day(date: NaiveDate, tz: Tz) -> DateTime<Tz> {
    resolve_local(date.and_hms_nano_opt(23, 59, 59, 999_999_999).unwrap(), tz)
}
