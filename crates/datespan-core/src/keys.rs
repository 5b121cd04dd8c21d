//! Calendar bucket keys.
//!
//! A bucket key names one calendar-aligned slice of time as an opaque
//! string: `YYYY-MM-DD`, `YYYY-Www`, `YYYY-MM`, or `YYYY`. The shapes are
//! a wire contract with remote path parameters, so digit widths are exact
//! in both directions.
//!
//! Weeks are Sunday-start and numbered `day_of_year / 7 + 1`, clamped at
//! year boundaries: a week never crosses December 31, and numbering
//! restarts at January 1 even when that makes the first or last week
//! short. This is deliberately not ISO 8601 week numbering.

use chrono::{Datelike, Days, NaiveDate, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{KeyError, ParseError};
use crate::parse::{self, DateInput};
use crate::range::DateRange;
use crate::zone::{end_of_day, start_of_day};

/// The calendar unit a bucket key covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    /// One calendar day, `YYYY-MM-DD`.
    Day,
    /// One Sunday-start week, `YYYY-Www`.
    Week,
    /// One calendar month, `YYYY-MM`.
    Month,
    /// One calendar year, `YYYY`.
    Year,
}

impl Granularity {
    /// Returns the granularity as a string identifier.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
        }
    }

    /// Returns all granularities, finest first.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[Self::Day, Self::Week, Self::Month, Self::Year]
    }
}

impl std::fmt::Display for Granularity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Granularity {
    type Err = GranularityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "day" | "days" | "daily" | "d" => Ok(Self::Day),
            "week" | "weeks" | "weekly" | "w" => Ok(Self::Week),
            "month" | "months" | "monthly" | "m" => Ok(Self::Month),
            "year" | "years" | "yearly" | "y" => Ok(Self::Year),
            _ => Err(GranularityParseError(s.to_string())),
        }
    }
}

/// Error returned when parsing an invalid granularity string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GranularityParseError(String);

impl std::fmt::Display for GranularityParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "invalid granularity '{}', expected one of: day, week, month, year",
            self.0
        )
    }
}

impl std::error::Error for GranularityParseError {}

/// Generates the ascending sequence of bucket keys touched by `range`.
///
/// Calendar positions come from the range endpoints' own timezone.
#[must_use]
pub fn generate_keys(range: &DateRange, granularity: Granularity) -> Vec<String> {
    let start = range.start.date_naive();
    let end = range.end.date_naive();
    match granularity {
        Granularity::Day => daily_keys(start, end),
        Granularity::Week => weekly_keys(start, end),
        Granularity::Month => monthly_keys(start, end),
        Granularity::Year => yearly_keys(start, end),
    }
}

fn daily_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let mut keys = Vec::new();
    let mut d = start;
    while d <= end {
        keys.push(format!("{:04}-{:02}-{:02}", d.year(), d.month(), d.day()));
        match d.succ_opt() {
            Some(next) => d = next,
            None => break,
        }
    }
    keys
}

fn weekly_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    // Snap the cursor back to Sunday and the bound forward to Saturday,
    // then clamp both inside their own years.
    let mut d = start - Days::new(u64::from(start.weekday().num_days_from_sunday()));
    if d.year() < start.year() {
        d = jan1(start.year());
    }
    let mut last = end + Days::new(u64::from(6 - end.weekday().num_days_from_sunday()));
    if last.year() > end.year() {
        last = dec31(end.year());
    }

    let mut keys = Vec::new();
    while d <= last {
        keys.push(format!("{:04}-W{:02}", d.year(), d.ordinal() / 7 + 1));
        let next = d + Days::new(7);
        // Week numbering restarts every year; the cursor follows.
        d = if next.year() > d.year() {
            jan1(d.year() + 1)
        } else {
            next
        };
    }
    keys
}

fn monthly_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    let (mut year, mut month) = (start.year(), start.month());
    let bound = (end.year(), end.month());
    let mut keys = Vec::new();
    while (year, month) <= bound {
        keys.push(format!("{year:04}-{month:02}"));
        month += 1;
        if month > 12 {
            month = 1;
            year += 1;
        }
    }
    keys
}

fn yearly_keys(start: NaiveDate, end: NaiveDate) -> Vec<String> {
    (start.year()..=end.year())
        .map(|year| format!("{year:04}"))
        .collect()
}

/// Decodes a bucket key into the date range it covers.
///
/// The key's shape picks the granularity: a `-W` infix is weekly, two
/// dashes daily, one dash monthly, none yearly. Ranges run from the first
/// nanosecond of the first day to the last nanosecond of the last day,
/// resolved in `tz`.
///
/// # Errors
///
/// Returns [`KeyError::InvalidKeyFormat`] when the shape is wrong
/// (segment count, digit widths, stray characters) and
/// [`KeyError::InvalidKeyRange`] when the shape is right but a component
/// is impossible: week 0 or 54, month 13, February 30, or a week number
/// past the end of the key's year. An invalid key is never clamped or
/// guessed into validity.
pub fn key_to_range(key: &str, tz: Tz) -> Result<DateRange, KeyError> {
    if key.contains("-W") {
        weekly_key_range(key, tz)
    } else {
        match key.matches('-').count() {
            2 => daily_key_range(key, tz),
            1 => monthly_key_range(key, tz),
            _ => yearly_key_range(key, tz),
        }
    }
}

fn daily_key_range(key: &str, tz: Tz) -> Result<DateRange, KeyError> {
    let parts: Vec<&str> = key.split('-').collect();
    let [year, month, day] = parts.as_slice() else {
        return Err(KeyError::InvalidKeyFormat(key.to_string()));
    };
    let year = segment(year, 4, key)?;
    let month = segment(month, 2, key)?;
    let day = segment(day, 2, key)?;

    let date = NaiveDate::from_ymd_opt(year as i32, month, day)
        .ok_or_else(|| KeyError::InvalidKeyRange(format!("no such date: {key}")))?;
    Ok(DateRange {
        start: start_of_day(date, tz),
        end: end_of_day(date, tz),
    })
}

fn weekly_key_range(key: &str, tz: Tz) -> Result<DateRange, KeyError> {
    let (year, week) = key
        .split_once("-W")
        .ok_or_else(|| KeyError::InvalidKeyFormat(key.to_string()))?;
    let year = segment(year, 4, key)? as i32;
    let week = segment(week, 2, key)?;
    if !(1..=53).contains(&week) {
        return Err(KeyError::InvalidKeyRange(format!(
            "week must be between 1 and 53: {key}"
        )));
    }

    // Weeks anchor at the first Sunday on or after January 1.
    let mut start = jan1(year);
    if start.weekday() != Weekday::Sun {
        start = start + Days::new(u64::from(7 - start.weekday().num_days_from_sunday()));
    }
    start = start + Days::new(7 * u64::from(week - 1));
    if start.year() != year {
        return Err(KeyError::InvalidKeyRange(format!(
            "week {week:02} is past the end of {year}: {key}"
        )));
    }

    let mut end = start + Days::new(6);
    if end.year() > year {
        end = dec31(year);
    }
    Ok(DateRange {
        start: start_of_day(start, tz),
        end: end_of_day(end, tz),
    })
}

fn monthly_key_range(key: &str, tz: Tz) -> Result<DateRange, KeyError> {
    let (year, month) = key
        .split_once('-')
        .ok_or_else(|| KeyError::InvalidKeyFormat(key.to_string()))?;
    let year = segment(year, 4, key)? as i32;
    let month = segment(month, 2, key)?;
    if !(1..=12).contains(&month) {
        return Err(KeyError::InvalidKeyRange(format!(
            "month must be between 1 and 12: {key}"
        )));
    }

    let first = NaiveDate::from_ymd_opt(year, month, 1).unwrap();
    let next_first = if month == 12 {
        jan1(year + 1)
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap()
    };
    let last = next_first.pred_opt().unwrap();
    Ok(DateRange {
        start: start_of_day(first, tz),
        end: end_of_day(last, tz),
    })
}

fn yearly_key_range(key: &str, tz: Tz) -> Result<DateRange, KeyError> {
    let year = segment(key, 4, key)? as i32;
    Ok(DateRange {
        start: start_of_day(jan1(year), tz),
        end: end_of_day(dec31(year), tz),
    })
}

/// A fixed-width all-digit key segment.
fn segment(s: &str, width: usize, key: &str) -> Result<u32, KeyError> {
    if s.len() != width || !s.bytes().all(|b| b.is_ascii_digit()) {
        return Err(KeyError::InvalidKeyFormat(key.to_string()));
    }
    Ok(s.parse().unwrap())
}

fn jan1(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 1, 1).unwrap()
}

fn dec31(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).unwrap()
}

/// Checks whether `key` has one of the four canonical shapes with
/// in-range components, without allocating.
///
/// Weekly keys are checked against the 1-53 window only; whether week 53
/// exists in a particular year is left to [`key_to_range`].
#[must_use]
pub fn is_valid_date_key(key: &str) -> bool {
    let b = key.as_bytes();
    match b.len() {
        4 => all_digits(b),
        7 => {
            all_digits(&b[..4])
                && b[4] == b'-'
                && all_digits(&b[5..])
                && (1..=12).contains(&two_digits(&b[5..]))
        }
        8 => {
            all_digits(&b[..4])
                && b[4] == b'-'
                && b[5] == b'W'
                && all_digits(&b[6..])
                && (1..=53).contains(&two_digits(&b[6..]))
        }
        10 => {
            all_digits(&b[..4])
                && b[4] == b'-'
                && all_digits(&b[5..7])
                && b[7] == b'-'
                && all_digits(&b[8..])
                && NaiveDate::from_ymd_opt(
                    four_digits(&b[..4]),
                    two_digits(&b[5..7]),
                    two_digits(&b[8..]),
                )
                .is_some()
        }
        _ => false,
    }
}

fn all_digits(b: &[u8]) -> bool {
    !b.is_empty() && b.iter().all(u8::is_ascii_digit)
}

fn two_digits(b: &[u8]) -> u32 {
    u32::from(b[0] - b'0') * 10 + u32::from(b[1] - b'0')
}

fn four_digits(b: &[u8]) -> i32 {
    b.iter().fold(0, |acc, d| acc * 10 + i32::from(d - b'0'))
}

/// Normalizes any accepted date input to the canonical daily key.
///
/// # Errors
///
/// Returns [`ParseError::InvalidDateInput`] when the input does not
/// resolve.
pub fn to_daily_key(input: impl Into<DateInput>, tz: Tz) -> Result<String, ParseError> {
    let (dt, _) = parse::parse_instant(input, tz)?;
    let date = dt.date_naive();
    Ok(format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        date.month(),
        date.day()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Timelike};
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    fn day_range(key: &str) -> DateRange {
        key_to_range(key, New_York).unwrap()
    }

    #[test]
    fn test_daily_keys() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), New_York),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 5).unwrap(), New_York),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Day),
            vec!["2022-01-01", "2022-01-02", "2022-01-03", "2022-01-04", "2022-01-05"]
        );
    }

    #[test]
    fn test_daily_keys_cover_partial_days() {
        // A range ending mid-morning still touches its final calendar day.
        let range = DateRange {
            start: New_York
                .with_ymd_and_hms(2022, 1, 1, 15, 0, 0)
                .unwrap(),
            end: New_York.with_ymd_and_hms(2022, 1, 3, 10, 0, 0).unwrap(),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Day),
            vec!["2022-01-01", "2022-01-02", "2022-01-03"]
        );
    }

    #[test]
    fn test_weekly_keys() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), New_York),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 15).unwrap(), New_York),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Week),
            vec!["2022-W01", "2022-W02", "2022-W03"]
        );
    }

    #[test]
    fn test_weekly_keys_cross_year() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2021, 12, 25).unwrap(), UTC),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 5).unwrap(), UTC),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Week),
            vec!["2021-W51", "2021-W52", "2022-W01", "2022-W02"]
        );
    }

    #[test]
    fn test_weekly_keys_restart_at_january() {
        // January 2018 starts on a Monday; the first emitted week must
        // still be W01 even though no Sunday falls in the first days.
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2017, 12, 31).unwrap(), UTC),
            end: start_of_day(NaiveDate::from_ymd_opt(2018, 1, 10).unwrap(), UTC),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Week),
            vec!["2017-W53", "2018-W01", "2018-W02"]
        );
    }

    #[test]
    fn test_weekly_keys_full_year_monotonic() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), UTC),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(), UTC),
        };
        let keys = generate_keys(&range, Granularity::Week);
        assert_eq!(keys.len(), 53);
        assert_eq!(keys.first().unwrap(), "2022-W01");
        assert_eq!(keys.last().unwrap(), "2022-W53");
        for pair in keys.windows(2) {
            assert!(pair[0] < pair[1], "{} not before {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn test_weekly_keys_decode_inside_their_year() {
        // Every generated week key that decodes stays inside its own
        // year. The trailing stub week of a year whose 53rd Sunday falls
        // in the next year is the one key that refuses to decode.
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), UTC),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(), UTC),
        };
        let keys = generate_keys(&range, Granularity::Week);
        for key in &keys {
            match key_to_range(key, UTC) {
                Ok(decoded) => {
                    assert_eq!(decoded.start.year(), 2022, "start escaped year: {key}");
                    assert_eq!(decoded.end.year(), 2022, "end escaped year: {key}");
                }
                Err(err) => {
                    assert_eq!(key, "2022-W53", "unexpected decode failure: {key}: {err}");
                }
            }
        }
    }

    #[test]
    fn test_monthly_keys() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2022, 1, 1).unwrap(), New_York),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 4, 1).unwrap(), New_York),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Month),
            vec!["2022-01", "2022-02", "2022-03", "2022-04"]
        );
    }

    #[test]
    fn test_monthly_keys_cross_year() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2021, 11, 15).unwrap(), UTC),
            end: start_of_day(NaiveDate::from_ymd_opt(2022, 2, 1).unwrap(), UTC),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Month),
            vec!["2021-11", "2021-12", "2022-01", "2022-02"]
        );
    }

    #[test]
    fn test_yearly_keys() {
        let range = DateRange {
            start: start_of_day(NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(), New_York),
            end: start_of_day(NaiveDate::from_ymd_opt(2023, 1, 1).unwrap(), New_York),
        };
        assert_eq!(
            generate_keys(&range, Granularity::Year),
            vec!["2020", "2021", "2022", "2023"]
        );
    }

    #[test]
    fn test_daily_key_decode() {
        let range = day_range("2022-01-01");
        assert_eq!(range.start.to_rfc3339(), "2022-01-01T00:00:00-05:00");
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
        );
        assert_eq!(range.end.nanosecond(), 999_999_999);
    }

    #[test]
    fn test_weekly_key_decode_anchors_at_first_sunday() {
        // January 1 2022 is a Saturday, so W01 runs January 2 through 8.
        let range = day_range("2022-W01");
        assert_eq!(range.start.to_rfc3339(), "2022-01-02T00:00:00-05:00");
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2022, 1, 8).unwrap()
        );
    }

    #[test]
    fn test_weekly_key_decode_sunday_january_first() {
        // 2023 opens on a Sunday, so W01 starts January 1.
        let range = day_range("2023-W01");
        assert_eq!(
            range.start.date_naive(),
            NaiveDate::from_ymd_opt(2023, 1, 1).unwrap()
        );
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2023, 1, 7).unwrap()
        );
    }

    #[test]
    fn test_weekly_key_decode_mid_year() {
        // W20 of 2022: anchor January 2, advance nineteen weeks.
        let range = day_range("2022-W20");
        assert_eq!(
            range.start.date_naive(),
            NaiveDate::from_ymd_opt(2022, 5, 15).unwrap()
        );
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2022, 5, 21).unwrap()
        );
    }

    #[test]
    fn test_weekly_key_decode_clamps_year_end() {
        // W53 of 2023 starts Sunday December 31 and is clamped there.
        let range = day_range("2023-W53");
        assert_eq!(
            range.start.date_naive(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2023, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_weekly_key_decode_rejects_spill() {
        // 2022 has no week 53: the 53rd Sunday lands in 2023.
        assert!(matches!(
            key_to_range("2022-W53", UTC),
            Err(KeyError::InvalidKeyRange(_))
        ));
    }

    #[test]
    fn test_monthly_key_decode() {
        let range = day_range("2022-02");
        assert_eq!(range.start.to_rfc3339(), "2022-02-01T00:00:00-05:00");
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2022, 2, 28).unwrap()
        );

        let leap = day_range("2020-02");
        assert_eq!(
            leap.end.date_naive(),
            NaiveDate::from_ymd_opt(2020, 2, 29).unwrap()
        );

        let december = day_range("2022-12");
        assert_eq!(
            december.end.date_naive(),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_yearly_key_decode() {
        let range = day_range("2022");
        assert_eq!(
            range.start.date_naive(),
            NaiveDate::from_ymd_opt(2022, 1, 1).unwrap()
        );
        assert_eq!(
            range.end.date_naive(),
            NaiveDate::from_ymd_opt(2022, 12, 31).unwrap()
        );
    }

    #[test]
    fn test_key_decode_rejects_bad_shapes() {
        for key in ["", "invalid-key", "2022-1-01", "22-01-01", "2022-W1", "2022-01-01-01"] {
            assert!(
                matches!(key_to_range(key, UTC), Err(KeyError::InvalidKeyFormat(_))),
                "expected format error for {key:?}"
            );
        }
    }

    #[test]
    fn test_key_decode_rejects_out_of_range() {
        for key in ["2022-02-30", "2022-13", "2022-W00", "2022-W54"] {
            assert!(
                matches!(key_to_range(key, UTC), Err(KeyError::InvalidKeyRange(_))),
                "expected range error for {key:?}"
            );
        }
    }

    #[test]
    fn test_aligned_round_trips() {
        for (key, granularity) in [
            ("2022-03-15", Granularity::Day),
            ("2022-02", Granularity::Month),
            ("2022", Granularity::Year),
        ] {
            let range = key_to_range(key, New_York).unwrap();
            assert_eq!(generate_keys(&range, granularity), vec![key]);
        }
    }

    #[test]
    fn test_is_valid_date_key() {
        for key in ["2022-01-01", "2022-W01", "2022-01", "2022", "2020-02-29", "2022-W53"] {
            assert!(is_valid_date_key(key), "expected valid: {key:?}");
        }
        for key in [
            "invalid-key",
            "",
            "2022-1-1",
            "2022-13",
            "2022-00",
            "2022-W00",
            "2022-W54",
            "2022-02-30",
            "2021-02-29",
            "2022-W1",
            "500",
            "2022-01-01 ",
        ] {
            assert!(!is_valid_date_key(key), "expected invalid: {key:?}");
        }
    }

    #[test]
    fn test_to_daily_key() {
        assert_eq!(
            to_daily_key("April 7, 2021", UTC).unwrap(),
            "2021-04-07"
        );
        assert_eq!(
            to_daily_key(1_617_181_723_000i64, UTC).unwrap(),
            "2021-03-31"
        );
        assert!(to_daily_key("garbage", UTC).is_err());
    }
}
