//! Inclusive ranges between two zone-aware instants.

use chrono::{DateTime, TimeDelta};
use chrono_tz::Tz;
use serde::Serialize;

use crate::error::{DateRangeError, KeyError, Result};
use crate::keys::{self, Granularity};
use crate::parse::{self, DateInput};
use crate::zone;

/// A closed interval on the timeline.
///
/// Both endpoints are inside the range, so back-to-back ranges such as
/// two consecutive daily buckets share no instant: one ends at
/// `23:59:59.999999999` and the next starts at `00:00:00`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateRange {
    /// First instant inside the range.
    pub start: DateTime<Tz>,
    /// Last instant inside the range.
    pub end: DateTime<Tz>,
}

impl DateRange {
    /// Builds a range from two instants.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::RangeInversion`] when `start` is after
    /// `end`.
    pub fn new(
        start: DateTime<Tz>,
        end: DateTime<Tz>,
    ) -> std::result::Result<Self, DateRangeError> {
        if start > end {
            return Err(DateRangeError::RangeInversion { start, end });
        }
        Ok(Self { start, end })
    }

    /// Parses two date inputs into a range.
    ///
    /// Each input goes through [`parse::parse_instant`], so anything the
    /// parser accepts works here: layout strings, epoch integers, serial
    /// floats, or existing instants.
    ///
    /// # Errors
    ///
    /// Fails when either input does not parse or when the parsed `from`
    /// lands after `to`.
    pub fn parse(from: impl Into<DateInput>, to: impl Into<DateInput>, tz: Tz) -> Result<Self> {
        let (start, _) = parse::parse_instant(from, tz)?;
        let (end, _) = parse::parse_instant(to, tz)?;
        Ok(Self::new(start, end)?)
    }

    /// Builds the range from a parsed instant to the end of its local day.
    ///
    /// A date-only input covers the whole day; an input with a time of
    /// day covers the remainder of that day.
    ///
    /// # Errors
    ///
    /// Fails when the input does not parse.
    pub fn for_date(input: impl Into<DateInput>, tz: Tz) -> Result<Self> {
        let (start, _) = parse::parse_instant(input, tz)?;
        let end = zone::end_of_day(start.date_naive(), tz);
        Ok(Self::new(start, end)?)
    }

    /// Decodes a bucket key into the range it covers.
    ///
    /// # Errors
    ///
    /// Returns a [`KeyError`] when the key is malformed or names an
    /// impossible calendar position.
    pub fn from_key(key: &str, tz: Tz) -> std::result::Result<Self, KeyError> {
        keys::key_to_range(key, tz)
    }

    /// Tightest range covering every given instant.
    ///
    /// # Errors
    ///
    /// Returns [`DateRangeError::EmptyInput`] when `instants` is empty.
    pub fn spanning(instants: &[DateTime<Tz>]) -> std::result::Result<Self, DateRangeError> {
        Self::new(earliest(instants)?, latest(instants)?)
    }

    /// Whether `instant` falls inside the range, endpoints included.
    #[must_use]
    pub fn contains(&self, instant: DateTime<Tz>) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Whether `other` lies entirely inside the range.
    #[must_use]
    pub fn contains_range(&self, other: &Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Whether `other` intersects the range without lying wholly inside
    /// it.
    ///
    /// Asymmetric on purpose: when `other` strictly covers this range,
    /// this range sees a partial overlap while `other` sees full
    /// containment.
    #[must_use]
    pub fn partially_overlaps(&self, other: &Self) -> bool {
        !self.contains_range(other) && !self.does_not_contain(other)
    }

    /// Whether the two ranges share no instant at all.
    #[must_use]
    pub fn does_not_contain(&self, other: &Self) -> bool {
        other.end < self.start || self.end < other.start
    }

    /// Splits `instants` into those inside the range and those outside,
    /// keeping input order within each half.
    #[must_use]
    pub fn validate_timestamps(
        &self,
        instants: &[DateTime<Tz>],
    ) -> (Vec<DateTime<Tz>>, Vec<DateTime<Tz>>) {
        let mut inside = Vec::new();
        let mut outside = Vec::new();
        for &instant in instants {
            if self.contains(instant) {
                inside.push(instant);
            } else {
                outside.push(instant);
            }
        }
        (inside, outside)
    }

    /// The ascending bucket keys touched by the range.
    #[must_use]
    pub fn keys(&self, granularity: Granularity) -> Vec<String> {
        keys::generate_keys(self, granularity)
    }

    /// Exact elapsed time between the endpoints.
    #[must_use]
    pub fn duration(&self) -> TimeDelta {
        self.end - self.start
    }

    /// Endpoints as Unix seconds, fractional part truncated.
    #[must_use]
    pub fn unix_timestamps(&self) -> (i64, i64) {
        (self.start.timestamp(), self.end.timestamp())
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start.to_rfc3339(), self.end.to_rfc3339())
    }
}

/// The earliest of the given instants.
///
/// # Errors
///
/// Returns [`DateRangeError::EmptyInput`] when `instants` is empty. An
/// empty sequence is a caller bug, not a case with a sensible default.
pub fn earliest(instants: &[DateTime<Tz>]) -> std::result::Result<DateTime<Tz>, DateRangeError> {
    instants
        .iter()
        .min()
        .copied()
        .ok_or(DateRangeError::EmptyInput)
}

/// The latest of the given instants.
///
/// # Errors
///
/// Returns [`DateRangeError::EmptyInput`] when `instants` is empty.
pub fn latest(instants: &[DateTime<Tz>]) -> std::result::Result<DateTime<Tz>, DateRangeError> {
    instants
        .iter()
        .max()
        .copied()
        .ok_or(DateRangeError::EmptyInput)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use chrono_tz::America::New_York;
    use chrono_tz::UTC;

    fn at(h: u32, m: u32) -> DateTime<Tz> {
        New_York.with_ymd_and_hms(2022, 6, 15, h, m, 0).unwrap()
    }

    #[test]
    fn test_new_rejects_inverted_endpoints() {
        let err = DateRange::new(at(12, 0), at(9, 0)).unwrap_err();
        assert!(matches!(err, DateRangeError::RangeInversion { .. }));
        assert!(DateRange::new(at(9, 0), at(9, 0)).is_ok());
    }

    #[test]
    fn test_contains_is_endpoint_inclusive() {
        let range = DateRange::new(at(9, 0), at(17, 0)).unwrap();
        assert!(range.contains(at(9, 0)));
        assert!(range.contains(at(17, 0)));
        assert!(range.contains(at(12, 30)));
        assert!(!range.contains(at(8, 59)));
        assert!(!range.contains(at(17, 0) + TimeDelta::nanoseconds(1)));
    }

    #[test]
    fn test_range_predicates() {
        let day = DateRange::new(at(9, 0), at(17, 0)).unwrap();
        let morning = DateRange::new(at(9, 0), at(12, 0)).unwrap();
        let straddle = DateRange::new(at(16, 0), at(19, 0)).unwrap();
        let evening = DateRange::new(at(18, 0), at(20, 0)).unwrap();

        assert!(day.contains_range(&morning));
        assert!(!morning.contains_range(&day));
        assert!(!day.contains_range(&straddle));

        assert!(day.partially_overlaps(&straddle));
        assert!(!day.partially_overlaps(&evening));
        // Containment is not a partial overlap, but only from the side
        // doing the containing.
        assert!(!day.partially_overlaps(&morning));
        assert!(morning.partially_overlaps(&day));

        assert!(day.does_not_contain(&evening));
        assert!(evening.does_not_contain(&day));
        assert!(!day.does_not_contain(&straddle));
        assert!(!day.does_not_contain(&morning));
    }

    #[test]
    fn test_adjacent_daily_buckets_are_disjoint() {
        let first = DateRange::from_key("2022-01-01", New_York).unwrap();
        let second = DateRange::from_key("2022-01-02", New_York).unwrap();
        assert!(first.does_not_contain(&second));
        assert!(second.does_not_contain(&first));
        assert!(!first.partially_overlaps(&second));
    }

    #[test]
    fn test_validate_timestamps_keeps_order() {
        let range = DateRange::new(at(9, 0), at(17, 0)).unwrap();
        let samples = [at(8, 0), at(10, 0), at(18, 0), at(11, 0)];
        let (inside, outside) = range.validate_timestamps(&samples);
        assert_eq!(inside, vec![at(10, 0), at(11, 0)]);
        assert_eq!(outside, vec![at(8, 0), at(18, 0)]);
    }

    #[test]
    fn test_spanning_unordered_instants() {
        let range = DateRange::spanning(&[at(12, 0), at(7, 30), at(21, 45), at(9, 0)]).unwrap();
        assert_eq!(range.start, at(7, 30));
        assert_eq!(range.end, at(21, 45));
    }

    #[test]
    fn test_spanning_rejects_empty_input() {
        assert!(matches!(
            DateRange::spanning(&[]),
            Err(DateRangeError::EmptyInput)
        ));
    }

    #[test]
    fn test_earliest_and_latest() {
        assert!(matches!(earliest(&[]), Err(DateRangeError::EmptyInput)));
        assert!(matches!(latest(&[]), Err(DateRangeError::EmptyInput)));
        let instants = [at(12, 0), at(7, 30), at(21, 45)];
        assert_eq!(earliest(&instants).unwrap(), at(7, 30));
        assert_eq!(latest(&instants).unwrap(), at(21, 45));
    }

    #[test]
    fn test_parse_builds_from_mixed_inputs() {
        let range = DateRange::parse("2022-01-01", "2022-01-03", New_York).unwrap();
        assert_eq!(range.start.to_rfc3339(), "2022-01-01T00:00:00-05:00");
        assert_eq!(range.end.to_rfc3339(), "2022-01-03T00:00:00-05:00");

        let err = DateRange::parse("2022-01-03", "2022-01-01", New_York).unwrap_err();
        assert!(matches!(
            err,
            crate::error::DatespanError::DateRange(DateRangeError::RangeInversion { .. })
        ));
    }

    #[test]
    fn test_for_date_runs_to_end_of_day() {
        let range = DateRange::for_date("2022-03-15T10:30:00", New_York).unwrap();
        assert_eq!(range.start.to_rfc3339(), "2022-03-15T10:30:00-04:00");
        assert_eq!(
            range.end.to_rfc3339(),
            "2022-03-15T23:59:59.999999999-04:00"
        );

        let whole = DateRange::for_date("2022-03-15", New_York).unwrap();
        assert_eq!(whole.start.to_rfc3339(), "2022-03-15T00:00:00-04:00");
        assert_eq!(whole.end, range.end);
    }

    #[test]
    fn test_duration_spans_dst_transitions() {
        // March 13 2022 loses an hour to daylight saving in New York.
        let short = DateRange::from_key("2022-03-13", New_York).unwrap();
        assert_eq!(
            short.duration(),
            TimeDelta::hours(23) - TimeDelta::nanoseconds(1)
        );
        let plain = DateRange::from_key("2022-06-15", New_York).unwrap();
        assert_eq!(
            plain.duration(),
            TimeDelta::hours(24) - TimeDelta::nanoseconds(1)
        );
    }

    #[test]
    fn test_unix_timestamps() {
        let range = DateRange::from_key("2022-01-01", New_York).unwrap();
        assert_eq!(range.unix_timestamps(), (1_641_013_200, 1_641_099_599));
    }

    #[test]
    fn test_keys_delegates_by_granularity() {
        let range = DateRange::parse("2022-01-01", "2022-02-15", UTC).unwrap();
        assert_eq!(range.keys(Granularity::Month), vec!["2022-01", "2022-02"]);
        assert_eq!(range.keys(Granularity::Year), vec!["2022"]);
    }

    #[test]
    fn test_display_is_rfc3339_pair() {
        let range = DateRange::from_key("2022-01-01", UTC).unwrap();
        assert_eq!(
            range.to_string(),
            "2022-01-01T00:00:00+00:00 to 2022-01-01T23:59:59.999999999+00:00"
        );
    }
}
