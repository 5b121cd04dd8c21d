//! The ordered catalog of known textual date formats.
//!
//! Parsing tries entries in catalog order and the first structural match
//! wins, so the order is the disambiguation policy: timezone-carrying
//! layouts come before timezone-less ones, and within each group more
//! specific layouts come before looser ones. There is no scoring.
//!
//! chrono's numeric and month-name matching is width-lenient (`%m` takes
//! `1` or `01`, `%B` takes `Jan` or `January`), which folds several
//! near-duplicate layouts into one entry. Fraction-bearing entries use
//! `%.f` and take any 1-9 digit fraction; their precision is tiered from
//! the fraction width (1-3 digits millisecond, 4-6 microsecond, 7-9
//! nanosecond).

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime};
use chrono_tz::Tz;

use crate::precision::Precision;
use crate::zone;

/// One candidate layout: how to match it, and what matching it says about
/// the input's precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeFormatEntry {
    layout: &'static str,
    kind: LayoutKind,
    precision: Precision,
}

/// How an entry's layout is applied to the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LayoutKind {
    /// Full datetime with an embedded offset (or literal `Z`).
    Zoned,
    /// Zoned datetime with a variable-width fraction; precision comes from
    /// the fraction width.
    ZonedFraction,
    /// RFC 2822 and its ancestors (RFC 822/1123), including the obsolete
    /// named zones chrono's strftime items cannot match.
    Rfc2822,
    /// Wall-clock datetime, resolved in the caller's timezone.
    Local,
    /// Wall-clock datetime with a variable-width fraction.
    LocalFraction,
    /// Calendar date only; resolves to start of day.
    Date,
    /// Time of day only; resolves against January 1 of year zero.
    Time,
}

impl TimeFormatEntry {
    /// Returns the strftime layout (descriptive for the RFC 2822 entry,
    /// which is matched by chrono's dedicated parser).
    #[must_use]
    pub const fn layout(&self) -> &'static str {
        self.layout
    }

    /// Returns the precision this entry assigns, the finest one for
    /// variable-fraction entries.
    #[must_use]
    pub const fn precision(&self) -> Precision {
        self.precision
    }

    /// Returns true if the layout carries its own timezone, making the
    /// caller's timezone a display choice rather than an interpretation.
    #[must_use]
    pub const fn has_timezone(&self) -> bool {
        matches!(
            self.kind,
            LayoutKind::Zoned | LayoutKind::ZonedFraction | LayoutKind::Rfc2822
        )
    }

    /// Returns the full catalog in match order.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        CATALOG
    }

    /// Attempts to parse `s` with this entry. Matching is whole-string:
    /// trailing input fails the entry.
    pub(crate) fn try_parse(&self, s: &str, tz: Tz) -> Option<(DateTime<Tz>, Precision)> {
        match self.kind {
            LayoutKind::Zoned => {
                let dt = DateTime::parse_from_str(s, self.layout).ok()?;
                Some((dt.with_timezone(&tz), self.precision))
            }
            LayoutKind::ZonedFraction => {
                let dt = DateTime::parse_from_str(s, self.layout).ok()?;
                Some((dt.with_timezone(&tz), fraction_precision(s)))
            }
            LayoutKind::Rfc2822 => {
                let dt = DateTime::parse_from_rfc2822(s).ok()?;
                Some((dt.with_timezone(&tz), self.precision))
            }
            LayoutKind::Local => {
                let naive = NaiveDateTime::parse_from_str(s, self.layout).ok()?;
                Some((zone::resolve_local(naive, tz), self.precision))
            }
            LayoutKind::LocalFraction => {
                let naive = NaiveDateTime::parse_from_str(s, self.layout).ok()?;
                Some((zone::resolve_local(naive, tz), fraction_precision(s)))
            }
            LayoutKind::Date => {
                let date = NaiveDate::parse_from_str(s, self.layout).ok()?;
                Some((zone::start_of_day(date, tz), self.precision))
            }
            LayoutKind::Time => {
                let time = NaiveTime::parse_from_str(s, self.layout).ok()?;
                let base = NaiveDate::from_ymd_opt(0, 1, 1).unwrap().and_time(time);
                Some((zone::resolve_local(base, tz), self.precision))
            }
        }
    }
}

const fn zoned(layout: &'static str, precision: Precision) -> TimeFormatEntry {
    TimeFormatEntry {
        layout,
        kind: LayoutKind::Zoned,
        precision,
    }
}

const fn zoned_fraction(layout: &'static str) -> TimeFormatEntry {
    TimeFormatEntry {
        layout,
        kind: LayoutKind::ZonedFraction,
        precision: Precision::Nanosecond,
    }
}

const fn rfc2822() -> TimeFormatEntry {
    TimeFormatEntry {
        layout: "%a, %d %b %Y %H:%M:%S %z",
        kind: LayoutKind::Rfc2822,
        precision: Precision::Second,
    }
}

const fn local(layout: &'static str, precision: Precision) -> TimeFormatEntry {
    TimeFormatEntry {
        layout,
        kind: LayoutKind::Local,
        precision,
    }
}

const fn local_fraction(layout: &'static str) -> TimeFormatEntry {
    TimeFormatEntry {
        layout,
        kind: LayoutKind::LocalFraction,
        precision: Precision::Nanosecond,
    }
}

const fn date(layout: &'static str) -> TimeFormatEntry {
    TimeFormatEntry {
        layout,
        kind: LayoutKind::Date,
        precision: Precision::Day,
    }
}

const fn time(layout: &'static str) -> TimeFormatEntry {
    TimeFormatEntry {
        layout,
        kind: LayoutKind::Time,
        precision: Precision::Minute,
    }
}

/// Catalog entries in match order.
static CATALOG: &[TimeFormatEntry] = &[
    // Timezone-carrying layouts. The literal-Z-plus-offset shapes appear in
    // the wild and must outrank the permissive `%#z` entries that would
    // stop at the Z.
    zoned("%Y-%m-%dT%H:%M:%SZ%:z", Precision::Second),
    zoned("%Y-%m-%dT%H:%M:%S%#z", Precision::Second),
    zoned("%Y%m%dT%H%M%S%#z", Precision::Second),
    zoned_fraction("%Y-%m-%dT%H:%M:%S%.f%#z"),
    zoned("%Y-%m-%dT%H:%MZ%:z", Precision::Minute),
    zoned("%Y-%m-%dT%H:%M%#z", Precision::Minute),
    zoned("%Y%m%dT%H%M%#z", Precision::Minute),
    zoned("%a %b %e %H:%M:%S %z %Y", Precision::Second),
    zoned("%a %b %e %H:%M %z %Y", Precision::Minute),
    rfc2822(),
    // Wall-clock datetimes, seconds before fractions before minutes so the
    // fraction entries only ever see a real fraction.
    local("%Y-%m-%dT%H:%M:%S", Precision::Second),
    local("%Y-%m-%d %H:%M:%S", Precision::Second),
    local("%Y%m%dT%H%M%S", Precision::Second),
    local("%m/%d/%Y %H:%M:%S", Precision::Second),
    local("%m/%d/%Y %I:%M:%S %p", Precision::Second),
    local("%b %d, %Y %H:%M:%S", Precision::Second),
    local("%a %b %e %H:%M:%S %Y", Precision::Second),
    local_fraction("%Y-%m-%dT%H:%M:%S%.f"),
    local_fraction("%Y-%m-%d %H:%M:%S%.f"),
    local_fraction("%m/%d/%Y %H:%M:%S%.f"),
    local_fraction("%m/%d/%Y %I:%M:%S%.f %p"),
    local_fraction("%b %d, %Y %H:%M:%S%.f"),
    local("%Y-%m-%dT%H:%M", Precision::Minute),
    local("%m/%d/%Y %H:%M", Precision::Minute),
    local("%m/%d/%Y %I:%M %p", Precision::Minute),
    local("%A, %B %d, %Y %I:%M %p", Precision::Minute),
    // Calendar dates. The two-digit-year slash form must outrank the
    // four-digit one or `1/2/06` would parse as year 6.
    date("%Y-%m-%d"),
    date("%m/%d/%y"),
    date("%m/%d/%Y"),
    date("%B %d, %Y"),
    date("%A, %b %d, %Y"),
    date("%d-%b-%Y"),
    date("%d %B %Y"),
    // Bare time of day.
    time("%I:%M%p"),
];

/// Precision tier for a variable-width fraction, measured on the input.
fn fraction_precision(s: &str) -> Precision {
    match fraction_width(s) {
        0 => Precision::Second,
        1..=3 => Precision::Millisecond,
        4..=6 => Precision::Microsecond,
        _ => Precision::Nanosecond,
    }
}

/// Number of digits following the last `.` in `s`.
fn fraction_width(s: &str) -> usize {
    s.rfind('.').map_or(0, |i| {
        s[i + 1..].bytes().take_while(u8::is_ascii_digit).count()
    })
}
