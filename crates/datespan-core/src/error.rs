//! Error types for datespan.

use chrono::DateTime;
use chrono_tz::Tz;
use thiserror::Error;

/// Result type alias for datespan operations.
pub type Result<T> = std::result::Result<T, DatespanError>;

/// Errors that can occur during date parsing and bucket key handling.
#[derive(Error, Debug)]
pub enum DatespanError {
    /// Input could not be resolved to an instant.
    #[error(transparent)]
    Parse(#[from] ParseError),

    /// Bucket key was malformed or out of range.
    #[error(transparent)]
    Key(#[from] KeyError),

    /// Date range construction or aggregation failed.
    #[error(transparent)]
    DateRange(#[from] DateRangeError),
}

/// Errors from resolving a date input to an instant.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// No keyword, numeric epoch shape, or known format matched.
    #[error("unable to parse date input: {0:?}")]
    InvalidDateInput(String),
}

/// Errors from decoding a bucket key string.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum KeyError {
    /// Key does not have one of the canonical shapes.
    #[error("invalid date key format: {0}")]
    InvalidKeyFormat(String),

    /// Key is well-formed but a component is out of range.
    #[error("date key out of range: {0}")]
    InvalidKeyRange(String),
}

/// Errors from date range construction and aggregation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateRangeError {
    /// End instant is before the start instant.
    #[error("invalid date range: {start} > {end}")]
    RangeInversion {
        /// The start instant.
        start: DateTime<Tz>,
        /// The end instant.
        end: DateTime<Tz>,
    },

    /// An aggregation was asked of an empty timestamp sequence.
    #[error("empty timestamp input")]
    EmptyInput,
}
