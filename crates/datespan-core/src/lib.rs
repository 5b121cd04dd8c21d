//! Temporal input normalization and calendar bucketing.
//!
//! This crate turns the loosely shaped date inputs a market-data API meets
//! in the wild into zone-aware instants, and slices the timeline into the
//! calendar buckets remote endpoints key their data by:
//!
//! - [`parse_instant`] - Any supported input to an instant plus its [`Precision`]
//! - [`DateRange`] - Inclusive zone-aware range with overlap predicates
//! - [`Granularity`] - Daily, weekly, monthly, and yearly bucket keys
//! - [`TimeFormatEntry`] - The ordered layout catalog behind the text parser
//! - [`Interval`] - Sampling resolution grammar

#![doc = include_str!("../README.md")]
#![doc(issue_tracker_base_url = "https://github.com/datespan-rs/datespan/issues/")]
#![cfg_attr(docsrs, feature(doc_cfg, doc_auto_cfg))]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod catalog;
mod error;
mod excel;
mod interval;
mod keys;
mod parse;
mod precision;
mod range;
mod zone;

pub use catalog::TimeFormatEntry;
pub use error::{DateRangeError, DatespanError, KeyError, ParseError, Result};
pub use excel::{parse_excel_serial, to_excel_serial};
pub use interval::{Interval, IntervalParseError, IntervalUnit};
pub use keys::{
    Granularity, GranularityParseError, generate_keys, is_valid_date_key, key_to_range,
    to_daily_key,
};
pub use parse::{DateInput, parse_instant};
pub use precision::{Precision, PrecisionParseError};
pub use range::{DateRange, earliest, latest};
pub use zone::{end_of_day, resolve_local, start_of_day};
