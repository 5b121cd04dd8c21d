//! CLI command implementations.

pub(crate) mod check;
pub(crate) mod interval;
pub(crate) mod keys;
pub(crate) mod parse;
pub(crate) mod span;
