//! # Error Types
//!
//! Errors raised while parsing the textual form of the option enums.

use thiserror::Error;

/// A configuration string did not name a known option value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown {option} value {value:?} (expected one of: {expected})")]
pub struct OptionParseError {
    /// Which option was being parsed (e.g. `serializer`).
    pub option: &'static str,
    /// The rejected value.
    pub value: String,
    /// Comma separated list of accepted values.
    pub expected: &'static str,
}
