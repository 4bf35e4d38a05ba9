//! Error types for calendar parsing and conversion.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from parsing or validating calendar values.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// Text could not be parsed as `YYYY-MM-DDThh:mm:ss[Z]`.
    Parse(String),
    /// A calendar field is out of range.
    InvalidDate(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "parse error: {msg}"),
            Self::InvalidDate(msg) => write!(f, "invalid date: {msg}"),
        }
    }
}

impl Error for TimeError {}
