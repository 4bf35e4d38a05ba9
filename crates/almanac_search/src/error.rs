//! Error type shared by the finders and the event layer.

use std::error::Error;
use std::fmt::{Display, Formatter};

use crate::ephemeris::EphemerisError;

/// Errors from event search.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum SearchError {
    /// The search interval is empty or reversed (`start >= end`).
    InvalidInterval { start_jd: f64, end_jd: f64 },
    /// A configuration value or rough period is unusable.
    InvalidConfig(&'static str),
    /// The searched function returned NaN or infinity.
    NonFiniteValue { jd: f64 },
    /// The ephemeris collaborator failed.
    Ephemeris(EphemerisError),
    /// A caller-supplied function failed.
    Evaluation(String),
}

impl Display for SearchError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInterval { start_jd, end_jd } => {
                write!(f, "invalid interval: start JD {start_jd} is not before end JD {end_jd}")
            }
            Self::InvalidConfig(msg) => write!(f, "invalid config: {msg}"),
            Self::NonFiniteValue { jd } => write!(f, "function is not finite at JD {jd}"),
            Self::Ephemeris(e) => write!(f, "ephemeris error: {e}"),
            Self::Evaluation(msg) => write!(f, "evaluation error: {msg}"),
        }
    }
}

impl Error for SearchError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Ephemeris(e) => Some(e),
            _ => None,
        }
    }
}

impl From<EphemerisError> for SearchError {
    fn from(e: EphemerisError) -> Self {
        Self::Ephemeris(e)
    }
}
