//! Time values for the almanac event search.
//!
//! This crate provides:
//! - `TimePoint`, an instant on a continuous Julian-day scale
//! - Julian Date ↔ calendar conversions
//! - `UtcTime`, a calendar representation with parsing and formatting

pub mod error;
pub mod julian;
pub mod utc_time;

use std::fmt::{Display, Formatter};
use std::ops::{Add, Sub};

pub use error::TimeError;
pub use julian::{J2000_JD, SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};
pub use utc_time::UtcTime;

/// An instant on a continuous day scale, stored as a Julian Date.
///
/// This is the time type passed to every searched function. Subtracting two
/// instants yields a day count; adding days yields a new instant, so a
/// bisection can synthesize candidate instants between two samples.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct TimePoint {
    jd: f64,
}

impl TimePoint {
    /// Create an instant from a Julian Date.
    pub const fn from_jd(jd: f64) -> Self {
        Self { jd }
    }

    /// Julian Date of this instant.
    pub const fn jd(self) -> f64 {
        self.jd
    }

    /// Days elapsed since J2000.0.
    pub fn days_since_j2000(self) -> f64 {
        self.jd - J2000_JD
    }

    /// Instant halfway between `self` and `other`.
    pub fn midpoint(self, other: Self) -> Self {
        Self::from_jd(0.5 * (self.jd + other.jd))
    }
}

impl Sub for TimePoint {
    type Output = f64;

    fn sub(self, rhs: Self) -> f64 {
        self.jd - rhs.jd
    }
}

impl Add<f64> for TimePoint {
    type Output = TimePoint;

    fn add(self, days: f64) -> TimePoint {
        Self::from_jd(self.jd + days)
    }
}

impl Sub<f64> for TimePoint {
    type Output = TimePoint;

    fn sub(self, days: f64) -> TimePoint {
        Self::from_jd(self.jd - days)
    }
}

impl Display for TimePoint {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "JD {:.6}", self.jd)
    }
}
