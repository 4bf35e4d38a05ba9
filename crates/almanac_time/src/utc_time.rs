//! UTC calendar date/time with sub-second precision.
//!
//! `UtcTime` is the human-facing form of a [`TimePoint`]. The conversion is
//! a plain calendar ⇄ Julian Date mapping on one uniform day scale; leap
//! seconds and ΔT are left to the ephemeris collaborator.

use std::str::FromStr;

use crate::TimePoint;
use crate::error::TimeError;
use crate::julian::{SECONDS_PER_DAY, calendar_to_jd, jd_to_calendar};

/// UTC calendar date with sub-second precision.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UtcTime {
    pub year: i32,
    pub month: u32,
    pub day: u32,
    pub hour: u32,
    pub minute: u32,
    pub second: f64,
}

impl UtcTime {
    pub fn new(year: i32, month: u32, day: u32, hour: u32, minute: u32, second: f64) -> Self {
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }

    /// Check that every field lies in its calendar range.
    pub fn validate(&self) -> Result<(), TimeError> {
        if !(1..=12).contains(&self.month) {
            return Err(TimeError::InvalidDate("month must be in 1..=12"));
        }
        if !(1..=days_in_month(self.year, self.month)).contains(&self.day) {
            return Err(TimeError::InvalidDate("day out of range for month"));
        }
        if self.hour > 23 {
            return Err(TimeError::InvalidDate("hour must be in 0..=23"));
        }
        if self.minute > 59 {
            return Err(TimeError::InvalidDate("minute must be in 0..=59"));
        }
        if !self.second.is_finite() || self.second < 0.0 || self.second >= 60.0 {
            return Err(TimeError::InvalidDate("second must be in [0, 60)"));
        }
        Ok(())
    }

    /// Convert to a [`TimePoint`].
    pub fn to_time_point(&self) -> TimePoint {
        let day_frac = self.day as f64
            + self.hour as f64 / 24.0
            + self.minute as f64 / 1440.0
            + self.second / SECONDS_PER_DAY;
        TimePoint::from_jd(calendar_to_jd(self.year, self.month, day_frac))
    }

    /// Convert a [`TimePoint`] back to calendar fields.
    pub fn from_time_point(t: TimePoint) -> Self {
        let (year, month, day_frac) = jd_to_calendar(t.jd());
        let day = day_frac.floor() as u32;
        let total_seconds = day_frac.fract() * SECONDS_PER_DAY;
        let hour = (total_seconds / 3600.0).floor() as u32;
        let minute = ((total_seconds % 3600.0) / 60.0).floor() as u32;
        let second = total_seconds % 60.0;
        Self {
            year,
            month,
            day,
            hour,
            minute,
            second,
        }
    }
}

fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        2 if (year % 4 == 0 && year % 100 != 0) || year % 400 == 0 => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

impl UtcTime {
    /// Advance by one minute, carrying into hour, day, month and year.
    fn next_minute(mut self) -> Self {
        self.minute += 1;
        if self.minute == 60 {
            self.minute = 0;
            self.hour += 1;
        }
        if self.hour == 24 {
            self.hour = 0;
            self.day += 1;
        }
        if self.day > days_in_month(self.year, self.month) {
            self.day = 1;
            self.month += 1;
        }
        if self.month > 12 {
            self.month = 1;
            self.year += 1;
        }
        self
    }
}

impl std::fmt::Display for UtcTime {
    /// Seconds are printed to the microsecond. Rounding up to 60 s carries.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        const MICROS_PER_MINUTE: u64 = 60_000_000;
        let mut micros = (self.second.max(0.0) * 1e6).round() as u64;
        let mut shown = *self;
        while micros >= MICROS_PER_MINUTE {
            micros -= MICROS_PER_MINUTE;
            shown = shown.next_minute();
        }

        write!(
            f,
            "{:04}-{:02}-{:02}T{:02}:{:02}:{:02}",
            shown.year,
            shown.month,
            shown.day,
            shown.hour,
            shown.minute,
            micros / 1_000_000
        )?;
        let frac = micros % 1_000_000;
        if frac != 0 {
            write!(f, ".{frac:06}")?;
        }
        write!(f, "Z")
    }
}

impl FromStr for UtcTime {
    type Err = TimeError;

    /// Parse `YYYY-MM-DDThh:mm:ssZ` or `YYYY-MM-DDThh:mm:ss`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim_end_matches('Z');
        let Some((date, time)) = s.split_once('T') else {
            return Err(TimeError::Parse(format!(
                "expected YYYY-MM-DDThh:mm:ssZ, got {s}"
            )));
        };
        let date_parts: Vec<&str> = date.split('-').collect();
        let time_parts: Vec<&str> = time.split(':').collect();
        if date_parts.len() != 3 || time_parts.len() != 3 {
            return Err(TimeError::Parse(format!("invalid date/time format: {s}")));
        }
        let field = |e: std::num::ParseIntError| TimeError::Parse(e.to_string());
        let year: i32 = date_parts[0].parse().map_err(field)?;
        let month: u32 = date_parts[1].parse().map_err(field)?;
        let day: u32 = date_parts[2].parse().map_err(field)?;
        let hour: u32 = time_parts[0].parse().map_err(field)?;
        let minute: u32 = time_parts[1].parse().map_err(field)?;
        let second: f64 = time_parts[2]
            .parse()
            .map_err(|e: std::num::ParseFloatError| TimeError::Parse(e.to_string()))?;

        let utc = Self::new(year, month, day, hour, minute, second);
        utc.validate()?;
        Ok(utc)
    }
}
