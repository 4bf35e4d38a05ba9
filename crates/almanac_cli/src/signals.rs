//! Analytic test signals for exercising the finders without an ephemeris.

use std::f64::consts::PI;

use almanac_search::{ScalarFunction, SearchError, StateFunction, TimeFunction};
use almanac_time::TimePoint;
use clap::ValueEnum;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Signal {
    /// sin(2π·phase)
    Sine,
    /// Hour angle 24·phase wrapped to [0, 24), minus 6: one true root and one
    /// wrap per period.
    Sawtooth,
    /// phase - 0.5: single root half a period after start.
    Linear,
}

impl Signal {
    /// Value at `phase` periods after the start of the search.
    pub fn value(self, phase: f64) -> f64 {
        match self {
            Self::Sine => (2.0 * PI * phase).sin(),
            Self::Sawtooth => (24.0 * phase).rem_euclid(24.0) - 6.0,
            Self::Linear => phase - 0.5,
        }
    }

    /// The signal as a searched function starting at `origin`.
    pub fn function(
        self,
        origin: TimePoint,
        period_days: f64,
    ) -> TimeFunction<impl Fn(TimePoint) -> Result<f64, SearchError>> {
        TimeFunction::new(period_days, move |t: TimePoint| {
            Ok(self.value((t - origin) / period_days))
        })
    }

    /// 1 while the signal is positive, 0 otherwise.
    pub fn sign_state(
        self,
        origin: TimePoint,
        period_days: f64,
    ) -> StateFunction<impl Fn(TimePoint) -> Result<i64, SearchError>> {
        let f = self.function(origin, period_days);
        StateFunction::new(period_days, move |t: TimePoint| {
            Ok(i64::from(f.evaluate(t)? > 0.0))
        })
    }
}
