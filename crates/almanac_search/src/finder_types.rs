//! Configs and results for the root, critical-point, and state-change finders.

use almanac_time::TimePoint;

use crate::discretize::DEFAULT_SAMPLES_PER_PERIOD;

/// Configuration for [`find_roots`](crate::root::find_roots).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootConfig {
    /// Grid samples per rough period (default 12).
    pub samples_per_period: usize,
    /// Bisection stops once the bracket is narrower than this, in days
    /// (default 1e-6, ~0.09 s).
    pub epsilon_days: f64,
    /// Zero and continuity tolerance as a fraction of the sampled value
    /// range (default 1e-4).
    pub epsilon_relative: f64,
    /// Hard cap on bisection steps per bracket (default 100).
    pub max_iterations: u32,
}

impl Default for RootConfig {
    fn default() -> Self {
        Self {
            samples_per_period: DEFAULT_SAMPLES_PER_PERIOD,
            epsilon_days: 1e-6,
            epsilon_relative: 1e-4,
            max_iterations: 100,
        }
    }
}

impl RootConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.samples_per_period < 2 {
            return Err("samples_per_period must be >= 2");
        }
        if !self.epsilon_days.is_finite() || self.epsilon_days <= 0.0 {
            return Err("epsilon_days must be positive");
        }
        if !self.epsilon_relative.is_finite() || self.epsilon_relative <= 0.0 {
            return Err("epsilon_relative must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        Ok(())
    }
}

/// Configuration for [`find_critical_points`](crate::critical::find_critical_points).
///
/// The width and flatness tolerances are independent: the first is in days,
/// the second in units of the searched function per day.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CriticalConfig {
    /// Grid samples per rough period (default 12).
    pub samples_per_period: usize,
    /// Refinement stops once the bracket is narrower than this, in days
    /// (default 1e-4).
    pub epsilon_width_days: f64,
    /// Largest accepted mean one-sided slope of the final bracket
    /// (default 1e-4).
    pub epsilon_flatness: f64,
    /// Hard cap on refinement steps per bracket (default 100).
    pub max_iterations: u32,
}

impl Default for CriticalConfig {
    fn default() -> Self {
        Self {
            samples_per_period: DEFAULT_SAMPLES_PER_PERIOD,
            epsilon_width_days: 1e-4,
            epsilon_flatness: 1e-4,
            max_iterations: 100,
        }
    }
}

impl CriticalConfig {
    /// Default config with a different flatness tolerance.
    pub fn with_flatness(epsilon_flatness: f64) -> Self {
        Self {
            epsilon_flatness,
            ..Self::default()
        }
    }

    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.samples_per_period < 2 {
            return Err("samples_per_period must be >= 2");
        }
        if !self.epsilon_width_days.is_finite() || self.epsilon_width_days <= 0.0 {
            return Err("epsilon_width_days must be positive");
        }
        if !self.epsilon_flatness.is_finite() || self.epsilon_flatness <= 0.0 {
            return Err("epsilon_flatness must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        Ok(())
    }
}

/// Configuration for [`find_discrete`](crate::discrete::find_discrete).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DiscreteConfig {
    /// Grid samples per rough period (default 12).
    pub samples_per_period: usize,
    /// Bisection stops once the bracket is narrower than this, in days
    /// (default 1e-6).
    pub epsilon_days: f64,
    /// Hard cap on bisection steps per bracket (default 100).
    pub max_iterations: u32,
}

impl Default for DiscreteConfig {
    fn default() -> Self {
        Self {
            samples_per_period: DEFAULT_SAMPLES_PER_PERIOD,
            epsilon_days: 1e-6,
            max_iterations: 100,
        }
    }
}

impl DiscreteConfig {
    /// Validate the configuration.
    pub(crate) fn validate(&self) -> Result<(), &'static str> {
        if self.samples_per_period < 2 {
            return Err("samples_per_period must be >= 2");
        }
        if !self.epsilon_days.is_finite() || self.epsilon_days <= 0.0 {
            return Err("epsilon_days must be positive");
        }
        if self.max_iterations == 0 {
            return Err("max_iterations must be > 0");
        }
        Ok(())
    }
}

/// A continuous zero-crossing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoundRoot {
    pub time: TimePoint,
    /// Function value at `time`, zero within the relative tolerance.
    pub value: f64,
}

/// A refined local extremum bracket `(a, x, b)`.
///
/// `x` is the converged extremum; `a` and `b` are its final neighbours.
/// Whether it is a minimum or a maximum is left to the caller.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FoundExtremum {
    pub times: [TimePoint; 3],
    pub values: [f64; 3],
}

impl FoundExtremum {
    /// Instant of the extremum.
    pub fn center(&self) -> TimePoint {
        self.times[1]
    }

    /// Function value at the extremum.
    pub fn value(&self) -> f64 {
        self.values[1]
    }

    /// `t_b - t_a` in days.
    pub fn width_days(&self) -> f64 {
        self.times[2] - self.times[0]
    }

    /// Mean of the two one-sided slopes, `(dydt_a + dydt_b) / 2`.
    pub fn mean_slope(&self) -> f64 {
        mean_slope(&self.times, &self.values)
    }
}

pub(crate) fn mean_slope(times: &[TimePoint; 3], values: &[f64; 3]) -> f64 {
    let dydt_a = (values[1] - values[0]) / (times[1] - times[0]);
    let dydt_b = (values[2] - values[1]) / (times[2] - times[1]);
    0.5 * (dydt_a + dydt_b)
}

/// A state transition found by [`find_discrete`](crate::discrete::find_discrete).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateChange {
    /// First refined instant at which the new state holds.
    pub time: TimePoint,
    /// State before the transition.
    pub previous: i64,
    /// State after the transition.
    pub current: i64,
}
