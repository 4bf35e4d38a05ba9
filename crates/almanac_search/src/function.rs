//! Searched functions of time.
//!
//! A finder never sees what a function measures. It only needs to evaluate
//! it (singly during bisection, in batches during discretization) and to know
//! its rough period, the approximate period of its fastest oscillation, which
//! sets the sampling density.

use almanac_time::TimePoint;

use crate::error::SearchError;

/// A real-valued function of time with a declared rough period.
pub trait ScalarFunction {
    /// Approximate period in days of the fastest oscillation.
    ///
    /// This is a caller contract: it must be short enough that no two roots
    /// or extrema fall between adjacent samples.
    fn rough_period(&self) -> f64;

    /// Evaluate at a single instant.
    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError>;

    /// Evaluate at many instants at once.
    ///
    /// Must match repeated [`evaluate`](Self::evaluate) calls exactly.
    /// Implementors backed by an ephemeris override this to batch queries.
    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<f64>, SearchError> {
        times.iter().map(|&t| self.evaluate(t)).collect()
    }
}

/// A closure bundled with its rough period.
#[derive(Clone)]
pub struct TimeFunction<F> {
    rough_period: f64,
    f: F,
}

impl<F> TimeFunction<F>
where
    F: Fn(TimePoint) -> Result<f64, SearchError>,
{
    pub fn new(rough_period: f64, f: F) -> Self {
        Self { rough_period, f }
    }
}

impl<F> ScalarFunction for TimeFunction<F>
where
    F: Fn(TimePoint) -> Result<f64, SearchError>,
{
    fn rough_period(&self) -> f64 {
        self.rough_period
    }

    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError> {
        (self.f)(t)
    }
}

/// Wrap an infallible closure as a [`ScalarFunction`].
pub fn time_function<G>(
    rough_period: f64,
    g: G,
) -> TimeFunction<impl Fn(TimePoint) -> Result<f64, SearchError>>
where
    G: Fn(TimePoint) -> f64,
{
    TimeFunction::new(rough_period, move |t| Ok(g(t)))
}

/// First time-derivative of another function, by central difference.
///
/// Values are in units of the inner function per day.
#[derive(Clone)]
pub struct Derivative<F> {
    inner: F,
    step_days: f64,
}

impl<F: ScalarFunction> Derivative<F> {
    /// `step_days` is the half-width `h` of `(f(t+h) - f(t-h)) / 2h`.
    pub fn new(inner: F, step_days: f64) -> Result<Self, SearchError> {
        if !step_days.is_finite() || step_days <= 0.0 {
            return Err(SearchError::InvalidConfig("derivative step must be positive"));
        }
        Ok(Self { inner, step_days })
    }
}

impl<F: ScalarFunction> ScalarFunction for Derivative<F> {
    fn rough_period(&self) -> f64 {
        self.inner.rough_period()
    }

    fn evaluate(&self, t: TimePoint) -> Result<f64, SearchError> {
        let h = self.step_days;
        let plus = self.inner.evaluate(t + h)?;
        let minus = self.inner.evaluate(t - h)?;
        Ok((plus - minus) / (2.0 * h))
    }

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<f64>, SearchError> {
        let h = self.step_days;
        let ahead: Vec<TimePoint> = times.iter().map(|&t| t + h).collect();
        let behind: Vec<TimePoint> = times.iter().map(|&t| t - h).collect();
        let plus = self.inner.evaluate_many(&ahead)?;
        let minus = self.inner.evaluate_many(&behind)?;
        Ok(plus
            .iter()
            .zip(&minus)
            .map(|(p, m)| (p - m) / (2.0 * h))
            .collect())
    }
}

/// An integer-valued (state) function of time with a declared rough period.
pub trait DiscreteFunction {
    /// Approximate period in days between state changes.
    fn rough_period(&self) -> f64;

    fn evaluate(&self, t: TimePoint) -> Result<i64, SearchError>;

    fn evaluate_many(&self, times: &[TimePoint]) -> Result<Vec<i64>, SearchError> {
        times.iter().map(|&t| self.evaluate(t)).collect()
    }
}

/// A state closure bundled with its rough period.
#[derive(Clone)]
pub struct StateFunction<F> {
    rough_period: f64,
    f: F,
}

impl<F> StateFunction<F>
where
    F: Fn(TimePoint) -> Result<i64, SearchError>,
{
    pub fn new(rough_period: f64, f: F) -> Self {
        Self { rough_period, f }
    }
}

impl<F> DiscreteFunction for StateFunction<F>
where
    F: Fn(TimePoint) -> Result<i64, SearchError>,
{
    fn rough_period(&self) -> f64 {
        self.rough_period
    }

    fn evaluate(&self, t: TimePoint) -> Result<i64, SearchError> {
        (self.f)(t)
    }
}
