//! Sample grid shared by all finders.
//!
//! The grid spans `[start, end]` inclusive with `samples_per_period` samples
//! per rough period (and never fewer than `samples_per_period` in total), so a
//! smooth function with that period cannot hide a root or extremum between two
//! adjacent samples.

use almanac_time::TimePoint;

use crate::error::SearchError;
use crate::function::ScalarFunction;

/// Samples per rough period used when no config says otherwise.
pub const DEFAULT_SAMPLES_PER_PERIOD: usize = 12;

/// A function sampled on an evenly spaced grid.
#[derive(Debug, Clone, PartialEq)]
pub struct Samples {
    pub times: Vec<TimePoint>,
    pub values: Vec<f64>,
}

impl Samples {
    pub fn len(&self) -> usize {
        self.times.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// `max(values) - min(values)`.
    pub fn value_range(&self) -> f64 {
        let (lo, hi) = self
            .values
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &y| {
                (lo.min(y), hi.max(y))
            });
        if lo.is_finite() && hi.is_finite() {
            hi - lo
        } else {
            0.0
        }
    }

    /// Sample `i` as a `(time, value)` pair.
    pub fn at(&self, i: usize) -> (TimePoint, f64) {
        (self.times[i], self.values[i])
    }
}

pub(crate) fn validate_interval(start: TimePoint, end: TimePoint) -> Result<(), SearchError> {
    // Written so that NaN endpoints are rejected too.
    if start < end {
        Ok(())
    } else {
        Err(SearchError::InvalidInterval {
            start_jd: start.jd(),
            end_jd: end.jd(),
        })
    }
}

/// Number of grid samples for a span of `span_days`.
pub fn sample_count(span_days: f64, rough_period: f64, samples_per_period: usize) -> usize {
    let periods = (span_days / rough_period).max(1.0);
    ((periods * samples_per_period as f64).floor() as usize).max(2)
}

/// Evenly spaced instants over `[start, end]`, both ends included.
pub fn sample_times(
    start: TimePoint,
    end: TimePoint,
    rough_period: f64,
    samples_per_period: usize,
) -> Result<Vec<TimePoint>, SearchError> {
    validate_interval(start, end)?;
    if !rough_period.is_finite() || rough_period <= 0.0 {
        return Err(SearchError::InvalidConfig("rough period must be positive"));
    }
    if samples_per_period < 2 {
        return Err(SearchError::InvalidConfig("samples_per_period must be >= 2"));
    }

    let span = end - start;
    let n = sample_count(span, rough_period, samples_per_period);
    let step = span / (n - 1) as f64;

    let mut times: Vec<TimePoint> = (0..n - 1).map(|i| start + step * i as f64).collect();
    times.push(end);
    Ok(times)
}

/// Sample `f` over `[start, end]` with one batched evaluation.
pub fn discretize<F>(
    start: TimePoint,
    end: TimePoint,
    f: &F,
    samples_per_period: usize,
) -> Result<Samples, SearchError>
where
    F: ScalarFunction + ?Sized,
{
    let times = sample_times(start, end, f.rough_period(), samples_per_period)?;
    let values = f.evaluate_many(&times)?;
    if values.len() != times.len() {
        return Err(SearchError::Evaluation(format!(
            "batch evaluation returned {} values for {} instants",
            values.len(),
            times.len()
        )));
    }
    if let Some(i) = values.iter().position(|y| !y.is_finite()) {
        return Err(SearchError::NonFiniteValue { jd: times[i].jd() });
    }

    log::trace!(
        "discretized {start} .. {end} into {} samples (rough period {} d)",
        times.len(),
        f.rough_period()
    );
    Ok(Samples { times, values })
}
