//! Critical-point finder: local minima and maxima of a scalar function.
//!
//! A window of three consecutive grid samples is a candidate when its
//! discrete slope changes sign (or flattens) between the two halves. Each
//! candidate is refined by probing the midpoints on both sides of the
//! tracked center and keeping the sub-bracket where the slope turns.
//!
//! After convergence the mean of the two one-sided slopes must be below
//! `epsilon_flatness`. A wrapped angle passes the candidate test at every
//! wrap, but its refined bracket is steep, not flat, and is dropped here.

use almanac_time::TimePoint;

use crate::discretize::discretize;
use crate::error::SearchError;
use crate::finder_types::{CriticalConfig, FoundExtremum, mean_slope};
use crate::function::ScalarFunction;

/// A sample of the searched function.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Point {
    t: TimePoint,
    y: f64,
}

impl Point {
    fn eval<F: ScalarFunction + ?Sized>(f: &F, t: TimePoint) -> Result<Self, SearchError> {
        let y = f.evaluate(t)?;
        if !y.is_finite() {
            return Err(SearchError::NonFiniteValue { jd: t.jd() });
        }
        Ok(Self { t, y })
    }
}

/// Refinement state: outer points `a`, `b` and the tracked extremum `x`.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Bracket3 {
    a: Point,
    x: Point,
    b: Point,
}

/// Consecutive differences of opposite strict sign.
fn turns(d1: f64, d2: f64) -> bool {
    (d1 < 0.0 && d2 > 0.0) || (d1 > 0.0 && d2 < 0.0)
}

fn monotone(d1: f64, d2: f64) -> bool {
    (d1 > 0.0 && d2 > 0.0) || (d1 < 0.0 && d2 < 0.0)
}

impl Bracket3 {
    fn width(&self) -> f64 {
        self.b.t - self.a.t
    }

    /// One narrowing step using points `x1 = mid(a, x)` and `x2 = mid(x, b)`.
    fn narrow<F: ScalarFunction + ?Sized>(&mut self, f: &F) -> Result<(), SearchError> {
        let x1 = Point::eval(f, self.a.t.midpoint(self.x.t))?;
        let x2 = Point::eval(f, self.x.t.midpoint(self.b.t))?;

        if turns(x1.y - self.a.y, self.x.y - x1.y) {
            // Turns between a and x.
            self.b = self.x;
            self.x = x1;
        } else if turns(self.x.y - x1.y, x2.y - self.x.y) {
            // Straddled by x1 .. x2.
            self.a = x1;
            self.b = x2;
        } else {
            // Turns after x.
            self.a = x1;
            self.x = x2;
        }
        Ok(())
    }

    fn into_extremum(self) -> FoundExtremum {
        FoundExtremum {
            times: [self.a.t, self.x.t, self.b.t],
            values: [self.a.y, self.x.y, self.b.y],
        }
    }
}

/// Find every local extremum of `f` in `[start, end]`.
///
/// Results are in strictly ascending time order. Two candidate windows that
/// converge onto the same extremum are reported once.
pub fn find_critical_points<F>(
    start: TimePoint,
    end: TimePoint,
    f: &F,
    config: &CriticalConfig,
) -> Result<Vec<FoundExtremum>, SearchError>
where
    F: ScalarFunction + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let samples = discretize(start, end, f, config.samples_per_period)?;
    let mut found: Vec<FoundExtremum> = Vec::new();

    for i in 0..samples.len().saturating_sub(2) {
        let (t0, y0) = samples.at(i);
        let (t1, y1) = samples.at(i + 1);
        let (t2, y2) = samples.at(i + 2);

        if monotone(y1 - y0, y2 - y1) {
            continue;
        }

        let bracket = Bracket3 {
            a: Point { t: t0, y: y0 },
            x: Point { t: t1, y: y1 },
            b: Point { t: t2, y: y2 },
        };
        let Some(extremum) = refine(f, bracket, config)? else {
            continue;
        };

        if let Some(prev) = found.last() {
            if extremum.center() - prev.center() < config.epsilon_width_days {
                continue;
            }
        }
        found.push(extremum);
    }

    Ok(found)
}

/// Narrow a candidate window, then apply the flatness test.
fn refine<F>(
    f: &F,
    mut bracket: Bracket3,
    config: &CriticalConfig,
) -> Result<Option<FoundExtremum>, SearchError>
where
    F: ScalarFunction + ?Sized,
{
    for _ in 0..config.max_iterations {
        if bracket.width() < config.epsilon_width_days {
            break;
        }
        bracket.narrow(f)?;
    }

    if bracket.width() >= config.epsilon_width_days {
        log::debug!(
            "extremum bracket {} .. {} did not converge in {} steps",
            bracket.a.t,
            bracket.b.t,
            config.max_iterations
        );
        return Ok(None);
    }

    let extremum = bracket.into_extremum();
    let slope = mean_slope(&extremum.times, &extremum.values);
    if !(slope.abs() < config.epsilon_flatness) {
        log::debug!(
            "rejected steep extremum bracket at {}: mean slope {slope}",
            extremum.center()
        );
        return Ok(None);
    }
    Ok(Some(extremum))
}
