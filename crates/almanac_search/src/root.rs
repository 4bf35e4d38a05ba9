//! Root finder: continuous zero-crossings of a scalar function.
//!
//! Algorithm: sample the function on the discretization grid, bracket every
//! adjacent pair with a sign change, then bisect each bracket until it is
//! narrower than `epsilon_days`.
//!
//! A sign change is not enough. Angle-valued functions wrap (right ascension
//! jumps from 23h59m to 0h00m), and the wrap looks like a crossing to a sign
//! test. Bisecting a wrap converges onto the jump, where the bracket values
//! stay far apart however narrow the bracket gets. A genuine root shrinks the
//! value gap together with the bracket. So a converged bracket is accepted
//! only if `|f(a) - f(b)|` is below the relative tolerance.
//!
//! The tolerance is relative to the sampled value range, since functions in
//! degrees, hours, and kilometres share the same finder.

use almanac_time::TimePoint;

use crate::discretize::discretize;
use crate::error::SearchError;
use crate::finder_types::{FoundRoot, RootConfig};
use crate::function::ScalarFunction;

/// Find every continuous zero-crossing of `f` in `[start, end]`.
///
/// Results are in ascending time order. A sample that is already zero within
/// tolerance is reported as a root without bisection, once. At most one root
/// per grid interval can be found; choosing a short enough rough period is
/// the caller's job.
pub fn find_roots<F>(
    start: TimePoint,
    end: TimePoint,
    f: &F,
    config: &RootConfig,
) -> Result<Vec<FoundRoot>, SearchError>
where
    F: ScalarFunction + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let samples = discretize(start, end, f, config.samples_per_period)?;
    let tolerance = config.epsilon_relative * samples.value_range();
    let n = samples.len();

    let mut roots = Vec::new();

    for i in 0..n {
        let (t_i, y_i) = samples.at(i);

        if y_i.abs() < tolerance {
            roots.push(FoundRoot {
                time: t_i,
                value: y_i,
            });
            continue;
        }
        if i + 1 == n {
            break;
        }

        let (t_j, y_j) = samples.at(i + 1);
        if y_j.abs() < tolerance {
            // Reported as a sample root on the next pass.
            continue;
        }
        if !changes_sign(y_i, y_j) {
            continue;
        }

        if let Some(root) = bisect_root(f, (t_i, y_i), (t_j, y_j), tolerance, config)? {
            roots.push(root);
        }
    }

    Ok(roots)
}

/// Strictly opposite signs. Compared directly, since the product of two tiny
/// values underflows to zero.
fn changes_sign(a: f64, b: f64) -> bool {
    (a < 0.0 && b > 0.0) || (a > 0.0 && b < 0.0)
}

/// Bisect a sign-change bracket, then apply the continuity guard.
///
/// Returns `None` when the converged bracket still spans a value jump.
fn bisect_root<F>(
    f: &F,
    (mut t_a, mut y_a): (TimePoint, f64),
    (mut t_b, mut y_b): (TimePoint, f64),
    tolerance: f64,
    config: &RootConfig,
) -> Result<Option<FoundRoot>, SearchError>
where
    F: ScalarFunction + ?Sized,
{
    let mut last = None;

    for _ in 0..config.max_iterations {
        if t_b - t_a <= config.epsilon_days {
            break;
        }
        let t_x = t_a.midpoint(t_b);
        if t_x <= t_a || t_x >= t_b {
            // Bracket at floating-point resolution.
            break;
        }

        let y_x = f.evaluate(t_x)?;
        if !y_x.is_finite() {
            return Err(SearchError::NonFiniteValue { jd: t_x.jd() });
        }
        if y_x == 0.0 {
            return Ok(Some(FoundRoot {
                time: t_x,
                value: y_x,
            }));
        }

        if changes_sign(y_a, y_x) {
            t_b = t_x;
            y_b = y_x;
        } else {
            t_a = t_x;
            y_a = y_x;
        }
        last = Some((t_x, y_x));
    }

    if (y_a - y_b).abs() >= tolerance {
        log::debug!(
            "rejected discontinuous bracket {t_a} .. {t_b}: |{y_a} - {y_b}| >= {tolerance}"
        );
        return Ok(None);
    }

    let (time, value) = last.unwrap_or(if y_a.abs() <= y_b.abs() {
        (t_a, y_a)
    } else {
        (t_b, y_b)
    });
    Ok(Some(FoundRoot { time, value }))
}
