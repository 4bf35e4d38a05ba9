//! State-change finder for integer-valued functions of time.
//!
//! Used for predicates ("is the separation increasing?") where the event is
//! the instant the state flips. Same pattern as the root finder: bracket on
//! the grid, then bisect each bracket keeping `state(a) == old` and
//! `state(b) != old`.

use almanac_time::TimePoint;

use crate::discretize::sample_times;
use crate::error::SearchError;
use crate::finder_types::{DiscreteConfig, StateChange};
use crate::function::DiscreteFunction;

/// Find every state transition of `f` in `[start, end]`, in ascending order.
///
/// Two transitions inside one grid interval that restore the starting state
/// are invisible to the grid and not reported.
pub fn find_discrete<F>(
    start: TimePoint,
    end: TimePoint,
    f: &F,
    config: &DiscreteConfig,
) -> Result<Vec<StateChange>, SearchError>
where
    F: DiscreteFunction + ?Sized,
{
    config.validate().map_err(SearchError::InvalidConfig)?;

    let times = sample_times(start, end, f.rough_period(), config.samples_per_period)?;
    let states = f.evaluate_many(&times)?;
    if states.len() != times.len() {
        return Err(SearchError::Evaluation(format!(
            "batch evaluation returned {} states for {} instants",
            states.len(),
            times.len()
        )));
    }

    let mut changes = Vec::new();
    for i in 0..times.len() - 1 {
        if states[i] == states[i + 1] {
            continue;
        }
        changes.push(bisect_change(
            f,
            (times[i], states[i]),
            (times[i + 1], states[i + 1]),
            config,
        )?);
    }

    Ok(changes)
}

fn bisect_change<F>(
    f: &F,
    (mut t_a, previous): (TimePoint, i64),
    (mut t_b, mut current): (TimePoint, i64),
    config: &DiscreteConfig,
) -> Result<StateChange, SearchError>
where
    F: DiscreteFunction + ?Sized,
{
    for _ in 0..config.max_iterations {
        if t_b - t_a <= config.epsilon_days {
            break;
        }
        let t_x = t_a.midpoint(t_b);
        if t_x <= t_a || t_x >= t_b {
            break;
        }
        let s_x = f.evaluate(t_x)?;
        if s_x == previous {
            t_a = t_x;
        } else {
            t_b = t_x;
            current = s_x;
        }
    }

    Ok(StateChange {
        time: t_b,
        previous,
        current,
    })
}
