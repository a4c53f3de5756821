//! Evaluation of boundary values and increments.

use gb_core::Real;
use rayon::prelude::*;
use tracing::trace;

use crate::error::{BcError, BcResult};
use crate::field::{Contributions, ParameterField, ParameterStore};
use crate::history::TimeHistoryScale;
use crate::physics::{EvalTime, PhysicsUpdate};
use crate::points::TimeDependentPoints;

impl TimeDependentPoints {
    /// Prescribed values at time `t` (nondimensional).
    ///
    /// Per point and constrained DOF:
    /// - `initial`
    /// - plus `rate * (t - rate_time)` once `t > rate_time`
    /// - plus `change * history(t - change_time)` once `t >= change_time`
    ///
    /// # Errors
    ///
    /// Returns [`BcError::NotSetUp`] before a successful setup, or
    /// [`BcError::TimeHistoryQuery`] if the time history cannot be
    /// evaluated.
    pub fn calculate_value(&mut self, t: Real) -> BcResult<&ParameterField> {
        let store = self.parameters.as_mut().ok_or(BcError::NotSetUp)?;
        let history =
            TimeHistoryScale::new(self.db_time_history.as_deref(), self.physics.normalizer());

        evaluate_points(store, |c, i, out| accumulate_value(c, i, out, t, &history))?;
        trace!(
            bc = %self.label,
            t,
            history = history.has_history(),
            "evaluated boundary values"
        );

        self.physics.notify_observers(&PhysicsUpdate {
            time: EvalTime::At(t),
            points: store.layout().points(),
            values: store.value(),
        });
        Ok(store.value())
    }

    /// Change in prescribed values from `t0` to `t1` (nondimensional).
    ///
    /// The initial contribution does not change over time and is omitted.
    ///
    /// # Errors
    ///
    /// Same as [`calculate_value`](Self::calculate_value).
    pub fn calculate_value_incr(&mut self, t0: Real, t1: Real) -> BcResult<&ParameterField> {
        let store = self.parameters.as_mut().ok_or(BcError::NotSetUp)?;
        let history =
            TimeHistoryScale::new(self.db_time_history.as_deref(), self.physics.normalizer());

        evaluate_points(store, |c, i, out| {
            accumulate_increment(c, i, out, t0, t1, &history)
        })?;
        trace!(
            bc = %self.label,
            t0,
            t1,
            history = history.has_history(),
            "evaluated boundary increments"
        );

        self.physics.notify_observers(&PhysicsUpdate {
            time: EvalTime::Increment { t0, t1 },
            points: store.layout().points(),
            values: store.value(),
        });
        Ok(store.value())
    }
}

/// Zero `value`, then fill each point's slice with `f` in parallel.
fn evaluate_points<F>(store: &mut ParameterStore, f: F) -> BcResult<()>
where
    F: Fn(&Contributions<'_>, usize, &mut [Real]) -> BcResult<()> + Sync,
{
    let num_dof = store.num_dof();
    let (value, contributions) = store.split_value_mut();
    value.zero();
    if num_dof == 0 {
        return Ok(());
    }
    value
        .values_mut()
        .par_chunks_mut(num_dof)
        .enumerate()
        .try_for_each(|(i, out)| f(&contributions, i, out))
}

fn add_scaled(out: &mut [Real], amount: &[Real], factor: Real) {
    for (o, a) in out.iter_mut().zip(amount) {
        *o += a * factor;
    }
}

fn accumulate_value(
    c: &Contributions<'_>,
    i: usize,
    out: &mut [Real],
    t: Real,
    history: &TimeHistoryScale<'_>,
) -> BcResult<()> {
    if let Some(initial) = c.initial {
        add_scaled(out, initial.point(i), 1.0);
    }
    if let Some(rate) = c.rate {
        let t_rel = t - rate.start(i);
        if t_rel > 0.0 {
            add_scaled(out, rate.amount().point(i), t_rel);
        }
    }
    if let Some(change) = c.change {
        let t_rel = t - change.start(i);
        if t_rel >= 0.0 {
            let scale = history.at(t_rel)?;
            add_scaled(out, change.amount().point(i), scale);
        }
    }
    Ok(())
}

fn accumulate_increment(
    c: &Contributions<'_>,
    i: usize,
    out: &mut [Real],
    t0: Real,
    t1: Real,
    history: &TimeHistoryScale<'_>,
) -> BcResult<()> {
    if let Some(rate) = c.rate {
        let t_rate = rate.start(i);
        let t_incr = if t0 > t_rate {
            t1 - t0
        } else if t1 > t_rate {
            t1 - t_rate
        } else {
            0.0
        };
        if t_incr > 0.0 {
            add_scaled(out, rate.amount().point(i), t_incr);
        }
    }
    if let Some(change) = c.change {
        let t_change = change.start(i);
        if t0 >= t_change {
            let scale0 = history.at(t0 - t_change)?;
            let scale1 = history.at(t1 - t_change)?;
            add_scaled(out, change.amount().point(i), scale1 - scale0);
        } else if t1 >= t_change {
            let scale1 = history.at(t1 - t_change)?;
            add_scaled(out, change.amount().point(i), scale1);
        }
    }
    Ok(())
}
