//! Time-history scaling of the change contribution.

use gb_core::{Normalizer, Real};
use gb_spatialdb::TimeHistory;

use crate::error::{BcError, BcResult};

/// Scale factor applied to the change contribution at a given elapsed
/// time since the change started.
///
/// Without a time history the factor is 1. With one, the nondimensional
/// elapsed time is made dimensional with the normalizer's time scale and
/// the history is queried at that time.
#[derive(Clone, Copy)]
pub struct TimeHistoryScale<'a> {
    history: Option<&'a dyn TimeHistory>,
    normalizer: &'a Normalizer,
}

impl<'a> TimeHistoryScale<'a> {
    pub fn new(history: Option<&'a dyn TimeHistory>, normalizer: &'a Normalizer) -> Self {
        Self {
            history,
            normalizer,
        }
    }

    pub fn has_history(&self) -> bool {
        self.history.is_some()
    }

    /// Factor at nondimensional elapsed time `t_rel`.
    ///
    /// # Errors
    ///
    /// Returns [`BcError::TimeHistoryQuery`] if the history query fails.
    pub fn at(&self, t_rel: Real) -> BcResult<Real> {
        let Some(history) = self.history else {
            return Ok(1.0);
        };
        let t_dim = self
            .normalizer
            .dimensionalize_value(t_rel, self.normalizer.time_scale());
        history
            .query(t_dim)
            .map_err(|source| BcError::TimeHistoryQuery {
                time: t_dim,
                db_label: history.label().to_string(),
                source,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gb_core::units::s;
    use gb_spatialdb::PiecewiseLinearHistory;

    #[test]
    fn unit_factor_without_history() {
        let n = Normalizer::default();
        let scale = TimeHistoryScale::new(None, &n);
        assert!(!scale.has_history());
        assert_eq!(scale.at(-5.0).unwrap(), 1.0);
        assert_eq!(scale.at(123.0).unwrap(), 1.0);
    }

    #[test]
    fn elapsed_time_is_dimensionalized() {
        let n = Normalizer::default().with_time_scale(s(10.0)).unwrap();
        let mut th = PiecewiseLinearHistory::new("th", vec![(0.0, 0.0), (30.0, 0.8)]).unwrap();
        th.open().unwrap();
        let scale = TimeHistoryScale::new(Some(&th as &dyn TimeHistory), &n);
        // 3 time-scale units = 30 s
        assert_eq!(scale.at(3.0).unwrap(), 0.8);
        assert_eq!(scale.at(0.0).unwrap(), 0.0);
    }

    #[test]
    fn failure_names_time_and_label() {
        let n = Normalizer::default().with_time_scale(s(2.0)).unwrap();
        let mut th = PiecewiseLinearHistory::new("ramp", vec![(0.0, 0.0), (1.0, 1.0)]).unwrap();
        th.open().unwrap();
        let scale = TimeHistoryScale::new(Some(&th as &dyn TimeHistory), &n);
        let err = scale.at(4.0).unwrap_err();
        match &err {
            BcError::TimeHistoryQuery { time, db_label, .. } => {
                assert_eq!(*time, 8.0);
                assert_eq!(db_label, "ramp");
            }
            other => panic!("unexpected error {other:?}"),
        }
        assert_eq!(
            err.to_string(),
            "Error querying for time '8' in time history database ramp."
        );
    }
}
