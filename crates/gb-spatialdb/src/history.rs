//! Time history defined by linearly interpolated amplitude points.

use crate::error::{DbError, DbResult};
use crate::traits::TimeHistory;
use gb_core::units::Time;
use gb_core::{Real, ensure_finite};

/// Piecewise-linear amplitude curve.
///
/// Times are stored in seconds and must be strictly increasing. Queries
/// outside `[first time, last time]` fail.
///
/// # Example
///
/// ```
/// use gb_spatialdb::{PiecewiseLinearHistory, TimeHistory};
///
/// let mut th = PiecewiseLinearHistory::new("ramp", vec![(0.0, 0.0), (2.0, 1.0)]).unwrap();
/// th.open().unwrap();
/// assert_eq!(th.query(1.0).unwrap(), 0.5);
/// assert!(th.query(3.0).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PiecewiseLinearHistory {
    label: String,
    times: Vec<Real>,
    amplitudes: Vec<Real>,
    is_open: bool,
}

impl PiecewiseLinearHistory {
    /// Create a time history from `(time [s], amplitude)` points.
    ///
    /// # Errors
    ///
    /// Returns error if there are no points, a value is not finite, or the
    /// times are not strictly increasing.
    pub fn new(label: impl Into<String>, points: Vec<(Real, Real)>) -> DbResult<Self> {
        if points.is_empty() {
            return Err(DbError::InvalidArg {
                what: "time history needs at least one point",
            });
        }
        let mut times = Vec::with_capacity(points.len());
        let mut amplitudes = Vec::with_capacity(points.len());
        for (t, a) in points {
            times.push(ensure_finite(t, "time history time")?);
            amplitudes.push(ensure_finite(a, "time history amplitude")?);
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DbError::InvalidArg {
                what: "time history times must be strictly increasing",
            });
        }
        Ok(Self {
            label: label.into(),
            times,
            amplitudes,
            is_open: false,
        })
    }

    /// Create a time history whose point times are given in `time_unit`
    /// (e.g. years).
    pub fn with_time_unit(
        label: impl Into<String>,
        points: Vec<(Real, Real)>,
        time_unit: Time,
    ) -> DbResult<Self> {
        let unit = time_unit.value;
        if !(unit.is_finite() && unit > 0.0) {
            return Err(DbError::InvalidArg {
                what: "time unit must be positive",
            });
        }
        let points = points.into_iter().map(|(t, a)| (t * unit, a)).collect();
        Self::new(label, points)
    }

    /// Point times in seconds.
    pub fn times(&self) -> &[Real] {
        &self.times
    }

    pub fn amplitudes(&self) -> &[Real] {
        &self.amplitudes
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }

    fn out_of_range(&self, t: Real) -> DbError {
        DbError::OutOfRange {
            label: self.label.clone(),
            time: t,
            first: self.times[0],
            last: self.times[self.times.len() - 1],
        }
    }
}

impl TimeHistory for PiecewiseLinearHistory {
    fn label(&self) -> &str {
        &self.label
    }

    fn open(&mut self) -> DbResult<()> {
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> DbResult<()> {
        self.is_open = false;
        Ok(())
    }

    fn query(&self, t: Real) -> DbResult<Real> {
        if !self.is_open {
            return Err(DbError::NotOpen {
                label: self.label.clone(),
            });
        }
        let n = self.times.len();
        if !t.is_finite() || t < self.times[0] || t > self.times[n - 1] {
            return Err(self.out_of_range(t));
        }

        // First index with time > t; t lies in [times[i-1], times[i]).
        let i = self.times.partition_point(|&ti| ti <= t);
        if i == n {
            return Ok(self.amplitudes[n - 1]);
        }
        let (t0, t1) = (self.times[i - 1], self.times[i]);
        let (a0, a1) = (self.amplitudes[i - 1], self.amplitudes[i]);
        Ok(a0 + (a1 - a0) * (t - t0) / (t1 - t0))
    }
}
