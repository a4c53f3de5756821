//! Spatial database with the same values everywhere.

use tracing::debug;

use crate::coordsys::CoordSys;
use crate::error::{DbError, DbResult};
use crate::traits::{SpatialDb, resolve_names};
use gb_core::Real;

/// Spatial database returning the same value for a name at every location.
///
/// # Example
///
/// ```
/// use gb_spatialdb::{CoordSys, SpatialDb, UniformDb};
///
/// let mut db = UniformDb::new("initial displacement")
///     .with_value("displacement-x", 0.5)
///     .with_value("displacement-y", -1.0);
/// db.open().unwrap();
/// db.query_vals(&["displacement-y", "displacement-x"]).unwrap();
///
/// let mut values = [0.0; 2];
/// db.query(&mut values, &[10.0, 20.0], &CoordSys::cartesian(2)).unwrap();
/// assert_eq!(values, [-1.0, 0.5]);
/// ```
#[derive(Debug, Clone)]
pub struct UniformDb {
    label: String,
    names: Vec<String>,
    values: Vec<Real>,
    query_indices: Vec<usize>,
    is_open: bool,
}

impl UniformDb {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            names: Vec::new(),
            values: Vec::new(),
            query_indices: Vec::new(),
            is_open: false,
        }
    }

    /// Add or replace a named value.
    pub fn with_value(mut self, name: impl Into<String>, value: Real) -> Self {
        self.set_value(name, value);
        self
    }

    /// Add or replace a named value.
    pub fn set_value(&mut self, name: impl Into<String>, value: Real) {
        let name = name.into();
        match self.names.iter().position(|n| *n == name) {
            Some(i) => self.values[i] = value,
            None => {
                self.names.push(name);
                self.values.push(value);
            }
        }
    }

    /// Names of values provided by this database.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn is_open(&self) -> bool {
        self.is_open
    }
}

impl SpatialDb for UniformDb {
    fn label(&self) -> &str {
        &self.label
    }

    fn open(&mut self) -> DbResult<()> {
        self.is_open = true;
        Ok(())
    }

    fn close(&mut self) -> DbResult<()> {
        self.is_open = false;
        self.query_indices.clear();
        Ok(())
    }

    fn query_vals(&mut self, names: &[&str]) -> DbResult<()> {
        self.query_indices = resolve_names(&self.label, &self.names, names)?;
        debug!(db = %self.label, ?names, "uniform db values selected");
        Ok(())
    }

    fn query(&self, values: &mut [Real], _coords: &[Real], _cs: &CoordSys) -> DbResult<()> {
        if !self.is_open {
            return Err(DbError::NotOpen {
                label: self.label.clone(),
            });
        }
        if self.query_indices.is_empty() {
            return Err(DbError::NoQueryValues {
                label: self.label.clone(),
            });
        }
        if values.len() != self.query_indices.len() {
            return Err(DbError::SizeMismatch {
                label: self.label.clone(),
                what: "query values",
                expected: self.query_indices.len(),
                actual: values.len(),
            });
        }
        for (v, &i) in values.iter_mut().zip(&self.query_indices) {
            *v = self.values[i];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> UniformDb {
        UniformDb::new("bc")
            .with_value("displacement-x", 1.0)
            .with_value("displacement-y", 2.0)
            .with_value("displacement-z", 3.0)
    }

    #[test]
    fn query_before_open_fails() {
        let mut db = db();
        db.query_vals(&["displacement-x"]).unwrap();
        let mut v = [0.0];
        let err = db.query(&mut v, &[0.0], &CoordSys::cartesian(1)).unwrap_err();
        assert!(matches!(err, DbError::NotOpen { .. }));
    }

    #[test]
    fn unknown_name_rejected() {
        let mut db = db();
        db.open().unwrap();
        let err = db.query_vals(&["displacement-rate-x"]).unwrap_err();
        assert_eq!(
            err,
            DbError::UnknownValue {
                label: "bc".into(),
                name: "displacement-rate-x".into()
            }
        );
    }

    #[test]
    fn order_follows_query_vals() {
        let mut db = db();
        db.open().unwrap();
        db.query_vals(&["displacement-z", "displacement-x"]).unwrap();
        let mut v = [0.0; 2];
        db.query(&mut v, &[5.0, 5.0, 5.0], &CoordSys::cartesian(3))
            .unwrap();
        assert_eq!(v, [3.0, 1.0]);
    }

    #[test]
    fn set_value_replaces() {
        let mut db = db();
        db.set_value("displacement-x", -4.0);
        assert_eq!(db.names().len(), 3);
        db.open().unwrap();
        db.query_vals(&["displacement-x"]).unwrap();
        let mut v = [0.0];
        db.query(&mut v, &[0.0], &CoordSys::cartesian(1)).unwrap();
        assert_eq!(v, [-4.0]);
    }

    #[test]
    fn close_clears_selection() {
        let mut db = db();
        db.open().unwrap();
        db.query_vals(&["displacement-x"]).unwrap();
        db.close().unwrap();
        db.open().unwrap();
        let mut v = [0.0];
        let err = db.query(&mut v, &[0.0], &CoordSys::cartesian(1)).unwrap_err();
        assert!(matches!(err, DbError::NoQueryValues { .. }));
    }

    #[test]
    fn buffer_size_checked() {
        let mut db = db();
        db.open().unwrap();
        db.query_vals(&["displacement-x", "displacement-y"]).unwrap();
        let mut v = [0.0; 3];
        let err = db.query(&mut v, &[0.0], &CoordSys::cartesian(1)).unwrap_err();
        assert!(matches!(err, DbError::SizeMismatch { expected: 2, actual: 3, .. }));
    }
}
