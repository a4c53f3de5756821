//! Scattered-point spatial database with nearest-neighbour lookup.

use tracing::debug;

use crate::coordsys::CoordSys;
use crate::error::{DbError, DbResult, format_location};
use crate::traits::{SpatialDb, resolve_names};
use gb_core::{Real, ensure_all_finite};

/// Spatial database defined by values at scattered locations.
///
/// A query returns the values of the nearest data location. When
/// `max_distance` is set, locations farther than that from every data
/// location are outside the domain and the query fails.
#[derive(Debug, Clone)]
pub struct SimpleDb {
    label: String,
    space_dim: usize,
    names: Vec<String>,
    /// `num_locs * space_dim` coordinates.
    locations: Vec<Real>,
    /// `num_locs * names.len()` values.
    data: Vec<Real>,
    max_distance: Option<Real>,
    query_indices: Vec<usize>,
    is_open: bool,
}

impl SimpleDb {
    /// Create an empty database providing `names` in `space_dim` dimensions.
    pub fn new<I, S>(label: impl Into<String>, space_dim: usize, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            label: label.into(),
            space_dim,
            names: names.into_iter().map(Into::into).collect(),
            locations: Vec::new(),
            data: Vec::new(),
            max_distance: None,
            query_indices: Vec::new(),
            is_open: false,
        }
    }

    /// Reject queries farther than `distance` (meters) from every location.
    pub fn with_max_distance(mut self, distance: Real) -> Self {
        self.max_distance = Some(distance);
        self
    }

    /// Add a data location with one value per name.
    pub fn add_location(&mut self, coords: &[Real], values: &[Real]) -> DbResult<()> {
        if coords.len() != self.space_dim {
            return Err(DbError::SizeMismatch {
                label: self.label.clone(),
                what: "location coordinates",
                expected: self.space_dim,
                actual: coords.len(),
            });
        }
        if values.len() != self.names.len() {
            return Err(DbError::SizeMismatch {
                label: self.label.clone(),
                what: "location values",
                expected: self.names.len(),
                actual: values.len(),
            });
        }
        ensure_all_finite(coords, "location coordinates")?;
        ensure_all_finite(values, "location values")?;
        self.locations.extend_from_slice(coords);
        self.data.extend_from_slice(values);
        Ok(())
    }

    pub fn num_locations(&self) -> usize {
        if self.space_dim == 0 {
            0
        } else {
            self.locations.len() / self.space_dim
        }
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Index and distance of the data location nearest to `coords`.
    fn nearest(&self, coords: &[Real]) -> Option<(usize, Real)> {
        self.locations
            .chunks_exact(self.space_dim)
            .enumerate()
            .map(|(i, loc)| {
                let d2: Real = loc
                    .iter()
                    .zip(coords)
                    .map(|(a, b)| (a - b) * (a - b))
                    .sum();
                (i, d2)
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .map(|(i, d2)| (i, d2.sqrt()))
    }
}

impl SpatialDb for SimpleDb {
    fn label(&self) -> &str {
        &self.label
    }

    fn open(&mut self) -> DbResult<()> {
        if self.space_dim == 0 {
            return Err(DbError::InvalidArg {
                what: "space dimension must be positive",
            });
        }
        self.is_open = true;
        debug!(db = %self.label, locations = self.num_locations(), "simple db opened");
        Ok(())
    }

    fn close(&mut self) -> DbResult<()> {
        self.is_open = false;
        self.query_indices.clear();
        Ok(())
    }

    fn query_vals(&mut self, names: &[&str]) -> DbResult<()> {
        self.query_indices = resolve_names(&self.label, &self.names, names)?;
        Ok(())
    }

    fn query(&self, values: &mut [Real], coords: &[Real], cs: &CoordSys) -> DbResult<()> {
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
        if coords.len() != self.space_dim || cs.space_dim() != self.space_dim {
            return Err(DbError::SizeMismatch {
                label: self.label.clone(),
                what: "query coordinates",
                expected: self.space_dim,
                actual: coords.len(),
            });
        }

        let out_of_domain = || DbError::OutOfDomain {
            label: self.label.clone(),
            location: format_location(coords),
        };
        let (nearest, distance) = self.nearest(coords).ok_or_else(out_of_domain)?;
        if let Some(max) = self.max_distance {
            if distance > max {
                return Err(out_of_domain());
            }
        }

        let row = &self.data[nearest * self.names.len()..(nearest + 1) * self.names.len()];
        for (v, &i) in values.iter_mut().zip(&self.query_indices) {
            *v = row[i];
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn db() -> SimpleDb {
        let mut db = SimpleDb::new("fault slip", 2, ["slip-x", "slip-y"]);
        db.add_location(&[0.0, 0.0], &[1.0, 10.0]).unwrap();
        db.add_location(&[100.0, 0.0], &[2.0, 20.0]).unwrap();
        db.add_location(&[0.0, 100.0], &[3.0, 30.0]).unwrap();
        db
    }

    #[test]
    fn nearest_location_values() {
        let mut db = db();
        db.open().unwrap();
        db.query_vals(&["slip-y", "slip-x"]).unwrap();
        let cs = CoordSys::cartesian(2);
        let mut v = [0.0; 2];

        db.query(&mut v, &[90.0, 5.0], &cs).unwrap();
        assert_eq!(v, [20.0, 2.0]);

        db.query(&mut v, &[-5.0, 60.0], &cs).unwrap();
        assert_eq!(v, [30.0, 3.0]);
    }

    #[test]
    fn max_distance_limits_domain() {
        let mut db = db().with_max_distance(10.0);
        db.open().unwrap();
        db.query_vals(&["slip-x"]).unwrap();
        let cs = CoordSys::cartesian(2);
        let mut v = [0.0];

        assert!(db.query(&mut v, &[5.0, 5.0], &cs).is_ok());
        let err = db.query(&mut v, &[50.0, 50.0], &cs).unwrap_err();
        assert!(matches!(err, DbError::OutOfDomain { .. }));
        assert!(err.to_string().contains("(50, 50)"));
    }

    #[test]
    fn empty_database_has_no_domain() {
        let mut db = SimpleDb::new("empty", 1, ["v"]);
        db.open().unwrap();
        db.query_vals(&["v"]).unwrap();
        let mut v = [0.0];
        let err = db.query(&mut v, &[0.0], &CoordSys::cartesian(1)).unwrap_err();
        assert!(matches!(err, DbError::OutOfDomain { .. }));
    }

    #[test]
    fn add_location_checks_sizes() {
        let mut db = SimpleDb::new("db", 2, ["a"]);
        assert!(db.add_location(&[0.0], &[1.0]).is_err());
        assert!(db.add_location(&[0.0, 0.0], &[1.0, 2.0]).is_err());
        assert_eq!(db.num_locations(), 0);
    }

    #[test]
    fn coordinate_dimension_checked() {
        let mut db = db();
        db.open().unwrap();
        db.query_vals(&["slip-x"]).unwrap();
        let mut v = [0.0];
        let err = db
            .query(&mut v, &[0.0, 0.0, 0.0], &CoordSys::cartesian(3))
            .unwrap_err();
        assert!(matches!(err, DbError::SizeMismatch { .. }));
    }

    #[test]
    fn non_finite_location_rejected() {
        let mut db = SimpleDb::new("bad", 1, ["u-x"]);
        let err = db.add_location(&[Real::NAN], &[1.0]).unwrap_err();
        assert!(matches!(err, DbError::Value(_)));
        assert!(db.add_location(&[0.0], &[Real::INFINITY]).is_err());
        assert_eq!(db.num_locations(), 0);
    }
}
