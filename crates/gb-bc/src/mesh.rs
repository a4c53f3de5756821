//! Mesh access needed by boundary conditions.

use std::collections::HashMap;

use gb_core::{PointId, Real};
use gb_spatialdb::CoordSys;

use crate::error::{BcError, BcResult};

/// Read-only view of mesh vertex coordinates.
///
/// Coordinates are nondimensional (divided by the normalizer's length
/// scale), as stored by the solver.
pub trait BoundaryMesh {
    /// Coordinate system of the mesh.
    fn coordsys(&self) -> &CoordSys;

    fn space_dim(&self) -> usize {
        self.coordsys().space_dim()
    }

    /// Nondimensional coordinates of `point`, or `None` if the point is not
    /// a vertex of this mesh.
    fn coordinates(&self, point: PointId) -> Option<&[Real]>;
}

/// In-memory vertex coordinates keyed by point ID.
#[derive(Debug, Clone)]
pub struct PointMesh {
    coordsys: CoordSys,
    coords: Vec<Real>,
    index: HashMap<PointId, usize>,
}

impl PointMesh {
    pub fn new(coordsys: CoordSys) -> Self {
        Self {
            coordsys,
            coords: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Add a vertex with nondimensional coordinates.
    ///
    /// # Errors
    ///
    /// Returns error if the coordinate count differs from the space
    /// dimension or the point already exists.
    pub fn add_point(&mut self, point: PointId, coords: &[Real]) -> BcResult<()> {
        let dim = self.coordsys.space_dim();
        if coords.len() != dim {
            return Err(BcError::InvalidArg {
                what: format!(
                    "point {point} has {} coordinates, mesh dimension is {dim}",
                    coords.len()
                ),
            });
        }
        if self.index.contains_key(&point) {
            return Err(BcError::InvalidArg {
                what: format!("point {point} is already in the mesh"),
            });
        }
        self.index.insert(point, self.coords.len() / dim);
        self.coords.extend_from_slice(coords);
        Ok(())
    }

    pub fn num_points(&self) -> usize {
        self.index.len()
    }
}

impl BoundaryMesh for PointMesh {
    fn coordsys(&self) -> &CoordSys {
        &self.coordsys
    }

    fn coordinates(&self, point: PointId) -> Option<&[Real]> {
        let dim = self.coordsys.space_dim();
        self.index
            .get(&point)
            .map(|&i| &self.coords[i * dim..(i + 1) * dim])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coordinates_by_point() {
        let mut mesh = PointMesh::new(CoordSys::cartesian(2));
        mesh.add_point(PointId::from_index(7), &[1.0, 2.0]).unwrap();
        mesh.add_point(PointId::from_index(3), &[3.0, 4.0]).unwrap();

        assert_eq!(mesh.num_points(), 2);
        assert_eq!(mesh.space_dim(), 2);
        assert_eq!(mesh.coordinates(PointId::from_index(3)), Some(&[3.0, 4.0][..]));
        assert_eq!(mesh.coordinates(PointId::from_index(7)), Some(&[1.0, 2.0][..]));
        assert_eq!(mesh.coordinates(PointId::from_index(0)), None);
    }

    #[test]
    fn rejects_wrong_dimension_and_duplicates() {
        let mut mesh = PointMesh::new(CoordSys::cartesian(3));
        assert!(mesh.add_point(PointId::from_index(0), &[1.0, 2.0]).is_err());
        mesh.add_point(PointId::from_index(0), &[1.0, 2.0, 3.0]).unwrap();
        assert!(mesh.add_point(PointId::from_index(0), &[0.0, 0.0, 0.0]).is_err());
    }
}
