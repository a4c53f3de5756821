//! Boundary condition prescribing time-dependent values on a set of points.

use gb_core::PointId;
use gb_spatialdb::{SpatialDb, TimeHistory};
use tracing::warn;

use crate::dof::DofSelection;
use crate::error::{BcError, BcResult};
use crate::field::ParameterStore;
use crate::mesh::BoundaryMesh;
use crate::physics::Physics;

/// Time-dependent Dirichlet-style values on a list of mesh vertices.
///
/// Lifecycle:
/// 1. configure points, constrained DOFs and databases
/// 2. [`setup_parameters`](Self::setup_parameters) reads every database
///    once into the parameter store
/// 3. [`calculate_value`](Self::calculate_value) or
///    [`calculate_value_incr`](Self::calculate_value_incr) every time step
///
/// Changing the configuration discards the parameter store; evaluation
/// then fails with [`BcError::NotSetUp`] until the next setup.
pub struct TimeDependentPoints {
    pub(crate) label: String,
    pub(crate) physics: Physics,
    pub(crate) points: Vec<PointId>,
    pub(crate) bc_dof: DofSelection,
    pub(crate) db_initial: Option<Box<dyn SpatialDb>>,
    pub(crate) db_rate: Option<Box<dyn SpatialDb>>,
    pub(crate) db_change: Option<Box<dyn SpatialDb>>,
    pub(crate) db_time_history: Option<Box<dyn TimeHistory>>,
    pub(crate) parameters: Option<ParameterStore>,
}

impl TimeDependentPoints {
    pub fn new(label: impl Into<String>, physics: Physics) -> Self {
        Self {
            label: label.into(),
            physics,
            points: Vec::new(),
            bc_dof: DofSelection::default(),
            db_initial: None,
            db_rate: None,
            db_change: None,
            db_time_history: None,
            parameters: None,
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn physics(&self) -> &Physics {
        &self.physics
    }

    pub fn physics_mut(&mut self) -> &mut Physics {
        &mut self.physics
    }

    /// Set the boundary points, in output order.
    pub fn set_points(&mut self, points: Vec<PointId>) {
        self.points = points;
        self.parameters = None;
    }

    pub fn points(&self) -> &[PointId] {
        &self.points
    }

    /// Set the constrained DOFs (0 = x, 1 = y, 2 = z).
    ///
    /// # Errors
    ///
    /// Returns error if a flag is not 0, 1 or 2.
    pub fn set_bc_dof(&mut self, flags: &[usize]) -> BcResult<()> {
        let selection = DofSelection::from_flags(flags)?;
        if selection.has_duplicates() {
            warn!(
                bc = %self.label,
                dofs = ?flags,
                "constrained DOFs contain duplicates"
            );
        }
        self.bc_dof = selection;
        self.parameters = None;
        Ok(())
    }

    pub fn bc_dof(&self) -> &DofSelection {
        &self.bc_dof
    }

    pub fn set_db_initial(&mut self, db: Option<Box<dyn SpatialDb>>) {
        self.db_initial = db;
        self.parameters = None;
    }

    pub fn set_db_rate(&mut self, db: Option<Box<dyn SpatialDb>>) {
        self.db_rate = db;
        self.parameters = None;
    }

    pub fn set_db_change(&mut self, db: Option<Box<dyn SpatialDb>>) {
        self.db_change = db;
        self.parameters = None;
    }

    /// Time history applied to the change contribution. Ignored unless a
    /// change database is also set.
    pub fn set_db_time_history(&mut self, db: Option<Box<dyn TimeHistory>>) {
        self.db_time_history = db;
        self.parameters = None;
    }

    pub fn has_db_initial(&self) -> bool {
        self.db_initial.is_some()
    }

    pub fn has_db_rate(&self) -> bool {
        self.db_rate.is_some()
    }

    pub fn has_db_change(&self) -> bool {
        self.db_change.is_some()
    }

    pub fn has_db_time_history(&self) -> bool {
        self.db_time_history.is_some()
    }

    /// Check the configuration against the mesh.
    ///
    /// # Errors
    ///
    /// Returns [`BcError::DofOutOfRange`] if a constrained DOF does not
    /// exist in the mesh dimension, or [`BcError::MissingPoint`] if a
    /// boundary point is not a mesh vertex.
    pub fn verify_configuration(&self, mesh: &dyn BoundaryMesh) -> BcResult<()> {
        let num_dof = mesh.space_dim();
        if let Some(dof) = self.bc_dof.max_flag().filter(|&d| d >= num_dof) {
            return Err(BcError::DofOutOfRange { dof, num_dof });
        }
        if let Some(&point) = self
            .points
            .iter()
            .find(|&&p| mesh.coordinates(p).is_none())
        {
            return Err(BcError::MissingPoint { point });
        }
        Ok(())
    }

    /// Parameter store filled by the last successful setup.
    pub fn parameters(&self) -> Option<&ParameterStore> {
        self.parameters.as_ref()
    }

    pub fn is_set_up(&self) -> bool {
        self.parameters.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mesh::PointMesh;
    use gb_spatialdb::{CoordSys, UniformDb};

    fn mesh_2d() -> PointMesh {
        let mut mesh = PointMesh::new(CoordSys::cartesian(2));
        mesh.add_point(PointId::from_index(0), &[0.0, 0.0]).unwrap();
        mesh.add_point(PointId::from_index(1), &[1.0, 0.0]).unwrap();
        mesh
    }

    #[test]
    fn dof_beyond_mesh_dimension_rejected() {
        let mut bc = TimeDependentPoints::new("bc", Physics::default());
        bc.set_points(vec![PointId::from_index(0)]);
        bc.set_bc_dof(&[0, 2]).unwrap();
        let err = bc.verify_configuration(&mesh_2d()).unwrap_err();
        assert!(matches!(err, BcError::DofOutOfRange { dof: 2, num_dof: 2 }));

        bc.set_bc_dof(&[1, 0]).unwrap();
        bc.verify_configuration(&mesh_2d()).unwrap();
    }

    #[test]
    fn point_outside_mesh_rejected() {
        let mut bc = TimeDependentPoints::new("bc", Physics::default());
        bc.set_points(vec![PointId::from_index(1), PointId::from_index(9)]);
        bc.set_bc_dof(&[0]).unwrap();
        let err = bc.verify_configuration(&mesh_2d()).unwrap_err();
        assert!(matches!(err, BcError::MissingPoint { point } if point == PointId::from_index(9)));
    }

    #[test]
    fn invalid_flag_keeps_previous_selection() {
        let mut bc = TimeDependentPoints::new("bc", Physics::default());
        bc.set_bc_dof(&[1]).unwrap();
        assert!(bc.set_bc_dof(&[4]).is_err());
        assert_eq!(bc.bc_dof().flags(), vec![1]);
    }

    #[test]
    fn database_presence() {
        let mut bc = TimeDependentPoints::new("bc", Physics::default());
        assert!(!bc.has_db_initial());
        bc.set_db_initial(Some(Box::new(UniformDb::new("initial"))));
        assert!(bc.has_db_initial());
        assert!(!bc.has_db_rate());
        assert!(!bc.has_db_change());
        assert!(!bc.has_db_time_history());
        assert!(!bc.is_set_up());
    }
}
