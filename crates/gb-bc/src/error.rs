//! Error types for boundary-condition setup and evaluation.

use gb_core::{PointId, Real};
use gb_spatialdb::DbError;
use thiserror::Error;

use crate::field::FieldRole;

/// Result type for boundary-condition operations.
pub type BcResult<T> = Result<T, BcError>;

/// Errors raised while setting up or evaluating a boundary condition.
///
/// Query failures are never retried; they abort the current setup or
/// evaluation call.
#[derive(Debug, Error)]
pub enum BcError {
    /// A spatial database query failed during `setup_parameters`.
    #[error(
        "Error querying for '{role}' at ({}) using spatial database {db_label}.",
        format_coords(.coords)
    )]
    SetupQuery {
        role: FieldRole,
        coords: Vec<Real>,
        db_label: String,
        #[source]
        source: DbError,
    },

    /// A time-history query failed during evaluation.
    #[error("Error querying for time '{time}' in time history database {db_label}.")]
    TimeHistoryQuery {
        time: Real,
        db_label: String,
        #[source]
        source: DbError,
    },

    /// Evaluation requested before a successful `setup_parameters`.
    #[error("Boundary condition parameters have not been set up")]
    NotSetUp,

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },

    /// A constrained DOF does not exist in the mesh's space dimension.
    #[error("Attempting to constrain DOF ({dof}) that doesn't exist. Number of DOF is {num_dof}.")]
    DofOutOfRange { dof: usize, num_dof: usize },

    /// A boundary point has no coordinates in the mesh.
    #[error("Boundary point {point} is not in the mesh")]
    MissingPoint { point: PointId },

    /// Opening, selecting values in or closing a database failed.
    #[error("Database error: {0}")]
    Database(#[from] DbError),
}

/// Coordinates formatted as `  x  y  z`.
fn format_coords(coords: &[Real]) -> String {
    coords.iter().map(|c| format!("  {c}")).collect()
}
