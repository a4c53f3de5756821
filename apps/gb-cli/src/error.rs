use gb_bc::BcError;
use gb_core::GbError;
use gb_project::ProjectError;
use gb_spatialdb::DbError;

pub type CliResult<T> = Result<T, CliError>;

#[derive(thiserror::Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Project(#[from] ProjectError),

    #[error("{0}")]
    Bc(#[from] BcError),

    #[error("{0}")]
    Database(#[from] DbError),

    #[error("{0}")]
    Core(#[from] GbError),

    #[error("No boundary condition with id '{id}'")]
    UnknownBc { id: String },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: String },
}
