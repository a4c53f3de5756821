use thiserror::Error;

pub type GbResult<T> = Result<T, GbError>;

/// Invalid numeric input (scales, coordinates, database values).
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GbError {
    #[error("Non-finite numeric value for {what}: {value}")]
    NonFinite { what: &'static str, value: f64 },

    #[error("Non-positive value for {what}: {value}")]
    NonPositive { what: &'static str, value: f64 },
}
