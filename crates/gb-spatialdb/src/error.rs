//! Error types for database queries.

use gb_core::{GbError, Real};
use thiserror::Error;

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

/// Errors that can occur when opening or querying a database.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DbError {
    /// Query issued before `open()` or after `close()`.
    #[error("Database '{label}' is not open")]
    NotOpen { label: String },

    /// `query_vals` named a value the database does not provide.
    #[error("Database '{label}' does not provide value '{name}'")]
    UnknownValue { label: String, name: String },

    /// `query` called before any values were selected with `query_vals`.
    #[error("No values selected for query in database '{label}'")]
    NoQueryValues { label: String },

    /// Caller buffer or coordinate has the wrong length.
    #[error("Size mismatch in database '{label}' for {what}: expected {expected}, got {actual}")]
    SizeMismatch {
        label: String,
        what: &'static str,
        expected: usize,
        actual: usize,
    },

    /// Location is not covered by the database.
    #[error("Location {location} is outside the domain of database '{label}'")]
    OutOfDomain { label: String, location: String },

    /// Time is outside the range covered by a time history.
    #[error("Time {time} is outside the range [{first}, {last}] of time history '{label}'")]
    OutOfRange {
        label: String,
        time: Real,
        first: Real,
        last: Real,
    },

    /// Invalid construction argument.
    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    /// Non-finite or out-of-range input value.
    #[error("Invalid value: {0}")]
    Value(#[from] GbError),

    /// Failure reported by an external backend.
    #[error("Backend error: {message}")]
    Backend { message: String },
}

/// Format a coordinate the way error messages print it: `(x, y, z)`.
pub fn format_location(coords: &[Real]) -> String {
    let parts: Vec<String> = coords.iter().map(|c| c.to_string()).collect();
    format!("({})", parts.join(", "))
}
