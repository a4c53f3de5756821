//! gb-core: numeric foundation shared by the geobc crates.
//!
//! - [`units`]: uom SI quantity aliases and constructors
//! - [`scales`]: reference scales and (non)dimensionalization
//! - [`numeric`]: `Real`, tolerances and float checks
//! - [`ids`]: mesh point IDs

pub mod error;
pub mod ids;
pub mod numeric;
pub mod scales;
pub mod units;

pub use error::{GbError, GbResult};
pub use ids::*;
pub use numeric::*;
pub use scales::Normalizer;
pub use units::*;
