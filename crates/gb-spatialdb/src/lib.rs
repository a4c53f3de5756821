//! Spatial databases and time histories for geobc.
//!
//! Boundary conditions get their parameters from two kinds of external
//! sources:
//! - **Spatial databases** return a vector of named values at a location
//!   (e.g. `displacement-x` and `displacement-y` at a boundary vertex).
//! - **Time histories** return a dimensionless amplitude for an elapsed time.
//!
//! Both are capability traits ([`SpatialDb`], [`TimeHistory`]) so that any
//! conforming source (analytic, file-backed, remote) can be substituted.
//! This crate also ships the in-memory implementations used by the CLI
//! and the tests.

pub mod coordsys;
pub mod error;
pub mod history;
pub mod simple;
pub mod traits;
pub mod uniform;

pub use coordsys::{CoordSys, CoordSysKind};
pub use error::{DbError, DbResult};
pub use history::PiecewiseLinearHistory;
pub use simple::SimpleDb;
pub use traits::{SpatialDb, TimeHistory};
pub use uniform::UniformDb;
