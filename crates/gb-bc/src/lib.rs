//! Time-dependent boundary conditions on sets of mesh points.
//!
//! A boundary condition prescribes values for selected degrees of freedom
//! (x, y, z components) at a list of mesh vertices. The prescribed value at
//! time `t` is the superposition of up to three contributions, each read
//! from a spatial database at setup:
//!
//! ```text
//! value(t) = initial
//!          + rate   * (t - t_rate)                 if t >  t_rate
//!          + change * history(t - t_change)        if t >= t_change
//! ```
//!
//! where `history` is an optional time history (1 when absent).
//!
//! # Architecture
//!
//! - [`DofSelection`]: which components are constrained
//! - [`ParameterStore`]: per-point parameter arrays, filled once at setup
//! - [`TimeDependentPoints`]: queries databases into the store
//!   (`setup_parameters`) and evaluates values (`calculate_value`) or
//!   increments (`calculate_value_incr`) every time step
//! - [`TimeHistoryScale`]: applies the optional time history to the
//!   change contribution
//! - [`Physics`]: normalizer and observer registry shared by physics objects
//!
//! Everything stored is nondimensional; the [`gb_core::Normalizer`] held by
//! [`Physics`] converts at the database boundary.

pub mod dof;
pub mod error;
pub mod field;
pub mod history;
pub mod mesh;
pub mod physics;
pub mod points;

mod evaluate;
mod query;

pub use dof::{Axis, DofSelection};
pub use error::{BcError, BcResult};
pub use field::{FieldRole, ParameterField, ParameterStore, PointLayout, TimedField, VectorFieldKind};
pub use history::TimeHistoryScale;
pub use mesh::{BoundaryMesh, PointMesh};
pub use physics::{EvalTime, Physics, PhysicsObserver, PhysicsUpdate};
pub use points::TimeDependentPoints;
