//! Capability traits for spatial databases and time histories.

use crate::coordsys::CoordSys;
use crate::error::DbResult;
use gb_core::Real;

/// Source of named values as a function of location.
///
/// Usage follows a fixed protocol:
/// 1. `open()`
/// 2. `query_vals(names)` selects which values (and in which order) the
///    following queries return
/// 3. any number of `query(values, coords, cs)` calls
/// 4. `close()`
///
/// Locations and returned values are dimensional (SI units).
pub trait SpatialDb: Send {
    /// Label used in diagnostics.
    fn label(&self) -> &str;

    /// Prepare the database for queries.
    fn open(&mut self) -> DbResult<()>;

    /// Release resources acquired by `open`.
    fn close(&mut self) -> DbResult<()>;

    /// Select the values returned by subsequent queries.
    fn query_vals(&mut self, names: &[&str]) -> DbResult<()>;

    /// Fill `values` (one entry per selected name) at location `coords`.
    fn query(&self, values: &mut [Real], coords: &[Real], cs: &CoordSys) -> DbResult<()>;
}

/// Dimensionless amplitude as a function of elapsed time.
///
/// Time histories are shared read-only during evaluation, which may run
/// on several threads at once.
pub trait TimeHistory: Send + Sync {
    /// Label used in diagnostics.
    fn label(&self) -> &str;

    fn open(&mut self) -> DbResult<()>;

    fn close(&mut self) -> DbResult<()>;

    /// Amplitude at elapsed time `t` (seconds).
    fn query(&self, t: Real) -> DbResult<Real>;
}

/// Map requested value names to their column in `available`.
pub(crate) fn resolve_names(
    label: &str,
    available: &[String],
    names: &[&str],
) -> DbResult<Vec<usize>> {
    if names.is_empty() {
        return Err(crate::error::DbError::NoQueryValues {
            label: label.to_string(),
        });
    }
    names
        .iter()
        .map(|name| {
            available
                .iter()
                .position(|a| a.as_str() == *name)
                .ok_or_else(|| crate::error::DbError::UnknownValue {
                    label: label.to_string(),
                    name: (*name).to_string(),
                })
        })
        .collect()
}
