//! Coordinate system descriptors passed along with every spatial query.

/// Kind of coordinate system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CoordSysKind {
    /// Cartesian coordinates in meters.
    #[default]
    Cartesian,
}

/// Coordinate system of query locations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoordSys {
    kind: CoordSysKind,
    space_dim: usize,
}

impl CoordSys {
    /// Cartesian coordinate system with `space_dim` (1, 2 or 3) axes.
    ///
    /// # Panics
    ///
    /// Panics if `space_dim` is not 1, 2 or 3.
    pub fn cartesian(space_dim: usize) -> Self {
        assert!(
            (1..=3).contains(&space_dim),
            "space dimension must be 1, 2 or 3"
        );
        Self {
            kind: CoordSysKind::Cartesian,
            space_dim,
        }
    }

    pub fn kind(&self) -> CoordSysKind {
        self.kind
    }

    pub fn space_dim(&self) -> usize {
        self.space_dim
    }
}
