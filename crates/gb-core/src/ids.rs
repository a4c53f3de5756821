use core::fmt;
use core::num::NonZeroU32;

/// Mesh point (vertex) identifier.
///
/// - `u32` keeps boundary point lists small
/// - `NonZero` enables `Option<PointId>` to be pointer-optimized
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PointId(NonZeroU32);

impl PointId {
    /// Create a PointId from a 0-based mesh point number by storing index+1.
    pub fn from_index(index: u32) -> Self {
        match NonZeroU32::new(index.wrapping_add(1)) {
            Some(v) => Self(v),
            None => panic!("point index {index} is out of range"),
        }
    }

    /// Recover the 0-based mesh point number.
    pub fn index(self) -> u32 {
        self.0.get() - 1
    }
}

impl From<u32> for PointId {
    fn from(index: u32) -> Self {
        Self::from_index(index)
    }
}

impl fmt::Debug for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PointId({})", self.index())
    }
}

impl fmt::Display for PointId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn point_id_keeps_mesh_number() {
        for i in [0_u32, 1, 2, 42, 10_000] {
            let id = PointId::from_index(i);
            assert_eq!(id.index(), i);
            assert_eq!(id.to_string(), i.to_string());
        }
    }

    #[test]
    fn option_point_id_is_small() {
        assert_eq!(
            core::mem::size_of::<PointId>(),
            core::mem::size_of::<Option<PointId>>()
        );
    }

    #[test]
    #[should_panic]
    fn max_index_panics() {
        let _ = PointId::from_index(u32::MAX);
    }
}
