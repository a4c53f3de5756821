//! Selection of constrained degrees of freedom.

use core::fmt;

use crate::error::{BcError, BcResult};

/// Component of a vector field at a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Axis {
    X,
    Y,
    Z,
}

impl Axis {
    /// Axis for a DOF flag (0 = x, 1 = y, 2 = z).
    pub fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::X),
            1 => Some(Self::Y),
            2 => Some(Self::Z),
            _ => None,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Self::X => 0,
            Self::Y => 1,
            Self::Z => 2,
        }
    }

    /// Suffix used in database value names, e.g. `displacement-x`.
    pub fn suffix(self) -> &'static str {
        match self {
            Self::X => "x",
            Self::Y => "y",
            Self::Z => "z",
        }
    }
}

impl fmt::Display for Axis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.suffix())
    }
}

/// Ordered list of constrained components.
///
/// Order is significant: parameter arrays store one entry per selected
/// component in selection order. Duplicates are allowed but redundant.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DofSelection {
    axes: Vec<Axis>,
}

impl DofSelection {
    /// Build a selection from DOF flags (0, 1, 2).
    ///
    /// # Errors
    ///
    /// Returns error if a flag is not 0, 1 or 2.
    pub fn from_flags(flags: &[usize]) -> BcResult<Self> {
        let axes = flags
            .iter()
            .map(|&flag| {
                Axis::from_index(flag).ok_or_else(|| BcError::InvalidArg {
                    what: format!("DOF flag {flag} is not 0 (x), 1 (y) or 2 (z)"),
                })
            })
            .collect::<BcResult<Vec<_>>>()?;
        Ok(Self { axes })
    }

    pub fn len(&self) -> usize {
        self.axes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.axes.is_empty()
    }

    pub fn axes(&self) -> &[Axis] {
        &self.axes
    }

    pub fn flags(&self) -> Vec<usize> {
        self.axes.iter().map(|a| a.index()).collect()
    }

    pub fn has_duplicates(&self) -> bool {
        self.axes
            .iter()
            .enumerate()
            .any(|(i, a)| self.axes[..i].contains(a))
    }

    /// Largest selected DOF flag, if any.
    pub fn max_flag(&self) -> Option<usize> {
        self.axes.iter().map(|a| a.index()).max()
    }

    /// Value names `"<prefix><axis>"` in selection order.
    pub fn component_names(&self, prefix: &str) -> Vec<String> {
        self.axes
            .iter()
            .map(|axis| format!("{prefix}{}", axis.suffix()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_keep_order() {
        let sel = DofSelection::from_flags(&[2, 0]).unwrap();
        assert_eq!(sel.axes(), &[Axis::Z, Axis::X]);
        assert_eq!(sel.flags(), vec![2, 0]);
        assert_eq!(sel.len(), 2);
        assert_eq!(sel.max_flag(), Some(2));
    }

    #[test]
    fn invalid_flag_rejected() {
        let err = DofSelection::from_flags(&[0, 3]).unwrap_err();
        assert!(err.to_string().contains("DOF flag 3"));
    }

    #[test]
    fn duplicates_detected_not_rejected() {
        let sel = DofSelection::from_flags(&[1, 1]).unwrap();
        assert!(sel.has_duplicates());
        assert!(!DofSelection::from_flags(&[0, 1, 2]).unwrap().has_duplicates());
    }

    #[test]
    fn component_names_follow_selection() {
        let sel = DofSelection::from_flags(&[1, 0]).unwrap();
        assert_eq!(
            sel.component_names("displacement-"),
            vec!["displacement-y", "displacement-x"]
        );
        assert_eq!(
            sel.component_names("displacement-rate-"),
            vec!["displacement-rate-y", "displacement-rate-x"]
        );
    }

    #[test]
    fn empty_selection() {
        let sel = DofSelection::from_flags(&[]).unwrap();
        assert!(sel.is_empty());
        assert_eq!(sel.max_flag(), None);
    }
}
