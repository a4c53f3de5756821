//! Scalar type and float checks shared by databases and boundary conditions.

use crate::error::{GbError, GbResult};

/// Floating point type for coordinates, parameters and times.
pub type Real = f64;

/// Absolute/relative tolerance pair for comparing computed values.
#[derive(Clone, Copy, Debug)]
pub struct Tolerances {
    pub abs: Real,
    pub rel: Real,
}

impl Default for Tolerances {
    fn default() -> Self {
        Self {
            abs: 1e-12,
            rel: 1e-9,
        }
    }
}

/// `a` and `b` agree within the absolute tolerance, or within the
/// relative tolerance of the larger magnitude.
pub fn nearly_equal(a: Real, b: Real, tol: Tolerances) -> bool {
    let diff = (a - b).abs();
    diff <= tol.abs || diff <= tol.rel * a.abs().max(b.abs())
}

/// Element-wise [`nearly_equal`]; slices of different length never match.
pub fn nearly_equal_slices(a: &[Real], b: &[Real], tol: Tolerances) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(&x, &y)| nearly_equal(x, y, tol))
}

pub fn ensure_finite(v: Real, what: &'static str) -> GbResult<Real> {
    if v.is_finite() {
        Ok(v)
    } else {
        Err(GbError::NonFinite { what, value: v })
    }
}

/// Every value of `values` is finite.
pub fn ensure_all_finite(values: &[Real], what: &'static str) -> GbResult<()> {
    match values.iter().find(|v| !v.is_finite()) {
        Some(&value) => Err(GbError::NonFinite { what, value }),
        None => Ok(()),
    }
}

/// Finite and strictly positive, as required of every reference scale.
pub fn ensure_positive(v: Real, what: &'static str) -> GbResult<Real> {
    let v = ensure_finite(v, what)?;
    if v > 0.0 {
        Ok(v)
    } else {
        Err(GbError::NonPositive { what, value: v })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tolerance_is_absolute_near_zero_and_relative_elsewhere() {
        let tol = Tolerances::default();
        assert!(nearly_equal(0.0, 1e-13, tol));
        assert!(!nearly_equal(0.0, 1e-10, tol));
        assert!(nearly_equal(1e6, 1e6 + 1e-4, tol));
        assert!(!nearly_equal(1.0, 1.0 + 1e-6, tol));
    }

    #[test]
    fn slices_compare_by_element() {
        let tol = Tolerances::default();
        assert!(nearly_equal_slices(&[1.0, 2.0], &[1.0, 2.0 + 1e-13], tol));
        assert!(!nearly_equal_slices(&[1.0, 2.0], &[1.0], tol));
        assert!(!nearly_equal_slices(&[1.0, 2.0], &[1.0, 2.1], tol));
    }

    #[test]
    fn non_finite_values_rejected() {
        let err = ensure_finite(Real::NAN, "rate").unwrap_err();
        assert!(err.to_string().contains("rate"));
        assert!(ensure_all_finite(&[1.0, -2.0], "coords").is_ok());
        assert!(matches!(
            ensure_all_finite(&[1.0, Real::INFINITY], "coords"),
            Err(GbError::NonFinite { what: "coords", .. })
        ));
    }

    #[test]
    fn ensure_positive_rejects_zero_and_negative() {
        assert_eq!(ensure_positive(2.0, "scale"), Ok(2.0));
        assert!(matches!(
            ensure_positive(0.0, "scale"),
            Err(GbError::NonPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(-1.0, "scale"),
            Err(GbError::NonPositive { .. })
        ));
        assert!(matches!(
            ensure_positive(Real::INFINITY, "scale"),
            Err(GbError::NonFinite { .. })
        ));
    }
}
