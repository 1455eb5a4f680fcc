//! Helper functions for materials
//!
//! Guarded arithmetic and plausibility checks shared by the shear model and
//! the viscoelastic references.

use crate::error::ModelError;

/// Exact zero check inverse (prevents NaN from division by zero)
#[inline(always)]
pub fn inv_exact(e: f64) -> f64 {
    if e == 0.0 { 0.0 } else { 1.0 / e }
}

/// Check if input values make sense
pub mod check {
    #[inline]
    pub fn finite(value: f64) -> bool {
        value.is_finite()
    }

    /// Frequency and amplitude may be zero (no vibration) but never negative
    #[inline]
    pub fn non_negative(value: f64) -> bool {
        value >= 0.0 && value.is_finite()
    }

    /// Thickness, viscosity, density and elastic moduli
    #[inline]
    pub fn positive(value: f64) -> bool {
        value > 0.0 && value.is_finite()
    }
}

/// Reject NaN and ±∞, including results that overflowed.
pub fn require_finite(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !check::finite(value) {
        return Err(ModelError::NonFinite { name, value });
    }
    Ok(value)
}

/// Reject non-finite or negative values.
pub fn require_non_negative(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !check::finite(value) {
        return Err(ModelError::NonFinite { name, value });
    }
    if !check::non_negative(value) {
        return Err(ModelError::Negative { name, value });
    }
    Ok(value)
}

/// Reject non-finite, zero or negative values.
pub fn require_positive(name: &'static str, value: f64) -> Result<f64, ModelError> {
    if !check::finite(value) {
        return Err(ModelError::NonFinite { name, value });
    }
    if !check::positive(value) {
        return Err(ModelError::NonPositive { name, value });
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inv_exact_guards_zero() {
        assert_eq!(inv_exact(0.0), 0.0);
        assert_eq!(inv_exact(4.0), 0.25);
    }

    #[test]
    fn require_positive_rejects_zero_and_nan() {
        assert!(matches!(
            require_positive("density", 0.0),
            Err(ModelError::NonPositive { name: "density", .. })
        ));
        assert!(matches!(
            require_positive("density", f64::NAN),
            Err(ModelError::NonFinite { .. })
        ));
        assert_eq!(require_positive("density", 1000.0), Ok(1000.0));
    }

    #[test]
    fn require_non_negative_accepts_zero() {
        assert_eq!(require_non_negative("frequency", 0.0), Ok(0.0));
        assert!(matches!(
            require_non_negative("frequency", -1.0),
            Err(ModelError::Negative { .. })
        ));
        assert!(matches!(
            require_non_negative("frequency", f64::INFINITY),
            Err(ModelError::NonFinite { .. })
        ));
    }

    #[test]
    fn require_finite_rejects_overflow() {
        assert!(matches!(
            require_finite("acceleration", f64::MAX * 2.0),
            Err(ModelError::NonFinite { name: "acceleration", .. })
        ));
        assert_eq!(require_finite("acceleration", -3.0), Ok(-3.0));
    }

    #[test]
    fn checks_match_physical_ranges() {
        assert!(check::positive(5.0));
        assert!(!check::positive(-1.0));
        assert!(!check::positive(0.0));
        assert!(!check::positive(f64::INFINITY));
    }
}
