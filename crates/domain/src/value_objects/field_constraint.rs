//! Closed-interval constraint for a single named parameter
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::FieldConstraint;
//!
//! let levels = FieldConstraint::new("levels", 1_u64, 5, 3);
//! assert_eq!(levels.check(4).unwrap(), 4);
//! assert!(levels.check(6).is_err());
//! ```

use std::fmt::Display;

use serde::Serialize;

use crate::errors::DomainError;

/// Declared bounds and default for one caller-supplied field
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldConstraint<T> {
    /// Name the caller uses for the field (query parameter name)
    pub name: &'static str,
    /// Inclusive lower bound
    pub min: T,
    /// Inclusive upper bound
    pub max: T,
    /// Value used when the caller omits the field
    pub default: T,
}

impl<T> FieldConstraint<T>
where
    T: PartialOrd + Copy + Display,
{
    /// Declare a constraint
    pub const fn new(name: &'static str, min: T, max: T, default: T) -> Self {
        Self {
            name,
            min,
            max,
            default,
        }
    }

    /// Whether `value` lies inside `[min, max]`
    ///
    /// Values that do not compare (NaN) are never contained.
    pub fn contains(&self, value: T) -> bool {
        value >= self.min && value <= self.max
    }

    /// Return `value` unchanged if it is inside the interval
    ///
    /// Out-of-range values are rejected, never clamped.
    pub fn check(&self, value: T) -> Result<T, DomainError> {
        if self.contains(value) {
            Ok(value)
        } else {
            Err(DomainError::out_of_range(
                self.name, value, self.min, self.max,
            ))
        }
    }

    /// Replace the default, keeping the bounds
    #[must_use]
    pub const fn with_default(mut self, default: T) -> Self {
        self.default = default;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds_are_inclusive() {
        let c = FieldConstraint::new("delay", 1_u64, 30, 3);
        assert!(c.contains(1));
        assert!(c.contains(30));
        assert!(!c.contains(0));
        assert!(!c.contains(31));
    }

    #[test]
    fn check_rejects_without_clamping() {
        let c = FieldConstraint::new("failure_rate", 0.0_f64, 1.0, 0.0);
        let err = c.check(1.5).unwrap_err();
        assert_eq!(
            err,
            DomainError::out_of_range("failure_rate", 1.5, 0.0, 1.0)
        );
    }

    #[test]
    fn nan_is_never_contained() {
        let c = FieldConstraint::new("failure_rate", 0.0_f64, 1.0, 0.0);
        assert!(!c.contains(f64::NAN));
        assert!(c.check(f64::NAN).is_err());
    }

    #[test]
    fn with_default_keeps_bounds() {
        let c = FieldConstraint::new("delay", 1_u64, 30, 5).with_default(3);
        assert_eq!(c.default, 3);
        assert_eq!(c.min, 1);
        assert_eq!(c.max, 30);
    }
}
