//! Random delay range value object
//!
//! # Examples
//!
//! ```
//! use std::time::Duration;
//! use domain::value_objects::DelayRange;
//!
//! let range = DelayRange::new(1.0, 3.0).expect("valid range");
//! assert_eq!(range.sample(0.5), Duration::from_secs(2));
//!
//! // Reversed bounds are rejected, not swapped
//! assert!(DelayRange::new(3.0, 1.0).is_err());
//! ```

use std::time::Duration;

use serde::Serialize;

use crate::errors::DomainError;

/// Closed interval `[lo, hi]` of non-negative seconds
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DelayRange {
    lo: f64,
    hi: f64,
}

impl DelayRange {
    /// Field name used for the lower bound in errors
    pub const LOWER_FIELD: &'static str = "min_delay";
    /// Field name used for the upper bound in errors
    pub const UPPER_FIELD: &'static str = "max_delay";
    /// Per-level delay range of a cascade
    pub const CASCADE_STEP: Self = Self { lo: 0.5, hi: 2.0 };

    /// Create a range, reporting errors against the default field names
    pub fn new(lo: f64, hi: f64) -> Result<Self, DomainError> {
        Self::with_fields(lo, hi, Self::LOWER_FIELD, Self::UPPER_FIELD)
    }

    /// Create a range, reporting errors against the given field names
    ///
    /// Each bound must be finite and non-negative; `lo > hi` is an
    /// [`DomainError::InvalidRange`] so callers can tell it apart from a
    /// single-field bound violation.
    pub fn with_fields(
        lo: f64,
        hi: f64,
        lower_field: &str,
        upper_field: &str,
    ) -> Result<Self, DomainError> {
        if !lo.is_finite() || lo < 0.0 {
            return Err(DomainError::out_of_range(lower_field, lo, 0, "inf"));
        }
        if !hi.is_finite() || hi < 0.0 {
            return Err(DomainError::out_of_range(upper_field, hi, 0, "inf"));
        }
        if lo > hi {
            return Err(DomainError::invalid_range(lower_field, lo, upper_field, hi));
        }
        Ok(Self { lo, hi })
    }

    /// Lower bound in seconds
    #[must_use]
    pub const fn lo(&self) -> f64 {
        self.lo
    }

    /// Upper bound in seconds
    #[must_use]
    pub const fn hi(&self) -> f64 {
        self.hi
    }

    /// Map a unit draw in `[0, 1]` onto the range
    ///
    /// Draws outside the unit interval are clamped so the result always
    /// lies in `[lo, hi]`.
    #[must_use]
    pub fn sample(&self, unit: f64) -> Duration {
        let unit = if unit.is_nan() { 0.0 } else { unit.clamp(0.0, 1.0) };
        let secs = (self.hi - self.lo).mul_add(unit, self.lo);
        Duration::from_secs_f64(secs.clamp(self.lo, self.hi))
    }
}
