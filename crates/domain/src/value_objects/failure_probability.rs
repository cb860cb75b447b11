//! Failure probability value object
//!
//! # Examples
//!
//! ```
//! use domain::value_objects::FailureProbability;
//!
//! let p = FailureProbability::new(0.25).expect("valid probability");
//! assert!(p.decide(0.1));
//! assert!(!p.decide(0.9));
//!
//! assert!(!FailureProbability::NEVER.decide(0.0));
//! assert!(FailureProbability::ALWAYS.decide(1.0));
//! ```

use std::fmt;

use serde::Serialize;

use crate::errors::DomainError;

/// Probability in `[0, 1]` that a simulated request fails
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct FailureProbability(f64);

impl FailureProbability {
    /// Field name used in errors
    pub const FIELD: &'static str = "failure_rate";
    /// Never fail
    pub const NEVER: Self = Self(0.0);
    /// Always fail
    pub const ALWAYS: Self = Self(1.0);

    /// Create a probability, rejecting anything outside `[0, 1]` or NaN
    pub fn new(value: f64) -> Result<Self, DomainError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(DomainError::out_of_range(Self::FIELD, value, 0.0, 1.0))
        }
    }

    /// Raw probability
    #[must_use]
    pub const fn value(self) -> f64 {
        self.0
    }

    /// Decide whether a request fails given a uniform draw
    ///
    /// Edges are inclusive of their intent: `p = 0` never fails for any draw
    /// (including exactly 0), `p = 1` always fails for any draw (including
    /// exactly 1). In between the request fails iff `draw < p`.
    #[must_use]
    pub fn decide(self, draw: f64) -> bool {
        if self.0 <= 0.0 {
            return false;
        }
        if self.0 >= 1.0 {
            return true;
        }
        draw < self.0
    }
}

impl Default for FailureProbability {
    fn default() -> Self {
        Self::NEVER
    }
}

impl fmt::Display for FailureProbability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
