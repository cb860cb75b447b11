//! Fixed delay value object

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use super::FieldConstraint;
use crate::errors::DomainError;

/// A whole number of seconds to wait, validated against a constraint
///
/// The upper bound is process configuration (`max_delay`), so the
/// constraint is passed in rather than hard-coded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct FixedDelay(u64);

impl FixedDelay {
    /// Create a fixed delay inside `constraint`
    pub fn new(secs: u64, constraint: &FieldConstraint<u64>) -> Result<Self, DomainError> {
        constraint.check(secs).map(Self)
    }

    /// Delay in whole seconds
    #[must_use]
    pub const fn secs(self) -> u64 {
        self.0
    }

    /// Delay as a `Duration`
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0)
    }
}

impl fmt::Display for FixedDelay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}s", self.0)
    }
}
