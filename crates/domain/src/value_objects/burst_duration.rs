//! Outage window length value object

use std::time::Duration;

use serde::Serialize;

use crate::errors::DomainError;

/// Seconds a simulated outage is announced to last, in `[1, 300]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct BurstDuration(u32);

impl BurstDuration {
    /// Field name used in errors
    pub const FIELD: &'static str = "error_duration";
    /// Shortest outage
    pub const MIN: u32 = 1;
    /// Longest outage
    pub const MAX: u32 = 300;
    /// Outage length used when the caller does not choose one
    pub const DEFAULT: u32 = 30;

    /// Create an outage length
    pub fn new(secs: u64) -> Result<Self, DomainError> {
        u32::try_from(secs)
            .ok()
            .filter(|s| (Self::MIN..=Self::MAX).contains(s))
            .map(Self)
            .ok_or_else(|| DomainError::out_of_range(Self::FIELD, secs, Self::MIN, Self::MAX))
    }

    /// Length in whole seconds
    #[must_use]
    pub const fn secs(self) -> u32 {
        self.0
    }

    /// Length as a `Duration`
    #[must_use]
    pub const fn as_duration(self) -> Duration {
        Duration::from_secs(self.0 as u64)
    }
}

impl Default for BurstDuration {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}
