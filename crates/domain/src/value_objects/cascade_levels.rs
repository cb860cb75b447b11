//! Cascade depth value object

use serde::Serialize;

use crate::errors::DomainError;

/// Number of sequential slow steps in a cascade, in `[1, 5]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct CascadeLevels(u8);

impl CascadeLevels {
    /// Field name used in errors
    pub const FIELD: &'static str = "levels";
    /// Minimum depth
    pub const MIN: u8 = 1;
    /// Maximum depth
    pub const MAX: u8 = 5;
    /// Depth used when the caller does not choose one
    pub const DEFAULT: u8 = 3;

    /// Create a cascade depth
    pub fn new(levels: u64) -> Result<Self, DomainError> {
        u8::try_from(levels)
            .ok()
            .filter(|l| (Self::MIN..=Self::MAX).contains(l))
            .map(Self)
            .ok_or_else(|| DomainError::out_of_range(Self::FIELD, levels, Self::MIN, Self::MAX))
    }

    /// Depth as a count
    #[must_use]
    pub const fn get(self) -> u8 {
        self.0
    }
}

impl Default for CascadeLevels {
    fn default() -> Self {
        Self(Self::DEFAULT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_one_through_five() {
        for n in 1..=5 {
            assert_eq!(u64::from(CascadeLevels::new(n).unwrap().get()), n);
        }
    }

    #[test]
    fn rejects_zero_and_six() {
        assert!(CascadeLevels::new(0).is_err());
        assert!(CascadeLevels::new(6).is_err());
    }

    #[test]
    fn rejects_values_that_overflow_u8() {
        let err = CascadeLevels::new(257).unwrap_err();
        assert_eq!(err.to_string(), "levels must be between 1 and 5, got 257");
    }

    #[test]
    fn default_is_three() {
        assert_eq!(CascadeLevels::default().get(), 3);
    }
}
