//! Randomness port
//!
//! The policy engine never touches ambient global randomness; every draw goes
//! through this port so tests can pin the sequence with a seed.

#[cfg(test)]
use mockall::automock;

/// Source of uniform draws
#[cfg_attr(test, automock)]
pub trait RandomSource: Send + Sync {
    /// Next uniform draw in `[0, 1)`
    fn next_unit(&self) -> f64;
}
