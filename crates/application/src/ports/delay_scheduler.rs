//! Suspension port
//!
//! Delays are an explicit "await this duration" step so tests can swap in a
//! virtual clock instead of waiting on the wall clock.

use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;

/// Scheduler that suspends the calling task
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DelayScheduler: Send + Sync {
    /// Suspend for `delay` and return the elapsed time measured on a
    /// monotonic clock around the suspension only
    ///
    /// Implementations must never return less than `delay` and must not
    /// support early cancellation.
    async fn suspend(&self, delay: Duration) -> Duration;
}
