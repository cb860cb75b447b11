//! Delay scheduler on the tokio timer

use std::time::Duration;

use application::ports::DelayScheduler;
use async_trait::async_trait;
use tokio::time::Instant;
use tracing::trace;

/// Suspends the current task with `tokio::time::sleep`
///
/// Elapsed time is measured on tokio's monotonic clock, so it follows paused
/// time in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioDelayScheduler;

impl TokioDelayScheduler {
    /// Create a new scheduler
    pub const fn new() -> Self {
        Self
    }
}

#[async_trait]
impl DelayScheduler for TokioDelayScheduler {
    async fn suspend(&self, delay: Duration) -> Duration {
        let start = Instant::now();
        tokio::time::sleep(delay).await;
        let elapsed = start.elapsed();
        trace!(?delay, ?elapsed, "Suspension finished");
        elapsed
    }
}
