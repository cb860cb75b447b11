//! Process-wide counters snapshot

use serde::Serialize;

/// Read-only view of the invocation counter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ServiceCounters {
    /// Fault-injection invocations since process start
    pub total_requests: u64,
}

impl ServiceCounters {
    /// Snapshot with the given count
    #[must_use]
    pub const fn new(total_requests: u64) -> Self {
        Self { total_requests }
    }
}
