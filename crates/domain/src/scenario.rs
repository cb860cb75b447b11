//! Fault scenarios exposed by the service

use std::fmt;

use serde::Serialize;

/// A fault-injection operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Wait exactly the requested number of seconds
    Slow,
    /// Wait a uniformly random time inside a range
    Random,
    /// Wait, then fail with a given probability
    SometimesFail,
    /// Hang for a long fixed time
    TimeoutTrap,
    /// Fail immediately as if in an outage
    BurstError,
    /// Several random waits in sequence
    Cascade,
}

impl Scenario {
    /// All scenarios in endpoint order
    pub const ALL: [Self; 6] = [
        Self::Slow,
        Self::Random,
        Self::SometimesFail,
        Self::TimeoutTrap,
        Self::BurstError,
        Self::Cascade,
    ];

    /// Stable label for logs and metrics
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Random => "random",
            Self::SometimesFail => "sometimes_fail",
            Self::TimeoutTrap => "timeout_trap",
            Self::BurstError => "burst_error",
            Self::Cascade => "cascade",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
