//! Trace of a multi-step cascade

use std::time::Duration;

use serde::Serialize;

use super::Outcome;

/// One level of a cascade
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CascadeStep {
    /// 1-based level number
    pub level: u8,
    /// Outcome of this level alone
    pub outcome: Outcome,
    /// Sum of requested delays up to and including this level
    #[serde(with = "crate::duration_secs")]
    pub cumulative_delay: Duration,
}

/// Ordered per-level outcomes plus running totals
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CascadeTrace {
    steps: Vec<CascadeStep>,
    #[serde(with = "crate::duration_secs")]
    total_delay: Duration,
    #[serde(with = "crate::duration_secs")]
    total_actual: Duration,
}

impl CascadeTrace {
    /// An empty trace
    #[must_use]
    pub const fn new() -> Self {
        Self {
            steps: Vec::new(),
            total_delay: Duration::ZERO,
            total_actual: Duration::ZERO,
        }
    }

    /// Append the next level, numbering it and updating totals
    pub fn push(&mut self, outcome: Outcome) {
        self.total_delay += outcome.delay_requested();
        self.total_actual += outcome.delay_actual();
        let level = u8::try_from(self.steps.len() + 1).unwrap_or(u8::MAX);
        self.steps.push(CascadeStep {
            level,
            outcome,
            cumulative_delay: self.total_delay,
        });
    }

    /// Levels in execution order
    #[must_use]
    pub fn steps(&self) -> &[CascadeStep] {
        &self.steps
    }

    /// Number of levels executed
    #[must_use]
    pub fn levels(&self) -> usize {
        self.steps.len()
    }

    /// Sum of scheduled delays
    #[must_use]
    pub const fn total_delay(&self) -> Duration {
        self.total_delay
    }

    /// Sum of measured delays
    #[must_use]
    pub const fn total_actual(&self) -> Duration {
        self.total_actual
    }

    /// True when every level succeeded
    #[must_use]
    pub fn succeeded(&self) -> bool {
        self.steps.iter().all(|s| s.outcome.succeeded())
    }
}
