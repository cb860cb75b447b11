//! Outcome of one simulated request

use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::value_objects::{BurstDuration, FailureProbability};

/// Why a simulated request failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// Probabilistic failure decided by a draw
    RandomFailure,
    /// Sustained outage window
    ServiceUnavailable,
}

/// Structured reason attached to every failed outcome
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ErrorDetail {
    /// Failure category
    pub kind: FailureKind,
    /// Short error title
    pub error: String,
    /// Human readable explanation
    pub message: String,
    /// Probability that produced a random failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_rate: Option<f64>,
    /// Seconds the caller should wait before retrying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u32>,
}

impl ErrorDetail {
    /// Detail for a probabilistic failure
    #[must_use]
    pub fn random_failure(probability: FailureProbability) -> Self {
        Self {
            kind: FailureKind::RandomFailure,
            error: "Internal Server Error".to_string(),
            message: "Random failure occurred".to_string(),
            failure_rate: Some(probability.value()),
            retry_after: None,
        }
    }

    /// Detail for a sustained outage with a retry-after hint
    #[must_use]
    pub fn service_unavailable(window: BurstDuration) -> Self {
        Self {
            kind: FailureKind::ServiceUnavailable,
            error: "Service Unavailable".to_string(),
            message: "Service is temporarily degraded".to_string(),
            failure_rate: None,
            retry_after: Some(window.secs()),
        }
    }
}

/// Timing and success of one simulated request
///
/// `error_detail` is present iff `succeeded` is false; the constructors are
/// the only way to build an outcome.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Outcome {
    succeeded: bool,
    #[serde(with = "crate::duration_secs")]
    delay_requested: Duration,
    #[serde(with = "crate::duration_secs")]
    delay_actual: Duration,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_detail: Option<ErrorDetail>,
    timestamp: DateTime<Utc>,
}

impl Outcome {
    /// A successful outcome
    #[must_use]
    pub const fn success(
        delay_requested: Duration,
        delay_actual: Duration,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            succeeded: true,
            delay_requested,
            delay_actual,
            error_detail: None,
            timestamp,
        }
    }

    /// A failed outcome carrying its reason
    #[must_use]
    pub const fn failure(
        delay_requested: Duration,
        delay_actual: Duration,
        detail: ErrorDetail,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            succeeded: false,
            delay_requested,
            delay_actual,
            error_detail: Some(detail),
            timestamp,
        }
    }

    /// Whether the simulated request succeeded
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.succeeded
    }

    /// Delay the policy scheduled
    #[must_use]
    pub const fn delay_requested(&self) -> Duration {
        self.delay_requested
    }

    /// Delay measured across the suspension
    #[must_use]
    pub const fn delay_actual(&self) -> Duration {
        self.delay_actual
    }

    /// Failure reason, `None` on success
    #[must_use]
    pub const fn error_detail(&self) -> Option<&ErrorDetail> {
        self.error_detail.as_ref()
    }

    /// Completion instant
    #[must_use]
    pub const fn timestamp(&self) -> DateTime<Utc> {
        self.timestamp
    }

    /// How much longer the suspension took than scheduled
    #[must_use]
    pub const fn overshoot(&self) -> Duration {
        self.delay_actual.saturating_sub(self.delay_requested)
    }
}
