//! Fault-injection handlers
//!
//! Each handler validates its query, runs the matching policy-engine
//! operation and shapes the outcome. Durations go out as seconds rounded to
//! three decimals.

use std::time::Duration;

use axum::{
    Json,
    extract::State,
    http::{HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::{DateTime, Utc};
use domain::{ErrorDetail, FailureKind, Outcome, Scenario};
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

use crate::{error::ApiError, extract::ValidatedQuery, state::AppState};

/// Round to millisecond precision
fn round3(secs: f64) -> f64 {
    (secs * 1000.0).round() / 1000.0
}

fn secs(duration: Duration) -> f64 {
    round3(duration.as_secs_f64())
}

// ============================================================================
// Simulated failures
// ============================================================================

/// Body of a simulated failure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FailureResponse {
    /// What went wrong
    pub detail: FailureDetail,
}

/// Details of a simulated failure
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct FailureDetail {
    /// Short error title
    pub error: String,
    /// Human readable explanation
    pub message: String,
    /// Probability that produced a random failure
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failure_rate: Option<f64>,
    /// Seconds to wait before retrying
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u32>,
    /// When the failure was decided
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

/// A failed outcome rendered as an HTTP error
#[derive(Debug, Clone)]
pub struct SimulatedFailure {
    status: StatusCode,
    body: FailureResponse,
}

impl SimulatedFailure {
    /// Build the response for a failed outcome's detail
    pub fn new(detail: &ErrorDetail, timestamp: DateTime<Utc>) -> Self {
        let (status, timestamp) = match detail.kind {
            FailureKind::RandomFailure => (StatusCode::INTERNAL_SERVER_ERROR, Some(timestamp)),
            FailureKind::ServiceUnavailable => (StatusCode::SERVICE_UNAVAILABLE, None),
        };
        Self {
            status,
            body: FailureResponse {
                detail: FailureDetail {
                    error: detail.error.clone(),
                    message: detail.message.clone(),
                    failure_rate: detail.failure_rate,
                    retry_after: detail.retry_after,
                    timestamp,
                },
            },
        }
    }

    /// HTTP status of the failure
    pub const fn status(&self) -> StatusCode {
        self.status
    }
}

impl IntoResponse for SimulatedFailure {
    fn into_response(self) -> Response {
        let retry_after = self.body.detail.retry_after;
        let mut response = (self.status, Json(self.body)).into_response();
        if let Some(secs) = retry_after {
            response
                .headers_mut()
                .insert(header::RETRY_AFTER, HeaderValue::from(secs));
        }
        response
    }
}

/// Render a failed outcome, if it failed
fn failure_of(outcome: &Outcome) -> Option<SimulatedFailure> {
    outcome
        .error_detail()
        .map(|detail| SimulatedFailure::new(detail, outcome.timestamp()))
}

// ============================================================================
// /slow
// ============================================================================

/// Query for `/slow`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SlowQuery {
    /// Delay in seconds, `1..=max_delay`
    pub delay: Option<String>,
}

/// Response of `/slow`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SlowResponse {
    pub status: String,
    /// Delay the caller asked for, in seconds
    pub requested_delay: u64,
    /// Measured wait, in seconds
    pub actual_duration: f64,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Respond after exactly the requested delay
#[utoipa::path(
    get,
    path = "/slow",
    tag = "faults",
    params(SlowQuery),
    responses(
        (status = 200, description = "Delayed response", body = SlowResponse),
        (status = 422, description = "Invalid delay", body = crate::error::ErrorResponse)
    )
)]
pub async fn slow(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SlowQuery>,
) -> Result<Json<SlowResponse>, ApiError> {
    let delay = state.validator.slow(query.delay.as_deref())?;
    let outcome = state.faults.fixed_delay(delay).await;
    state.metrics.record_outcome(Scenario::Slow, outcome.succeeded());

    Ok(Json(SlowResponse {
        status: "success".to_string(),
        requested_delay: delay.secs(),
        actual_duration: secs(outcome.delay_actual()),
        timestamp: outcome.timestamp(),
        message: format!("Responded after {} seconds", delay.secs()),
    }))
}

// ============================================================================
// /random
// ============================================================================

/// Query for `/random`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RandomQuery {
    /// Lower bound in seconds, `0..=10`
    pub min_delay: Option<String>,
    /// Upper bound in seconds, `1..=30`
    pub max_delay: Option<String>,
}

/// Echo of the range a random delay was drawn from
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct DelayRangeBody {
    pub min: f64,
    pub max: f64,
}

/// Response of `/random`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct RandomResponse {
    pub status: String,
    /// Drawn delay, in seconds
    pub delay_seconds: f64,
    /// Measured wait, in seconds
    pub actual_duration: f64,
    pub range: DelayRangeBody,
    pub timestamp: DateTime<Utc>,
    pub message: String,
}

/// Respond after a uniformly random delay
#[utoipa::path(
    get,
    path = "/random",
    tag = "faults",
    params(RandomQuery),
    responses(
        (status = 200, description = "Delayed response", body = RandomResponse),
        (status = 422, description = "Invalid range", body = crate::error::ErrorResponse)
    )
)]
pub async fn random(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<RandomQuery>,
) -> Result<Json<RandomResponse>, ApiError> {
    let range = state
        .validator
        .random(query.min_delay.as_deref(), query.max_delay.as_deref())?;
    let outcome = state.faults.random_delay(range).await;
    state.metrics.record_outcome(Scenario::Random, outcome.succeeded());

    let delay = secs(outcome.delay_requested());
    Ok(Json(RandomResponse {
        status: "success".to_string(),
        delay_seconds: delay,
        actual_duration: secs(outcome.delay_actual()),
        range: DelayRangeBody {
            min: range.lo(),
            max: range.hi(),
        },
        timestamp: outcome.timestamp(),
        message: format!("Responded after {delay} seconds"),
    }))
}

// ============================================================================
// /sometimes-fail
// ============================================================================

/// Query for `/sometimes-fail`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SometimesFailQuery {
    /// Probability of failure, `0.0..=1.0`
    pub failure_rate: Option<String>,
    /// Delay before deciding, `0..=10` seconds
    pub delay: Option<String>,
}

/// Success response of `/sometimes-fail`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SometimesFailResponse {
    pub status: String,
    pub message: String,
    pub failure_rate: f64,
    pub delay_seconds: u64,
    /// Measured wait, in seconds
    pub actual_duration: f64,
    pub timestamp: DateTime<Utc>,
}

/// Wait, then fail with the given probability
#[utoipa::path(
    get,
    path = "/sometimes-fail",
    tag = "faults",
    params(SometimesFailQuery),
    responses(
        (status = 200, description = "Request succeeded", body = SometimesFailResponse),
        (status = 422, description = "Invalid parameters", body = crate::error::ErrorResponse),
        (status = 500, description = "Simulated failure", body = FailureResponse)
    )
)]
pub async fn sometimes_fail(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<SometimesFailQuery>,
) -> Result<Response, ApiError> {
    let (probability, delay) = state
        .validator
        .sometimes_fail(query.failure_rate.as_deref(), query.delay.as_deref())?;
    let outcome = state.faults.probabilistic_failure(probability, delay).await;
    state
        .metrics
        .record_outcome(Scenario::SometimesFail, outcome.succeeded());

    if let Some(failure) = failure_of(&outcome) {
        return Ok(failure.into_response());
    }

    Ok(Json(SometimesFailResponse {
        status: "success".to_string(),
        message: "Request succeeded".to_string(),
        failure_rate: probability.value(),
        delay_seconds: delay.secs(),
        actual_duration: secs(outcome.delay_actual()),
        timestamp: outcome.timestamp(),
    })
    .into_response())
}

// ============================================================================
// /timeout-trap
// ============================================================================

/// Response of `/timeout-trap`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct TimeoutTrapResponse {
    pub status: String,
    pub message: String,
    /// Measured wait, in seconds
    pub actual_duration: f64,
    pub timestamp: DateTime<Utc>,
}

/// Hang for the configured trap duration before answering
#[utoipa::path(
    get,
    path = "/timeout-trap",
    tag = "faults",
    responses(
        (status = 200, description = "Completed after the full hang", body = TimeoutTrapResponse)
    )
)]
pub async fn timeout_trap(State(state): State<AppState>) -> Json<TimeoutTrapResponse> {
    let outcome = state.faults.timeout_trap().await;
    state
        .metrics
        .record_outcome(Scenario::TimeoutTrap, outcome.succeeded());

    Json(TimeoutTrapResponse {
        status: "completed".to_string(),
        message: format!(
            "You actually waited {} seconds!",
            outcome.delay_requested().as_secs()
        ),
        actual_duration: secs(outcome.delay_actual()),
        timestamp: outcome.timestamp(),
    })
}

// ============================================================================
// /burst-error
// ============================================================================

/// Query for `/burst-error`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct BurstErrorQuery {
    /// Retry-after hint in seconds, `1..=300`
    pub error_duration: Option<String>,
}

/// Fail immediately as if the service were degraded
#[utoipa::path(
    get,
    path = "/burst-error",
    tag = "faults",
    params(BurstErrorQuery),
    responses(
        (status = 422, description = "Invalid duration", body = crate::error::ErrorResponse),
        (status = 503, description = "Simulated outage", body = FailureResponse,
            headers(("Retry-After" = u32, description = "Seconds until retry")))
    )
)]
pub async fn burst_error(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<BurstErrorQuery>,
) -> Result<Response, ApiError> {
    let window = state.validator.burst(query.error_duration.as_deref())?;
    let outcome = state.faults.burst_error(window).await;
    state
        .metrics
        .record_outcome(Scenario::BurstError, outcome.succeeded());

    failure_of(&outcome)
        .map(IntoResponse::into_response)
        .ok_or_else(|| ApiError::Internal("burst error produced a successful outcome".to_string()))
}

// ============================================================================
// /cascade
// ============================================================================

/// Query for `/cascade`
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct CascadeQuery {
    /// Number of sequential steps, `1..=5`
    pub levels: Option<String>,
}

/// One executed cascade level
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CascadeLevelBody {
    pub level: u8,
    /// Drawn delay, in seconds
    pub delay: f64,
}

/// Response of `/cascade`
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CascadeResponse {
    pub status: String,
    pub total_levels: usize,
    /// Sum of drawn delays, in seconds
    pub total_delay: f64,
    pub cascade_results: Vec<CascadeLevelBody>,
}

/// Run several random delays strictly in sequence
#[utoipa::path(
    get,
    path = "/cascade",
    tag = "faults",
    params(CascadeQuery),
    responses(
        (status = 200, description = "All levels completed", body = CascadeResponse),
        (status = 422, description = "Invalid level count", body = crate::error::ErrorResponse)
    )
)]
pub async fn cascade(
    State(state): State<AppState>,
    ValidatedQuery(query): ValidatedQuery<CascadeQuery>,
) -> Result<Json<CascadeResponse>, ApiError> {
    let levels = state.validator.cascade(query.levels.as_deref())?;
    let trace = state.faults.cascade(levels).await;
    state
        .metrics
        .record_outcome(Scenario::Cascade, trace.succeeded());

    Ok(Json(CascadeResponse {
        status: "success".to_string(),
        total_levels: trace.levels(),
        total_delay: secs(trace.total_delay()),
        cascade_results: trace
            .steps()
            .iter()
            .map(|step| CascadeLevelBody {
                level: step.level,
                delay: secs(step.outcome.delay_requested()),
            })
            .collect(),
    }))
}
