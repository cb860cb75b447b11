//! Metrics and observability handlers
//!
//! Provides endpoints for collecting and exposing request and fault-injection
//! metrics in a structured format suitable for monitoring systems.

use std::{
    sync::atomic::{AtomicU64, Ordering},
    time::Instant,
};

use axum::{Json, extract::State};
use domain::Scenario;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Metrics response containing all application metrics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct MetricsResponse {
    /// Application metadata
    pub app: AppMetrics,
    /// Request statistics
    pub requests: RequestMetrics,
    /// Per-scenario fault statistics
    pub faults: Vec<ScenarioMetrics>,
}

/// Application metadata
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AppMetrics {
    /// Application version
    pub version: String,
    /// Application name
    pub name: String,
    /// Uptime in seconds
    pub uptime_seconds: u64,
}

/// Request statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct RequestMetrics {
    /// Total requests received
    pub total_requests: u64,
    /// Successful requests (2xx)
    pub success_count: u64,
    /// Client errors (4xx)
    pub client_error_count: u64,
    /// Server errors (5xx), simulated ones included
    pub server_error_count: u64,
    /// Average response time in milliseconds
    pub avg_response_time_ms: f64,
    /// Current active requests
    pub active_requests: u64,
}

/// Outcome counts for one scenario
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ScenarioMetrics {
    /// Scenario label
    pub scenario: String,
    /// Completed invocations
    pub invocations: u64,
    /// Invocations that ended in a simulated failure
    pub failures: u64,
}

#[derive(Debug, Default)]
struct ScenarioCounters {
    invocations: AtomicU64,
    failures: AtomicU64,
}

/// Atomic counters for request metrics
#[derive(Debug)]
pub struct MetricsCollector {
    /// Server start time
    start_time: Instant,
    /// Total requests
    total_requests: AtomicU64,
    /// Successful requests
    success_count: AtomicU64,
    /// Client errors
    client_error_count: AtomicU64,
    /// Server errors
    server_error_count: AtomicU64,
    /// Active requests
    active_requests: AtomicU64,
    /// Total response time in microseconds
    total_response_time_us: AtomicU64,
    /// Indexed by `Scenario as usize`
    scenarios: [ScenarioCounters; Scenario::ALL.len()],
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}

impl MetricsCollector {
    /// Create a new metrics collector
    #[must_use]
    pub fn new() -> Self {
        Self {
            start_time: Instant::now(),
            total_requests: AtomicU64::new(0),
            success_count: AtomicU64::new(0),
            client_error_count: AtomicU64::new(0),
            server_error_count: AtomicU64::new(0),
            active_requests: AtomicU64::new(0),
            total_response_time_us: AtomicU64::new(0),
            scenarios: Default::default(),
        }
    }

    /// Record start of a request
    pub fn request_start(&self) {
        self.total_requests.fetch_add(1, Ordering::Relaxed);
        self.active_requests.fetch_add(1, Ordering::Relaxed);
    }

    /// Record end of a request
    pub fn request_end(&self, response_time_us: u64, status_code: u16) {
        self.active_requests.fetch_sub(1, Ordering::Relaxed);
        self.total_response_time_us
            .fetch_add(response_time_us, Ordering::Relaxed);

        match status_code {
            200..=299 => {
                self.success_count.fetch_add(1, Ordering::Relaxed);
            },
            400..=499 => {
                self.client_error_count.fetch_add(1, Ordering::Relaxed);
            },
            500..=599 => {
                self.server_error_count.fetch_add(1, Ordering::Relaxed);
            },
            _ => {},
        }
    }

    /// Record a completed fault-injection outcome
    pub fn record_outcome(&self, scenario: Scenario, succeeded: bool) {
        let counters = &self.scenarios[scenario as usize];
        counters.invocations.fetch_add(1, Ordering::Relaxed);
        if !succeeded {
            counters.failures.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Get uptime in seconds
    #[must_use]
    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Get request metrics
    #[must_use]
    pub fn request_metrics(&self) -> RequestMetrics {
        let total = self.total_requests.load(Ordering::Relaxed);
        let total_time = self.total_response_time_us.load(Ordering::Relaxed);

        RequestMetrics {
            total_requests: total,
            success_count: self.success_count.load(Ordering::Relaxed),
            client_error_count: self.client_error_count.load(Ordering::Relaxed),
            server_error_count: self.server_error_count.load(Ordering::Relaxed),
            #[allow(clippy::cast_precision_loss)]
            avg_response_time_ms: if total > 0 {
                (total_time as f64) / (total as f64) / 1000.0
            } else {
                0.0
            },
            active_requests: self.active_requests.load(Ordering::Relaxed),
        }
    }

    /// Get per-scenario metrics in endpoint order
    #[must_use]
    pub fn scenario_metrics(&self) -> Vec<ScenarioMetrics> {
        Scenario::ALL
            .iter()
            .map(|&scenario| {
                let counters = &self.scenarios[scenario as usize];
                ScenarioMetrics {
                    scenario: scenario.as_str().to_string(),
                    invocations: counters.invocations.load(Ordering::Relaxed),
                    failures: counters.failures.load(Ordering::Relaxed),
                }
            })
            .collect()
    }
}

/// Get metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics",
    tag = "metrics",
    responses(
        (status = 200, description = "Application metrics", body = MetricsResponse)
    )
)]
pub async fn get_metrics(State(state): State<AppState>) -> Json<MetricsResponse> {
    let metrics = state.metrics.as_ref();

    Json(MetricsResponse {
        app: AppMetrics {
            version: env!("CARGO_PKG_VERSION").to_string(),
            name: crate::SERVICE_NAME.to_string(),
            uptime_seconds: metrics.uptime_seconds(),
        },
        requests: metrics.request_metrics(),
        faults: metrics.scenario_metrics(),
    })
}

/// Prometheus-style metrics endpoint
#[utoipa::path(
    get,
    path = "/metrics/prometheus",
    tag = "metrics",
    responses(
        (status = 200, description = "Prometheus metrics", content_type = "text/plain")
    )
)]
pub async fn get_metrics_prometheus(State(state): State<AppState>) -> String {
    let metrics = state.metrics.as_ref();
    let request_metrics = metrics.request_metrics();

    let mut output = String::new();

    // Application metrics
    output.push_str(&format!(
        "# HELP app_uptime_seconds Application uptime in seconds\n\
         # TYPE app_uptime_seconds counter\n\
         app_uptime_seconds {}\n\n",
        metrics.uptime_seconds()
    ));

    // Request metrics
    output.push_str(&format!(
        "# HELP http_requests_total Total HTTP requests\n\
         # TYPE http_requests_total counter\n\
         http_requests_total {}\n\n",
        request_metrics.total_requests
    ));

    output.push_str(&format!(
        "# HELP http_requests_success_total Successful HTTP requests\n\
         # TYPE http_requests_success_total counter\n\
         http_requests_success_total {}\n\n",
        request_metrics.success_count
    ));

    output.push_str(&format!(
        "# HELP http_requests_client_error_total Client error HTTP requests\n\
         # TYPE http_requests_client_error_total counter\n\
         http_requests_client_error_total {}\n\n",
        request_metrics.client_error_count
    ));

    output.push_str(&format!(
        "# HELP http_requests_server_error_total Server error HTTP requests\n\
         # TYPE http_requests_server_error_total counter\n\
         http_requests_server_error_total {}\n\n",
        request_metrics.server_error_count
    ));

    output.push_str(&format!(
        "# HELP http_requests_active Current active HTTP requests\n\
         # TYPE http_requests_active gauge\n\
         http_requests_active {}\n\n",
        request_metrics.active_requests
    ));

    output.push_str(&format!(
        "# HELP http_response_time_avg_ms Average response time in milliseconds\n\
         # TYPE http_response_time_avg_ms gauge\n\
         http_response_time_avg_ms {:.2}\n\n",
        request_metrics.avg_response_time_ms
    ));

    // Fault metrics
    output.push_str(
        "# HELP fault_invocations_total Completed fault-injection invocations\n\
         # TYPE fault_invocations_total counter\n",
    );
    for scenario in metrics.scenario_metrics() {
        output.push_str(&format!(
            "fault_invocations_total{{scenario=\"{}\"}} {}\n",
            scenario.scenario, scenario.invocations
        ));
    }
    output.push('\n');

    output.push_str(
        "# HELP fault_failures_total Simulated failures returned\n\
         # TYPE fault_failures_total counter\n",
    );
    for scenario in metrics.scenario_metrics() {
        output.push_str(&format!(
            "fault_failures_total{{scenario=\"{}\"}} {}\n",
            scenario.scenario, scenario.failures
        ));
    }

    output
}
