//! Service metadata handlers

use std::collections::BTreeMap;

use application::{FaultDefaults, PolicySettings};
use axum::{Json, extract::State};
use domain::Scenario;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{SERVICE_NAME, routes::scenario_path, state::AppState};

/// Service information
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ServiceInfo {
    pub service: String,
    pub version: String,
    pub status: String,
    pub purpose: String,
    /// Path to one-line description
    pub endpoints: BTreeMap<String, String>,
}

/// One-line description of a scenario under the running settings
fn describe(scenario: Scenario, settings: &PolicySettings) -> String {
    match scenario {
        Scenario::Slow => "Configurable delay response".to_string(),
        Scenario::Random => "Random delay response".to_string(),
        Scenario::SometimesFail => "Randomly fails based on failure rate".to_string(),
        Scenario::TimeoutTrap => format!(
            "Very long response ({}s)",
            settings.timeout_trap.as_secs()
        ),
        Scenario::BurstError => "Simulated outage with retry-after hint".to_string(),
        Scenario::Cascade => "Sequence of slow operations".to_string(),
    }
}

/// Root endpoint with service information
#[utoipa::path(
    get,
    path = "/",
    tag = "service",
    responses(
        (status = 200, description = "Service information", body = ServiceInfo)
    )
)]
pub async fn root(State(state): State<AppState>) -> Json<ServiceInfo> {
    let settings = state.faults.settings();
    let mut endpoints: BTreeMap<String, String> = Scenario::ALL
        .iter()
        .map(|&s| (scenario_path(s).to_string(), describe(s, settings)))
        .collect();
    endpoints.insert("/health".to_string(), "Health check".to_string());
    endpoints.insert("/stats".to_string(), "Service statistics".to_string());
    endpoints.insert("/metrics".to_string(), "Request metrics".to_string());
    endpoints.insert("/docs".to_string(), "Interactive API documentation".to_string());

    Json(ServiceInfo {
        service: SERVICE_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        status: "operational".to_string(),
        purpose: "Simulates slow external API dependencies".to_string(),
        endpoints,
    })
}

/// Startup defaults echoed by `/stats`
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsConfig {
    pub default_delay: u64,
    pub max_delay: u64,
    pub failure_rate: f64,
}

impl From<&FaultDefaults> for StatsConfig {
    fn from(defaults: &FaultDefaults) -> Self {
        Self {
            default_delay: defaults.default_delay,
            max_delay: defaults.max_delay,
            failure_rate: defaults.failure_rate,
        }
    }
}

/// Service statistics
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct StatsResponse {
    /// Fault-injection invocations since start
    pub total_requests: u64,
    pub service: String,
    pub config: StatsConfig,
}

/// Service statistics
#[utoipa::path(
    get,
    path = "/stats",
    tag = "service",
    responses(
        (status = 200, description = "Invocation count and defaults", body = StatsResponse)
    )
)]
pub async fn stats(State(state): State<AppState>) -> Json<StatsResponse> {
    Json(StatsResponse {
        total_requests: state.faults.counters().total_requests,
        service: SERVICE_NAME.to_string(),
        config: state.validator.defaults().into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use infrastructure::{AppConfig, FaultsConfig};

    fn state_with_trap(timeout_trap_secs: u64) -> AppState {
        let config = AppConfig {
            faults: FaultsConfig {
                timeout_trap_secs,
                ..FaultsConfig::default()
            },
            ..AppConfig::default()
        };
        AppState::from_config(config).unwrap()
    }

    #[tokio::test]
    async fn root_lists_every_scenario() {
        let Json(info) = root(State(state_with_trap(60))).await;
        assert_eq!(info.service, "downstream-slow-service");
        assert_eq!(info.status, "operational");
        for scenario in Scenario::ALL {
            assert!(info.endpoints.contains_key(scenario_path(scenario)));
        }
        assert!(info.endpoints.contains_key("/health"));
        assert!(info.endpoints.contains_key("/stats"));
        assert_eq!(info.endpoints["/timeout-trap"], "Very long response (60s)");
    }

    #[tokio::test]
    async fn trap_description_follows_configuration() {
        let Json(info) = root(State(state_with_trap(5))).await;
        assert_eq!(info.endpoints["/timeout-trap"], "Very long response (5s)");
    }

    #[test]
    fn stats_config_from_defaults() {
        let config = StatsConfig::from(&FaultDefaults::default());
        assert_eq!(config.default_delay, 3);
        assert_eq!(config.max_delay, 30);
        assert!(config.failure_rate.abs() < f64::EPSILON);
    }
}
