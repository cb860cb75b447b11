//! Route definitions

use axum::{Router, http::Uri, middleware, routing::get};
use domain::Scenario;

use crate::{
    error::ApiError, handlers, middleware::track_requests, openapi::create_openapi_routes,
    state::AppState,
};

/// Path serving each fault scenario
pub const fn scenario_path(scenario: Scenario) -> &'static str {
    match scenario {
        Scenario::Slow => "/slow",
        Scenario::Random => "/random",
        Scenario::SometimesFail => "/sometimes-fail",
        Scenario::TimeoutTrap => "/timeout-trap",
        Scenario::BurstError => "/burst-error",
        Scenario::Cascade => "/cascade",
    }
}

/// Create the main router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Service metadata
        .route("/", get(handlers::service::root))
        .route("/health", get(handlers::health::health_check))
        .route("/stats", get(handlers::service::stats))
        // Fault injection
        .route(scenario_path(Scenario::Slow), get(handlers::faults::slow))
        .route(scenario_path(Scenario::Random), get(handlers::faults::random))
        .route(
            scenario_path(Scenario::SometimesFail),
            get(handlers::faults::sometimes_fail),
        )
        .route(
            scenario_path(Scenario::TimeoutTrap),
            get(handlers::faults::timeout_trap),
        )
        .route(
            scenario_path(Scenario::BurstError),
            get(handlers::faults::burst_error),
        )
        .route(scenario_path(Scenario::Cascade), get(handlers::faults::cascade))
        // Metrics endpoints
        .route("/metrics", get(handlers::metrics::get_metrics))
        .route(
            "/metrics/prometheus",
            get(handlers::metrics::get_metrics_prometheus),
        )
        // API documentation
        .merge(create_openapi_routes())
        .fallback(not_found)
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        // Attach state
        .with_state(state)
}

async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(uri.path().to_string())
}

#[cfg(test)]
mod tests {
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use infrastructure::AppConfig;
    use tower::ServiceExt;

    use super::*;
    use crate::middleware::REQUEST_ID_HEADER;

    fn router() -> (Router, AppState) {
        let state = AppState::from_config(AppConfig::default()).unwrap();
        (create_router(state.clone()), state)
    }

    #[tokio::test]
    async fn health_route_is_mounted() {
        let (app, _) = router();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key(REQUEST_ID_HEADER));
    }

    #[test]
    fn scenario_paths_are_unique_and_rooted() {
        let mut paths: Vec<_> = Scenario::ALL.iter().map(|&s| scenario_path(s)).collect();
        assert!(paths.iter().all(|p| p.starts_with('/')));
        paths.sort_unstable();
        paths.dedup();
        assert_eq!(paths.len(), Scenario::ALL.len());
    }

    #[tokio::test]
    async fn every_scenario_route_is_mounted() {
        let (app, _) = router();
        for scenario in [Scenario::Slow, Scenario::BurstError, Scenario::Cascade] {
            let uri = format!(
                "{}?delay=abc&levels=abc&error_duration=abc",
                scenario_path(scenario)
            );
            let response = app
                .clone()
                .oneshot(Request::get(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY, "{scenario}");
        }
    }

    #[tokio::test]
    async fn fallback_is_not_found() {
        let (app, _) = router();
        let response = app
            .oneshot(Request::get("/nowhere").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn middleware_feeds_metrics() {
        let (app, state) = router();
        let response = app
            .oneshot(
                Request::get("/slow?delay=abc")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let metrics = state.metrics.request_metrics();
        assert_eq!(metrics.total_requests, 1);
        assert_eq!(metrics.client_error_count, 1);
        assert_eq!(metrics.active_requests, 0);
    }
}
