//! OpenAPI documentation module
//!
//! Provides OpenAPI 3.0 documentation for the downstream slow service.
//! Includes Swagger UI and ReDoc for interactive API exploration.

// Allow clippy warnings from macro-generated code in utoipa derive
#![allow(clippy::needless_for_each)]

use axum::{Router, response::Html, routing::get};
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable as RedocServable};
use utoipa_swagger_ui::SwaggerUi;

use crate::{handlers, state::AppState};

/// Path of the generated OpenAPI document
pub const OPENAPI_JSON_PATH: &str = "/api-docs/openapi.json";

/// OpenAPI documentation for the downstream slow service
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Downstream Slow Service",
        description = "Mock external API for testing backend resilience: controllable latency, \
                       probabilistic failures, long hangs, simulated outages and cascades",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Local server")
    ),
    tags(
        (name = "service", description = "Service information and statistics"),
        (name = "health", description = "Liveness endpoint"),
        (name = "faults", description = "Fault-injection endpoints"),
        (name = "metrics", description = "Request and fault metrics")
    ),
    paths(
        // Service endpoints
        handlers::service::root,
        handlers::service::stats,
        // Health endpoints
        handlers::health::health_check,
        // Fault endpoints
        handlers::faults::slow,
        handlers::faults::random,
        handlers::faults::sometimes_fail,
        handlers::faults::timeout_trap,
        handlers::faults::burst_error,
        handlers::faults::cascade,
        // Metrics endpoints
        handlers::metrics::get_metrics,
        handlers::metrics::get_metrics_prometheus,
    ),
    components(
        schemas(
            // Service schemas
            handlers::service::ServiceInfo,
            handlers::service::StatsResponse,
            handlers::service::StatsConfig,
            // Health schemas
            handlers::health::HealthResponse,
            // Fault schemas
            handlers::faults::SlowResponse,
            handlers::faults::RandomResponse,
            handlers::faults::DelayRangeBody,
            handlers::faults::SometimesFailResponse,
            handlers::faults::TimeoutTrapResponse,
            handlers::faults::CascadeResponse,
            handlers::faults::CascadeLevelBody,
            handlers::faults::FailureResponse,
            handlers::faults::FailureDetail,
            // Metrics schemas
            handlers::metrics::MetricsResponse,
            handlers::metrics::AppMetrics,
            handlers::metrics::RequestMetrics,
            handlers::metrics::ScenarioMetrics,
            // Error schemas
            crate::error::ErrorResponse,
        )
    )
)]
pub struct ApiDoc;

/// Create router with OpenAPI documentation endpoints
///
/// Adds the following routes:
/// - `/api-docs/openapi.json` - OpenAPI document (used by Swagger UI)
/// - `/docs` - Swagger UI interactive documentation
/// - `/redoc` - ReDoc documentation
pub fn create_openapi_routes() -> Router<AppState> {
    let redoc = Redoc::with_url(OPENAPI_JSON_PATH, ApiDoc::openapi());
    let redoc_html = redoc.to_html();

    Router::new()
        .route("/redoc", get(move || async move { Html(redoc_html) }))
        .merge(SwaggerUi::new("/docs").url(OPENAPI_JSON_PATH, ApiDoc::openapi()))
}
