//! Downstream slow service HTTP presentation layer
//!
//! This crate provides the HTTP API: fault-injection endpoints, service
//! metadata, metrics and OpenAPI documentation.

pub mod error;
pub mod extract;
pub mod handlers;
pub mod middleware;
pub mod openapi;
pub mod routes;
pub mod server;
pub mod state;

/// Name reported by `/`, `/stats` and `/metrics`
pub const SERVICE_NAME: &str = "downstream-slow-service";

pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
