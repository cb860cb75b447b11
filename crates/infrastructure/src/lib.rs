//! Infrastructure layer - Adapters for the runtime environment
//!
//! Implements ports defined in the application layer on top of `rand`,
//! the tokio timer and atomics, and owns configuration loading and logging
//! setup.

pub mod adapters;
pub mod config;
pub mod telemetry;

pub use adapters::*;
pub use config::{AppConfig, ConfigError, FaultsConfig, LogFormat, ServerConfig, TelemetryConfig};
pub use telemetry::{TelemetryError, init_tracing};
