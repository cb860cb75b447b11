//! Logging infrastructure
//!
//! Installs the global `tracing` subscriber: an `EnvFilter` plus a text or
//! JSON fmt layer.

mod subscriber;

pub use subscriber::{TelemetryError, build_filter, init_tracing};
