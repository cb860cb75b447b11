//! Application configuration
//!
//! Split into focused sub-modules:
//! - `server`: HTTP server settings
//! - `faults`: fault-injection defaults and engine settings
//!
//! Sources, lowest precedence first: built-in defaults, an optional
//! `config.toml`, `DOWNSTREAM_*` environment variables (`__` separates
//! sections, e.g. `DOWNSTREAM_SERVER__PORT`), then the flat variables
//! `DEFAULT_DELAY`, `MAX_DELAY`, `FAILURE_RATE` and `PORT`.

mod faults;
mod server;

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;
use validator::Validate;

pub use faults::FaultsConfig;
pub use server::{LogFormat, ServerConfig};

/// Environment variable prefix for structured overrides
pub const ENV_PREFIX: &str = "DOWNSTREAM";

/// Flat variables and the config keys they override
const LEGACY_OVERRIDES: [(&str, &str); 4] = [
    ("DEFAULT_DELAY", "faults.default_delay"),
    ("MAX_DELAY", "faults.max_delay"),
    ("FAILURE_RATE", "faults.failure_rate"),
    ("PORT", "server.port"),
];

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A source could not be read or deserialized
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    /// Values were read but violate their constraints
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TelemetryConfig {
    /// Log level filter (e.g., "info", "application=debug,tower_http=info");
    /// `RUST_LOG` takes precedence when set
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    "downstream_slow_service=info,presentation_http=info,application=info,infrastructure=info,tower_http=info".to_string()
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_filter: default_log_filter(),
        }
    }
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
pub struct AppConfig {
    /// Server configuration
    #[serde(default)]
    #[validate(nested)]
    pub server: ServerConfig,

    /// Fault-injection configuration
    #[serde(default)]
    #[validate(nested)]
    pub faults: FaultsConfig,

    /// Logging configuration
    #[serde(default)]
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from `config.toml` (if present) and the process
    /// environment, then validate it
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from("config", None)
    }

    /// Load from the given file stem or path
    ///
    /// `env` replaces the process environment when given; tests use it to
    /// stay independent of the host.
    pub fn load_from(
        file: &str,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ConfigError> {
        let lookup = |key: &str| match &env {
            Some(vars) => vars.get(key).cloned(),
            None => std::env::var(key).ok(),
        };

        let mut builder = config::Config::builder()
            .add_source(config::File::with_name(file).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true)
                    .source(env.clone()),
            );

        for (var, key) in LEGACY_OVERRIDES {
            if let Some(value) = lookup(var) {
                debug!(var, key, "Applying legacy environment override");
                builder = builder.set_override(key, value)?;
            }
        }

        let config: Self = builder.build()?.try_deserialize()?;
        config.ensure_valid()?;
        Ok(config)
    }

    /// Run field and cross-field validation
    pub fn ensure_valid(&self) -> Result<(), ConfigError> {
        self.validate()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        self.faults
            .policy_settings()
            .map_err(|e| ConfigError::Invalid(e.to_string()))?;
        Ok(())
    }
}
