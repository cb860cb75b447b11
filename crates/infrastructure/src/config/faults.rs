//! Fault-injection defaults and engine settings.

use std::borrow::Cow;
use std::sync::Arc;
use std::time::Duration;

use application::ports::RandomSource;
use application::{FaultDefaults, PolicySettings};
use domain::value_objects::DelayRange;
use serde::{Deserialize, Serialize};
use tracing::info;
use validator::{Validate, ValidationError};

use crate::adapters::{SeededRandomSource, ThreadRandomSource};

/// Process-wide fault-injection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_cross_fields"))]
pub struct FaultsConfig {
    /// Delay used by `/slow` when the caller omits one
    #[serde(default = "default_delay")]
    #[validate(range(min = 1, max = 600))]
    pub default_delay: u64,

    /// Largest delay `/slow` accepts
    #[serde(default = "default_max_delay")]
    #[validate(range(min = 1, max = 600))]
    pub max_delay: u64,

    /// Failure probability used by `/sometimes-fail` when the caller omits one
    #[serde(default)]
    #[validate(range(min = 0.0, max = 1.0))]
    pub failure_rate: f64,

    /// How long `/timeout-trap` hangs
    #[serde(default = "default_timeout_trap")]
    #[validate(range(min = 1, max = 600))]
    pub timeout_trap_secs: u64,

    /// Lower bound of each cascade level's delay
    #[serde(default = "default_cascade_step_min")]
    #[validate(range(min = 0.0, max = 60.0))]
    pub cascade_step_min_secs: f64,

    /// Upper bound of each cascade level's delay
    #[serde(default = "default_cascade_step_max")]
    #[validate(range(min = 0.0, max = 60.0))]
    pub cascade_step_max_secs: f64,

    /// Seed for reproducible draws; unset means thread-local randomness
    #[serde(default)]
    pub seed: Option<u64>,
}

const fn default_delay() -> u64 {
    3
}

const fn default_max_delay() -> u64 {
    30
}

const fn default_timeout_trap() -> u64 {
    60
}

const fn default_cascade_step_min() -> f64 {
    0.5
}

const fn default_cascade_step_max() -> f64 {
    2.0
}

fn validate_cross_fields(config: &FaultsConfig) -> Result<(), ValidationError> {
    if config.default_delay > config.max_delay {
        return Err(
            ValidationError::new("default_delay_exceeds_max").with_message(Cow::Owned(format!(
                "default_delay ({}) must not exceed max_delay ({})",
                config.default_delay, config.max_delay
            ))),
        );
    }
    if config.cascade_step_min_secs > config.cascade_step_max_secs {
        return Err(
            ValidationError::new("cascade_step_reversed").with_message(Cow::Owned(format!(
                "cascade_step_min_secs ({}) must not exceed cascade_step_max_secs ({})",
                config.cascade_step_min_secs, config.cascade_step_max_secs
            ))),
        );
    }
    Ok(())
}

impl FaultsConfig {
    /// Defaults handed to the parameter validator
    pub const fn fault_defaults(&self) -> FaultDefaults {
        FaultDefaults {
            default_delay: self.default_delay,
            max_delay: self.max_delay,
            failure_rate: self.failure_rate,
        }
    }

    /// Engine settings derived from this config
    pub fn policy_settings(&self) -> Result<PolicySettings, domain::DomainError> {
        let cascade_step = DelayRange::with_fields(
            self.cascade_step_min_secs,
            self.cascade_step_max_secs,
            "cascade_step_min_secs",
            "cascade_step_max_secs",
        )?;
        Ok(PolicySettings {
            timeout_trap: Duration::from_secs(self.timeout_trap_secs),
            cascade_step,
        })
    }

    /// Random source selected by `seed`
    pub fn random_source(&self) -> Arc<dyn RandomSource> {
        match self.seed {
            Some(seed) => {
                info!(seed, "Using seeded random source");
                Arc::new(SeededRandomSource::new(seed))
            },
            None => Arc::new(ThreadRandomSource::new()),
        }
    }
}

impl Default for FaultsConfig {
    fn default() -> Self {
        Self {
            default_delay: default_delay(),
            max_delay: default_max_delay(),
            failure_rate: 0.0,
            timeout_trap_secs: default_timeout_trap(),
            cascade_step_min_secs: default_cascade_step_min(),
            cascade_step_max_secs: default_cascade_step_max(),
            seed: None,
        }
    }
}
