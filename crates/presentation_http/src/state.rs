//! Application state shared across handlers

use std::sync::Arc;

use application::{
    ApplicationError, FaultInjectionService, ParameterValidator,
    ports::{DelayScheduler, InvocationCounter, RandomSource},
};
use infrastructure::{AppConfig, AtomicInvocationCounter, TokioDelayScheduler};

use crate::handlers::metrics::MetricsCollector;

/// Shared application state
#[derive(Debug, Clone)]
pub struct AppState {
    /// Outcome policy engine
    pub faults: Arc<FaultInjectionService>,
    /// Query parameter validator with startup defaults
    pub validator: Arc<ParameterValidator>,
    /// Application configuration
    pub config: Arc<AppConfig>,
    /// Request metrics
    pub metrics: Arc<MetricsCollector>,
}

impl AppState {
    /// Wire the production adapters selected by `config`
    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        let random = config.faults.random_source();
        Self::with_ports(
            config,
            random,
            Arc::new(TokioDelayScheduler::new()),
            Arc::new(AtomicInvocationCounter::new()),
        )
    }

    /// Wire explicit port implementations
    pub fn with_ports(
        config: AppConfig,
        random: Arc<dyn RandomSource>,
        scheduler: Arc<dyn DelayScheduler>,
        counter: Arc<dyn InvocationCounter>,
    ) -> Result<Self, ApplicationError> {
        let validator = ParameterValidator::new(config.faults.fault_defaults())?;
        let settings = config
            .faults
            .policy_settings()
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        let faults = FaultInjectionService::new(random, scheduler, counter).with_settings(settings);

        Ok(Self {
            faults: Arc::new(faults),
            validator: Arc::new(validator),
            config: Arc::new(config),
            metrics: Arc::new(MetricsCollector::new()),
        })
    }
}
