//! Application services - Use case implementations

mod fault_injection_service;

pub use fault_injection_service::{FaultInjectionService, PolicySettings};
