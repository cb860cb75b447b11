//! Application layer - Fault-injection use cases
//!
//! Contains the parameter validator, the outcome policy engine and the port
//! definitions for randomness, suspension and invocation counting.
//! Adapters for those ports live in the infrastructure layer.

pub mod error;
pub mod parameter_validator;
pub mod ports;
pub mod services;

pub use error::ApplicationError;
pub use parameter_validator::{FaultDefaults, ParameterValidator};
pub use ports::*;
pub use services::*;
