//! Domain layer for the downstream slow service
//!
//! Contains the fault-injection vocabulary: validated parameter value objects,
//! the outcome of a simulated request, and domain errors.
//! This layer has no I/O and no notion of time sources or randomness.

pub mod entities;
pub mod errors;
pub mod scenario;
pub mod value_objects;

mod duration_secs;

pub use entities::*;
pub use errors::DomainError;
pub use scenario::Scenario;
pub use value_objects::*;
