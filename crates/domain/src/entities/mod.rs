//! Domain entities - Results of simulated requests

mod cascade_trace;
mod outcome;
mod service_counters;

pub use cascade_trace::{CascadeStep, CascadeTrace};
pub use outcome::{ErrorDetail, FailureKind, Outcome};
pub use service_counters::ServiceCounters;
