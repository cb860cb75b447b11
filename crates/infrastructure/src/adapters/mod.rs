//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod atomic_invocation_counter;
mod random_source;
mod tokio_delay_scheduler;

pub use atomic_invocation_counter::AtomicInvocationCounter;
pub use random_source::{SeededRandomSource, ThreadRandomSource};
pub use tokio_delay_scheduler::TokioDelayScheduler;
