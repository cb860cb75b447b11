//! Port definitions for application layer
//!
//! Ports are interfaces that define how the policy engine reaches the
//! outside world: randomness, time and shared counters. Adapters in the
//! infrastructure layer implement these ports.

mod delay_scheduler;
mod invocation_counter;
mod random_source;

#[cfg(test)]
pub use delay_scheduler::MockDelayScheduler;
pub use delay_scheduler::DelayScheduler;
#[cfg(test)]
pub use invocation_counter::MockInvocationCounter;
pub use invocation_counter::InvocationCounter;
#[cfg(test)]
pub use random_source::MockRandomSource;
pub use random_source::RandomSource;
