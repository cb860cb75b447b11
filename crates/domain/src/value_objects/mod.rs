//! Value Objects - Immutable, validated fault-injection parameters
//!
//! Each object can only be constructed inside its allowed interval, so the
//! policy engine never sees an out-of-range value.

mod burst_duration;
mod cascade_levels;
mod delay_range;
mod failure_probability;
mod field_constraint;
mod fixed_delay;

pub use burst_duration::BurstDuration;
pub use cascade_levels::CascadeLevels;
pub use delay_range::DelayRange;
pub use failure_probability::FailureProbability;
pub use field_constraint::FieldConstraint;
pub use fixed_delay::FixedDelay;
