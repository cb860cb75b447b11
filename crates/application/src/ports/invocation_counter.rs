//! Invocation counter port

#[cfg(test)]
use mockall::automock;

/// Monotonic, process-wide count of fault-injection invocations
///
/// There is no decrement and no reset; the count only restarts with the
/// process.
#[cfg_attr(test, automock)]
pub trait InvocationCounter: Send + Sync {
    /// Add one and return the new value
    fn increment(&self) -> u64;

    /// Current value
    fn current(&self) -> u64;
}
