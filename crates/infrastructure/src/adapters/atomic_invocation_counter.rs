//! Lock-free invocation counter

use std::sync::atomic::{AtomicU64, Ordering};

use application::ports::InvocationCounter;

/// Process-wide counter on a single `AtomicU64`
#[derive(Debug, Default)]
pub struct AtomicInvocationCounter {
    count: AtomicU64,
}

impl AtomicInvocationCounter {
    /// Create a counter starting at zero
    pub const fn new() -> Self {
        Self {
            count: AtomicU64::new(0),
        }
    }
}

impl InvocationCounter for AtomicInvocationCounter {
    fn increment(&self) -> u64 {
        self.count.fetch_add(1, Ordering::Relaxed) + 1
    }

    fn current(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;

    #[test]
    fn starts_at_zero() {
        assert_eq!(AtomicInvocationCounter::new().current(), 0);
    }

    #[test]
    fn increment_returns_new_value() {
        let counter = AtomicInvocationCounter::new();
        assert_eq!(counter.increment(), 1);
        assert_eq!(counter.increment(), 2);
        assert_eq!(counter.current(), 2);
    }

    #[test]
    fn concurrent_increments_are_not_lost() {
        let counter = Arc::new(AtomicInvocationCounter::new());
        let handles: Vec<_> = (0..8)
            .map(|_| {
                let counter = Arc::clone(&counter);
                std::thread::spawn(move || {
                    for _ in 0..1_000 {
                        counter.increment();
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }
        assert_eq!(counter.current(), 8_000);
    }
}
