use delta_core::Timestamp;
use delta_ports::Clock;
use std::sync::atomic::{AtomicU64, Ordering};

/// Fixed clock that only advances when explicitly moved
///
/// Shared between the test and the node under test through an `Arc`.
pub struct ManualClock {
    /// `f64` bits of the current time
    current: AtomicU64,
}

impl ManualClock {
    pub fn new(initial: Timestamp) -> Self {
        Self {
            current: AtomicU64::new(initial.to_bits()),
        }
    }

    /// Advance the time by `millis`
    pub fn advance(&self, millis: f64) {
        // Single writer in tests, a load/store pair is enough
        let next = self.now() + millis;
        self.set(next);
    }

    /// Explicitly set the time
    pub fn set(&self, time: Timestamp) {
        self.current.store(time.to_bits(), Ordering::SeqCst);
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(0.0)
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        f64::from_bits(self.current.load(Ordering::SeqCst))
    }

    fn name(&self) -> &str {
        "ManualClock"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_until_moved() {
        let clock = ManualClock::new(100.0);
        assert_eq!(clock.now(), 100.0);
        assert_eq!(clock.now(), 100.0);

        clock.advance(5.0);
        assert_eq!(clock.now(), 105.0);

        clock.set(42.0);
        assert_eq!(clock.now(), 42.0);
    }
}
