use delta_core::Timestamp;

/// Port for time abstraction
///
/// Supplies the timestamp of messages that carry none of their own:
/// - Real system time for production
/// - Manually advanced time for deterministic tests
pub trait Clock: Send + Sync {
    /// Current time in epoch milliseconds
    fn now(&self) -> Timestamp;

    /// Get the clock's name/identifier for debugging
    fn name(&self) -> &str {
        "Clock"
    }
}
