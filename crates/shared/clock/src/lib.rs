//! Delta Clock Infrastructure
//!
//! Time sources for messages that carry no timestamp of their own:
//!
//! - [`SystemClock`]: wall-clock epoch milliseconds, for production
//! - [`ManualClock`]: frozen time that only moves when told to, for tests
//!
//! ## Usage
//!
//! ```ignore
//! use delta_clock::{Clock, ManualClock};
//!
//! let clock = ManualClock::new(1_000.0);
//! assert_eq!(clock.now(), 1_000.0);
//! clock.advance(250.0);
//! assert_eq!(clock.now(), 1_250.0);
//! ```

mod manual;
mod system;

pub use manual::ManualClock;
pub use system::SystemClock;

// Re-export the Clock trait for convenience
pub use delta_ports::Clock;
