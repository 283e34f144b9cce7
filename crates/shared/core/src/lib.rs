//! Delta Core Domain
//!
//! Pure domain types for the delta change-detection filter.
//! This crate contains no async, no I/O, and is 100% unit testable.
//!
//! The decision engine lives in [`detector`]: given the last accepted
//! reading for an identifier and a new reading, it decides whether the new
//! one is a significant enough change to pass downstream.

pub mod coerce;
pub mod config;
pub mod detector;
pub mod error;
pub mod message;
pub mod values;

// Re-export commonly used types at crate root
pub use coerce::{to_identifier, to_number, to_number_strict};
pub use config::{DetectorConfig, Mode, Thresholds};
pub use detector::{ChangeDetector, DetectorState, Reason, Reading, Verdict};
pub use error::{ExtractionError, ExtractionResult};
pub use message::{FieldPath, Message, extract};
pub use values::{Identifier, Measure, Timestamp};
