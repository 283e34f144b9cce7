//! Delta Ports
//!
//! Port definitions (traits) for the delta change-detection filter.
//! These define the boundaries between the decision engine and the
//! infrastructure it runs in: where time comes from and where per-identifier
//! state is kept.

mod clock;
mod error;
mod store;

pub use clock::Clock;
pub use error::{StoreError, StoreResult};
pub use store::StateStore;
