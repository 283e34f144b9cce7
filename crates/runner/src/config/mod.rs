//! Node configuration
//!
//! Loaded from JSON using the same field names the flow editor stores:
//!
//! ```json
//! {
//!   "id": "temp-filter",
//!   "changeDetectionMode": "AND",
//!   "minTime": "1000",
//!   "maxTime": "",
//!   "minDelta": 0.5,
//!   "timestampPath": "msg.ts",
//!   "valuePath": "msg.payload.temperature",
//!   "identifierPath": "msg.topic"
//! }
//! ```

mod loader;
mod types;

pub use loader::{ConfigError, load_config, load_config_from_str, load_default_config};
pub use types::{DEFAULT_IDENTIFIER_PATH, DEFAULT_VALUE_PATH, NodeConfig};
