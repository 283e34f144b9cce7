//! Delta Runner - change-detection filter node
//!
//! Runs the decision engine as a single filtering stage of a message flow:
//!
//! - **Config**: JSON node configuration (thresholds, mode, field paths)
//! - **Node**: extraction, state load/persist, verdict, status
//! - **Pipeline**: drives a node from an input channel to its two outputs
//!
//! ## Architecture
//!
//! ```text
//!      input ──► ChangeDetectNode ──┬──► forward
//!                  │      ▲         └──► rejected
//!        extract   │      │ get/set
//!                  ▼      │
//!          ChangeDetector StateStore     status ──► (out of band)
//! ```

pub mod config;
pub mod error;
pub mod node;
pub mod pipeline;

// Re-export main types
pub use config::{ConfigError, NodeConfig, load_config, load_config_from_str, load_default_config};
pub use error::{Field, NodeError, NodeResult};
pub use node::{ChangeDetectNode, NodeStatus, Routed};
pub use pipeline::{Pipeline, PipelineStats};
