//! Delta Gateway
//!
//! Transport layer for the delta change-detection filter. Provides:
//! - Transport abstraction (tokio channels, with traits for other transports)
//! - The two logical outputs of a filter node: forward and rejected
//! - A JSON-lines publisher for piping outputs to a stream
//!
//! ## Architecture
//!
//! ```text
//!   Host / producer
//!         │ Message
//!    ┌────▼────┐
//!    │  Input  │  QueueSubscriber (ordered, lossless)
//!    └────┬────┘
//!         │
//!    ┌────▼────┐
//!    │  Node   │  extract → load state → decide → persist
//!    └──┬───┬──┘
//!       │   │
//!       │   └──► delta.rejected   (message unchanged)
//!       └──────► delta.forward    (message unchanged)
//! ```

pub mod error;
pub mod transport;

// Re-export commonly used types
pub use error::TransportError;
pub use transport::{
    Output, Publisher, Subjects, Subscriber,
    channel::{ChannelPublisher, ChannelSubscriber, QueuePublisher, QueueSubscriber},
    json_lines::JsonLinesPublisher,
};
