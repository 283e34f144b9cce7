//! Change-detection filter node
//!
//! Ties the pure decision engine to its collaborators: pulls identifier,
//! timestamp and value out of each message, loads and persists per-identifier
//! state, and tells the caller which output the message belongs on.
//!
//! Error policy per kind:
//! - missing identifier: fail open, the message is forwarded and the status
//!   shows "missing identifier"
//! - unresolvable timestamp/value: the message is dropped from both outputs
//!   and the error is returned
//! - store failure: same as above; a failed write never counts as an accept

use delta_core::{
    ChangeDetector, ExtractionError, FieldPath, Identifier, Message, Reading, Verdict, extract,
    to_identifier, to_number, to_number_strict,
};
use delta_gateway::Output;
use delta_ports::{Clock, StateStore, StoreError};
use log::{debug, error, warn};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::NodeConfig;
use crate::error::{Field, NodeError, NodeResult};

/// Out-of-band status of a node, as shown next to it in the flow editor
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "camelCase")]
pub enum NodeStatus {
    #[default]
    Clear,
    MissingIdentifier,
    ExtractionFailed(String),
    StoreFailed(String),
}

impl NodeStatus {
    /// Status text, `None` when clear
    pub fn text(&self) -> Option<String> {
        match self {
            NodeStatus::Clear => None,
            NodeStatus::MissingIdentifier => Some("missing identifier".to_string()),
            NodeStatus::ExtractionFailed(detail) => Some(format!("extraction failed: {detail}")),
            NodeStatus::StoreFailed(detail) => Some(format!("store failed: {detail}")),
        }
    }

    pub fn is_error(&self) -> bool {
        !matches!(self, NodeStatus::Clear)
    }
}

/// Where a message goes after the node has seen it
#[derive(Debug, Clone, PartialEq)]
pub enum Routed {
    Forward(Message),
    Rejected(Message),
}

impl Routed {
    pub fn output(&self) -> Output {
        match self {
            Routed::Forward(_) => Output::Forward,
            Routed::Rejected(_) => Output::Rejected,
        }
    }

    pub fn message(&self) -> &Message {
        match self {
            Routed::Forward(msg) | Routed::Rejected(msg) => msg,
        }
    }

    pub fn into_message(self) -> Message {
        match self {
            Routed::Forward(msg) | Routed::Rejected(msg) => msg,
        }
    }

    /// One slot per output, a rejection is `[None, Some(msg)]`
    pub fn outputs(self) -> [Option<Message>; 2] {
        let index = self.output().index();
        let mut slots = [None, None];
        slots[index] = Some(self.into_message());
        slots
    }
}

/// Filter node: one detector, one store, one clock
pub struct ChangeDetectNode {
    id: String,
    name: String,
    detector: ChangeDetector,
    timestamp_path: Option<FieldPath>,
    value_path: FieldPath,
    identifier_path: FieldPath,
    strict_numbers: bool,
    store: Arc<dyn StateStore>,
    clock: Arc<dyn Clock>,
    status: NodeStatus,
}

impl ChangeDetectNode {
    /// Create a node from a validated configuration
    pub fn new(
        config: NodeConfig,
        store: Arc<dyn StateStore>,
        clock: Arc<dyn Clock>,
    ) -> NodeResult<Self> {
        config.validate()?;

        Ok(Self {
            id: config
                .id
                .clone()
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            value_path: config.value_path(),
            identifier_path: config.identifier_path(),
            name: config.name,
            detector: ChangeDetector::new(config.detector),
            timestamp_path: config.timestamp_path,
            strict_numbers: config.strict_numbers,
            store,
            clock,
            status: NodeStatus::Clear,
        })
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn detector(&self) -> &ChangeDetector {
        &self.detector
    }

    pub fn status(&self) -> &NodeStatus {
        &self.status
    }

    /// Handle one input message
    ///
    /// Taking `&mut self` serialises messages through the node, so every
    /// decision sees the state left by the previous accepted message.
    pub async fn on_input(&mut self, msg: Message) -> NodeResult<Routed> {
        let Some(identifier) = self.extract_identifier(&msg) else {
            warn!(
                "[{}] missing identifier at `{}`, forwarding",
                self.id, self.identifier_path
            );
            self.status = NodeStatus::MissingIdentifier;
            return Ok(Routed::Forward(msg));
        };

        let reading = match self.extract_reading(&msg) {
            Ok(reading) => reading,
            Err(err) => {
                error!("[{}] dropping message for {}: {}", self.id, identifier, err);
                self.status = NodeStatus::ExtractionFailed(err.to_string());
                return Err(err);
            }
        };

        let loaded = self.store.get(&identifier).await;
        let prior = match loaded {
            Ok(prior) => prior,
            Err(err) => return Err(self.store_failed(&identifier, err)),
        };

        let (verdict, reason) = self.detector.evaluate_with_reason(reading, prior.as_ref());

        let routed = match verdict {
            Verdict::Accept(state) => {
                let persisted = self.store.set(&identifier, state).await;
                if let Err(err) = persisted {
                    return Err(self.store_failed(&identifier, err));
                }
                debug!(
                    "[{}] accept {} ts={} value={} ({})",
                    self.id, identifier, reading.timestamp, reading.value, reason
                );
                Routed::Forward(msg)
            }
            Verdict::Reject => {
                debug!(
                    "[{}] reject {} ts={} value={} ({})",
                    self.id, identifier, reading.timestamp, reading.value, reason
                );
                Routed::Rejected(msg)
            }
        };

        self.status = NodeStatus::Clear;
        Ok(routed)
    }

    fn extract_identifier(&self, msg: &Message) -> Option<Identifier> {
        match extract(msg, Some(&self.identifier_path), None) {
            Ok(value) => to_identifier(&value),
            Err(err) => {
                debug!("[{}] {}", self.id, err);
                None
            }
        }
    }

    fn extract_reading(&self, msg: &Message) -> NodeResult<Reading> {
        let now = Value::from(self.clock.now());

        let timestamp = extract(msg, self.timestamp_path.as_ref(), Some(now)).map_err(|source| {
            NodeError::Extraction {
                field: Field::Timestamp,
                source,
            }
        })?;
        let timestamp_path = self
            .timestamp_path
            .as_ref()
            .map_or("<now>", FieldPath::as_str);
        let timestamp = self.number(Field::Timestamp, timestamp_path, &timestamp)?;

        let value = extract(msg, Some(&self.value_path), None).map_err(|source| {
            NodeError::Extraction {
                field: Field::Value,
                source,
            }
        })?;
        let value = self.number(Field::Value, self.value_path.as_str(), &value)?;

        Ok(Reading::new(timestamp, value))
    }

    fn number(&self, field: Field, path: &str, value: &Value) -> NodeResult<f64> {
        if !self.strict_numbers {
            return Ok(to_number(value));
        }
        to_number_strict(value).ok_or_else(|| NodeError::Extraction {
            field,
            source: ExtractionError::NotNumeric {
                path: path.to_string(),
                found: value.to_string(),
            },
        })
    }

    fn store_failed(&mut self, identifier: &str, err: StoreError) -> NodeError {
        error!(
            "[{}] {} failed for {}: {}",
            self.id,
            self.store.name(),
            identifier,
            err
        );
        self.status = NodeStatus::StoreFailed(err.to_string());
        NodeError::Store(err)
    }
}
