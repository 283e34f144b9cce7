//! Messages and path-based field access
//!
//! A message is an arbitrary JSON tree delivered by the host runtime. Fields
//! are addressed with dot-separated paths such as `msg.payload.temperature`;
//! the leading `msg` segment names the message root and is optional.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

use crate::error::{ExtractionError, ExtractionResult};

/// Literal segment naming the message root
const ROOT_SEGMENT: &str = "msg";

/// A structured event message, passed through the filter unchanged
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Message(Value);

impl Message {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Resolve a path against this message
    pub fn get(&self, path: &FieldPath) -> ExtractionResult<&Value> {
        let mut current = &self.0;
        for segment in path.segments() {
            current = child(current, segment).ok_or_else(|| ExtractionError::MissingField {
                path: path.as_str().to_string(),
                segment: segment.clone(),
            })?;
        }
        Ok(current)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

/// Step one level down; arrays are indexed by numeric segments
fn child<'a>(value: &'a Value, segment: &str) -> Option<&'a Value> {
    match value {
        Value::Object(map) => map.get(segment),
        Value::Array(items) => segment.parse::<usize>().ok().and_then(|i| items.get(i)),
        _ => None,
    }
}

/// Dot-separated path into a message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct FieldPath {
    raw: String,
    segments: Vec<String>,
}

impl FieldPath {
    /// Parse a path, stripping a leading `msg` segment
    ///
    /// `"msg"` on its own addresses the whole message.
    pub fn parse(raw: &str) -> Self {
        let mut segments: Vec<String> = raw.split('.').map(str::to_string).collect();
        if segments.first().is_some_and(|s| s == ROOT_SEGMENT) {
            segments.remove(0);
        }
        Self {
            raw: raw.to_string(),
            segments,
        }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl From<String> for FieldPath {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl From<&str> for FieldPath {
    fn from(raw: &str) -> Self {
        Self::parse(raw)
    }
}

impl From<FieldPath> for String {
    fn from(path: FieldPath) -> Self {
        path.raw
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

/// Pull a field out of a message
///
/// Without a path the default is returned, whatever the message contains.
/// Without either, the caller gets [`ExtractionError::NoPathNoDefault`].
pub fn extract(
    msg: &Message,
    path: Option<&FieldPath>,
    default: Option<Value>,
) -> ExtractionResult<Value> {
    match path {
        None => default.ok_or(ExtractionError::NoPathNoDefault),
        Some(path) => msg.get(path).cloned(),
    }
}
