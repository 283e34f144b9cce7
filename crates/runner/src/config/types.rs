use delta_core::{DetectorConfig, FieldPath};
use serde::{Deserialize, Deserializer, Serialize};

/// Value path used when none is configured
pub const DEFAULT_VALUE_PATH: &str = "payload";

/// Identifier path used when none is configured
pub const DEFAULT_IDENTIFIER_PATH: &str = "topic";

/// Configuration of one filter node
///
/// Paths given as empty strings count as unset.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeConfig {
    /// Node id used in logs; a random one is generated when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,

    #[serde(flatten)]
    pub detector: DetectorConfig,

    /// Where the timestamp lives; the clock's "now" when unset
    #[serde(
        default,
        deserialize_with = "deserialize_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub timestamp_path: Option<FieldPath>,

    #[serde(
        default,
        deserialize_with = "deserialize_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub value_path: Option<FieldPath>,

    #[serde(
        default,
        deserialize_with = "deserialize_path",
        skip_serializing_if = "Option::is_none"
    )]
    pub identifier_path: Option<FieldPath>,

    /// Reject non-numeric timestamps and values instead of turning them into NaN
    #[serde(default)]
    pub strict_numbers: bool,
}

impl NodeConfig {
    pub fn new(detector: DetectorConfig) -> Self {
        Self {
            detector,
            ..Default::default()
        }
    }

    pub fn with_timestamp_path(mut self, path: &str) -> Self {
        self.timestamp_path = Some(FieldPath::parse(path));
        self
    }

    pub fn with_value_path(mut self, path: &str) -> Self {
        self.value_path = Some(FieldPath::parse(path));
        self
    }

    pub fn with_identifier_path(mut self, path: &str) -> Self {
        self.identifier_path = Some(FieldPath::parse(path));
        self
    }

    pub fn with_strict_numbers(mut self, strict: bool) -> Self {
        self.strict_numbers = strict;
        self
    }

    /// Configured value path, or `payload`
    pub fn value_path(&self) -> FieldPath {
        self.value_path
            .clone()
            .unwrap_or_else(|| FieldPath::parse(DEFAULT_VALUE_PATH))
    }

    /// Configured identifier path, or `topic`
    pub fn identifier_path(&self) -> FieldPath {
        self.identifier_path
            .clone()
            .unwrap_or_else(|| FieldPath::parse(DEFAULT_IDENTIFIER_PATH))
    }
}

fn deserialize_path<'de, D>(deserializer: D) -> Result<Option<FieldPath>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw
        .filter(|s| !s.trim().is_empty())
        .map(|s| FieldPath::parse(s.trim())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use delta_core::Mode;

    #[test]
    fn test_defaults_from_empty_object() {
        let config: NodeConfig = serde_json::from_str("{}").unwrap();

        assert_eq!(config.detector.mode, Mode::Or);
        assert_eq!(config.timestamp_path, None);
        assert_eq!(config.value_path().as_str(), "payload");
        assert_eq!(config.identifier_path().as_str(), "topic");
        assert!(!config.strict_numbers);
    }

    #[test]
    fn test_empty_paths_are_unset() {
        let config: NodeConfig = serde_json::from_str(
            r#"{ "timestampPath": "", "valuePath": " ", "identifierPath": "msg.key" }"#,
        )
        .unwrap();

        assert_eq!(config.timestamp_path, None);
        assert_eq!(config.value_path().as_str(), "payload");
        assert_eq!(config.identifier_path().segments(), ["key"]);
    }

    #[test]
    fn test_flattened_detector_fields() {
        let config: NodeConfig = serde_json::from_str(
            r#"{ "changeDetectionMode": "AND", "minTime": 10, "minDelta": "10", "timestampPath": "msg.ts" }"#,
        )
        .unwrap();

        assert_eq!(config.detector.mode, Mode::And);
        assert_eq!(config.detector.thresholds.min_time, Some(10.0));
        assert_eq!(config.detector.thresholds.min_delta, Some(10.0));
        assert_eq!(
            config.timestamp_path.as_ref().map(FieldPath::segments),
            Some(&["ts".to_string()][..])
        );
    }
}
