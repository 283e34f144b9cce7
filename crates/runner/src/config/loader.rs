use std::path::Path;
use thiserror::Error;

use super::types::NodeConfig;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    ParseError(#[from] serde_json::Error),
    #[error("Threshold {name} must be finite, got {value}")]
    InvalidThreshold { name: &'static str, value: f64 },
    #[error("Invalid field path: `{0}`")]
    InvalidPath(String),
}

/// Load node configuration from a JSON file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<NodeConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Load configuration from a JSON string
pub fn load_config_from_str(json: &str) -> Result<NodeConfig, ConfigError> {
    let config: NodeConfig = serde_json::from_str(json)?;
    config.validate()?;
    Ok(config)
}

/// Load the default embedded configuration (no thresholds, passes everything)
pub fn load_default_config() -> Result<NodeConfig, ConfigError> {
    let default_config = include_str!("default_config.json");
    load_config_from_str(default_config)
}

impl NodeConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, bound) in self.detector.thresholds.iter() {
            if let Some(value) = bound.filter(|v| !v.is_finite()) {
                return Err(ConfigError::InvalidThreshold { name, value });
            }
        }

        let paths = [
            self.timestamp_path.as_ref(),
            self.value_path.as_ref(),
            self.identifier_path.as_ref(),
        ];
        for path in paths.into_iter().flatten() {
            if path.segments().iter().any(|s| s.is_empty()) {
                return Err(ConfigError::InvalidPath(path.as_str().to_string()));
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use delta_core::DetectorConfig;

    #[test]
    fn test_load_default_config() {
        let config = load_default_config().unwrap();
        assert_eq!(config.name, "delta");
        assert_eq!(config.detector, DetectorConfig::default());
    }

    #[test]
    fn test_parse_error() {
        let err = load_config_from_str("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }

    #[test]
    fn test_missing_file() {
        let err = load_config("/nonexistent/delta.json").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }

    #[test]
    fn test_rejects_non_finite_threshold() {
        let err = load_config_from_str(r#"{ "minDelta": "inf" }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidThreshold { name: "minDelta", .. }
        ));
    }

    #[test]
    fn test_rejects_empty_path_segment() {
        let err = load_config_from_str(r#"{ "valuePath": "payload..value" }"#).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidPath(p) if p == "payload..value"));
    }

    #[test]
    fn test_root_path_is_valid() {
        let config = load_config_from_str(r#"{ "valuePath": "msg" }"#).unwrap();
        assert!(config.value_path().segments().is_empty());
    }
}
