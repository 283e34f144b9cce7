use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};

/// Combination policy when both a time and a magnitude threshold are set
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Mode {
    /// Accept if enough time elapsed or the value moved enough
    #[default]
    Or,
    /// Accept only if enough time elapsed and the value moved enough
    And,
}

/// Optional time and magnitude thresholds
///
/// Each bound may be given as a number, a numeric string, or an empty
/// string meaning "unset".
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Thresholds {
    /// Minimum time since the last accepted reading
    #[serde(
        default,
        deserialize_with = "deserialize_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_time: Option<f64>,

    /// Elapsed time after which a reading is accepted unconditionally
    #[serde(
        default,
        deserialize_with = "deserialize_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub max_time: Option<f64>,

    /// Minimum absolute change from the last accepted value
    #[serde(
        default,
        deserialize_with = "deserialize_threshold",
        skip_serializing_if = "Option::is_none"
    )]
    pub min_delta: Option<f64>,
}

impl Thresholds {
    /// Whether the time branch of the decision runs at all
    pub fn has_time_bounds(&self) -> bool {
        self.min_time.is_some() || self.max_time.is_some()
    }

    /// Named bounds, for validation and logging
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, Option<f64>)> {
        [
            ("minTime", self.min_time),
            ("maxTime", self.max_time),
            ("minDelta", self.min_delta),
        ]
        .into_iter()
    }
}

/// Immutable configuration of one detector instance
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DetectorConfig {
    #[serde(rename = "changeDetectionMode", default)]
    pub mode: Mode,

    #[serde(flatten)]
    pub thresholds: Thresholds,
}

impl DetectorConfig {
    pub fn new(mode: Mode) -> Self {
        Self {
            mode,
            thresholds: Thresholds::default(),
        }
    }

    pub fn with_min_time(mut self, min_time: f64) -> Self {
        self.thresholds.min_time = Some(min_time);
        self
    }

    pub fn with_max_time(mut self, max_time: f64) -> Self {
        self.thresholds.max_time = Some(max_time);
        self
    }

    pub fn with_min_delta(mut self, min_delta: f64) -> Self {
        self.thresholds.min_delta = Some(min_delta);
        self
    }
}

fn deserialize_threshold<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Option::<Raw>::deserialize(deserializer)? {
        None => Ok(None),
        Some(Raw::Number(n)) => Ok(Some(n)),
        Some(Raw::Text(s)) if s.trim().is_empty() => Ok(None),
        Some(Raw::Text(s)) => s
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| de::Error::custom(format!("invalid threshold `{s}`"))),
    }
}
