//! Change detection decision engine
//!
//! Per identifier the detector is a two-state machine:
//!
//! ```text
//! NO_STATE ──(any reading, ACCEPT)──► HAS_STATE
//! HAS_STATE ──(passes, ACCEPT: state := reading)──► HAS_STATE
//! HAS_STATE ──(fails, REJECT: state unchanged)───► HAS_STATE
//! ```
//!
//! The rule is a short-circuit chain rather than a symmetric combination of
//! a time predicate and a magnitude predicate:
//!
//! 1. `maxTime` elapsed: accept, whatever the mode.
//! 2. `minTime` not elapsed: reject in AND mode, or when no `minDelta` is
//!    set. In OR mode with a `minDelta` the magnitude check decides.
//! 3. Change below `minDelta`: reject.
//! 4. Otherwise accept.
//!
//! All comparisons are plain IEEE comparisons, so a NaN delta never
//! triggers a bound and the reading is accepted.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::config::{DetectorConfig, Mode};
use crate::values::{Measure, Timestamp};

/// Last accepted reading for one identifier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DetectorState {
    pub timestamp: Timestamp,
    pub value: Measure,
}

/// A (timestamp, value) observation extracted from a message
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub timestamp: Timestamp,
    pub value: Measure,
}

impl Reading {
    pub fn new(timestamp: Timestamp, value: Measure) -> Self {
        Self { timestamp, value }
    }

    /// State to persist when this reading is accepted
    pub fn to_state(self) -> DetectorState {
        DetectorState {
            timestamp: self.timestamp,
            value: self.value,
        }
    }
}

/// Outcome of one evaluation
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Verdict {
    /// Pass the message downstream and persist the new state
    Accept(DetectorState),
    /// Route the message to the rejected output, state untouched
    Reject,
}

impl Verdict {
    pub fn is_accept(&self) -> bool {
        matches!(self, Verdict::Accept(_))
    }

    /// State to persist, if any
    pub fn new_state(&self) -> Option<DetectorState> {
        match self {
            Verdict::Accept(state) => Some(*state),
            Verdict::Reject => None,
        }
    }
}

/// Which rule produced a verdict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    FirstSighting,
    MaxTimeElapsed,
    MinTimeNotElapsed,
    DeltaBelowMinimum,
    ThresholdsMet,
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Reason::FirstSighting => "first sighting",
            Reason::MaxTimeElapsed => "maxTime elapsed",
            Reason::MinTimeNotElapsed => "minTime not elapsed",
            Reason::DeltaBelowMinimum => "change below minDelta",
            Reason::ThresholdsMet => "thresholds met",
        };
        f.write_str(text)
    }
}

/// Stateless decision engine; state lives with the caller's store
#[derive(Debug, Clone, Copy, Default)]
pub struct ChangeDetector {
    config: DetectorConfig,
}

impl ChangeDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DetectorConfig {
        &self.config
    }

    /// Decide whether `reading` passes, given the prior accepted state
    pub fn evaluate(&self, reading: Reading, prior: Option<&DetectorState>) -> Verdict {
        self.evaluate_with_reason(reading, prior).0
    }

    /// Same as [`evaluate`](Self::evaluate), also naming the deciding rule
    pub fn evaluate_with_reason(
        &self,
        reading: Reading,
        prior: Option<&DetectorState>,
    ) -> (Verdict, Reason) {
        let accept = Verdict::Accept(reading.to_state());

        let Some(prior) = prior else {
            return (accept, Reason::FirstSighting);
        };

        let thresholds = &self.config.thresholds;

        if thresholds.has_time_bounds() {
            let time_delta = reading.timestamp - prior.timestamp;

            if thresholds.max_time.is_some_and(|max| time_delta >= max) {
                return (accept, Reason::MaxTimeElapsed);
            }

            if thresholds.min_time.is_some_and(|min| time_delta < min)
                && (self.config.mode == Mode::And || thresholds.min_delta.is_none())
            {
                return (Verdict::Reject, Reason::MinTimeNotElapsed);
            }
        }

        if let Some(min_delta) = thresholds.min_delta {
            let value_delta = (reading.value - prior.value).abs();
            if value_delta < min_delta {
                return (Verdict::Reject, Reason::DeltaBelowMinimum);
            }
        }

        (accept, Reason::ThresholdsMet)
    }
}
