//! Property tests for the decision engine
//!
//! Covers the universally quantified rules: first sighting, the maxTime
//! override, AND strictness, OR deferral to the value check, and default
//! extraction.

use delta_core::{
    ChangeDetector, DetectorConfig, DetectorState, Message, Mode, Reading, Verdict, extract,
};
use proptest::prelude::*;
use serde_json::json;

fn finite() -> impl Strategy<Value = f64> {
    -1.0e6..1.0e6f64
}

fn positive() -> impl Strategy<Value = f64> {
    0.0..1.0e4f64
}

fn mode() -> impl Strategy<Value = Mode> {
    prop_oneof![Just(Mode::Or), Just(Mode::And)]
}

fn optional(strategy: impl Strategy<Value = f64>) -> impl Strategy<Value = Option<f64>> {
    prop::option::of(strategy)
}

fn config(
    mode: Mode,
    min_time: Option<f64>,
    max_time: Option<f64>,
    min_delta: Option<f64>,
) -> DetectorConfig {
    let mut config = DetectorConfig::new(mode);
    config.thresholds.min_time = min_time;
    config.thresholds.max_time = max_time;
    config.thresholds.min_delta = min_delta;
    config
}

proptest! {
    #[test]
    fn first_sighting_always_accepts(
        mode in mode(),
        min_time in optional(positive()),
        max_time in optional(positive()),
        min_delta in optional(positive()),
        ts in finite(),
        value in finite(),
    ) {
        let detector = ChangeDetector::new(config(mode, min_time, max_time, min_delta));
        let reading = Reading::new(ts, value);

        prop_assert_eq!(detector.evaluate(reading, None), Verdict::Accept(reading.to_state()));
    }

    #[test]
    fn max_time_elapsed_always_accepts(
        mode in mode(),
        min_time in optional(positive()),
        max_time in positive(),
        min_delta in optional(positive()),
        prior_ts in finite(),
        prior_value in finite(),
        extra in positive(),
        value in finite(),
    ) {
        let detector = ChangeDetector::new(config(mode, min_time, Some(max_time), min_delta));
        let prior = DetectorState { timestamp: prior_ts, value: prior_value };
        let reading = Reading::new(prior_ts + max_time + extra, value);

        // Float rounding can pull the delta just under maxTime
        prop_assume!(reading.timestamp - prior_ts >= max_time);
        prop_assert!(detector.evaluate(reading, Some(&prior)).is_accept());
    }

    #[test]
    fn and_mode_requires_both(
        min_time in positive(),
        min_delta in positive(),
        time_delta in 0.0..2.0e4f64,
        value_delta in -2.0e4..2.0e4f64,
    ) {
        let detector = ChangeDetector::new(
            DetectorConfig::new(Mode::And).with_min_time(min_time).with_min_delta(min_delta),
        );
        let prior = DetectorState { timestamp: 1_000.0, value: 0.0 };
        let reading = Reading::new(prior.timestamp + time_delta, prior.value + value_delta);

        let time_ok = reading.timestamp - prior.timestamp >= min_time;
        let value_ok = (reading.value - prior.value).abs() >= min_delta;

        prop_assert_eq!(detector.evaluate(reading, Some(&prior)).is_accept(), time_ok && value_ok);
    }

    #[test]
    fn or_mode_lets_value_override_time(
        min_time in positive(),
        min_delta in positive(),
        time_delta in 0.0..2.0e4f64,
        value_delta in -2.0e4..2.0e4f64,
    ) {
        let detector = ChangeDetector::new(
            DetectorConfig::new(Mode::Or).with_min_time(min_time).with_min_delta(min_delta),
        );
        let prior = DetectorState { timestamp: 1_000.0, value: 0.0 };
        let reading = Reading::new(prior.timestamp + time_delta, prior.value + value_delta);

        let value_ok = (reading.value - prior.value).abs() >= min_delta;

        // A failed minTime defers to the value check, and a passed one still
        // has to clear it, so in OR mode the magnitude alone decides
        prop_assert_eq!(detector.evaluate(reading, Some(&prior)).is_accept(), value_ok);
    }

    #[test]
    fn reject_never_carries_state(
        mode in mode(),
        min_time in optional(positive()),
        min_delta in optional(positive()),
        ts in finite(),
        value in finite(),
    ) {
        let detector = ChangeDetector::new(config(mode, min_time, None, min_delta));
        let prior = DetectorState { timestamp: 0.0, value: 0.0 };
        let verdict = detector.evaluate(Reading::new(ts, value), Some(&prior));

        if !verdict.is_accept() {
            prop_assert_eq!(verdict.new_state(), None);
        }
    }

    #[test]
    fn default_ignores_message_contents(key in "[a-z]{1,8}", field in any::<i64>(), default in any::<i64>()) {
        let mut fields = serde_json::Map::new();
        fields.insert(key, json!(field));
        let msg = Message::new(serde_json::Value::Object(fields));
        prop_assert_eq!(extract(&msg, None, Some(json!(default))).unwrap(), json!(default));
    }
}
