//! Conversion of extracted JSON fields into numbers and identifiers
//!
//! Permissive coercion never fails: anything that is not recognisably
//! numeric becomes NaN, and so does any string spelling of infinity. NaN never satisfies a threshold comparison, so the
//! detector lets such readings fall through to acceptance.

use serde_json::Value;

use crate::values::Identifier;

/// Coerce a field to a number, NaN when not numeric
///
/// - numbers pass through
/// - strings are trimmed and parsed, the empty string is 0; only finite
///   results count, so `"inf"` and `"Infinity"` are NaN
/// - `true`/`false` are 1/0, `null` is 0
/// - arrays and objects are NaN
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                0.0
            } else {
                parse_finite(trimmed).unwrap_or(f64::NAN)
            }
        }
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Null => 0.0,
        Value::Array(_) | Value::Object(_) => f64::NAN,
    }
}

/// Coerce a field to a number, `None` unless it is a number or numeric string
pub fn to_number_strict(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => parse_finite(s.trim()),
        _ => None,
    }
}

fn parse_finite(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Turn a field into a state key
///
/// Scalars are keyed by their text: `null` is `"null"`, and integral
/// numbers drop the fraction (`7.0` is `"7"`). Returns `None` for empty
/// strings, arrays and objects; those are reported as a missing identifier.
pub fn to_identifier(value: &Value) -> Option<Identifier> {
    match value {
        Value::String(s) if s.is_empty() => None,
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(number_key(n)),
        Value::Bool(b) => Some(b.to_string()),
        Value::Null => Some("null".to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }
}

fn number_key(n: &serde_json::Number) -> String {
    if n.is_f64() {
        // f64 Display has no trailing ".0"
        n.as_f64().map_or_else(|| n.to_string(), |f| f.to_string())
    } else {
        n.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number() {
        assert_eq!(to_number(&json!(100)), 100.0);
        assert_eq!(to_number(&json!(-2.5)), -2.5);
        assert_eq!(to_number(&json!(" 42 ")), 42.0);
        assert_eq!(to_number(&json!("")), 0.0);
        assert_eq!(to_number(&json!(true)), 1.0);
        assert_eq!(to_number(&json!(false)), 0.0);
        assert_eq!(to_number(&Value::Null), 0.0);
    }

    #[test]
    fn test_non_numeric_is_nan() {
        assert!(to_number(&json!("payload")).is_nan());
        assert!(to_number(&json!([1, 2])).is_nan());
        assert!(to_number(&json!({ "a": 1 })).is_nan());
    }

    #[test]
    fn test_infinity_strings_are_nan() {
        assert!(to_number(&json!("inf")).is_nan());
        assert!(to_number(&json!("-Infinity")).is_nan());
        assert!(to_number(&json!(" infinity ")).is_nan());
        assert!(to_number(&json!("nan")).is_nan());
        assert_eq!(to_number(&json!("1e308")), 1e308);

        assert_eq!(to_number_strict(&json!("inf")), None);
        assert_eq!(to_number_strict(&json!("-Infinity")), None);
        assert_eq!(to_number_strict(&json!("nan")), None);
        assert_eq!(to_number_strict(&json!("1e400")), None);
    }

    #[test]
    fn test_to_number_strict() {
        assert_eq!(to_number_strict(&json!(7)), Some(7.0));
        assert_eq!(to_number_strict(&json!("7.5")), Some(7.5));
        assert_eq!(to_number_strict(&json!("NaN")), None);
        assert_eq!(to_number_strict(&json!("payload")), None);
        assert_eq!(to_number_strict(&json!(true)), None);
        assert_eq!(to_number_strict(&Value::Null), None);
    }

    #[test]
    fn test_to_identifier() {
        assert_eq!(to_identifier(&json!("topic")), Some("topic".to_string()));
        assert_eq!(to_identifier(&json!(17)), Some("17".to_string()));
        assert_eq!(to_identifier(&json!(7.0)), Some("7".to_string()));
        assert_eq!(to_identifier(&json!(7.25)), Some("7.25".to_string()));
        assert_eq!(to_identifier(&json!(true)), Some("true".to_string()));
        assert_eq!(to_identifier(&Value::Null), Some("null".to_string()));
        assert_eq!(to_identifier(&json!("")), None);
        assert_eq!(to_identifier(&json!([1])), None);
        assert_eq!(to_identifier(&json!({ "id": 1 })), None);
    }
}
