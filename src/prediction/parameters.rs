//! Typed extraction of prediction inputs from a request body.
//!
//! Policy:
//! - empty body, invalid JSON, or a JSON value that is not an object → all defaults
//! - recognized key absent → 0.0
//! - recognized key holding a JSON number → that value
//! - recognized key holding anything else (including `null`) →
//!   [`ParameterError::InvalidParameterType`]
//! - unrecognized keys → ignored

use serde_json::{Map, Value};
use thiserror::Error;
use tracing::debug;

/// Recognized key for atmospheric CO₂.
pub const KEY_CO2: &str = "co2";
/// Recognized key for deforestation.
pub const KEY_DEFORESTATION: &str = "deforestation";
/// Recognized key for renewable energy adoption.
pub const KEY_RENEWABLE_ADOPTION: &str = "renewable_adoption";

/// All keys that influence a prediction.
pub const RECOGNIZED_KEYS: [&str; 3] = [KEY_CO2, KEY_DEFORESTATION, KEY_RENEWABLE_ADOPTION];

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParameterError {
    #[error("Parameter '{key}' must be a number, got {found}")]
    InvalidParameterType { key: &'static str, found: &'static str },
}

/// Climate drivers used by the prediction formula. Missing drivers are zero.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ParameterSet {
    pub co2: f64,
    pub deforestation: f64,
    pub renewable_adoption: f64,
}

impl ParameterSet {
    /// Build a parameter set from a raw request body.
    ///
    /// Only a JSON object can produce an error, and only when one of the
    /// recognized keys carries a non-numeric value.
    pub fn from_body(body: &[u8]) -> Result<Self, ParameterError> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        match serde_json::from_slice::<Value>(body) {
            Ok(Value::Object(map)) => Self::from_map(&map),
            Ok(other) => {
                debug!(
                    kind = json_type_name(&other),
                    "Request body is not a JSON object, using defaults"
                );
                Ok(Self::default())
            }
            Err(e) => {
                debug!(error = %e, "Malformed request body, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Build a parameter set from an already-decoded JSON object.
    pub fn from_map(map: &Map<String, Value>) -> Result<Self, ParameterError> {
        let ignored = ignored_keys(map);
        if !ignored.is_empty() {
            debug!(keys = %ignored.join(","), "Ignoring unrecognized parameters");
        }

        Ok(Self {
            co2: numeric_field(map, KEY_CO2)?,
            deforestation: numeric_field(map, KEY_DEFORESTATION)?,
            renewable_adoption: numeric_field(map, KEY_RENEWABLE_ADOPTION)?,
        })
    }
}

/// Keys of `map` that do not influence a prediction, in map order.
pub fn ignored_keys(map: &Map<String, Value>) -> Vec<&str> {
    map.keys()
        .map(String::as_str)
        .filter(|key| !RECOGNIZED_KEYS.contains(key))
        .collect()
}

fn numeric_field(map: &Map<String, Value>, key: &'static str) -> Result<f64, ParameterError> {
    match map.get(key) {
        None => Ok(0.0),
        Some(Value::Number(n)) => n.as_f64().ok_or(ParameterError::InvalidParameterType {
            key,
            found: "number",
        }),
        Some(other) => Err(ParameterError::InvalidParameterType {
            key,
            found: json_type_name(other),
        }),
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_body_is_default() {
        assert_eq!(ParameterSet::from_body(b"").unwrap(), ParameterSet::default());
        assert_eq!(ParameterSet::from_body(b"  \n\t").unwrap(), ParameterSet::default());
    }

    #[test]
    fn test_malformed_body_is_default() {
        assert_eq!(ParameterSet::from_body(b"{co2: 100").unwrap(), ParameterSet::default());
        assert_eq!(ParameterSet::from_body(b"not json").unwrap(), ParameterSet::default());
    }

    #[test]
    fn test_non_object_json_is_default() {
        for body in [&b"[1, 2, 3]"[..], b"42", b"\"co2\"", b"true", b"null"] {
            assert_eq!(
                ParameterSet::from_body(body).unwrap(),
                ParameterSet::default(),
                "body {:?}",
                String::from_utf8_lossy(body)
            );
        }
    }

    #[test]
    fn test_recognized_keys_extracted() {
        let params = ParameterSet::from_body(
            br#"{"co2": 415.5, "deforestation": -2, "renewable_adoption": 30}"#,
        )
        .unwrap();
        assert_eq!(
            params,
            ParameterSet {
                co2: 415.5,
                deforestation: -2.0,
                renewable_adoption: 30.0,
            }
        );
    }

    #[test]
    fn test_missing_keys_default_to_zero() {
        let params = ParameterSet::from_body(br#"{"deforestation": 40}"#).unwrap();
        assert_eq!(params.co2, 0.0);
        assert_eq!(params.deforestation, 40.0);
        assert_eq!(params.renewable_adoption, 0.0);
    }

    #[test]
    fn test_unrecognized_keys_ignored() {
        let params =
            ParameterSet::from_body(br#"{"foo": 999, "bar": "text", "co2": 1}"#).unwrap();
        assert_eq!(params, ParameterSet { co2: 1.0, ..ParameterSet::default() });
    }

    #[test]
    fn test_ignored_keys_excludes_recognized() {
        let Value::Object(map) = serde_json::json!({
            "co2": 1,
            "region": "amazon",
            "renewable_adoption": 2,
            "year": 2050
        }) else {
            unreachable!()
        };
        let mut ignored = ignored_keys(&map);
        ignored.sort_unstable();
        assert_eq!(ignored, ["region", "year"]);

        let Value::Object(only_known) =
            serde_json::json!({"co2": 1, "deforestation": 2, "renewable_adoption": 3})
        else {
            unreachable!()
        };
        assert!(ignored_keys(&only_known).is_empty());
    }

    #[test]
    fn test_non_numeric_value_rejected() {
        let err = ParameterSet::from_body(br#"{"co2": "high"}"#).unwrap_err();
        assert_eq!(
            err,
            ParameterError::InvalidParameterType { key: "co2", found: "string" }
        );
        assert_eq!(err.to_string(), "Parameter 'co2' must be a number, got string");
    }

    #[test]
    fn test_null_value_rejected() {
        let err = ParameterSet::from_body(br#"{"renewable_adoption": null}"#).unwrap_err();
        assert_eq!(
            err,
            ParameterError::InvalidParameterType { key: "renewable_adoption", found: "null" }
        );
    }

    #[test]
    fn test_nested_values_rejected() {
        let err = ParameterSet::from_body(br#"{"deforestation": [40]}"#).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidParameterType { found: "array", .. }));

        let err = ParameterSet::from_body(br#"{"co2": {"value": 1}}"#).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidParameterType { found: "object", .. }));

        let err = ParameterSet::from_body(br#"{"co2": true}"#).unwrap_err();
        assert!(matches!(err, ParameterError::InvalidParameterType { found: "boolean", .. }));
    }
}
