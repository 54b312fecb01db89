//! This module implements validation from [`serde_json::Value`].
//!
//! # Examples
//!
//! ```
//! use treeguard::json::validate_json_str;
//! use treeguard::rules::StringRule;
//! use treeguard::{Options, Schema};
//!
//! let schema = Schema::new().field("name", StringRule::new().required().min(3));
//! validate_json_str(&schema, r#"{ "name": "Bob" }"#, Options::default()).unwrap();
//!
//! let err = validate_json_str(&schema, r#"{ "name": "" }"#, Options::default()).unwrap_err();
//! assert_eq!(err.bag().unwrap().get("name").unwrap(), &["name is required"]);
//! ```
//!

use crate::rules::Schema;
use crate::util::{ValidateError, ValidateResult};
use crate::validate::{validate, Options};
use crate::value::{Value, ValueMap};
use serde_json::Value as JSON_Value;
use std::convert::TryFrom;

// Convert JSON `Value`s to the local `Value` type that the validate code
// uses.

impl TryFrom<&JSON_Value> for Value {
    type Error = ValidateError;

    fn try_from(value: &JSON_Value) -> Result<Self, Self::Error> {
        let result = match value {
            JSON_Value::Null => Value::Null,
            JSON_Value::Bool(b) => Value::Bool(*b),
            JSON_Value::Number(num) => {
                if let Some(u) = num.as_u64() {
                    Value::Integer(u as i128)
                } else if let Some(i) = num.as_i64() {
                    Value::Integer(i as i128)
                } else if let Some(f) = num.as_f64() {
                    Value::from_float(f)
                } else {
                    return Err(ValidateError::ValueError(
                        "JSON Value::Number conversion failure".into(),
                    ));
                }
            }
            JSON_Value::String(t) => Value::Text(t.clone()),
            JSON_Value::Array(a) => {
                let array: Result<_, _> = a.iter().map(Value::try_from).collect();
                Value::Array(array?)
            }
            JSON_Value::Object(m) => {
                let map: Result<ValueMap, _> = m
                    .iter()
                    .map(|(k, v)| Ok::<_, ValidateError>((k.clone(), Value::try_from(v)?)))
                    .collect();
                Value::Map(map?)
            }
        };
        Ok(result)
    }
}

#[test]
fn test_json_number_behavior() {
    // Ensures that our JSON decoder tracks number types precisely, and
    // doesn't, say, allow floating-point values to become integers.
    // serde_json does sometimes permit as_f64 to work on integers, which is
    // why try_from has to test u64, then i64, then f64.

    let json_value: JSON_Value = serde_json::from_str("1").unwrap();
    assert!(json_value.as_u64().is_some());
    assert_eq!(Value::try_from(&json_value).unwrap(), Value::Integer(1));

    let json_value: JSON_Value = serde_json::from_str("-1").unwrap();
    assert!(json_value.as_u64().is_none());
    assert!(json_value.as_i64().is_some());
    assert_eq!(Value::try_from(&json_value).unwrap(), Value::Integer(-1));

    let json_value: JSON_Value = serde_json::from_str("1.0").unwrap();
    assert!(json_value.as_u64().is_none());
    assert!(json_value.as_i64().is_none());
    assert!(json_value.as_f64().is_some());
    assert_eq!(Value::try_from(&json_value).unwrap(), Value::from_float(1.0));
}

// A variant that consumes the JSON Value.
impl TryFrom<JSON_Value> for Value {
    type Error = ValidateError;

    fn try_from(value: JSON_Value) -> Result<Self, Self::Error> {
        Value::try_from(&value)
    }
}

/// Validate already-parsed JSON data against a schema.
pub fn validate_json(schema: &Schema, value: &JSON_Value, options: Options) -> ValidateResult {
    let value = Value::try_from(value)?;
    validate(&value, schema, options)
}

/// Validate JSON text against a schema.
pub fn validate_json_str(schema: &Schema, json: &str, options: Options) -> ValidateResult {
    // Deserialize the JSON bytes
    let json_value: JSON_Value =
        serde_json::from_str(json).map_err(|e| ValidateError::ValueError(format!("{}", e)))?;

    // Convert the JSON tree into a Value tree for validation
    let value = Value::try_from(json_value)?;
    validate(&value, schema, options)
}
