//! Validation and canonical form for `data_json`.
//!
//! The canonical form is the compact, single-line serialization of the decoded
//! object with keys in ascending byte order at every nesting level. Arrays keep
//! their order. Two inputs that decode to the same object always normalize to
//! the same bytes, which is what the host engine compares to detect drift.

use serde_json::{Map, Value};

use crate::errors::{ProviderError, Result};
use crate::resource::GenericSecretField;

/// Check that `value` decodes to a JSON object.
///
/// Returns exactly one validation error for malformed JSON or for a
/// top-level value that is not an object.
pub fn validate_data_json(value: &str) -> Result<()> {
    decode_object(value).map(|_| ())
}

/// Canonical form of `value`, with degraded fallbacks.
///
/// This is the state function attached to `data_json`: it never fails.
/// Undecodable input yields `""` and an unencodable value yields the input
/// unchanged; both cases are logged at error level.
pub fn normalize_data_json(value: &str) -> String {
    let object = match decode_object(value) {
        Ok(object) => object,
        Err(e) => {
            tracing::error!(error = %e, "Invalid JSON data in vault_generic_secret");
            return String::new();
        }
    };

    match encode_canonical(object) {
        Ok(normalized) => normalized,
        Err(e) => {
            tracing::error!(error = %e, "Problem normalizing JSON for vault_generic_secret");
            value.to_string()
        }
    }
}

/// Canonical form of `value`, propagating decode and encode failures.
pub fn canonicalize_data_json(value: &str) -> Result<String> {
    let object = decode_object(value)?;
    encode_canonical(object)
        .map_err(|e| ProviderError::internal(format!("Failed to encode canonical JSON: {}", e)))
}

/// Canonical form of an already-decoded object.
pub fn canonical_json_string(data: &Map<String, Value>) -> serde_json::Result<String> {
    encode_canonical(data.clone())
}

fn decode_object(value: &str) -> Result<Map<String, Value>> {
    let field = GenericSecretField::DataJson.as_str();

    match serde_json::from_str::<Value>(value) {
        Ok(Value::Object(object)) => Ok(object),
        Ok(other) => Err(ProviderError::validation_field(
            format!("{} must be a JSON object, got {}", field, json_kind(&other)),
            field,
        )),
        Err(e) => Err(ProviderError::validation_field(
            format!("{} is not valid JSON: {}", field, e),
            field,
        )),
    }
}

fn encode_canonical(object: Map<String, Value>) -> serde_json::Result<String> {
    serde_json::to_string(&sort_keys(Value::Object(object)))
}

/// Rebuild objects with their keys inserted in sorted order, so the output
/// is ordered whether or not `serde_json` preserves insertion order.
fn sort_keys(value: Value) -> Value {
    match value {
        Value::Object(object) => {
            let mut entries: Vec<(String, Value)> = object.into_iter().collect();
            entries.sort_by(|a, b| a.0.cmp(&b.0));
            Value::Object(entries.into_iter().map(|(k, v)| (k, sort_keys(v))).collect())
        }
        Value::Array(items) => Value::Array(items.into_iter().map(sort_keys).collect()),
        other => other,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
