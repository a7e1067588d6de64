//! Schema declaration for `vault_generic_secret`.
//!
//! Describes the accepted fields, their types and constraints, and the
//! validate/state functions the host engine runs on them at plan time.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

use super::data::GenericSecretConfig;
use crate::errors::{ProviderError, Result};
use crate::validation::{normalize_data_json, validate_data_json};

/// Declared field of the generic secret resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GenericSecretField {
    /// Full logical path the secret is written to
    Path,
    /// JSON-encoded secret data
    DataJson,
    /// Whether the configured token may read the secret back
    AllowRead,
}

impl GenericSecretField {
    pub const ALL: [GenericSecretField; 3] =
        [GenericSecretField::Path, GenericSecretField::DataJson, GenericSecretField::AllowRead];

    /// Get the attribute name of this field
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::DataJson => "data_json",
            Self::AllowRead => "allow_read",
        }
    }
}

impl FromStr for GenericSecretField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| format!("Unknown vault_generic_secret field: {}", s))
    }
}

impl fmt::Display for GenericSecretField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Value type of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttributeType {
    String,
    Bool,
}

/// Plan-time check run on a string attribute
pub type ValidateFn = fn(&str) -> Result<()>;

/// Maps a configured string to the form stored in state
pub type StateFn = fn(&str) -> String;

/// One attribute of the resource schema
#[derive(Clone, Serialize)]
pub struct AttributeSchema {
    #[serde(rename = "name")]
    pub field: GenericSecretField,

    #[serde(rename = "type")]
    pub kind: AttributeType,

    pub required: bool,

    pub optional: bool,

    /// Changing the value destroys and recreates the resource
    pub force_new: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,

    pub description: &'static str,

    #[serde(skip)]
    pub validate: Option<ValidateFn>,

    #[serde(skip)]
    pub state: Option<StateFn>,
}

impl fmt::Debug for AttributeSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AttributeSchema")
            .field("field", &self.field)
            .field("kind", &self.kind)
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("force_new", &self.force_new)
            .field("default", &self.default)
            .field("validate", &self.validate.is_some())
            .field("state", &self.state.is_some())
            .finish()
    }
}

impl AttributeSchema {
    fn new(field: GenericSecretField, kind: AttributeType, description: &'static str) -> Self {
        Self {
            field,
            kind,
            required: false,
            optional: false,
            force_new: false,
            default: None,
            description,
            validate: None,
            state: None,
        }
    }

    /// Declare a string attribute
    pub fn string(field: GenericSecretField, description: &'static str) -> Self {
        Self::new(field, AttributeType::String, description)
    }

    /// Declare a bool attribute
    pub fn bool(field: GenericSecretField, description: &'static str) -> Self {
        Self::new(field, AttributeType::Bool, description)
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self.optional = false;
        self
    }

    pub fn optional(mut self) -> Self {
        self.optional = true;
        self.required = false;
        self
    }

    pub fn force_new(mut self) -> Self {
        self.force_new = true;
        self
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_validate(mut self, validate: ValidateFn) -> Self {
        self.validate = Some(validate);
        self
    }

    pub fn with_state(mut self, state: StateFn) -> Self {
        self.state = Some(state);
        self
    }
}

/// Full schema of a resource type
#[derive(Debug, Clone, Serialize)]
pub struct ResourceSchema {
    pub type_name: &'static str,
    pub attributes: Vec<AttributeSchema>,
}

impl ResourceSchema {
    /// Look up the attribute declared for `field`
    pub fn attribute(&self, field: GenericSecretField) -> Option<&AttributeSchema> {
        self.attributes.iter().find(|a| a.field == field)
    }

    /// True if changing `field` forces replacement
    pub fn forces_new(&self, field: GenericSecretField) -> bool {
        self.attribute(field).is_some_and(|a| a.force_new)
    }

    /// Run required checks and validate functions against a declaration.
    ///
    /// Stops at the first failing attribute so each bad field produces a
    /// single error.
    pub fn validate(&self, config: &GenericSecretConfig) -> Result<()> {
        for attribute in &self.attributes {
            let Some(value) = config.string_field(attribute.field) else {
                continue;
            };

            if attribute.required && value.trim().is_empty() {
                return Err(ProviderError::validation_field(
                    format!("{} is required", attribute.field),
                    attribute.field.as_str(),
                ));
            }

            if let Some(validate) = attribute.validate {
                validate(value)?;
            }
        }
        Ok(())
    }

    /// Replace each string field with the output of its state function
    pub fn apply_state(&self, config: &mut GenericSecretConfig) {
        for attribute in &self.attributes {
            let Some(state) = attribute.state else {
                continue;
            };
            if let Some(value) = config.string_field(attribute.field) {
                let stored = state(value);
                config.set_string_field(attribute.field, stored);
            }
        }
    }
}

/// Schema of the `vault_generic_secret` resource
pub fn generic_secret_schema() -> ResourceSchema {
    ResourceSchema {
        type_name: super::RESOURCE_TYPE,
        attributes: vec![
            AttributeSchema::string(
                GenericSecretField::Path,
                "Full path where the generic secret will be written.",
            )
            .required()
            .force_new(),
            // Arbitrary JSON so values are not forced to be strings. Stored in
            // canonical form so whitespace or key order never shows up as a diff.
            AttributeSchema::string(
                GenericSecretField::DataJson,
                "JSON-encoded secret data to write.",
            )
            .required()
            .with_validate(validate_data_json)
            .with_state(normalize_data_json),
            AttributeSchema::bool(
                GenericSecretField::AllowRead,
                "True if the provided token is allowed to read the secret from vault",
            )
            .optional()
            .with_default(false),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_roundtrip() {
        for field in GenericSecretField::ALL {
            let parsed: GenericSecretField = field.as_str().parse().unwrap();
            assert_eq!(field, parsed);
            assert_eq!(field.to_string(), field.as_str());
        }
        assert!("data".parse::<GenericSecretField>().is_err());
    }

    #[test]
    fn test_generic_secret_schema_shape() {
        let schema = generic_secret_schema();
        assert_eq!(schema.type_name, "vault_generic_secret");
        assert_eq!(schema.attributes.len(), 3);

        let path = schema.attribute(GenericSecretField::Path).unwrap();
        assert_eq!(path.kind, AttributeType::String);
        assert!(path.required);
        assert!(path.force_new);

        let data_json = schema.attribute(GenericSecretField::DataJson).unwrap();
        assert!(data_json.required);
        assert!(!data_json.force_new);
        assert!(data_json.validate.is_some());
        assert!(data_json.state.is_some());

        let allow_read = schema.attribute(GenericSecretField::AllowRead).unwrap();
        assert_eq!(allow_read.kind, AttributeType::Bool);
        assert!(allow_read.optional);
        assert_eq!(allow_read.default, Some(Value::Bool(false)));
    }

    #[test]
    fn test_forces_new_only_for_path() {
        let schema = generic_secret_schema();
        assert!(schema.forces_new(GenericSecretField::Path));
        assert!(!schema.forces_new(GenericSecretField::DataJson));
        assert!(!schema.forces_new(GenericSecretField::AllowRead));
    }

    #[test]
    fn test_validate_declarations() {
        let schema = generic_secret_schema();

        let ok = GenericSecretConfig::new("secret/foo", r#"{"key": "value"}"#);
        assert!(schema.validate(&ok).is_ok());

        let missing_path = GenericSecretConfig::new("", r#"{"key": "value"}"#);
        let err = schema.validate(&missing_path).unwrap_err();
        assert!(err.to_string().contains("path is required"));

        let not_object = GenericSecretConfig::new("secret/foo", "[1,2,3]");
        let err = schema.validate(&not_object).unwrap_err();
        assert!(matches!(
            err,
            ProviderError::Validation { field: Some(ref f), .. } if f == "data_json"
        ));
    }

    #[test]
    fn test_apply_state_normalizes_data_json() {
        let schema = generic_secret_schema();
        let mut config = GenericSecretConfig::new("secret/foo", "{ \"b\": 2,\n \"a\": 1 }");

        schema.apply_state(&mut config);
        assert_eq!(config.data_json, r#"{"a":1,"b":2}"#);
        assert_eq!(config.path, "secret/foo");
    }

    #[test]
    fn test_schema_serializes_without_functions() {
        let json = serde_json::to_value(generic_secret_schema()).unwrap();
        let attributes = json["attributes"].as_array().unwrap();

        assert_eq!(attributes[0]["name"], "path");
        assert_eq!(attributes[0]["type"], "string");
        assert_eq!(attributes[2]["default"], false);
        assert!(attributes[1].get("validate").is_none());
    }
}
