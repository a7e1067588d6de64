//! Typed declaration and state for a generic secret.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::schema::GenericSecretField;

/// Operator-declared configuration of one `vault_generic_secret`
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenericSecretConfig {
    /// Full logical path; changing it replaces the resource
    pub path: String,

    /// JSON object to store at `path`
    pub data_json: String,

    /// Read the secret back during refresh
    #[serde(default)]
    pub allow_read: bool,
}

impl GenericSecretConfig {
    pub fn new(path: impl Into<String>, data_json: impl Into<String>) -> Self {
        Self { path: path.into(), data_json: data_json.into(), allow_read: false }
    }

    pub fn with_allow_read(mut self, allow_read: bool) -> Self {
        self.allow_read = allow_read;
        self
    }

    /// String value of `field`, `None` for non-string fields
    pub fn string_field(&self, field: GenericSecretField) -> Option<&str> {
        match field {
            GenericSecretField::Path => Some(&self.path),
            GenericSecretField::DataJson => Some(&self.data_json),
            GenericSecretField::AllowRead => None,
        }
    }

    /// Set a string field; ignored for non-string fields
    pub fn set_string_field(&mut self, field: GenericSecretField, value: String) {
        match field {
            GenericSecretField::Path => self.path = value,
            GenericSecretField::DataJson => self.data_json = value,
            GenericSecretField::AllowRead => {}
        }
    }
}

// data_json holds secret material
impl fmt::Debug for GenericSecretConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenericSecretConfig")
            .field("path", &self.path)
            .field("data_json", &format!("[{} bytes]", self.data_json.len()))
            .field("allow_read", &self.allow_read)
            .finish()
    }
}

/// Lifecycle status derived from resource data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceStatus {
    /// No identity: never written, or destroyed
    Absent,
    /// Written, but not read back from the store
    PresentUnverified,
    /// Last refresh read the data back from the store
    PresentVerified,
}

/// Per-resource data handed to the lifecycle handlers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceData {
    #[serde(flatten)]
    config: GenericSecretConfig,

    #[serde(default)]
    id: Option<String>,

    #[serde(default)]
    verified: bool,
}

impl ResourceData {
    /// Data for a declaration that has not been applied yet
    pub fn new(config: GenericSecretConfig) -> Self {
        Self { config, id: None, verified: false }
    }

    pub fn config(&self) -> &GenericSecretConfig {
        &self.config
    }

    pub fn path(&self) -> &str {
        &self.config.path
    }

    pub fn data_json(&self) -> &str {
        &self.config.data_json
    }

    pub fn allow_read(&self) -> bool {
        self.config.allow_read
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn set_data_json(&mut self, data_json: impl Into<String>) {
        self.config.data_json = data_json.into();
    }

    /// Record the identity after a successful write
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = Some(id.into());
    }

    /// Drop the identity; the resource is treated as absent
    pub fn clear_id(&mut self) {
        self.id = None;
        self.verified = false;
    }

    pub fn set_verified(&mut self, verified: bool) {
        self.verified = verified;
    }

    pub fn status(&self) -> ResourceStatus {
        match (&self.id, self.verified) {
            (None, _) => ResourceStatus::Absent,
            (Some(_), false) => ResourceStatus::PresentUnverified,
            (Some(_), true) => ResourceStatus::PresentVerified,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization_defaults_allow_read() {
        let config: GenericSecretConfig =
            serde_json::from_str(r#"{"path": "secret/foo", "data_json": "{}"}"#).unwrap();
        assert_eq!(config.path, "secret/foo");
        assert!(!config.allow_read);
    }

    #[test]
    fn test_config_debug_hides_data() {
        let config = GenericSecretConfig::new("secret/foo", r#"{"password": "hunter2"}"#);
        let debug_output = format!("{:?}", config);

        assert!(debug_output.contains("secret/foo"));
        assert!(!debug_output.contains("hunter2"));
    }

    #[test]
    fn test_string_field_access() {
        let mut config = GenericSecretConfig::new("secret/foo", "{}");
        assert_eq!(config.string_field(GenericSecretField::Path), Some("secret/foo"));
        assert_eq!(config.string_field(GenericSecretField::AllowRead), None);

        config.set_string_field(GenericSecretField::DataJson, r#"{"a":1}"#.to_string());
        assert_eq!(config.data_json, r#"{"a":1}"#);
    }

    #[test]
    fn test_status_transitions() {
        let mut data = ResourceData::new(GenericSecretConfig::new("secret/foo", "{}"));
        assert_eq!(data.status(), ResourceStatus::Absent);

        data.set_id("secret/foo");
        assert_eq!(data.status(), ResourceStatus::PresentUnverified);

        data.set_verified(true);
        assert_eq!(data.status(), ResourceStatus::PresentVerified);

        data.clear_id();
        assert_eq!(data.status(), ResourceStatus::Absent);
        assert!(data.id().is_none());
    }

    #[test]
    fn test_resource_data_state_json() {
        let config = GenericSecretConfig::new("secret/foo", r#"{"a":1}"#).with_allow_read(true);
        let mut data = ResourceData::new(config);
        data.set_id("secret/foo");

        let json = serde_json::to_value(&data).unwrap();
        assert_eq!(json["path"], "secret/foo");
        assert_eq!(json["data_json"], r#"{"a":1}"#);
        assert_eq!(json["allow_read"], true);
        assert_eq!(json["id"], "secret/foo");

        let back: ResourceData = serde_json::from_value(json).unwrap();
        assert_eq!(back, data);
    }
}
