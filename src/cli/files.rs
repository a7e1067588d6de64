//! Declaration and state files used by the CLI.
//!
//! Both are YAML documents; JSON files load too since YAML is a superset.
//! State files hold the resource data, including `data_json`, so they are
//! as sensitive as the secret itself.

use std::fs;
use std::path::Path;

use crate::errors::{ProviderError, Result};
use crate::resource::{GenericSecretConfig, ResourceData};

/// Load an operator declaration
pub fn load_declaration(path: &Path) -> Result<GenericSecretConfig> {
    let contents = read(path, "declaration")?;
    serde_yaml::from_str(&contents).map_err(|e| {
        ProviderError::validation(format!("Invalid declaration in {}: {}", path.display(), e))
    })
}

/// Load stored resource data, `None` if the file does not exist
pub fn load_state(path: &Path) -> Result<Option<ResourceData>> {
    if !path.exists() {
        return Ok(None);
    }
    let contents = read(path, "state")?;
    let data = serde_yaml::from_str(&contents).map_err(|e| {
        ProviderError::internal(format!("Corrupt state file {}: {}", path.display(), e))
    })?;
    Ok(Some(data))
}

/// Persist resource data as JSON, or remove the file once the resource is gone
pub fn save_state(path: &Path, data: &ResourceData) -> Result<()> {
    if data.id().is_none() {
        return match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ProviderError::io(format!("Failed to remove {}", path.display()), e)),
        };
    }

    let json = serde_json::to_string_pretty(data)?;
    fs::write(path, json)
        .map_err(|e| ProviderError::io(format!("Failed to write state {}", path.display()), e))
}

fn read(path: &Path, kind: &str) -> Result<String> {
    fs::read_to_string(path)
        .map_err(|e| ProviderError::io(format!("Failed to read {} {}", kind, path.display()), e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_yaml_declaration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.yaml");
        fs::write(&path, "path: secret/foo\ndata_json: '{\"a\": 1}'\nallow_read: true\n").unwrap();

        let config = load_declaration(&path).unwrap();
        assert_eq!(config.path, "secret/foo");
        assert_eq!(config.data_json, r#"{"a": 1}"#);
        assert!(config.allow_read);
    }

    #[test]
    fn test_load_json_declaration() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("secret.json");
        fs::write(&path, r#"{"path": "secret/foo", "data_json": "{}"}"#).unwrap();

        let config = load_declaration(&path).unwrap();
        assert!(!config.allow_read);
    }

    #[test]
    fn test_declaration_errors() {
        let dir = TempDir::new().unwrap();

        let missing = load_declaration(&dir.path().join("missing.yaml")).unwrap_err();
        assert!(matches!(missing, ProviderError::Io { .. }));

        let path = dir.path().join("bad.yaml");
        fs::write(&path, "path: secret/foo\n").unwrap();
        let invalid = load_declaration(&path).unwrap_err();
        assert!(matches!(invalid, ProviderError::Validation { .. }));
    }

    #[test]
    fn test_state_lifecycle() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("state.json");
        assert!(load_state(&path).unwrap().is_none());

        let mut data = ResourceData::new(GenericSecretConfig::new("secret/foo", r#"{"a":1}"#));
        data.set_id("secret/foo");
        save_state(&path, &data).unwrap();
        assert_eq!(load_state(&path).unwrap(), Some(data.clone()));

        data.clear_id();
        save_state(&path, &data).unwrap();
        assert!(!path.exists());

        // removing an already-absent state file is fine
        save_state(&path, &data).unwrap();
    }
}
