//! # Configuration Settings
//!
//! Defines the configuration structure for the vault_generic_secret provider.

use serde::{Deserialize, Serialize};
use std::path::Path;
use validator::Validate;

use crate::errors::{ProviderError, Result};
use crate::secrets::VaultConfig;

/// Prefix for layered environment overrides
pub const ENV_PREFIX: &str = "VAULT_GENERIC_SECRET";

/// Main provider configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ProviderSettings {
    /// Vault connection configuration
    #[validate(nested)]
    pub vault: VaultConfig,

    /// Logging configuration
    #[validate(nested)]
    pub observability: ObservabilityConfig,
}

impl ProviderSettings {
    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        Validate::validate(self).map_err(ProviderError::from)?;

        if self.vault.token.as_ref().is_some_and(|t| t.is_empty()) {
            return Err(ProviderError::config("Vault token cannot be empty when set"));
        }

        Ok(())
    }
}

/// Observability configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level or filter directives, used when `RUST_LOG` is unset
    #[validate(length(min = 1, message = "Log level cannot be empty"))]
    pub log_level: String,

    /// Enable JSON structured logging
    pub json_logging: bool,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self { log_level: "info".to_string(), json_logging: false }
    }
}

/// Load provider settings from defaults, an optional file and the environment
pub fn load_settings(path: Option<&Path>) -> Result<ProviderSettings> {
    let mut builder = config::Config::builder();

    if let Some(path) = path {
        if !path.exists() {
            return Err(ProviderError::config(format!(
                "Settings file not found: {}",
                path.display()
            )));
        }
        builder = builder.add_source(config::File::from(path).required(true));
    }

    builder = builder.add_source(
        config::Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    let mut settings: ProviderSettings = builder.build()?.try_deserialize()?;
    settings.vault.apply_env_overrides();
    settings.validate()?;

    tracing::debug!(
        vault_address = %settings.vault.address,
        from_file = path.is_some(),
        "Loaded provider settings"
    );

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use std::sync::Mutex;
    use tempfile::NamedTempFile;

    // Tests below mutate process-wide environment variables.
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    const VARS: [&str; 6] = [
        "VAULT_ADDR",
        "VAULT_TOKEN",
        "VAULT_NAMESPACE",
        "VAULT_GENERIC_SECRET__VAULT__TIMEOUT_SECONDS",
        "VAULT_GENERIC_SECRET__VAULT__ADDRESS",
        "VAULT_GENERIC_SECRET__OBSERVABILITY__JSON_LOGGING",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    fn test_default_settings() {
        let settings = ProviderSettings::default();
        assert_eq!(settings.vault.address, "http://127.0.0.1:8200");
        assert_eq!(settings.vault.timeout_seconds, 60);
        assert_eq!(settings.observability.log_level, "info");
        assert!(!settings.observability.json_logging);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_load_settings_defaults_without_file() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let settings = load_settings(None).unwrap();
        assert_eq!(settings, ProviderSettings::default());
    }

    #[test]
    fn test_load_settings_from_yaml_file() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(
            file,
            "vault:\n  address: https://vault.example.com:8200\n  namespace: team-a\n  timeout_seconds: 5\nobservability:\n  json_logging: true"
        )
        .unwrap();

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.vault.address, "https://vault.example.com:8200");
        assert_eq!(settings.vault.namespace.as_deref(), Some("team-a"));
        assert_eq!(settings.vault.timeout_seconds, 5);
        assert!(settings.observability.json_logging);
        assert_eq!(settings.observability.log_level, "info");
    }

    #[test]
    fn test_prefixed_env_overrides_file() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        let mut file = NamedTempFile::with_suffix(".yaml").unwrap();
        writeln!(file, "vault:\n  timeout_seconds: 5").unwrap();
        std::env::set_var("VAULT_GENERIC_SECRET__VAULT__TIMEOUT_SECONDS", "30");

        let settings = load_settings(Some(file.path())).unwrap();
        assert_eq!(settings.vault.timeout_seconds, 30);

        clear_env();
    }

    #[test]
    fn test_standard_vault_env_wins() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("VAULT_GENERIC_SECRET__VAULT__ADDRESS", "http://prefixed:8200");
        std::env::set_var("VAULT_ADDR", "http://standard:8200");
        std::env::set_var("VAULT_TOKEN", "s.token");

        let settings = load_settings(None).unwrap();
        assert_eq!(settings.vault.address, "http://standard:8200");
        assert_eq!(settings.vault.token.as_ref().map(|t| t.expose()), Some("s.token"));

        clear_env();
    }

    #[test]
    fn test_invalid_settings_rejected() {
        let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
        clear_env();

        std::env::set_var("VAULT_GENERIC_SECRET__VAULT__TIMEOUT_SECONDS", "0");
        let result = load_settings(None);
        clear_env();

        let err = result.unwrap_err();
        assert!(matches!(err, ProviderError::Config { .. }));
        assert!(err.to_string().contains("Validation failed"));
    }

    #[test]
    fn test_missing_settings_file() {
        let err = load_settings(Some(Path::new("/nonexistent/settings.yaml"))).unwrap_err();
        assert!(matches!(err, ProviderError::Config { .. }));
        assert!(err.to_string().contains("Settings file not found"));
    }
}
