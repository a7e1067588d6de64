//! # Configuration Management
//!
//! Provider settings are layered from lowest to highest precedence:
//!
//! 1. Built-in defaults
//! 2. An optional settings file (YAML, JSON or TOML, chosen by extension)
//! 3. `VAULT_GENERIC_SECRET__<SECTION>__<KEY>` environment variables
//! 4. The standard `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_NAMESPACE` variables

pub mod settings;

pub use settings::{load_settings, ObservabilityConfig, ProviderSettings, ENV_PREFIX};
