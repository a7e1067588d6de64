//! # vault-generic-secret
//!
//! The `vault_generic_secret` resource type for a desired-state provisioning
//! engine. It writes an arbitrary JSON object to a path in HashiCorp Vault's
//! logical key-value store, deletes it on destroy, and optionally reads it
//! back to detect drift.
//!
//! ## Components
//!
//! - **Resource**: schema, typed resource data, and the lifecycle handlers
//! - **Validation**: `data_json` validation and canonical normalization
//! - **Secrets**: the [`secrets::SecretStore`] trait and its Vault logical API client
//! - **Config / Observability**: layered settings and structured logging
//! - **CLI**: drives the handlers from declaration files
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use vault_generic_secret::resource::{
//!     GenericSecretConfig, GenericSecretResource, ProviderContext,
//! };
//! use vault_generic_secret::secrets::VaultConfig;
//!
//! # async fn example() -> vault_generic_secret::Result<()> {
//! let ctx = ProviderContext::configure(&VaultConfig::default()).await?;
//! let resource = GenericSecretResource::new();
//!
//! let config = GenericSecretConfig::new("secret/foo", r#"{"key": "value"}"#);
//! let mut data = resource.prepare(config)?;
//! resource.write(&mut data, &ctx).await?;
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod errors;
pub mod observability;
pub mod resource;
pub mod secrets;
pub mod validation;

// Re-export commonly used types and traits
pub use config::{load_settings, ProviderSettings};
pub use errors::{Error, Result};
pub use resource::{GenericSecretResource, ProviderContext, ResourceData, ResourceHandler};

/// Application version from Cargo.toml
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Application name from Cargo.toml
pub const APP_NAME: &str = env!("CARGO_PKG_NAME");
