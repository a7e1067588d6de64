//! Remote secret storage used by the `vault_generic_secret` resource.
//!
//! The resource handlers only see the [`SecretStore`] trait:
//! - **write**: store a JSON object at a path (upsert)
//! - **read**: fetch the record stored at a path
//! - **delete**: remove whatever is stored at a path
//!
//! [`VaultLogicalClient`] implements it against Vault's logical HTTP API.
//! The client is assumed to carry a ready-to-use token; authentication and
//! token renewal are out of scope.
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vault_generic_secret::secrets::{SecretStore, VaultConfig, VaultLogicalClient};
//!
//! let client = VaultLogicalClient::connect(&VaultConfig::default()).await?;
//! let store: Arc<dyn SecretStore> = Arc::new(client);
//!
//! let mut data = serde_json::Map::new();
//! data.insert("key".to_string(), "value".into());
//! store.write("secret/foo", &data).await?;
//! ```
//!
//! # Security Considerations
//!
//! - Secret data is never logged
//! - The client token is redacted in Debug, Display and serialized output

pub mod client;
pub mod error;
pub mod types;
pub mod vault;

pub use client::{SecretData, SecretRecord, SecretStore};
pub use error::{Result, SecretsError};
pub use types::VaultToken;
pub use vault::{VaultConfig, VaultLogicalClient};
