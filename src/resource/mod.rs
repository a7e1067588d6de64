//! # Resources
//!
//! The `vault_generic_secret` resource: its schema, typed data, and the
//! lifecycle handlers the host engine drives.

pub mod data;
pub mod generic_secret;
pub mod handler;
pub mod provider;
pub mod schema;

pub use data::{GenericSecretConfig, ResourceData, ResourceStatus};
pub use generic_secret::GenericSecretResource;
pub use handler::ResourceHandler;
pub use provider::ProviderContext;
pub use schema::{
    generic_secret_schema, AttributeSchema, AttributeType, GenericSecretField, ResourceSchema,
};

/// Resource type name registered with the host engine
pub const RESOURCE_TYPE: &str = "vault_generic_secret";
