//! # Error Handling
//!
//! Error types for the generic secret resource, its remote client glue and
//! its configuration layer.

pub mod types;

pub use types::{ProviderError, RemoteOperation, Result};

/// Crate-wide error alias
pub type Error = ProviderError;
