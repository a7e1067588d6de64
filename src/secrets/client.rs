//! Remote secret store trait and the record it returns.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::error::Result;

/// Decoded secret payload: a JSON object keyed by string.
pub type SecretData = serde_json::Map<String, serde_json::Value>;

/// Secret record as returned by Vault's logical API.
///
/// Only `data` matters to the resource handlers; the envelope fields are
/// kept for logging.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SecretRecord {
    #[serde(default)]
    pub request_id: String,

    #[serde(default)]
    pub lease_id: String,

    /// Lease duration in seconds
    #[serde(default)]
    pub lease_duration: u64,

    #[serde(default)]
    pub renewable: bool,

    #[serde(default, deserialize_with = "null_as_empty_map")]
    pub data: SecretData,

    #[serde(default, deserialize_with = "null_as_empty_vec")]
    pub warnings: Vec<String>,
}

impl SecretRecord {
    /// Build a record holding only `data`.
    pub fn with_data(data: SecretData) -> Self {
        Self { data, ..Default::default() }
    }
}

fn null_as_empty_map<'de, D>(deserializer: D) -> std::result::Result<SecretData, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<SecretData>::deserialize(deserializer)?.unwrap_or_default())
}

fn null_as_empty_vec<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Remote key-value secret store used by the resource handlers.
///
/// Implementations are handed an already-authenticated client. Each call is
/// a single request with no retries; failures come back unmodified.
///
/// # Security Considerations
///
/// - Implementations MUST NOT log secret data
/// - Network communication SHOULD use TLS
#[async_trait]
pub trait SecretStore: Send + Sync {
    /// Write `data` at `path`, replacing whatever was stored there.
    ///
    /// Returns the response record when the backend sends one back
    /// (HTTP 204 yields `None`).
    async fn write(&self, path: &str, data: &SecretData) -> Result<Option<SecretRecord>>;

    /// Read the record stored at `path`.
    ///
    /// Returns `Ok(None)` when nothing is stored there.
    async fn read(&self, path: &str) -> Result<Option<SecretRecord>>;

    /// Delete whatever is stored at `path`.
    async fn delete(&self, path: &str) -> Result<()>;
}
