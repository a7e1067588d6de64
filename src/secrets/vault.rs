//! HashiCorp Vault logical API client.
//!
//! Talks to `/v1/{path}` directly so the resource works against any mount
//! that accepts plain key/value writes (KV v1, `generic`, `cubbyhole`, and
//! the raw KV v2 `data/` paths). The path is the full logical path including
//! the mount, e.g. `secret/foo`.
//!
//! # Configuration
//!
//! - Vault server address (HTTPS recommended)
//! - Client token, already issued; no login or renewal happens here
//! - Optional namespace for Vault Enterprise
//!
//! # Example
//!
//! ```rust,ignore
//! use vault_generic_secret::secrets::{SecretStore, VaultConfig, VaultLogicalClient};
//!
//! let config = VaultConfig {
//!     address: "https://vault.example.com".to_string(),
//!     token: Some("hvs.token".into()),
//!     ..Default::default()
//! };
//!
//! let client = VaultLogicalClient::connect(&config).await?;
//! let record = client.read("secret/foo").await?;
//! ```

use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use validator::Validate;
use vaultrs::client::{VaultClient, VaultClientSettingsBuilder};

use super::client::{SecretData, SecretRecord, SecretStore};
use super::error::{Result, SecretsError};
use super::types::VaultToken;

/// Configuration for the Vault client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate, PartialEq)]
#[serde(default)]
pub struct VaultConfig {
    /// Vault server address (e.g., "https://vault.example.com:8200")
    #[validate(url(message = "Vault address must be a valid URL"))]
    pub address: String,

    /// Client token sent as `X-Vault-Token`
    pub token: Option<VaultToken>,

    /// Vault namespace (for Enterprise multi-tenancy)
    pub namespace: Option<String>,

    /// Per-request timeout in seconds
    #[validate(range(
        min = 1,
        max = 300,
        message = "Vault timeout must be between 1 and 300 seconds"
    ))]
    pub timeout_seconds: u64,
}

impl Default for VaultConfig {
    fn default() -> Self {
        Self {
            address: "http://127.0.0.1:8200".to_string(),
            token: None,
            namespace: None,
            timeout_seconds: 60,
        }
    }
}

impl VaultConfig {
    /// Overlay the standard Vault environment variables.
    ///
    /// Uses `VAULT_ADDR`, `VAULT_TOKEN` and `VAULT_NAMESPACE` when set and
    /// non-empty; other fields are left alone.
    pub fn apply_env_overrides(&mut self) {
        if let Some(address) = non_empty_env("VAULT_ADDR") {
            self.address = address;
        }
        if let Some(token) = non_empty_env("VAULT_TOKEN") {
            self.token = Some(VaultToken::new(token));
        }
        if let Some(namespace) = non_empty_env("VAULT_NAMESPACE") {
            self.namespace = Some(namespace);
        }
    }

    /// Get request timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

fn non_empty_env(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.is_empty())
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    errors: Vec<String>,
}

/// Vault client for the logical read/write/delete endpoints.
///
/// Implements [`SecretStore`]. Cheap to clone; the underlying `reqwest`
/// client shares its connection pool.
#[derive(Clone)]
pub struct VaultLogicalClient {
    http: Client,
    address: String,
    token: Option<VaultToken>,
    namespace: Option<String>,
}

impl std::fmt::Debug for VaultLogicalClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VaultLogicalClient")
            .field("address", &self.address)
            .field("namespace", &self.namespace)
            .field("token", &self.token)
            .finish()
    }
}

impl VaultLogicalClient {
    /// Build a client without contacting Vault.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if the address is empty or the HTTP
    ///   client cannot be built
    pub fn new(config: &VaultConfig) -> Result<Self> {
        if config.address.trim().is_empty() {
            return Err(SecretsError::config_error("Vault address cannot be empty"));
        }

        let http = Client::builder().timeout(config.timeout()).build().map_err(|e| {
            SecretsError::config_error(format!("Failed to build HTTP client: {}", e))
        })?;

        Ok(Self {
            http,
            address: config.address.trim_end_matches('/').to_string(),
            token: config.token.clone(),
            namespace: config.namespace.clone().filter(|ns| !ns.is_empty()),
        })
    }

    /// Build a client and verify Vault answers its health endpoint.
    ///
    /// # Errors
    ///
    /// - [`SecretsError::ConfigError`] if configuration is invalid
    /// - [`SecretsError::ConnectionFailed`] if Vault is unreachable or sealed
    pub async fn connect(config: &VaultConfig) -> Result<Self> {
        let client = Self::new(config)?;

        let mut settings_builder = VaultClientSettingsBuilder::default();
        settings_builder.address(&config.address);

        if let Some(ref token) = config.token {
            settings_builder.token(token.expose());
        }

        if let Some(ref namespace) = client.namespace {
            settings_builder.namespace(Some(namespace.clone()));
        }

        let settings = settings_builder.build().map_err(|e| {
            SecretsError::config_error(format!("Invalid Vault configuration: {}", e))
        })?;

        let health_client = VaultClient::new(settings).map_err(|e| {
            SecretsError::connection_failed(format!("Failed to create Vault client: {}", e))
        })?;

        match vaultrs::sys::health(&health_client).await {
            Ok(_) => {
                tracing::info!(address = %config.address, "Successfully connected to Vault");
            }
            Err(e) => {
                tracing::error!(
                    error = %e,
                    address = %config.address,
                    "Failed to connect to Vault"
                );
                return Err(SecretsError::connection_failed(format!(
                    "Vault health check failed: {}",
                    e
                )));
            }
        }

        Ok(client)
    }

    /// Vault server address without a trailing slash
    pub fn address(&self) -> &str {
        &self.address
    }

    /// Full URL for a logical path.
    pub fn endpoint(&self, path: &str) -> Result<String> {
        let trimmed = path.trim_matches('/');
        if trimmed.is_empty() {
            return Err(SecretsError::invalid_path(path, "path cannot be empty"));
        }
        Ok(format!("{}/v1/{}", self.address, trimmed))
    }

    fn request(&self, method: Method, path: &str) -> Result<RequestBuilder> {
        let url = self.endpoint(path)?;
        tracing::debug!(method = %method, url = %url, "Vault request");

        let mut builder = self.http.request(method, &url).header("X-Vault-Request", "true");
        if let Some(ref token) = self.token {
            builder = builder.header("X-Vault-Token", token.expose());
        }
        if let Some(ref namespace) = self.namespace {
            builder = builder.header("X-Vault-Namespace", namespace.as_str());
        }
        Ok(builder)
    }

    /// Decode a successful response body; empty bodies mean "no record".
    async fn parse_record(response: Response) -> Result<Option<SecretRecord>> {
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(None);
        }

        let body = response.text().await?;
        if body.trim().is_empty() {
            return Ok(None);
        }

        Ok(Some(serde_json::from_str(&body)?))
    }

    /// Extract the `errors` array Vault sends alongside failure statuses.
    async fn read_errors(response: Response) -> (StatusCode, Vec<String>) {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        let errors = match serde_json::from_str::<ErrorBody>(&body) {
            Ok(parsed) => parsed.errors,
            Err(_) if body.trim().is_empty() => Vec::new(),
            Err(_) => vec![body.trim().to_string()],
        };

        (status, errors)
    }
}

#[async_trait]
impl SecretStore for VaultLogicalClient {
    async fn write(&self, path: &str, data: &SecretData) -> Result<Option<SecretRecord>> {
        let response = self.request(Method::PUT, path)?.json(data).send().await?;

        if !response.status().is_success() {
            let (status, errors) = Self::read_errors(response).await;
            tracing::error!(path = %path, status = status.as_u16(), "Vault rejected secret write");
            return Err(SecretsError::api(status.as_u16(), errors));
        }

        Self::parse_record(response).await
    }

    async fn read(&self, path: &str) -> Result<Option<SecretRecord>> {
        let response = self.request(Method::GET, path)?.send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            let (status, errors) = Self::read_errors(response).await;
            if errors.is_empty() {
                tracing::debug!(path = %path, "No secret stored at path");
                return Ok(None);
            }
            return Err(SecretsError::api(status.as_u16(), errors));
        }

        if !response.status().is_success() {
            let (status, errors) = Self::read_errors(response).await;
            tracing::error!(path = %path, status = status.as_u16(), "Vault rejected secret read");
            return Err(SecretsError::api(status.as_u16(), errors));
        }

        Self::parse_record(response).await
    }

    async fn delete(&self, path: &str) -> Result<()> {
        let response = self.request(Method::DELETE, path)?.send().await?;

        if !response.status().is_success() {
            let (status, errors) = Self::read_errors(response).await;
            tracing::error!(path = %path, status = status.as_u16(), "Vault rejected secret delete");
            return Err(SecretsError::api(status.as_u16(), errors));
        }

        Ok(())
    }
}
