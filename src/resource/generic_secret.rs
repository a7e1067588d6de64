//! # Generic Secret Resource
//!
//! Writes an arbitrary JSON object to a Vault logical path and manages its
//! lifecycle. The resource identity is the path itself.
//!
//! Reading the secret back is opt-in through `allow_read`, because the token
//! that writes a secret frequently lacks read permission on it. Without read
//! access, drift in the remote data is not detected.

use async_trait::async_trait;
use tracing::{debug, info, warn, Instrument};

use super::data::{GenericSecretConfig, ResourceData};
use super::handler::ResourceHandler;
use super::provider::ProviderContext;
use super::schema::{generic_secret_schema, ResourceSchema};
use crate::errors::{ProviderError, RemoteOperation, Result};
use crate::resource_span;
use crate::secrets::{SecretData, SecretRecord};
use crate::validation::canonical_json_string;

/// Handlers for the `vault_generic_secret` resource type
#[derive(Debug, Clone)]
pub struct GenericSecretResource {
    schema: ResourceSchema,
}

impl Default for GenericSecretResource {
    fn default() -> Self {
        Self::new()
    }
}

impl GenericSecretResource {
    pub fn new() -> Self {
        Self { schema: generic_secret_schema() }
    }

    /// Validate a declaration and convert it to stored form.
    ///
    /// Runs the required-field checks and validate functions, then the state
    /// functions, which puts `data_json` in canonical form.
    pub fn prepare(&self, config: GenericSecretConfig) -> Result<ResourceData> {
        self.schema.validate(&config)?;

        let mut config = config;
        self.schema.apply_state(&mut config);
        Ok(ResourceData::new(config))
    }

    /// Write `data_json` to `path`. Create and update share this path.
    pub async fn write(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        let path = data.path().to_string();

        async {
            let secret: SecretData = serde_json::from_str(data.data_json())
                .map_err(|e| ProviderError::data_json_syntax(data.data_json(), e))?;

            debug!(path = %path, keys = secret.len(), "Writing generic Vault secret");
            let record = ctx
                .store()
                .write(&path, &secret)
                .await
                .map_err(|e| ProviderError::remote(RemoteOperation::Write, &path, e))?;
            if let Some(record) = &record {
                log_warnings(&path, record);
            }

            data.set_id(&path);
            data.set_verified(false);
            info!(path = %path, "Wrote generic Vault secret");
            Ok::<(), ProviderError>(())
        }
        .instrument(resource_span!(RemoteOperation::Write, path))
        .await
    }

    /// Delete the secret at the resource's identity and clear it.
    pub async fn delete(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        let path = data.id().unwrap_or(data.path()).to_string();

        async {
            debug!(path = %path, "Deleting generic Vault secret");
            ctx.store()
                .delete(&path)
                .await
                .map_err(|e| ProviderError::remote(RemoteOperation::Delete, &path, e))?;

            data.clear_id();
            info!(path = %path, "Deleted generic Vault secret");
            Ok::<(), ProviderError>(())
        }
        .instrument(resource_span!(RemoteOperation::Delete, path))
        .await
    }

    /// Refresh state from Vault.
    ///
    /// With `allow_read` unset this performs no remote call and only records
    /// the identity. Otherwise the stored `data_json` is replaced with the
    /// canonical form of the remote data; a secret that no longer exists
    /// clears the identity so the host engine plans a re-create.
    pub async fn read(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        let path = data.path().to_string();
        let allow_read = data.allow_read();

        async {
            if !allow_read {
                warn!(
                    path = %path,
                    "vault_generic_secret does not automatically refresh if allow_read is set to false"
                );
                data.set_id(&path);
                return Ok(());
            }

            debug!(path = %path, "Reading generic Vault secret");
            let record = ctx
                .store()
                .read(&path)
                .await
                .map_err(|e| ProviderError::remote(RemoteOperation::Read, &path, e))?;

            let Some(record) = record else {
                warn!(path = %path, "Generic Vault secret not found, removing from state");
                data.clear_id();
                return Ok(());
            };
            log_warnings(&path, &record);

            let data_json = canonical_json_string(&record.data).map_err(|e| {
                ProviderError::serialization(format!("error marshaling JSON for {:?}", path), e)
            })?;

            data.set_data_json(data_json);
            data.set_id(&path);
            data.set_verified(true);
            debug!(path = %path, keys = record.data.len(), "Refreshed generic Vault secret");
            Ok::<(), ProviderError>(())
        }
        .instrument(resource_span!(RemoteOperation::Read, path, allow_read = allow_read))
        .await
    }

    /// Adopt an existing secret at `id`.
    ///
    /// The returned data reads back on the next refresh, since importing a
    /// secret is only useful if its contents can be fetched.
    pub fn import(&self, id: &str) -> Result<ResourceData> {
        let id = id.trim();
        if id.is_empty() {
            return Err(ProviderError::validation_field(
                "Import id must be the full path of an existing secret",
                "path",
            ));
        }

        let mut data =
            ResourceData::new(GenericSecretConfig::new(id, String::new()).with_allow_read(true));
        data.set_id(id);
        info!(path = %id, "Imported generic Vault secret");
        Ok(data)
    }
}

fn log_warnings(path: &str, record: &SecretRecord) {
    for warning in &record.warnings {
        warn!(
            path = %path,
            request_id = %record.request_id,
            warning = %warning,
            "Vault returned a warning"
        );
    }
}

#[async_trait]
impl ResourceHandler for GenericSecretResource {
    type Data = ResourceData;

    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    async fn create(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.write(data, ctx).await
    }

    async fn update(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        self.write(data, ctx).await
    }

    async fn read(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        GenericSecretResource::read(self, data, ctx).await
    }

    async fn delete(&self, data: &mut ResourceData, ctx: &ProviderContext) -> Result<()> {
        GenericSecretResource::delete(self, data, ctx).await
    }

    fn import(&self, id: &str) -> Result<ResourceData> {
        GenericSecretResource::import(self, id)
    }
}
