//! Shared provider context handed to every handler invocation.

use std::fmt;
use std::sync::Arc;

use crate::errors::{ProviderError, Result};
use crate::secrets::{SecretStore, VaultConfig, VaultLogicalClient};

/// Provider-scoped state: the configured secret store client.
///
/// Shared read-only across concurrent handler calls.
#[derive(Clone)]
pub struct ProviderContext {
    store: Arc<dyn SecretStore>,
}

impl ProviderContext {
    pub fn new(store: Arc<dyn SecretStore>) -> Self {
        Self { store }
    }

    pub fn from_store<S: SecretStore + 'static>(store: S) -> Self {
        Self::new(Arc::new(store))
    }

    /// Connect to Vault and build a context around the logical client
    pub async fn configure(config: &VaultConfig) -> Result<Self> {
        let client = VaultLogicalClient::connect(config).await.map_err(|e| {
            ProviderError::config_with_source("Failed to configure Vault client", Box::new(e))
        })?;
        Ok(Self::from_store(client))
    }

    pub fn store(&self) -> &dyn SecretStore {
        self.store.as_ref()
    }
}

impl fmt::Debug for ProviderContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderContext").finish_non_exhaustive()
    }
}
