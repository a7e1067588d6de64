//! Lifecycle contract between the host engine and a resource type.

use async_trait::async_trait;

use super::provider::ProviderContext;
use super::schema::ResourceSchema;
use crate::errors::Result;

/// Create/read/update/delete/import handlers for one resource type.
///
/// Each call receives the resource data for a single instance and the shared
/// provider context. Handlers mutate the data in place; an `Err` leaves the
/// identity as it was before the call.
#[async_trait]
pub trait ResourceHandler: Send + Sync {
    type Data: Send;

    fn schema(&self) -> &ResourceSchema;

    async fn create(&self, data: &mut Self::Data, ctx: &ProviderContext) -> Result<()>;

    async fn update(&self, data: &mut Self::Data, ctx: &ProviderContext) -> Result<()>;

    async fn read(&self, data: &mut Self::Data, ctx: &ProviderContext) -> Result<()>;

    async fn delete(&self, data: &mut Self::Data, ctx: &ProviderContext) -> Result<()>;

    /// Build data for an existing remote object identified by `id`
    fn import(&self, id: &str) -> Result<Self::Data>;
}
