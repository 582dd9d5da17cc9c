use async_trait::async_trait;

use crate::support::ProvisionError;

/// Applies pending schema changes before any rows are touched.
#[async_trait]
pub trait SchemaSync: Send + Sync {
    async fn apply_pending(&self) -> Result<(), ProvisionError>;

    /// Short label for progress logs.
    fn describe(&self) -> String;
}
