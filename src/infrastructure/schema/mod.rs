//! Schema sync collaborators for `setup-database`.

mod command_sync;
mod migrator_sync;

pub use command_sync::CommandSync;
pub use migrator_sync::MigratorSync;

use async_trait::async_trait;

use crate::domain::SchemaSync;
use crate::support::ProvisionError;

/// Leaves the schema untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSync;

#[async_trait]
impl SchemaSync for NoopSync {
    async fn apply_pending(&self) -> Result<(), ProvisionError> {
        Ok(())
    }

    fn describe(&self) -> String {
        "no-op".to_string()
    }
}
