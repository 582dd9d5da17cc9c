use async_trait::async_trait;
use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use tracing::info;

use crate::domain::SchemaSync;
use crate::infrastructure::database::migrator::Migrator;
use crate::support::ProvisionError;

/// Runs the bundled SeaORM migrations in-process.
pub struct MigratorSync {
    db: DatabaseConnection,
}

impl MigratorSync {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl SchemaSync for MigratorSync {
    async fn apply_pending(&self) -> Result<(), ProvisionError> {
        let pending = Migrator::get_pending_migrations(&self.db).await?;
        info!("📊 Running database migrations ({} pending)...", pending.len());
        Migrator::up(&self.db, None).await?;
        info!("✅ Migrations completed");
        Ok(())
    }

    fn describe(&self) -> String {
        "built-in migrator".to_string()
    }
}
