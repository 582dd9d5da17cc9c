use async_trait::async_trait;

use crate::domain::{ApiKey, NewApiKey, NewUser, User};
use crate::support::ProvisionError;

/// Persistence for users and API keys.
///
/// Implemented once over SeaORM entities and once over hand-written SQL.
/// Calls are issued strictly in sequence by the orchestrator.
#[async_trait]
pub trait ProvisioningStore: Send + Sync {
    /// Create tables if the store owns its schema. No-op otherwise.
    async fn ensure_schema(&self) -> Result<(), ProvisionError>;

    async fn count_users(&self) -> Result<u64, ProvisionError>;

    /// The user with the lowest id, if any.
    async fn first_user(&self) -> Result<Option<User>, ProvisionError>;

    async fn insert_user(&self, user: NewUser) -> Result<User, ProvisionError>;

    /// Insert a key row. A clash on the hash column maps to
    /// [`ProvisionError::DuplicateKey`].
    async fn insert_api_key(&self, key: NewApiKey) -> Result<ApiKey, ProvisionError>;

    /// Release the underlying connection.
    async fn close(&self) -> Result<(), ProvisionError>;
}
