//! Provisioning orchestrator

use std::fmt;
use std::sync::Arc;

use tracing::{debug, info, warn};

use super::bootstrap::ensure_default_user;
use super::settings::ProvisionSettings;
use crate::domain::{ApiKey, NewApiKey, ProvisioningStore, SchemaSync, User};
use crate::infrastructure::crypto::generate_unique_api_key;
use crate::support::ProvisionError;

/// A freshly minted key, carrying the raw secret for the one-time report.
#[derive(Clone)]
pub struct ProvisionedKey {
    pub user: User,
    /// The owner was inserted by this run.
    pub user_created: bool,
    pub api_key: ApiKey,
    pub raw_key: String,
    /// `<prefix><raw_key>`, the value the operator uses as a bearer token.
    pub prefixed_key: String,
}

impl fmt::Debug for ProvisionedKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProvisionedKey")
            .field("user", &self.user)
            .field("user_created", &self.user_created)
            .field("api_key", &self.api_key)
            .field("raw_key", &"<redacted>")
            .finish()
    }
}

/// Runs the connect → resolve user → mint → persist sequence against a store.
///
/// Steps run strictly in order with no retries. A user created in this run
/// is kept even if the key insert fails afterwards.
pub struct ProvisioningService {
    store: Arc<dyn ProvisioningStore>,
    settings: ProvisionSettings,
}

impl ProvisioningService {
    pub fn new(store: Arc<dyn ProvisioningStore>, settings: ProvisionSettings) -> Self {
        Self { store, settings }
    }

    pub fn settings(&self) -> &ProvisionSettings {
        &self.settings
    }

    /// Ensure schema, resolve the owner and mint one key. Leaves the connection open.
    pub async fn run(&self) -> Result<ProvisionedKey, ProvisionError> {
        self.store.ensure_schema().await?;

        let resolution = ensure_default_user(self.store.as_ref(), &self.settings.admin).await?;
        let user_created = resolution.was_created();
        let user = resolution.into_user();

        info!("🔑 Generating API key...");
        let generated = generate_unique_api_key(None);

        let api_key = self
            .store
            .insert_api_key(NewApiKey {
                id: uuid::Uuid::new_v4().to_string(),
                user_id: user.id,
                note: Some(self.settings.note.clone()),
                hashed_key: generated.hashed_key.clone(),
                expires_at: None,
            })
            .await?;
        info!("✅ API key {} stored for user {}", api_key.id, user.id);

        Ok(ProvisionedKey {
            prefixed_key: generated.prefixed(&self.settings.key_prefix),
            raw_key: generated.raw_key,
            user,
            user_created,
            api_key,
        })
    }

    /// [`run`](Self::run), then release the connection whatever the outcome.
    pub async fn provision(&self) -> Result<ProvisionedKey, ProvisionError> {
        let result = self.run().await;
        self.release(&result).await;
        result
    }

    /// Apply pending schema changes first, then provision. The connection is
    /// released on every path, including a failed sync.
    pub async fn setup(&self, sync: &dyn SchemaSync) -> Result<ProvisionedKey, ProvisionError> {
        info!("🗄️  Setting up database using {}...", sync.describe());
        let result = match sync.apply_pending().await {
            Ok(()) => self.run().await,
            Err(e) => Err(e),
        };
        self.release(&result).await;
        result
    }

    async fn release<T>(&self, result: &Result<T, ProvisionError>) {
        if let Err(e) = result {
            debug!("Provisioning failed: {:?}", e);
        }
        match self.store.close().await {
            Ok(()) => info!("🔌 Database connection closed"),
            Err(e) => warn!("Error closing database connection: {}", e),
        }
    }
}
