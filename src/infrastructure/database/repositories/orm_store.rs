use async_trait::async_trait;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, NotSet, PaginatorTrait, QueryOrder,
    Set,
};
use tracing::debug;

use crate::domain::{ApiKey, NewApiKey, NewUser, ProvisioningStore, User, UserRole};
use crate::infrastructure::database::entities::{api_key, user};
use crate::support::{is_unique_violation, ProvisionError};

/// Store backed by SeaORM entities. The schema is owned by migrations.
pub struct SeaOrmProvisioningStore {
    db: DatabaseConnection,
}

impl SeaOrmProvisioningStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

// ── Conversion helpers ──────────────────────────────────────────

fn entity_role_to_domain(role: user::UserRole) -> UserRole {
    match role {
        user::UserRole::Admin => UserRole::Admin,
        user::UserRole::User => UserRole::User,
    }
}

fn domain_role_to_entity(role: UserRole) -> user::UserRole {
    match role {
        UserRole::Admin => user::UserRole::Admin,
        UserRole::User => user::UserRole::User,
    }
}

fn user_model_to_domain(model: user::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        username: model.username,
        name: model.name,
        role: entity_role_to_domain(model.role),
    }
}

fn api_key_model_to_domain(model: api_key::Model) -> ApiKey {
    ApiKey {
        id: model.id,
        user_id: model.user_id,
        note: model.note,
        hashed_key: model.hashed_key,
        expires_at: model.expires_at,
    }
}

fn key_insert_err(e: DbErr) -> ProvisionError {
    if is_unique_violation(&e) {
        ProvisionError::DuplicateKey(e)
    } else {
        ProvisionError::Database(e)
    }
}

// ── Store implementation ────────────────────────────────────────

#[async_trait]
impl ProvisioningStore for SeaOrmProvisioningStore {
    async fn ensure_schema(&self) -> Result<(), ProvisionError> {
        debug!("Schema is managed by migrations, nothing to create");
        Ok(())
    }

    async fn count_users(&self) -> Result<u64, ProvisionError> {
        Ok(user::Entity::find().count(&self.db).await?)
    }

    async fn first_user(&self) -> Result<Option<User>, ProvisionError> {
        let model = user::Entity::find()
            .order_by_asc(user::Column::Id)
            .one(&self.db)
            .await?;
        Ok(model.map(user_model_to_domain))
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, ProvisionError> {
        let now = Utc::now();

        let model = user::ActiveModel {
            id: NotSet,
            email: Set(new_user.email),
            username: Set(new_user.username),
            name: Set(new_user.name),
            role: Set(domain_role_to_entity(new_user.role)),
            email_verified: Set(new_user.verified.then_some(now)),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        Ok(user_model_to_domain(model))
    }

    async fn insert_api_key(&self, key: NewApiKey) -> Result<ApiKey, ProvisionError> {
        let now = Utc::now();

        let model = api_key::ActiveModel {
            id: Set(key.id),
            user_id: Set(key.user_id),
            note: Set(key.note),
            hashed_key: Set(key.hashed_key),
            expires_at: Set(key.expires_at),
            last_used_at: Set(None),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await
        .map_err(key_insert_err)?;

        Ok(api_key_model_to_domain(model))
    }

    async fn close(&self) -> Result<(), ProvisionError> {
        self.db.clone().close().await?;
        Ok(())
    }
}
