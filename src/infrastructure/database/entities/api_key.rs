//! API Key entity for database
//!
//! Columns keep the camelCase names of the application's existing schema.

use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;

/// API Key model
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "ApiKey")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: String,
    #[sea_orm(column_name = "userId")]
    pub user_id: i32,
    pub note: Option<String>,
    #[sea_orm(column_name = "hashedKey", unique)]
    pub hashed_key: String,
    #[sea_orm(column_name = "expiresAt")]
    pub expires_at: Option<DateTime<Utc>>,
    #[sea_orm(column_name = "lastUsedAt")]
    pub last_used_at: Option<DateTime<Utc>>,
    #[sea_orm(column_name = "createdAt")]
    pub created_at: DateTime<Utc>,
    #[sea_orm(column_name = "updatedAt")]
    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user::Entity",
        from = "Column::UserId",
        to = "super::user::Column::Id",
        on_delete = "Cascade"
    )]
    User,
}

impl Related<super::user::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
