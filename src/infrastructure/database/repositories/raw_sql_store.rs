//! Store that owns its schema and talks plain SQL.
//!
//! PostgreSQL is the deployment target; SQLite is accepted for local runs.
//! Identifiers of the key table are quoted camelCase to match the
//! application's existing schema.

use async_trait::async_trait;
use sea_orm::{
    ConnectionTrait, DatabaseConnection, DbBackend, DbErr, QueryResult, Statement, Value,
};
use tracing::{debug, info};

use crate::domain::{ApiKey, NewApiKey, NewUser, ProvisioningStore, User, UserRole};
use crate::support::{is_unique_violation, ProvisionError};

pub struct RawSqlProvisioningStore {
    db: DatabaseConnection,
}

/// Per-backend pieces of DDL.
struct Dialect {
    serial_pk: &'static str,
    timestamp: &'static str,
}

impl Dialect {
    fn for_backend(backend: DbBackend) -> Result<Self, ProvisionError> {
        match backend {
            DbBackend::Postgres => Ok(Self {
                serial_pk: "SERIAL PRIMARY KEY",
                timestamp: "TIMESTAMPTZ",
            }),
            DbBackend::Sqlite => Ok(Self {
                serial_pk: "INTEGER PRIMARY KEY AUTOINCREMENT",
                timestamp: "TIMESTAMP",
            }),
            other => Err(ProvisionError::Database(DbErr::Custom(format!(
                "unsupported backend for raw SQL setup: {:?}",
                other
            )))),
        }
    }

    fn users_table(&self) -> String {
        format!(
            "CREATE TABLE IF NOT EXISTS users (
                id {pk},
                email VARCHAR(255) UNIQUE NOT NULL,
                username VARCHAR(255) UNIQUE,
                name VARCHAR(255),
                role VARCHAR(20) NOT NULL DEFAULT 'USER',
                email_verified {ts},
                created_at {ts} NOT NULL DEFAULT CURRENT_TIMESTAMP,
                updated_at {ts} NOT NULL DEFAULT CURRENT_TIMESTAMP
            )",
            pk = self.serial_pk,
            ts = self.timestamp,
        )
    }

    /// Columns a `users` table created by older setup scripts may lack
    /// (those had only `id, email, name` and timestamps).
    fn user_upgrades(&self) -> [(&'static str, String); 3] {
        [
            ("username", "VARCHAR(255)".to_string()),
            ("role", "VARCHAR(20) NOT NULL DEFAULT 'USER'".to_string()),
            ("email_verified", self.timestamp.to_string()),
        ]
    }

    fn users_columns_query(backend: DbBackend) -> &'static str {
        match backend {
            DbBackend::Postgres => {
                "SELECT column_name::text AS name FROM information_schema.columns \
                 WHERE table_schema = current_schema() AND table_name = 'users'"
            }
            _ => "SELECT name FROM pragma_table_info('users')",
        }
    }

    fn api_key_table(&self) -> String {
        format!(
            r#"CREATE TABLE IF NOT EXISTS "ApiKey" (
                id VARCHAR(255) PRIMARY KEY,
                "userId" INTEGER NOT NULL,
                note VARCHAR(255),
                "hashedKey" VARCHAR(255) UNIQUE NOT NULL,
                "expiresAt" {ts},
                "lastUsedAt" {ts},
                "createdAt" {ts} NOT NULL DEFAULT CURRENT_TIMESTAMP,
                "updatedAt" {ts} NOT NULL DEFAULT CURRENT_TIMESTAMP,
                FOREIGN KEY ("userId") REFERENCES users(id) ON DELETE CASCADE
            )"#,
            ts = self.timestamp,
        )
    }
}

/// Positional bind markers for `count` values: `$1, $2` or `?, ?`.
fn placeholders(backend: DbBackend, count: usize) -> String {
    (1..=count)
        .map(|i| match backend {
            DbBackend::Postgres => format!("${}", i),
            _ => "?".to_string(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn row_to_user(row: &QueryResult) -> Result<User, DbErr> {
    let role: String = row.try_get("", "role")?;
    Ok(User {
        id: row.try_get("", "id")?,
        email: row.try_get("", "email")?,
        username: row.try_get("", "username")?,
        name: row.try_get("", "name")?,
        role: UserRole::parse(&role).unwrap_or_default(),
    })
}

impl RawSqlProvisioningStore {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn backend(&self) -> DbBackend {
        self.db.get_database_backend()
    }

    fn query(&self, sql: &str) -> Statement {
        Statement::from_string(self.backend(), sql)
    }

    async fn user_columns(&self) -> Result<Vec<String>, DbErr> {
        let rows = self
            .db
            .query_all(self.query(Dialect::users_columns_query(self.backend())))
            .await?;
        rows.iter().map(|row| row.try_get("", "name")).collect()
    }

    /// Add the columns this store reads and writes to a pre-existing narrower table.
    async fn upgrade_users_table(&self, dialect: &Dialect) -> Result<(), DbErr> {
        let existing = self.user_columns().await?;
        for (column, definition) in dialect.user_upgrades() {
            if existing.iter().any(|c| c.eq_ignore_ascii_case(column)) {
                continue;
            }
            info!("🧩 Adding users.{} column...", column);
            self.db
                .execute_unprepared(&format!(
                    "ALTER TABLE users ADD COLUMN {} {}",
                    column, definition
                ))
                .await?;
        }
        Ok(())
    }

    fn statement<I>(&self, sql: String, values: I) -> Statement
    where
        I: IntoIterator<Item = Value>,
    {
        Statement::from_sql_and_values(self.backend(), sql, values)
    }
}

#[async_trait]
impl ProvisioningStore for RawSqlProvisioningStore {
    async fn ensure_schema(&self) -> Result<(), ProvisionError> {
        let dialect = Dialect::for_backend(self.backend())?;

        if self.backend() == DbBackend::Sqlite {
            self.db.execute_unprepared("PRAGMA foreign_keys = ON").await?;
        }

        info!("📊 Creating users table...");
        self.db.execute_unprepared(&dialect.users_table()).await?;
        self.upgrade_users_table(&dialect).await?;

        info!("🔑 Creating api_keys table...");
        self.db.execute_unprepared(&dialect.api_key_table()).await?;

        debug!("Schema ready");
        Ok(())
    }

    async fn count_users(&self) -> Result<u64, ProvisionError> {
        let row = self
            .db
            .query_one(self.query("SELECT COUNT(*) AS count FROM users"))
            .await?;
        let count: i64 = match row {
            Some(row) => row.try_get("", "count")?,
            None => 0,
        };
        Ok(count.max(0) as u64)
    }

    async fn first_user(&self) -> Result<Option<User>, ProvisionError> {
        let row = self
            .db
            .query_one(self.query(
                "SELECT id, email, username, name, role FROM users ORDER BY id LIMIT 1",
            ))
            .await?;
        Ok(row.as_ref().map(row_to_user).transpose()?)
    }

    async fn insert_user(&self, new_user: NewUser) -> Result<User, ProvisionError> {
        let verified_at = new_user.verified.then(chrono::Utc::now);
        let sql = format!(
            "INSERT INTO users (email, username, name, role, email_verified) VALUES ({}) RETURNING id",
            placeholders(self.backend(), 5)
        );
        let values: [Value; 5] = [
            new_user.email.clone().into(),
            new_user.username.clone().into(),
            new_user.name.clone().into(),
            new_user.role.as_str().into(),
            verified_at.into(),
        ];

        let row = self
            .db
            .query_one(self.statement(sql, values))
            .await?
            .ok_or(DbErr::RecordNotInserted)?;

        Ok(User {
            id: row.try_get("", "id")?,
            email: new_user.email,
            username: new_user.username,
            name: new_user.name,
            role: new_user.role,
        })
    }

    async fn insert_api_key(&self, key: NewApiKey) -> Result<ApiKey, ProvisionError> {
        let sql = format!(
            r#"INSERT INTO "ApiKey" (id, "userId", note, "hashedKey", "expiresAt") VALUES ({})"#,
            placeholders(self.backend(), 5)
        );
        let values: [Value; 5] = [
            key.id.clone().into(),
            key.user_id.into(),
            key.note.clone().into(),
            key.hashed_key.clone().into(),
            key.expires_at.into(),
        ];

        self.db
            .execute(self.statement(sql, values))
            .await
            .map_err(|e| {
                if is_unique_violation(&e) {
                    ProvisionError::DuplicateKey(e)
                } else {
                    ProvisionError::Database(e)
                }
            })?;

        Ok(key.into())
    }

    async fn close(&self) -> Result<(), ProvisionError> {
        self.db.clone().close().await?;
        Ok(())
    }
}
