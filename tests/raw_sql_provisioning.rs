mod common;

use std::sync::Arc;

use sea_orm::DatabaseConnection;

use keymint::domain::{NewApiKey, ProvisioningStore, UserRole};
use keymint::infrastructure::crypto::hash_api_key;
use keymint::infrastructure::database::RawSqlProvisioningStore;
use keymint::{ProvisionError, ProvisionFlavor, ProvisionSettings, ProvisioningService};

use common::{count, exec, is_lower_hex, memory_db, query_all};

fn service(db: &DatabaseConnection) -> ProvisioningService {
    ProvisioningService::new(
        Arc::new(RawSqlProvisioningStore::new(db.clone())),
        ProvisionSettings::defaults(ProvisionFlavor::RawSql),
    )
}

#[tokio::test]
async fn schema_creation_is_idempotent() {
    let db = memory_db().await;
    let store = RawSqlProvisioningStore::new(db.clone());

    store.ensure_schema().await.unwrap();
    store.ensure_schema().await.unwrap();

    assert_eq!(count(&db, "users").await, 0);
    assert_eq!(count(&db, r#""ApiKey""#).await, 0);
}

#[tokio::test]
async fn empty_database_gets_admin_and_one_key() {
    let db = memory_db().await;

    let key = service(&db).run().await.unwrap();

    assert!(key.user_created);
    assert_eq!(key.user.email, "admin@cal.com");
    assert_eq!(key.user.role, UserRole::Admin);
    assert_eq!(count(&db, "users").await, 1);
    assert_eq!(count(&db, r#""ApiKey""#).await, 1);

    let rows = query_all(&db, r#"SELECT "userId", note, "hashedKey", "expiresAt" FROM "ApiKey""#).await;
    let user_id: i32 = rows[0].try_get("", "userId").unwrap();
    let note: Option<String> = rows[0].try_get("", "note").unwrap();
    let hashed: String = rows[0].try_get("", "hashedKey").unwrap();
    let expires: Option<String> = rows[0].try_get("", "expiresAt").unwrap();

    assert_eq!(user_id, key.user.id);
    assert_eq!(note.as_deref(), Some("Generated API Key"));
    assert_eq!(hashed, hash_api_key(&key.raw_key));
    assert!(expires.is_none());

    let secret = key.prefixed_key.strip_prefix("cal_").unwrap();
    assert_eq!(secret.len(), 32);
    assert!(is_lower_hex(secret));
}

#[tokio::test]
async fn existing_first_user_is_reused() {
    let db = memory_db().await;
    RawSqlProvisioningStore::new(db.clone())
        .ensure_schema()
        .await
        .unwrap();
    exec(&db, "INSERT INTO users (email, name) VALUES ('a@example.com', 'A')").await;
    exec(&db, "INSERT INTO users (email, name) VALUES ('b@example.com', 'B')").await;

    let key = service(&db).run().await.unwrap();

    assert!(!key.user_created);
    assert_eq!(key.user.email, "a@example.com");
    assert_eq!(key.user.role, UserRole::User);
    assert_eq!(count(&db, "users").await, 2);
    assert_eq!(count(&db, r#""ApiKey""#).await, 1);
}

#[tokio::test]
async fn repeated_runs_mint_distinct_keys_for_same_user() {
    let db = memory_db().await;

    let a = service(&db).run().await.unwrap();
    let b = service(&db).run().await.unwrap();

    assert!(a.user_created);
    assert!(!b.user_created);
    assert_eq!(a.user.id, b.user.id);
    assert_ne!(a.api_key.id, b.api_key.id);
    assert_ne!(a.api_key.hashed_key, b.api_key.hashed_key);
    assert_eq!(count(&db, "users").await, 1);
    assert_eq!(count(&db, r#""ApiKey""#).await, 2);
}

#[tokio::test]
async fn raw_secret_never_reaches_storage() {
    let db = memory_db().await;
    let key = service(&db).run().await.unwrap();

    let rows = query_all(&db, r#"SELECT id, note, "hashedKey" FROM "ApiKey""#).await;
    for row in rows {
        for column in ["id", "note", "hashedKey"] {
            let value: Option<String> = row.try_get("", column).unwrap();
            assert!(!value.unwrap_or_default().contains(&key.raw_key));
        }
    }
}

#[tokio::test]
async fn deleting_user_cascades_to_keys() {
    let db = memory_db().await;
    let key = service(&db).run().await.unwrap();
    service(&db).run().await.unwrap();

    exec(&db, &format!("DELETE FROM users WHERE id = {}", key.user.id)).await;

    assert_eq!(count(&db, "users").await, 0);
    assert_eq!(count(&db, r#""ApiKey""#).await, 0);
}

#[tokio::test]
async fn duplicate_hash_is_a_distinct_error() {
    let db = memory_db().await;
    let first = service(&db).run().await.unwrap();
    let store = RawSqlProvisioningStore::new(db.clone());

    let err = store
        .insert_api_key(NewApiKey {
            id: "another-id".to_string(),
            user_id: first.user.id,
            note: None,
            hashed_key: first.api_key.hashed_key.clone(),
            expires_at: None,
        })
        .await
        .unwrap_err();

    assert!(matches!(err, ProvisionError::DuplicateKey(_)));
}

#[tokio::test]
async fn provision_releases_connection_on_failure() {
    let db = memory_db().await;
    let store = RawSqlProvisioningStore::new(db.clone());
    store.ensure_schema().await.unwrap();
    // A key table without the expected columns makes the insert fail.
    exec(&db, r#"DROP TABLE "ApiKey""#).await;
    exec(&db, r#"CREATE TABLE "ApiKey" (id VARCHAR(255) PRIMARY KEY)"#).await;

    let result = service(&db).provision().await;

    assert!(matches!(result, Err(ProvisionError::Database(_))));
    assert!(db.ping().await.is_err());
}

/// `users` as created by the earlier setup script: no username/role columns.
const LEGACY_USERS_DDL: &str = "CREATE TABLE users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    email VARCHAR(255) UNIQUE NOT NULL,
    name VARCHAR(255),
    created_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP,
    updated_at TIMESTAMP DEFAULT CURRENT_TIMESTAMP
)";

#[tokio::test]
async fn legacy_empty_users_table_is_upgraded() {
    let db = memory_db().await;
    exec(&db, LEGACY_USERS_DDL).await;

    let key = service(&db).run().await.unwrap();

    assert!(key.user_created);
    assert_eq!(key.user.email, "admin@cal.com");
    let rows = query_all(&db, "SELECT role FROM users").await;
    let role: String = rows[0].try_get("", "role").unwrap();
    assert_eq!(role, "ADMIN");
    assert_eq!(count(&db, r#""ApiKey""#).await, 1);
}

#[tokio::test]
async fn legacy_users_table_with_rows_keeps_first_user() {
    let db = memory_db().await;
    exec(&db, LEGACY_USERS_DDL).await;
    exec(&db, "INSERT INTO users (email, name) VALUES ('legacy@example.com', 'Legacy')").await;

    let key = service(&db).run().await.unwrap();
    // A second pass finds every column already present.
    service(&db).run().await.unwrap();

    assert!(!key.user_created);
    assert_eq!(key.user.email, "legacy@example.com");
    assert_eq!(key.user.name.as_deref(), Some("Legacy"));
    assert_eq!(key.user.role, UserRole::User);
    assert_eq!(count(&db, "users").await, 1);
    assert_eq!(count(&db, r#""ApiKey""#).await, 2);
}
