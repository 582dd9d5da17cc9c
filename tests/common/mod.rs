#![allow(dead_code)]

use sea_orm::{ConnectionTrait, DatabaseConnection, QueryResult, Statement};

use keymint::{init_database, DatabaseConfig};

/// Fresh in-memory SQLite database on a single pooled connection.
pub async fn memory_db() -> DatabaseConnection {
    init_database(&DatabaseConfig::new("sqlite::memory:"))
        .await
        .expect("in-memory sqlite")
}

pub async fn query_all(db: &DatabaseConnection, sql: &str) -> Vec<QueryResult> {
    db.query_all(Statement::from_string(db.get_database_backend(), sql))
        .await
        .expect("query")
}

pub async fn count(db: &DatabaseConnection, table: &str) -> i64 {
    let rows = query_all(db, &format!("SELECT COUNT(*) AS n FROM {}", table)).await;
    rows[0].try_get("", "n").expect("count column")
}

pub async fn exec(db: &DatabaseConnection, sql: &str) {
    db.execute_unprepared(sql).await.expect("exec");
}

pub fn is_lower_hex(s: &str) -> bool {
    s.chars().all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c))
}
