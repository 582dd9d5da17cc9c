//! Infrastructure layer - external concerns

pub mod crypto;
pub mod database;
pub mod schema;

pub use database::{init_database, DatabaseConfig};
