//! Database repository implementations
//!
//! Two [`ProvisioningStore`](crate::domain::ProvisioningStore) backends over
//! the same tables: SeaORM entities and hand-written SQL.

pub mod orm_store;
pub mod raw_sql_store;

pub use orm_store::SeaOrmProvisioningStore;
pub use raw_sql_store::RawSqlProvisioningStore;
