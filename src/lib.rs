//! # keymint
//!
//! Provision the application database and mint an initial API key.
//!
//! Three binaries share one use case:
//!
//! - `create-api-key`: SeaORM store, schema assumed present
//! - `setup-database`: apply pending schema changes, then `create-api-key`
//! - `standalone-db-setup`: hand-written SQL that also creates the tables
//!
//! ## Layout
//!
//! - **domain**: users, API keys and the store / schema-sync ports
//! - **application**: the provisioning orchestrator
//! - **infrastructure**: key hashing, SeaORM entities, migrations, stores
//! - **interfaces**: console report
//! - **runtime**: bootstrap shared by the binaries

pub mod application;
pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod interfaces;
pub mod runtime;
pub mod support;

pub use application::{ProvisionFlavor, ProvisionSettings, ProvisionedKey, ProvisioningService};
pub use config::{default_config_path, AppConfig};
pub use infrastructure::{init_database, DatabaseConfig};
pub use support::{ConfigError, ProvisionError};
