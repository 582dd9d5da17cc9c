//! Ports driven by the provisioning orchestrator.

mod schema_sync;
mod store;

pub use schema_sync::SchemaSync;
pub use store::ProvisioningStore;
