//! Domain layer: provisioning entities and the ports the orchestrator drives.

pub mod api_key;
pub mod ports;
pub mod user;

pub use api_key::{ApiKey, NewApiKey};
pub use ports::{ProvisioningStore, SchemaSync};
pub use user::{NewUser, User, UserResolution, UserRole};
