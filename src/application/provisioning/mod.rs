//! Provisioning use case: resolve an owner, mint one key, report it.

mod bootstrap;
mod service;
mod settings;

pub use bootstrap::ensure_default_user;
pub use service::{ProvisionedKey, ProvisioningService};
pub use settings::{ProvisionFlavor, ProvisionSettings};
