pub mod provisioning;

// Re-export key types for convenience
pub use provisioning::{
    ensure_default_user, ProvisionFlavor, ProvisionSettings, ProvisionedKey, ProvisioningService,
};
