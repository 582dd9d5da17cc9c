pub mod errors;

pub use errors::{is_unique_violation, ConfigError, ProvisionError};
