//! API key aggregate

pub mod model;

pub use model::{ApiKey, NewApiKey};
