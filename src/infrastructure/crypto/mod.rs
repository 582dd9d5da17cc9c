pub mod api_key;

pub use api_key::{generate_unique_api_key, hash_api_key, verify_api_key, GeneratedApiKey};
