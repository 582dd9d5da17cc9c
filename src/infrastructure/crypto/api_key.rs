//! API key generation and hashing

use rand::rngs::OsRng;
use rand::RngCore;
use sha2::{Digest, Sha256};

/// Number of random bytes in a raw secret (32 hex chars).
pub const SECRET_BYTES: usize = 16;

/// Result of API key generation
#[derive(Clone, PartialEq, Eq)]
pub struct GeneratedApiKey {
    /// SHA-256 of the raw secret, lowercase hex. This is what gets stored.
    pub hashed_key: String,
    /// The raw secret (only shown once!)
    pub raw_key: String,
}

impl GeneratedApiKey {
    /// Display form handed to the operator: `<prefix><raw secret>`.
    pub fn prefixed(&self, prefix: &str) -> String {
        format!("{}{}", prefix, self.raw_key)
    }
}

impl std::fmt::Debug for GeneratedApiKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeneratedApiKey")
            .field("hashed_key", &self.hashed_key)
            .field("raw_key", &"<redacted>")
            .finish()
    }
}

/// Generate a raw secret and its stored hash.
///
/// `preset` reuses a known secret instead of drawing a fresh one.
/// Uniqueness is left to the unique constraint on the hash column.
pub fn generate_unique_api_key(preset: Option<&str>) -> GeneratedApiKey {
    let raw_key = match preset {
        Some(secret) => secret.to_string(),
        None => {
            let mut bytes = [0u8; SECRET_BYTES];
            OsRng.fill_bytes(&mut bytes);
            hex::encode(bytes)
        }
    };

    GeneratedApiKey {
        hashed_key: hash_api_key(&raw_key),
        raw_key,
    }
}

/// Hash an API key for storage using SHA-256
pub fn hash_api_key(key: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(key.as_bytes());
    hex::encode(hasher.finalize())
}

/// Verify an API key against a stored hash
pub fn verify_api_key(key: &str, stored_hash: &str) -> bool {
    hash_api_key(key) == stored_hash
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_api_key() {
        let key = generate_unique_api_key(None);

        assert_eq!(key.raw_key.len(), SECRET_BYTES * 2);
        assert!(key
            .raw_key
            .chars()
            .all(|c| c.is_ascii_digit() || ('a'..='f').contains(&c)));
        assert_eq!(key.hashed_key.len(), 64);
        assert!(verify_api_key(&key.raw_key, &key.hashed_key));
        assert!(!verify_api_key("wrong-key", &key.hashed_key));
    }

    #[test]
    fn hash_is_deterministic() {
        assert_eq!(hash_api_key("abc"), hash_api_key("abc"));
        assert_eq!(
            hash_api_key("abc"),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn preset_secret_is_reused() {
        let key = generate_unique_api_key(Some("deadbeef"));
        assert_eq!(key.raw_key, "deadbeef");
        assert_eq!(key.hashed_key, hash_api_key("deadbeef"));
    }

    #[test]
    fn independent_keys_differ() {
        let a = generate_unique_api_key(None);
        let b = generate_unique_api_key(None);
        assert_ne!(a.raw_key, b.raw_key);
        assert_ne!(a.hashed_key, b.hashed_key);
    }

    #[test]
    fn prefix_is_prepended() {
        let key = generate_unique_api_key(Some("0123"));
        assert_eq!(key.prefixed("cal_"), "cal_0123");
    }

    #[test]
    fn debug_never_shows_secret() {
        let key = generate_unique_api_key(Some("topsecretvalue"));
        assert!(!format!("{:?}", key).contains("topsecretvalue"));
    }
}
