use chrono::{DateTime, Utc};

/// A stored API key. Only the hash of the secret is ever kept.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiKey {
    pub id: String,
    pub user_id: i32,
    pub note: Option<String>,
    pub hashed_key: String,
    /// `None` means the key never expires.
    pub expires_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewApiKey {
    pub id: String,
    pub user_id: i32,
    pub note: Option<String>,
    pub hashed_key: String,
    pub expires_at: Option<DateTime<Utc>>,
}

impl From<NewApiKey> for ApiKey {
    fn from(key: NewApiKey) -> Self {
        Self {
            id: key.id,
            user_id: key.user_id,
            note: key.note,
            hashed_key: key.hashed_key,
            expires_at: key.expires_at,
        }
    }
}
