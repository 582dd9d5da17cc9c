use crate::config::AppConfig;
use crate::domain::{NewUser, UserRole};

pub const DEFAULT_KEY_PREFIX: &str = "cal_";
pub const DEFAULT_USAGE_URL: &str = "https://your-render-api-url.onrender.com/api/v2/me";
/// Usage endpoint shown by `standalone-db-setup`.
pub const RAW_SQL_USAGE_URL: &str = "https://calcom-api.onrender.com/api/v2/me";

/// Which binary's fixed defaults apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvisionFlavor {
    /// SeaORM-backed `create-api-key` / `setup-database`.
    Orm,
    /// `standalone-db-setup`.
    RawSql,
}

/// Everything the orchestrator needs besides the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionSettings {
    /// Identity inserted when the users table is empty.
    pub admin: NewUser,
    /// Note stored on the key row.
    pub note: String,
    /// Prepended to the raw secret for display.
    pub key_prefix: String,
    /// Endpoint used in the printed `curl` example.
    pub usage_url: String,
}

impl ProvisionSettings {
    pub fn defaults(flavor: ProvisionFlavor) -> Self {
        match flavor {
            ProvisionFlavor::Orm => Self {
                admin: NewUser {
                    email: "admin@example.com".to_string(),
                    username: Some("admin".to_string()),
                    name: Some("API Admin".to_string()),
                    role: UserRole::Admin,
                    verified: true,
                },
                note: "Generated via script for API access".to_string(),
                key_prefix: DEFAULT_KEY_PREFIX.to_string(),
                usage_url: DEFAULT_USAGE_URL.to_string(),
            },
            ProvisionFlavor::RawSql => Self {
                admin: NewUser {
                    email: "admin@cal.com".to_string(),
                    username: None,
                    name: Some("Admin User".to_string()),
                    role: UserRole::Admin,
                    verified: false,
                },
                note: "Generated API Key".to_string(),
                key_prefix: DEFAULT_KEY_PREFIX.to_string(),
                usage_url: RAW_SQL_USAGE_URL.to_string(),
            },
        }
    }

    /// Flavor defaults with any `[admin]` / `[api_key]` values from config applied.
    pub fn from_config(cfg: &AppConfig, flavor: ProvisionFlavor) -> Self {
        let mut settings = Self::defaults(flavor);

        let admin = &cfg.admin;
        if let Some(email) = &admin.email {
            settings.admin.email = email.clone();
        }
        if admin.username.is_some() {
            settings.admin.username = admin.username.clone();
        }
        if admin.name.is_some() {
            settings.admin.name = admin.name.clone();
        }
        if let Some(role) = admin.role {
            settings.admin.role = role;
        }
        if let Some(verified) = admin.verified {
            settings.admin.verified = verified;
        }

        let key = &cfg.api_key;
        if let Some(prefix) = &key.prefix {
            settings.key_prefix = prefix.clone();
        }
        if let Some(note) = &key.note {
            settings.note = note.clone();
        }
        if let Some(url) = &key.usage_url {
            settings.usage_url = url.clone();
        }

        settings
    }
}

impl Default for ProvisionSettings {
    fn default() -> Self {
        Self::defaults(ProvisionFlavor::Orm)
    }
}
