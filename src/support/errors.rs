use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("DATABASE_URL environment variable is required")]
    MissingDatabaseUrl,

    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Failed to connect to database: {0}")]
    Connection(#[source] DbErr),

    #[error("API key hash already exists: {0}")]
    DuplicateKey(#[source] DbErr),

    #[error("Database error: {0}")]
    Database(#[from] DbErr),

    #[error("Schema sync failed at `{command}`: {reason}")]
    SchemaSync { command: String, reason: String },

    #[error("No user available after bootstrap")]
    MissingUser,
}

impl ProvisionError {
    /// Operator-facing suggestion printed after the error message.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::DuplicateKey(_) => Some(
                "This might be due to a unique constraint violation. \
                 Try running the command again to generate a different key.",
            ),
            Self::Connection(_) | Self::SchemaSync { .. } => {
                Some("Make sure your DATABASE_URL is correct and the database is accessible")
            }
            Self::Config(ConfigError::MissingDatabaseUrl) => {
                Some("Set it to your PostgreSQL connection string")
            }
            _ => None,
        }
    }
}

/// Whether a database error is a unique/primary key constraint violation.
pub fn is_unique_violation(err: &DbErr) -> bool {
    matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
}
