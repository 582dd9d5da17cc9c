//! Shared bootstrap for the provisioning binaries.
//!
//! Handles the steps every entry point performs before touching the
//! database: argument parsing, configuration, tracing, and the
//! `DATABASE_URL` precondition.

use std::path::PathBuf;

use clap::Args;
use tracing::{error, info};

use crate::config::{default_config_path, AppConfig};
use crate::infrastructure::DatabaseConfig;
use crate::interfaces::console::render_failure;
use crate::support::ProvisionError;

/// Options shared by every binary.
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// Path to the configuration file (TOML).
    #[arg(short, long, env = "KEYMINT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Override the log level (trace, debug, info, warn, error).
    #[arg(short, long)]
    pub log_level: Option<String>,
}

/// Load configuration, apply environment and CLI overrides, then start tracing.
///
/// A config file that cannot be read falls back to defaults.
pub fn bootstrap(args: &CommonArgs) -> AppConfig {
    let config_path = args.config.clone().unwrap_or_else(default_config_path);

    let (mut config, load_error) = match AppConfig::load(&config_path) {
        Ok(cfg) => (cfg, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };
    config.apply_env();
    if let Some(level) = &args.log_level {
        config.logging.level = level.clone();
    }

    init_tracing(&config);

    match load_error {
        None => info!("Configuration loaded from {}", config_path.display()),
        Some(e) => {
            error!("{}", e);
            error!("Using default configuration.");
        }
    }

    config
}

/// The connection settings, or the operator message for a missing `DATABASE_URL`.
pub fn require_database(config: &AppConfig) -> Result<DatabaseConfig, ProvisionError> {
    Ok(DatabaseConfig::from_app_config(config)?)
}

/// Print an error and its hint for the operator.
pub fn report_failure(err: &ProvisionError) {
    eprintln!("{}", render_failure(err));
}

/// Initialize tracing (logging) from the application config.
///
/// Call this once at process startup.
pub fn init_tracing(config: &AppConfig) {
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::util::SubscriberInitExt;

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.logging.level));

    match config.logging.format.to_lowercase().as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(tracing_subscriber::fmt::layer().with_target(false))
                .init();
        }
    }
}
