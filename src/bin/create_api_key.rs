//! Mint an API key through the SeaORM entities.
//!
//! ```sh
//! DATABASE_URL=postgres://... create-api-key
//! API_KEY_PREFIX=live_ create-api-key --config ./keymint.toml
//! ```
//!
//! Failures after connecting are logged; the process still exits 0.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;

use keymint::infrastructure::database::SeaOrmProvisioningStore;
use keymint::interfaces::console::render_report;
use keymint::runtime::{self, CommonArgs};
use keymint::{init_database, ProvisionFlavor, ProvisionSettings, ProvisioningService};

/// Create an API key for the first user, creating an admin if none exists.
#[derive(Parser, Debug)]
#[command(name = "create-api-key", version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let config = runtime::bootstrap(&cli.common);

    let db_config = match runtime::require_database(&config) {
        Ok(db_config) => db_config,
        Err(e) => {
            runtime::report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    let db = match init_database(&db_config).await {
        Ok(db) => db,
        Err(e) => {
            runtime::report_failure(&e);
            return ExitCode::FAILURE;
        }
    };

    let service = ProvisioningService::new(
        Arc::new(SeaOrmProvisioningStore::new(db)),
        ProvisionSettings::from_config(&config, ProvisionFlavor::Orm),
    );

    match service.provision().await {
        Ok(key) => print!("{}", render_report(&key, &service.settings().usage_url)),
        Err(e) => runtime::report_failure(&e),
    }

    ExitCode::SUCCESS
}
