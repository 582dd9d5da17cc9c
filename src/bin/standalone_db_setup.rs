//! Create the tables with plain SQL and mint an API key.
//!
//! Needs no migration tooling. Any failure exits with status 1.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use keymint::infrastructure::database::RawSqlProvisioningStore;
use keymint::interfaces::console::render_report;
use keymint::runtime::{self, CommonArgs};
use keymint::{init_database, ProvisionFlavor, ProvisionSettings, ProvisioningService};

/// Create the users / ApiKey tables if needed and create an API key.
#[derive(Parser, Debug)]
#[command(name = "standalone-db-setup", version)]
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
        Arc::new(RawSqlProvisioningStore::new(db)),
        ProvisionSettings::from_config(&config, ProvisionFlavor::RawSql),
    );

    match service.provision().await {
        Ok(key) => {
            info!("🎉 Database setup completed successfully!");
            print!("{}", render_report(&key, &service.settings().usage_url));
            ExitCode::SUCCESS
        }
        Err(e) => {
            runtime::report_failure(&e);
            ExitCode::FAILURE
        }
    }
}
