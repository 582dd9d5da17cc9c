//! Bring the schema up to date, then mint an API key.
//!
//! By default the bundled migrations run in-process. When `[schema] commands`
//! is set in the config file those external commands run instead, in order.
//!
//! Failures after connecting are logged; the process still exits 0.

use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use tracing::info;

use keymint::domain::SchemaSync;
use keymint::infrastructure::database::SeaOrmProvisioningStore;
use keymint::infrastructure::schema::{CommandSync, MigratorSync};
use keymint::interfaces::console::render_report;
use keymint::runtime::{self, CommonArgs};
use keymint::{init_database, ProvisionFlavor, ProvisionSettings, ProvisioningService};

/// Apply pending schema changes and create an API key.
#[derive(Parser, Debug)]
#[command(name = "setup-database", version)]
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

    let sync: Box<dyn SchemaSync> = if config.schema.commands.is_empty() {
        Box::new(MigratorSync::new(db.clone()))
    } else {
        Box::new(CommandSync::new(config.schema.commands.clone()))
    };

    let service = ProvisioningService::new(
        Arc::new(SeaOrmProvisioningStore::new(db)),
        ProvisionSettings::from_config(&config, ProvisionFlavor::Orm),
    );

    match service.setup(sync.as_ref()).await {
        Ok(key) => {
            info!("✅ Database setup completed");
            print!("{}", render_report(&key, &service.settings().usage_url));
        }
        Err(e) => runtime::report_failure(&e),
    }

    ExitCode::SUCCESS
}
