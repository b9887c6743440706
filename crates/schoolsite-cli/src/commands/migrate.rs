//! Database migration commands.

use clap::{Args, Subcommand};

use schoolsite_core::error::AppError;
use schoolsite_database::RowStores;

use crate::output;

/// Arguments for the migrate command
#[derive(Debug, Args)]
pub struct MigrateArgs {
    /// Migration subcommand
    #[command(subcommand)]
    pub command: MigrateCommand,
}

/// Migration subcommands
#[derive(Debug, Subcommand)]
pub enum MigrateCommand {
    /// Run all pending migrations
    Run {
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

/// Execute migration commands
pub async fn execute(args: &MigrateArgs, config_path: &str) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;

    match &args.command {
        MigrateCommand::Run { yes } => {
            if !super::confirm("Apply pending migrations to the configured database?", *yes)? {
                println!("Cancelled.");
                return Ok(());
            }

            let stores = RowStores::from_config(&config.database).await?;
            if stores.migrate().await? {
                output::print_success("All migrations applied successfully.");
            } else {
                output::print_warning("The in-memory row store has no schema; nothing to do.");
            }
            stores.close().await;
        }
    }

    Ok(())
}
