//! Configuration commands.

use clap::{Args, Subcommand};

use schoolsite_core::error::AppError;

use crate::output::{self, OutputFormat};

/// Arguments for config commands
#[derive(Debug, Args)]
pub struct ConfigArgs {
    /// Config subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Config subcommands
#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Show the effective configuration with secrets masked
    Show,
}

/// Execute config commands
pub async fn execute(
    args: &ConfigArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    match &args.command {
        ConfigCommand::Show => {
            let config = super::load_config(config_path).await?.redacted();
            match format {
                OutputFormat::Json => output::print_json(&config),
                OutputFormat::Table => {
                    output::print_kv("Server", &config.server.bind_address());
                    output::print_kv("Row store", &format!("{:?}", config.database.provider));
                    output::print_kv("Database URL", &config.database.url);
                    output::print_kv("Object store", &format!("{:?}", config.storage.provider));
                    output::print_kv("Asset root", &config.storage.local.root_path);
                    output::print_kv("Asset URL prefix", &config.storage.public_url_prefix);
                    output::print_kv("Buckets", &config.storage.buckets.join(", "));
                    output::print_kv("Auth mode", &format!("{:?}", config.auth.mode));
                    output::print_kv("Log level", &config.logging.level);
                }
            }
        }
    }

    Ok(())
}
