//! Section document commands.

use clap::{Args, Subcommand};

use schoolsite_core::error::AppError;
use schoolsite_service::{RequestContext, SectionView};

use super::Backend;
use crate::output::{self, OutputFormat};

/// Arguments for section commands
#[derive(Debug, Args)]
pub struct SectionArgs {
    /// Section subcommand
    #[command(subcommand)]
    pub command: SectionCommand,
}

/// Section subcommands
#[derive(Debug, Subcommand)]
pub enum SectionCommand {
    /// Show a section's current document
    Get {
        /// Section key (see `catalog`)
        key: String,
    },
    /// Replace a section's document
    Save {
        /// Section key
        key: String,
        /// Whole payload as JSON, or `@file.json`
        #[arg(long)]
        payload: String,
        /// Replacement image or PDF; the current one is kept when omitted
        #[arg(long)]
        asset: Option<String>,
    },
    /// Detach and delete a section's asset, keeping the payload
    RemoveAsset {
        /// Section key
        key: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

fn print_section(view: &SectionView, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            output::print_kv("Section", &view.section_key);
            output::print_kv("Updated", &view.updated_at.format("%Y-%m-%d %H:%M").to_string());
            output::print_kv("Asset", view.asset_url.as_deref().unwrap_or("-"));
            let payload = serde_json::to_string_pretty(&view.payload)
                .unwrap_or_else(|_| view.payload.to_string());
            println!("{payload}");
        }
        OutputFormat::Json => output::print_json(view),
    }
}

/// Execute section commands
pub async fn execute(
    args: &SectionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let backend = Backend::connect(&config).await?;
    let service = &backend.sections;
    let ctx = RequestContext::cli();

    match &args.command {
        SectionCommand::Get { key } => match service.get(key).await? {
            Some(view) => print_section(&view, format),
            None => output::print_warning(&format!("Section '{key}' has not been configured yet")),
        },
        SectionCommand::Save {
            key,
            payload,
            asset,
        } => {
            let payload = super::read_json_arg(payload).await?;
            let asset = super::read_optional_asset(asset.as_deref()).await?;
            let view = service.save(&ctx, key, &payload, asset).await?;
            output::print_success(&format!("Section '{key}' saved"));
            print_section(&view, format);
        }
        SectionCommand::RemoveAsset { key, yes } => {
            if !super::confirm(&format!("Delete the asset of section '{key}'?"), *yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            match service.remove_asset(&ctx, key).await? {
                Some(view) => {
                    output::print_success(&format!("Asset of section '{key}' removed"));
                    print_section(&view, format);
                }
                None => output::print_warning(&format!("Section '{key}' has not been configured yet")),
            }
        }
    }

    backend.stores.close().await;
    Ok(())
}
