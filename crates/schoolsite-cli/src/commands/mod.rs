//! CLI command definitions and dispatch.

pub mod auth;
pub mod catalog;
pub mod collection;
pub mod config;
pub mod migrate;
pub mod section;

use std::path::Path;
use std::sync::Arc;

use bytes::Bytes;
use clap::{Parser, Subcommand};
use serde_json::Value;

use schoolsite_core::config::AppConfig;
use schoolsite_core::error::AppError;
use schoolsite_core::traits::object_store::mime_from_key;
use schoolsite_database::RowStores;
use schoolsite_entity::asset::NewAsset;
use schoolsite_entity::catalog::Catalog;
use schoolsite_service::{ActionGuard, AssetService, CollectionService, SectionService};
use schoolsite_storage::StorageManager;

use crate::output::OutputFormat;

/// School site content administration
#[derive(Debug, Parser)]
#[command(name = "schoolsite", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Database migration management
    Migrate(migrate::MigrateArgs),
    /// Ordered collection management
    Collection(collection::CollectionArgs),
    /// Section document management
    Section(section::SectionArgs),
    /// List the built-in collections and sections
    Catalog,
    /// Configuration management
    Config(config::ConfigArgs),
    /// Admin credential helpers
    Auth(auth::AuthArgs),
}

impl Cli {
    /// Execute the CLI command
    pub async fn execute(&self) -> Result<(), AppError> {
        match &self.command {
            Commands::Migrate(args) => migrate::execute(args, &self.config).await,
            Commands::Collection(args) => {
                collection::execute(args, &self.config, self.format).await
            }
            Commands::Section(args) => section::execute(args, &self.config, self.format).await,
            Commands::Catalog => catalog::execute(self.format),
            Commands::Config(args) => config::execute(args, &self.config, self.format).await,
            Commands::Auth(args) => auth::execute(args),
        }
    }
}

/// Helper: load configuration from file
///
/// The `config/{SCHOOLSITE_ENV}` overlay and `SCHOOLSITE__*` variables apply
/// on top, as for the server.
pub async fn load_config(config_path: &str) -> Result<AppConfig, AppError> {
    let env = std::env::var("SCHOOLSITE_ENV").unwrap_or_else(|_| "development".to_string());
    let base = config_path.trim_end_matches(".toml");
    AppConfig::load_from(base, &format!("config/{env}"))
}

/// Services wired to the configured backends.
pub struct Backend {
    /// Ordered collections
    pub collections: CollectionService,
    /// Section documents
    pub sections: SectionService,
    /// Row stores, kept for closing the pool
    pub stores: RowStores,
}

impl Backend {
    /// Connect to the row store and object store named in `config`.
    pub async fn connect(config: &AppConfig) -> Result<Self, AppError> {
        let catalog = Arc::new(Catalog::builtin());
        let stores = RowStores::from_config(&config.database).await?;

        let storage = StorageManager::from_config(&config.storage).await?;
        storage.ensure_buckets(&catalog.buckets()).await?;

        let assets = Arc::new(AssetService::new(storage, config.storage.max_asset_bytes));
        let guard = ActionGuard::new();

        Ok(Self {
            collections: CollectionService::new(
                Arc::clone(&catalog),
                Arc::clone(&stores.collections),
                Arc::clone(&assets),
                guard.clone(),
            ),
            sections: SectionService::new(
                catalog,
                Arc::clone(&stores.documents),
                assets,
                guard,
            ),
            stores,
        })
    }
}

/// Parse a JSON argument given inline or as `@path/to/file.json`.
pub async fn read_json_arg(arg: &str) -> Result<Value, AppError> {
    let text = match arg.strip_prefix('@') {
        Some(path) => tokio::fs::read_to_string(path).await.map_err(|e| {
            AppError::validation(format!("Cannot read JSON file '{path}': {e}"))
        })?,
        None => arg.to_string(),
    };
    serde_json::from_str(&text)
        .map_err(|e| AppError::validation(format!("Invalid JSON: {e}")))
}

/// Load an image or PDF from disk; the content type follows the extension.
pub async fn read_asset(path: &str) -> Result<NewAsset, AppError> {
    let content_type = mime_from_key(path).ok_or_else(|| {
        AppError::validation(format!("Cannot tell the file type of '{path}'"))
    })?;
    let data = tokio::fs::read(path)
        .await
        .map_err(|e| AppError::validation(format!("Cannot read asset '{path}': {e}")))?;
    let file_name = Path::new(path)
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or(path);

    Ok(NewAsset::new(file_name, content_type, Bytes::from(data)))
}

/// Optional asset argument.
pub async fn read_optional_asset(path: Option<&str>) -> Result<Option<NewAsset>, AppError> {
    match path {
        Some(path) => Ok(Some(read_asset(path).await?)),
        None => Ok(None),
    }
}

/// Ask before doing something destructive, unless `assume_yes`.
pub fn confirm(prompt: &str, assume_yes: bool) -> Result<bool, AppError> {
    if assume_yes {
        return Ok(true);
    }
    dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
