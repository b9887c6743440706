//! Ordered collection commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;
use uuid::Uuid;

use schoolsite_core::error::AppError;
use schoolsite_service::{ItemView, RequestContext};

use super::Backend;
use crate::output::{self, OutputFormat};

/// Arguments for collection commands
#[derive(Debug, Args)]
pub struct CollectionArgs {
    /// Collection subcommand
    #[command(subcommand)]
    pub command: CollectionCommand,
}

/// Collection subcommands
#[derive(Debug, Subcommand)]
pub enum CollectionCommand {
    /// List the items of one parent in display order
    List {
        /// Collection name (see `catalog`)
        collection: String,
        /// Owning parent id
        parent_id: String,
    },
    /// Append an item to a parent
    Add {
        /// Collection name
        collection: String,
        /// Owning parent id
        parent_id: String,
        /// Item fields as JSON, or `@file.json`
        #[arg(long)]
        fields: String,
        /// Image or PDF to attach
        #[arg(long)]
        asset: Option<String>,
    },
    /// Replace an item's fields, and its asset when given
    Update {
        /// Collection name
        collection: String,
        /// Item id
        id: Uuid,
        /// Item fields as JSON, or `@file.json`
        #[arg(long)]
        fields: String,
        /// Replacement image or PDF
        #[arg(long)]
        asset: Option<String>,
    },
    /// Delete an item and its asset
    Remove {
        /// Collection name
        collection: String,
        /// Item id
        id: Uuid,
        /// Skip confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
    /// Swap an item with the one before it
    MoveUp {
        /// Collection name
        collection: String,
        /// Item id
        id: Uuid,
    },
    /// Swap an item with the one after it
    MoveDown {
        /// Collection name
        collection: String,
        /// Item id
        id: Uuid,
    },
    /// Reset a parent's orders to 0..n-1
    Renumber {
        /// Collection name
        collection: String,
        /// Owning parent id
        parent_id: String,
    },
}

/// Item display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ItemRow {
    /// Order
    order: i64,
    /// Item ID
    id: String,
    /// Fields, compact JSON
    fields: String,
    /// Asset URL
    asset: String,
}

impl From<&ItemView> for ItemRow {
    fn from(view: &ItemView) -> Self {
        Self {
            order: view.item.order_index,
            id: view.item.id.to_string(),
            fields: view.item.fields.to_string(),
            asset: view.asset_url.clone().unwrap_or_default(),
        }
    }
}

fn print_items(items: &[ItemView], format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            let rows: Vec<ItemRow> = items.iter().map(ItemRow::from).collect();
            output::print_list(&rows, format);
        }
        OutputFormat::Json => output::print_json(items),
    }
}

fn print_item(item: &ItemView, format: OutputFormat) {
    print_items(std::slice::from_ref(item), format);
}

/// Execute collection commands
pub async fn execute(
    args: &CollectionArgs,
    config_path: &str,
    format: OutputFormat,
) -> Result<(), AppError> {
    let config = super::load_config(config_path).await?;
    let backend = Backend::connect(&config).await?;
    let service = &backend.collections;
    let ctx = RequestContext::cli();

    match &args.command {
        CollectionCommand::List {
            collection,
            parent_id,
        } => {
            let items = service.list(collection, parent_id).await?;
            print_items(&items, format);
        }
        CollectionCommand::Add {
            collection,
            parent_id,
            fields,
            asset,
        } => {
            let fields = super::read_json_arg(fields).await?;
            let asset = super::read_optional_asset(asset.as_deref()).await?;
            let item = service
                .add(&ctx, collection, parent_id, &fields, asset)
                .await?;
            output::print_success(&format!("Added item {}", item.item.id));
            print_item(&item, format);
        }
        CollectionCommand::Update {
            collection,
            id,
            fields,
            asset,
        } => {
            let fields = super::read_json_arg(fields).await?;
            let asset = super::read_optional_asset(asset.as_deref()).await?;
            let item = service.update(&ctx, collection, *id, &fields, asset).await?;
            output::print_success(&format!("Updated item {id}"));
            print_item(&item, format);
        }
        CollectionCommand::Remove {
            collection,
            id,
            yes,
        } => {
            let item = service.get(collection, *id).await?;
            if !super::confirm(&format!("Delete item {id} ({})?", item.item.fields), *yes)? {
                println!("Cancelled.");
                return Ok(());
            }
            service.remove(&ctx, collection, *id).await?;
            output::print_success(&format!("Removed item {id}"));
        }
        CollectionCommand::MoveUp { collection, id } => {
            let items = service.move_up(&ctx, collection, *id).await?;
            print_items(&items, format);
        }
        CollectionCommand::MoveDown { collection, id } => {
            let items = service.move_down(&ctx, collection, *id).await?;
            print_items(&items, format);
        }
        CollectionCommand::Renumber {
            collection,
            parent_id,
        } => {
            let items = service.renumber(&ctx, collection, parent_id).await?;
            output::print_success(&format!("Renumbered {} items", items.len()));
            print_items(&items, format);
        }
    }

    backend.stores.close().await;
    Ok(())
}
