//! Catalog listing.

use serde::Serialize;
use tabled::Tabled;

use schoolsite_core::error::AppError;
use schoolsite_entity::asset::AssetKind;
use schoolsite_entity::catalog::Catalog;

use crate::output::{self, OutputFormat};

/// One collection or section.
#[derive(Debug, Serialize, Tabled)]
struct CatalogRow {
    /// `collection` or `section`
    kind: &'static str,
    /// Name or key
    name: String,
    /// Title
    title: String,
    /// Bucket
    bucket: String,
    /// Accepted asset kinds
    assets: String,
    /// Field names; `*` marks required ones
    fields: String,
}

fn kinds(kinds: &[AssetKind]) -> String {
    if kinds.is_empty() {
        return "-".to_string();
    }
    kinds
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

fn fields(shape: &schoolsite_entity::shape::Shape) -> String {
    shape
        .fields
        .iter()
        .map(|f| {
            if f.required {
                format!("{}*", f.name)
            } else {
                f.name.clone()
            }
        })
        .collect::<Vec<_>>()
        .join(", ")
}

/// Print every collection and section
pub fn execute(format: OutputFormat) -> Result<(), AppError> {
    let catalog = Catalog::builtin();

    let collections = catalog.collections().iter().map(|c| CatalogRow {
        kind: "collection",
        name: c.name.clone(),
        title: c.title.clone(),
        bucket: if c.accepted_assets.is_empty() {
            "-".to_string()
        } else {
            c.bucket.clone()
        },
        assets: kinds(&c.accepted_assets),
        fields: fields(&c.shape),
    });
    let sections = catalog.sections().iter().map(|s| CatalogRow {
        kind: "section",
        name: s.key.clone(),
        title: s.title.clone(),
        bucket: if s.accepted_assets.is_empty() {
            "-".to_string()
        } else {
            s.bucket.clone()
        },
        assets: kinds(&s.accepted_assets),
        fields: fields(&s.shape),
    });

    let rows: Vec<CatalogRow> = collections.chain(sections).collect();
    output::print_list(&rows, format);
    Ok(())
}
