//! Collection descriptors.

use serde::Serialize;

use crate::asset::AssetKind;
use crate::shape::Shape;

/// Describes one ordered collection: where its assets live and what its
/// items look like.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollectionSpec {
    /// Collection name, used as the row discriminator.
    pub name: String,
    /// Human-readable title.
    pub title: String,
    /// Bucket holding the items' assets.
    pub bucket: String,
    /// Asset kinds an item may own. Empty means items own no asset.
    pub accepted_assets: Vec<AssetKind>,
    /// Whether a new item must come with an asset.
    pub requires_asset: bool,
    /// Shape of the items' fields.
    pub shape: Shape,
}

impl CollectionSpec {
    /// Create a collection descriptor without assets.
    pub fn new(name: &str, title: &str, shape: Shape) -> Self {
        Self {
            name: name.to_string(),
            title: title.to_string(),
            bucket: "images".to_string(),
            accepted_assets: Vec::new(),
            requires_asset: false,
            shape,
        }
    }

    /// Allow items to own assets of `kind` stored in `bucket`.
    pub fn with_assets(mut self, bucket: &str, kinds: &[AssetKind]) -> Self {
        self.bucket = bucket.to_string();
        self.accepted_assets = kinds.to_vec();
        self
    }

    /// Reject new items that carry no asset.
    pub fn requiring_asset(mut self) -> Self {
        self.requires_asset = true;
        self
    }

    /// Prefix under which this collection's asset keys are generated.
    pub fn asset_prefix(&self) -> &str {
        &self.name
    }
}
