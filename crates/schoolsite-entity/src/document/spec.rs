//! Section descriptors.

use serde::Serialize;

use crate::asset::AssetKind;
use crate::shape::Shape;

/// Describes one single-document section.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SectionSpec {
    /// Fixed section key.
    pub key: String,
    /// Human-readable title.
    pub title: String,
    /// Bucket holding the section's asset.
    pub bucket: String,
    /// Asset kinds the section may own. Empty means no asset.
    pub accepted_assets: Vec<AssetKind>,
    /// Shape of the payload.
    pub shape: Shape,
}

impl SectionSpec {
    /// Create a section descriptor without an asset.
    pub fn new(key: &str, title: &str, shape: Shape) -> Self {
        Self {
            key: key.to_string(),
            title: title.to_string(),
            bucket: "images".to_string(),
            accepted_assets: Vec::new(),
            shape,
        }
    }

    /// Allow the section to own an asset of `kind` stored in `bucket`.
    pub fn with_assets(mut self, bucket: &str, kinds: &[AssetKind]) -> Self {
        self.bucket = bucket.to_string();
        self.accepted_assets = kinds.to_vec();
        self
    }

    /// Prefix under which this section's asset keys are generated.
    pub fn asset_prefix(&self) -> &str {
        &self.key
    }
}
