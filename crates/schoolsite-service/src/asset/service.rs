//! Shared asset upload and replacement.

use std::future::Future;

use tracing::{info, warn};

use schoolsite_core::result::AppResult;
use schoolsite_entity::asset::{AssetKind, NewAsset};
use schoolsite_entity::collection::CollectionSpec;
use schoolsite_entity::document::SectionSpec;
use schoolsite_storage::StorageManager;
use schoolsite_storage::keys::asset_key;

/// Where an owner's assets go and what it accepts.
#[derive(Debug, Clone, Copy)]
pub struct AssetSlot<'a> {
    /// Bucket name.
    pub bucket: &'a str,
    /// Key prefix inside the bucket.
    pub prefix: &'a str,
    /// Accepted asset kinds.
    pub accepted: &'a [AssetKind],
}

impl<'a> From<&'a CollectionSpec> for AssetSlot<'a> {
    fn from(spec: &'a CollectionSpec) -> Self {
        Self {
            bucket: &spec.bucket,
            prefix: spec.asset_prefix(),
            accepted: &spec.accepted_assets,
        }
    }
}

impl<'a> From<&'a SectionSpec> for AssetSlot<'a> {
    fn from(spec: &'a SectionSpec) -> Self {
        Self {
            bucket: &spec.bucket,
            prefix: spec.asset_prefix(),
            accepted: &spec.accepted_assets,
        }
    }
}

/// Uploads, replaces and releases assets owned by items and sections.
#[derive(Debug, Clone)]
pub struct AssetService {
    storage: StorageManager,
    max_asset_bytes: u64,
}

impl AssetService {
    /// Creates a new asset service.
    pub fn new(storage: StorageManager, max_asset_bytes: u64) -> Self {
        Self {
            storage,
            max_asset_bytes,
        }
    }

    /// Check an asset against the slot before anything is written.
    pub fn validate(&self, slot: AssetSlot<'_>, asset: &NewAsset) -> AppResult<AssetKind> {
        asset.validate(slot.accepted, self.max_asset_bytes)
    }

    /// Public URL of a stored asset.
    pub async fn public_url(&self, bucket: &str, key: &str) -> AppResult<String> {
        Ok(self.storage.get(bucket).await?.public_url(key))
    }

    /// Upload `asset` under a fresh key and return the key.
    pub async fn upload(&self, slot: AssetSlot<'_>, asset: &NewAsset) -> AppResult<String> {
        self.validate(slot, asset)?;
        let store = self.storage.get(slot.bucket).await?;
        let key = asset_key(slot.prefix, &asset.file_name);
        let key = store
            .upload(&key, asset.data.clone(), &asset.content_type)
            .await?;
        info!(
            bucket = slot.bucket,
            key = %key,
            bytes = asset.data.len(),
            "Asset uploaded"
        );
        Ok(key)
    }

    /// Delete an asset, logging instead of failing.
    ///
    /// Returns whether the delete succeeded; on failure the object is left
    /// orphaned.
    pub async fn release(&self, bucket: &str, key: &str) -> bool {
        let result = match self.storage.get(bucket).await {
            Ok(store) => store.remove(&[key.to_string()]).await,
            Err(e) => Err(e),
        };
        match result {
            Ok(()) => {
                info!(bucket, key, "Asset released");
                true
            }
            Err(e) => {
                warn!(bucket, key, error = %e, "Failed to delete asset; it is now orphaned");
                false
            }
        }
    }

    /// Upload `asset`, point its owner at it with `swap`, then delete the
    /// `previous` asset.
    ///
    /// If `swap` fails the fresh upload is removed again and the swap error
    /// is returned. Failing to delete `previous` after a successful swap
    /// only logs.
    pub async fn replace<T, F, Fut>(
        &self,
        slot: AssetSlot<'_>,
        previous: Option<&str>,
        asset: &NewAsset,
        swap: F,
    ) -> AppResult<T>
    where
        F: FnOnce(String) -> Fut,
        Fut: Future<Output = AppResult<T>>,
    {
        let new_key = self.upload(slot, asset).await?;

        match swap(new_key.clone()).await {
            Ok(value) => {
                if let Some(previous) = previous.filter(|p| *p != new_key) {
                    self.release(slot.bucket, previous).await;
                }
                Ok(value)
            }
            Err(e) => {
                warn!(
                    bucket = slot.bucket,
                    key = %new_key,
                    error = %e,
                    "Reference update failed; removing the new upload"
                );
                self.release(slot.bucket, &new_key).await;
                Err(e)
            }
        }
    }
}
