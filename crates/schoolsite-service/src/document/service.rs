//! Single-document sections: one current payload per section key.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::info;

use schoolsite_core::result::AppResult;
use schoolsite_database::DocumentStore;
use schoolsite_entity::asset::NewAsset;
use schoolsite_entity::catalog::Catalog;
use schoolsite_entity::document::{SectionSpec, SingleDocument, UpsertDocument};

use crate::asset::{AssetService, AssetSlot};
use crate::context::RequestContext;
use crate::guard::ActionGuard;

/// A section document as shown to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SectionView {
    /// Section key.
    pub section_key: String,
    /// Normalized payload.
    pub payload: Value,
    /// Key of the associated asset, if any.
    pub asset_key: Option<String>,
    /// Public URL of the associated asset, if any.
    pub asset_url: Option<String>,
    /// When the section was last written.
    pub updated_at: DateTime<Utc>,
}

/// Manages the single-document sections listed in the catalog.
#[derive(Debug, Clone)]
pub struct SectionService {
    catalog: Arc<Catalog>,
    store: Arc<dyn DocumentStore>,
    assets: Arc<AssetService>,
    guard: ActionGuard,
}

impl SectionService {
    /// Creates a new section service.
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn DocumentStore>,
        assets: Arc<AssetService>,
        guard: ActionGuard,
    ) -> Self {
        Self {
            catalog,
            store,
            assets,
            guard,
        }
    }

    /// The current document, or `None` if the section was never saved.
    pub async fn get(&self, section_key: &str) -> AppResult<Option<SectionView>> {
        let spec = self.catalog.section(section_key)?;
        match self.store.find(&spec.key).await? {
            Some(document) => Ok(Some(self.view(spec, document).await?)),
            None => Ok(None),
        }
    }

    /// Replace the section's payload wholesale, and its asset when one is
    /// given.
    pub async fn save(
        &self,
        ctx: &RequestContext,
        section_key: &str,
        payload: &Value,
        asset: Option<NewAsset>,
    ) -> AppResult<SectionView> {
        let spec = self.catalog.section(section_key)?;
        let payload = spec.shape.normalize(payload)?;
        if let Some(asset) = &asset {
            self.assets.validate(AssetSlot::from(spec), asset)?;
        }

        let _ticket = self
            .guard
            .acquire(ActionGuard::section_target(&spec.key), "save")?;

        let previous = self
            .store
            .find(&spec.key)
            .await?
            .and_then(|document| document.asset_key);

        let document = match &asset {
            Some(asset) => {
                let store = Arc::clone(&self.store);
                let section_key = spec.key.clone();
                self.assets
                    .replace(
                        AssetSlot::from(spec),
                        previous.as_deref(),
                        asset,
                        move |key| async move {
                            let data = UpsertDocument {
                                section_key,
                                payload,
                                asset_key: Some(key),
                            };
                            store.upsert(&data).await
                        },
                    )
                    .await?
            }
            None => {
                let data = UpsertDocument {
                    section_key: spec.key.clone(),
                    payload,
                    asset_key: previous,
                };
                self.store.upsert(&data).await?
            }
        };

        info!(
            actor = %ctx.actor,
            section = %spec.key,
            asset_replaced = asset.is_some(),
            "Section saved"
        );
        self.view(spec, document).await
    }

    /// Detach and delete the section's asset, keeping the payload.
    ///
    /// Absent sections and sections without an asset are left as they are.
    pub async fn remove_asset(
        &self,
        ctx: &RequestContext,
        section_key: &str,
    ) -> AppResult<Option<SectionView>> {
        let spec = self.catalog.section(section_key)?;
        let _ticket = self
            .guard
            .acquire(ActionGuard::section_target(&spec.key), "asset removal")?;

        let Some(current) = self.store.find(&spec.key).await? else {
            return Ok(None);
        };
        let Some(old_key) = current.asset_key.clone() else {
            return Ok(Some(self.view(spec, current).await?));
        };

        let Some(document) = self.store.clear_asset(&spec.key).await? else {
            return Ok(None);
        };
        self.assets.release(&spec.bucket, &old_key).await;

        info!(actor = %ctx.actor, section = %spec.key, key = %old_key, "Section asset removed");
        Ok(Some(self.view(spec, document).await?))
    }

    async fn view(&self, spec: &SectionSpec, document: SingleDocument) -> AppResult<SectionView> {
        let asset_url = match &document.asset_key {
            Some(key) => Some(self.assets.public_url(&spec.bucket, key).await?),
            None => None,
        };
        Ok(SectionView {
            section_key: document.section_key,
            payload: document.payload,
            asset_key: document.asset_key,
            asset_url,
            updated_at: document.updated_at,
        })
    }
}
