//! Ordered collection management: CRUD plus move-up/move-down reordering.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{error, info};
use uuid::Uuid;

use schoolsite_core::error::{AppError, ErrorKind};
use schoolsite_core::result::AppResult;
use schoolsite_database::CollectionStore;
use schoolsite_entity::asset::NewAsset;
use schoolsite_entity::catalog::Catalog;
use schoolsite_entity::collection::{
    CollectionSpec, CreateOrderedItem, OrderedItem, UpdateOrderedItem,
};

use crate::asset::{AssetService, AssetSlot};
use crate::collection::ordering::{self, Direction};
use crate::context::RequestContext;
use crate::guard::ActionGuard;

/// An ordered item as shown to callers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemView {
    /// The stored item.
    #[serde(flatten)]
    pub item: OrderedItem,
    /// Public URL of the owned asset, if any.
    pub asset_url: Option<String>,
}

/// Manages the ordered collections listed in the catalog.
#[derive(Debug, Clone)]
pub struct CollectionService {
    /// Known collections.
    catalog: Arc<Catalog>,
    /// Row store.
    store: Arc<dyn CollectionStore>,
    /// Asset handling.
    assets: Arc<AssetService>,
    /// In-flight mutation tracking.
    guard: ActionGuard,
}

impl CollectionService {
    /// Creates a new collection service.
    pub fn new(
        catalog: Arc<Catalog>,
        store: Arc<dyn CollectionStore>,
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

    /// Items of one parent, ascending by order.
    pub async fn list(&self, collection: &str, parent_id: &str) -> AppResult<Vec<ItemView>> {
        let spec = self.catalog.collection(collection)?;
        let items = self.store.list(&spec.name, parent_id).await?;
        self.views(spec, items).await
    }

    /// One item by id.
    pub async fn get(&self, collection: &str, id: Uuid) -> AppResult<ItemView> {
        let spec = self.catalog.collection(collection)?;
        let item = self.find(spec, id).await?;
        self.view(spec, item).await
    }

    /// Append a new item at the end of its parent's list.
    pub async fn add(
        &self,
        ctx: &RequestContext,
        collection: &str,
        parent_id: &str,
        fields: &Value,
        asset: Option<NewAsset>,
    ) -> AppResult<ItemView> {
        let spec = self.catalog.collection(collection)?;
        if parent_id.trim().is_empty() {
            return Err(AppError::validation("Parent id cannot be empty"));
        }
        let fields = spec.shape.normalize(fields)?;
        match &asset {
            Some(asset) => {
                self.assets.validate(AssetSlot::from(spec), asset)?;
            }
            None if spec.requires_asset => {
                return Err(AppError::validation(format!(
                    "{} items need an attached file",
                    spec.title
                )));
            }
            None => {}
        }

        let _ticket = self.guard.acquire(
            ActionGuard::collection_target(&spec.name, parent_id),
            "add",
        )?;

        let order_index = ordering::next_order(self.store.max_order(&spec.name, parent_id).await?);
        let record = CreateOrderedItem {
            collection: spec.name.clone(),
            parent_id: parent_id.to_string(),
            order_index,
            fields,
            asset_key: None,
        };

        let item = match &asset {
            Some(asset) => {
                let store = Arc::clone(&self.store);
                self.assets
                    .replace(AssetSlot::from(spec), None, asset, move |key| async move {
                        let record = CreateOrderedItem {
                            asset_key: Some(key),
                            ..record
                        };
                        store.insert(&record).await
                    })
                    .await?
            }
            None => self.store.insert(&record).await?,
        };

        info!(
            actor = %ctx.actor,
            collection = %spec.name,
            parent_id,
            item_id = %item.id,
            order_index = item.order_index,
            "Item created"
        );
        self.view(spec, item).await
    }

    /// Replace an item's fields, and its asset when one is given.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        collection: &str,
        id: Uuid,
        fields: &Value,
        asset: Option<NewAsset>,
    ) -> AppResult<ItemView> {
        let spec = self.catalog.collection(collection)?;
        let fields = spec.shape.normalize(fields)?;
        if let Some(asset) = &asset {
            self.assets.validate(AssetSlot::from(spec), asset)?;
        }

        let parent_id = self.find(spec, id).await?.parent_id;
        let _ticket = self.guard.acquire(
            ActionGuard::collection_target(&spec.name, &parent_id),
            "update",
        )?;
        let existing = self.find(spec, id).await?;

        let item = match &asset {
            Some(asset) => {
                let store = Arc::clone(&self.store);
                let collection = spec.name.as_str();
                self.assets
                    .replace(
                        AssetSlot::from(spec),
                        existing.asset_key.as_deref(),
                        asset,
                        move |key| async move {
                            let data = UpdateOrderedItem {
                                fields,
                                asset_key: Some(key),
                            };
                            store.update(collection, id, &data).await
                        },
                    )
                    .await?
            }
            None => {
                let data = UpdateOrderedItem {
                    fields,
                    asset_key: existing.asset_key.clone(),
                };
                self.store.update(&spec.name, id, &data).await?
            }
        };

        info!(actor = %ctx.actor, collection = %spec.name, item_id = %id, "Item updated");
        self.view(spec, item).await
    }

    /// Delete an item, releasing its asset first.
    pub async fn remove(&self, ctx: &RequestContext, collection: &str, id: Uuid) -> AppResult<()> {
        let spec = self.catalog.collection(collection)?;
        let parent_id = self.find(spec, id).await?.parent_id;
        let _ticket = self.guard.acquire(
            ActionGuard::collection_target(&spec.name, &parent_id),
            "remove",
        )?;
        let existing = self.find(spec, id).await?;

        if let Some(key) = &existing.asset_key {
            self.assets.release(&spec.bucket, key).await;
        }

        if !self.store.delete(&spec.name, id).await? {
            return Err(AppError::not_found(format!("Item {id} not found")));
        }

        info!(actor = %ctx.actor, collection = %spec.name, item_id = %id, "Item removed");
        Ok(())
    }

    /// Swap an item with its previous sibling. No-op when it is first.
    pub async fn move_up(
        &self,
        ctx: &RequestContext,
        collection: &str,
        id: Uuid,
    ) -> AppResult<Vec<ItemView>> {
        self.shift(ctx, collection, id, Direction::Up).await
    }

    /// Swap an item with its next sibling. No-op when it is last.
    pub async fn move_down(
        &self,
        ctx: &RequestContext,
        collection: &str,
        id: Uuid,
    ) -> AppResult<Vec<ItemView>> {
        self.shift(ctx, collection, id, Direction::Down).await
    }

    /// Reset the orders of one parent to `0..n-1` in their current order.
    pub async fn renumber(
        &self,
        ctx: &RequestContext,
        collection: &str,
        parent_id: &str,
    ) -> AppResult<Vec<ItemView>> {
        let spec = self.catalog.collection(collection)?;
        let _ticket = self.guard.acquire(
            ActionGuard::collection_target(&spec.name, parent_id),
            "renumber",
        )?;

        let items = self.store.list(&spec.name, parent_id).await?;
        let plan = ordering::renumber_plan(&items);

        for (applied, assignment) in plan.iter().enumerate() {
            if let Err(e) = self
                .store
                .set_order(&spec.name, assignment.id, assignment.order_index)
                .await
            {
                if applied == 0 {
                    return Err(e);
                }
                error!(
                    collection = %spec.name,
                    parent_id,
                    applied,
                    total = plan.len(),
                    error = %e,
                    "Renumber stopped part way"
                );
                return Err(AppError::with_source(
                    ErrorKind::PartialFailure,
                    format!(
                        "Renumbering applied {applied} of {} changes; run it again",
                        plan.len()
                    ),
                    e,
                ));
            }
        }

        info!(
            actor = %ctx.actor,
            collection = %spec.name,
            parent_id,
            changed = plan.len(),
            "Items renumbered"
        );
        self.list(collection, parent_id).await
    }

    async fn shift(
        &self,
        ctx: &RequestContext,
        collection: &str,
        id: Uuid,
        direction: Direction,
    ) -> AppResult<Vec<ItemView>> {
        let spec = self.catalog.collection(collection)?;
        let parent_id = self.find(spec, id).await?.parent_id;
        let _ticket = self.guard.acquire(
            ActionGuard::collection_target(&spec.name, &parent_id),
            "reorder",
        )?;

        // Orders may have changed before the ticket was taken.
        let siblings = self.store.list(&spec.name, &parent_id).await?;
        let mover = siblings
            .iter()
            .find(|item| item.id == id)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        if let Some(target) = ordering::neighbor(&siblings, mover, direction) {
            let (first, second) = ordering::swap_assignments(mover, target);
            self.store.swap_orders(&spec.name, first, second).await?;
            info!(
                actor = %ctx.actor,
                collection = %spec.name,
                item_id = %id,
                swapped_with = %target.id,
                ?direction,
                "Item moved"
            );
        }

        let items = self.store.list(&spec.name, &parent_id).await?;
        self.views(spec, items).await
    }

    async fn find(&self, spec: &CollectionSpec, id: Uuid) -> AppResult<OrderedItem> {
        self.store
            .find(&spec.name, id)
            .await?
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn view(&self, spec: &CollectionSpec, item: OrderedItem) -> AppResult<ItemView> {
        let asset_url = match &item.asset_key {
            Some(key) => Some(self.assets.public_url(&spec.bucket, key).await?),
            None => None,
        };
        Ok(ItemView { item, asset_url })
    }

    async fn views(&self, spec: &CollectionSpec, items: Vec<OrderedItem>) -> AppResult<Vec<ItemView>> {
        let mut views = Vec::with_capacity(items.len());
        for item in items {
            views.push(self.view(spec, item).await?);
        }
        Ok(views)
    }
}
