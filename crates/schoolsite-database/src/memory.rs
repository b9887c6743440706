//! In-memory row stores backed by dashmap.
//!
//! Used by the `memory` database provider for local development and by
//! the test suites. Data lives only as long as the process.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use uuid::Uuid;

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;
use schoolsite_entity::collection::{CreateOrderedItem, OrderedItem, UpdateOrderedItem};
use schoolsite_entity::document::{SingleDocument, UpsertDocument};

use crate::store::{CollectionStore, DocumentStore};

/// Ordered items held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryCollectionStore {
    items: Arc<DashMap<Uuid, OrderedItem>>,
}

impl MemoryCollectionStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Total number of items across all collections.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the store holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl CollectionStore for MemoryCollectionStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list(&self, collection: &str, parent_id: &str) -> AppResult<Vec<OrderedItem>> {
        let mut items: Vec<OrderedItem> = self
            .items
            .iter()
            .filter(|entry| entry.collection == collection && entry.parent_id == parent_id)
            .map(|entry| entry.value().clone())
            .collect();
        items.sort_by(|a, b| a.order_index.cmp(&b.order_index).then(a.id.cmp(&b.id)));
        Ok(items)
    }

    async fn find(&self, collection: &str, id: Uuid) -> AppResult<Option<OrderedItem>> {
        Ok(self
            .items
            .get(&id)
            .filter(|entry| entry.collection == collection)
            .map(|entry| entry.value().clone()))
    }

    async fn max_order(&self, collection: &str, parent_id: &str) -> AppResult<Option<i64>> {
        Ok(self
            .items
            .iter()
            .filter(|entry| entry.collection == collection && entry.parent_id == parent_id)
            .map(|entry| entry.order_index)
            .max())
    }

    async fn insert(&self, data: &CreateOrderedItem) -> AppResult<OrderedItem> {
        let now = Utc::now();
        let item = OrderedItem {
            id: Uuid::now_v7(),
            collection: data.collection.clone(),
            parent_id: data.parent_id.clone(),
            order_index: data.order_index,
            fields: data.fields.clone(),
            asset_key: data.asset_key.clone(),
            created_at: now,
            updated_at: now,
        };
        self.items.insert(item.id, item.clone());
        Ok(item)
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        data: &UpdateOrderedItem,
    ) -> AppResult<OrderedItem> {
        let mut entry = self
            .items
            .get_mut(&id)
            .filter(|entry| entry.collection == collection)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        entry.fields = data.fields.clone();
        entry.asset_key = data.asset_key.clone();
        entry.updated_at = Utc::now();
        Ok(entry.value().clone())
    }

    async fn set_order(&self, collection: &str, id: Uuid, order_index: i64) -> AppResult<()> {
        let mut entry = self
            .items
            .get_mut(&id)
            .filter(|entry| entry.collection == collection)
            .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))?;
        entry.order_index = order_index;
        entry.updated_at = Utc::now();
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<bool> {
        Ok(self
            .items
            .remove_if(&id, |_, item| item.collection == collection)
            .is_some())
    }
}

/// Section documents held in process memory.
#[derive(Debug, Clone, Default)]
pub struct MemoryDocumentStore {
    documents: Arc<DashMap<String, SingleDocument>>,
}

impl MemoryDocumentStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn find(&self, section_key: &str) -> AppResult<Option<SingleDocument>> {
        Ok(self
            .documents
            .get(section_key)
            .map(|entry| entry.value().clone()))
    }

    async fn upsert(&self, data: &UpsertDocument) -> AppResult<SingleDocument> {
        let document = SingleDocument {
            section_key: data.section_key.clone(),
            payload: data.payload.clone(),
            asset_key: data.asset_key.clone(),
            updated_at: Utc::now(),
        };
        self.documents
            .insert(document.section_key.clone(), document.clone());
        Ok(document)
    }

    async fn clear_asset(&self, section_key: &str) -> AppResult<Option<SingleDocument>> {
        Ok(self.documents.get_mut(section_key).map(|mut entry| {
            entry.asset_key = None;
            entry.updated_at = Utc::now();
            entry.value().clone()
        }))
    }
}
