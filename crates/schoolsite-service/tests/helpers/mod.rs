//! Shared fixtures for service integration tests.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use async_trait::async_trait;
use bytes::Bytes;
use uuid::Uuid;

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;
use schoolsite_core::traits::object_store::{ObjectEntry, ObjectStore};
use schoolsite_database::{
    CollectionStore, DocumentStore, MemoryCollectionStore, MemoryDocumentStore,
};
use schoolsite_entity::asset::NewAsset;
use schoolsite_entity::catalog::{Catalog, DOCUMENTS_BUCKET, IMAGES_BUCKET};
use schoolsite_entity::collection::{CreateOrderedItem, OrderedItem, UpdateOrderedItem};
use schoolsite_entity::document::{SingleDocument, UpsertDocument};
use schoolsite_service::{
    ActionGuard, AssetService, CollectionService, RequestContext, SectionService,
};
use schoolsite_storage::{MemoryObjectStore, StorageManager};

/// Collection store that can be told to fail.
#[derive(Debug, Default)]
pub struct FlakyCollectionStore {
    pub inner: MemoryCollectionStore,
    /// Number of `set_order` calls to let through before failing; `usize::MAX`
    /// disables the failure.
    pub set_order_budget: AtomicUsize,
    pub fail_insert: AtomicBool,
    pub fail_update: AtomicBool,
    pub fail_list: AtomicBool,
    /// Returned by the next `find` instead of the stored row, as if the
    /// read had happened before a concurrent write.
    pub stale_find: Mutex<Option<OrderedItem>>,
}

impl FlakyCollectionStore {
    pub fn new() -> Self {
        Self {
            set_order_budget: AtomicUsize::new(usize::MAX),
            ..Self::default()
        }
    }

    pub fn fail_set_order_after(&self, successes: usize) {
        self.set_order_budget.store(successes, Ordering::SeqCst);
    }

    pub fn serve_stale_once(&self, item: OrderedItem) {
        *self.stale_find.lock().unwrap() = Some(item);
    }
}

fn unavailable() -> AppError {
    AppError::store_unavailable("simulated outage")
}

#[async_trait]
impl CollectionStore for FlakyCollectionStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn list(&self, collection: &str, parent_id: &str) -> AppResult<Vec<OrderedItem>> {
        if self.fail_list.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.list(collection, parent_id).await
    }

    async fn find(&self, collection: &str, id: Uuid) -> AppResult<Option<OrderedItem>> {
        let stale = self.stale_find.lock().unwrap().take();
        if let Some(item) = stale {
            return Ok(Some(item));
        }
        self.inner.find(collection, id).await
    }

    async fn max_order(&self, collection: &str, parent_id: &str) -> AppResult<Option<i64>> {
        self.inner.max_order(collection, parent_id).await
    }

    async fn insert(&self, data: &CreateOrderedItem) -> AppResult<OrderedItem> {
        if self.fail_insert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.insert(data).await
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        data: &UpdateOrderedItem,
    ) -> AppResult<OrderedItem> {
        if self.fail_update.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.update(collection, id, data).await
    }

    async fn set_order(&self, collection: &str, id: Uuid, order_index: i64) -> AppResult<()> {
        let budget = self.set_order_budget.load(Ordering::SeqCst);
        if budget == 0 {
            return Err(unavailable());
        }
        if budget != usize::MAX {
            self.set_order_budget.store(budget - 1, Ordering::SeqCst);
        }
        self.inner.set_order(collection, id, order_index).await
    }

    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<bool> {
        self.inner.delete(collection, id).await
    }
}

/// Document store that can be told to fail upserts.
#[derive(Debug, Default)]
pub struct FlakyDocumentStore {
    pub inner: MemoryDocumentStore,
    pub fail_upsert: AtomicBool,
}

#[async_trait]
impl DocumentStore for FlakyDocumentStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn find(&self, section_key: &str) -> AppResult<Option<SingleDocument>> {
        self.inner.find(section_key).await
    }

    async fn upsert(&self, data: &UpsertDocument) -> AppResult<SingleDocument> {
        if self.fail_upsert.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.upsert(data).await
    }

    async fn clear_asset(&self, section_key: &str) -> AppResult<Option<SingleDocument>> {
        self.inner.clear_asset(section_key).await
    }
}

/// Object store whose deletes can be made to fail.
#[derive(Debug)]
pub struct FlakyObjectStore {
    pub inner: MemoryObjectStore,
    pub fail_remove: AtomicBool,
}

impl FlakyObjectStore {
    pub fn new(bucket: &str) -> Self {
        Self {
            inner: MemoryObjectStore::new(bucket, "/assets"),
            fail_remove: AtomicBool::new(false),
        }
    }

    pub async fn keys(&self) -> Vec<String> {
        self.inner
            .list("")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect()
    }
}

#[async_trait]
impl ObjectStore for FlakyObjectStore {
    fn provider_type(&self) -> &str {
        "flaky"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String> {
        self.inner.upload(key, data, content_type).await
    }

    fn public_url(&self, key: &str) -> String {
        self.inner.public_url(key)
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        if self.fail_remove.load(Ordering::SeqCst) {
            return Err(unavailable());
        }
        self.inner.remove(keys).await
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectEntry>> {
        self.inner.list(prefix).await
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        self.inner.exists(key).await
    }
}

/// Services wired to controllable in-memory backends.
pub struct TestServices {
    pub collections: CollectionService,
    pub sections: SectionService,
    pub collection_store: Arc<FlakyCollectionStore>,
    pub document_store: Arc<FlakyDocumentStore>,
    pub images: Arc<FlakyObjectStore>,
    pub documents: Arc<FlakyObjectStore>,
    pub guard: ActionGuard,
}

impl TestServices {
    pub async fn new() -> Self {
        let catalog = Arc::new(Catalog::builtin());
        let collection_store = Arc::new(FlakyCollectionStore::new());
        let document_store = Arc::new(FlakyDocumentStore::default());
        let images = Arc::new(FlakyObjectStore::new(IMAGES_BUCKET));
        let documents = Arc::new(FlakyObjectStore::new(DOCUMENTS_BUCKET));

        let storage = StorageManager::new();
        storage.register(IMAGES_BUCKET, images.clone()).await;
        storage.register(DOCUMENTS_BUCKET, documents.clone()).await;

        let assets = Arc::new(AssetService::new(storage, 1024 * 1024));
        let guard = ActionGuard::new();

        Self {
            collections: CollectionService::new(
                Arc::clone(&catalog),
                collection_store.clone(),
                Arc::clone(&assets),
                guard.clone(),
            ),
            sections: SectionService::new(
                catalog,
                document_store.clone(),
                assets,
                guard.clone(),
            ),
            collection_store,
            document_store,
            images,
            documents,
            guard,
        }
    }
}

pub fn ctx() -> RequestContext {
    RequestContext::new("tester")
}

pub fn png(name: &str) -> NewAsset {
    NewAsset::new(name, "image/png", Bytes::from_static(b"\x89PNG\r\n\x1a\n"))
}

pub fn pdf(name: &str) -> NewAsset {
    NewAsset::new(name, "application/pdf", Bytes::from_static(b"%PDF-1.7"))
}
