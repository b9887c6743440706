//! Row store contracts for ordered collections and section documents.

use async_trait::async_trait;
use tracing::error;
use uuid::Uuid;

use schoolsite_core::error::{AppError, ErrorKind};
use schoolsite_core::result::AppResult;
use schoolsite_entity::collection::{CreateOrderedItem, OrderedItem, UpdateOrderedItem};
use schoolsite_entity::document::{SingleDocument, UpsertDocument};

/// A target order value for one item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderAssignment {
    /// Item to update.
    pub id: Uuid,
    /// Order value to write.
    pub order_index: i64,
}

/// Storage for parent-scoped ordered items.
#[async_trait]
pub trait CollectionStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "postgres", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Items of one parent, ascending by order with ties broken by id.
    async fn list(&self, collection: &str, parent_id: &str) -> AppResult<Vec<OrderedItem>>;

    /// Find one item by id.
    async fn find(&self, collection: &str, id: Uuid) -> AppResult<Option<OrderedItem>>;

    /// Highest order value under a parent, or `None` when it has no items.
    async fn max_order(&self, collection: &str, parent_id: &str) -> AppResult<Option<i64>>;

    /// Persist a new item and return it with its assigned id.
    async fn insert(&self, data: &CreateOrderedItem) -> AppResult<OrderedItem>;

    /// Replace an item's fields and asset key. Fails with `NotFound`.
    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        data: &UpdateOrderedItem,
    ) -> AppResult<OrderedItem>;

    /// Write one item's order value. Fails with `NotFound`.
    async fn set_order(&self, collection: &str, id: Uuid, order_index: i64) -> AppResult<()>;

    /// Apply two order writes, `first` then `second`.
    ///
    /// The default issues two independent writes. If the second one fails
    /// after the first succeeded the two items may share an order value
    /// until the parent is renumbered, and a `PartialFailure` is returned.
    /// Stores with transactions override this to make the swap atomic.
    async fn swap_orders(
        &self,
        collection: &str,
        first: OrderAssignment,
        second: OrderAssignment,
    ) -> AppResult<()> {
        self.set_order(collection, first.id, first.order_index)
            .await?;

        self.set_order(collection, second.id, second.order_index)
            .await
            .map_err(|e| {
                error!(
                    collection,
                    first_id = %first.id,
                    second_id = %second.id,
                    error = %e,
                    "Order swap left half applied"
                );
                AppError::with_source(
                    ErrorKind::PartialFailure,
                    format!(
                        "Reorder of {} was only partly applied; renumber the list to repair it",
                        second.id
                    ),
                    e,
                )
            })
    }

    /// Delete an item. Returns `true` if a row was removed.
    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<bool>;
}

/// Storage for one document per section key.
#[async_trait]
pub trait DocumentStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "postgres", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the store is reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// The current document of a section, if it was ever saved.
    async fn find(&self, section_key: &str) -> AppResult<Option<SingleDocument>>;

    /// Insert or wholesale-replace the document of a section.
    async fn upsert(&self, data: &UpsertDocument) -> AppResult<SingleDocument>;

    /// Clear the asset key of a section, leaving the payload untouched.
    ///
    /// Returns the updated document, or `None` when the section has none.
    async fn clear_asset(&self, section_key: &str) -> AppResult<Option<SingleDocument>>;
}
