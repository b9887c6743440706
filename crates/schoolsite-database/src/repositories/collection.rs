//! Ordered item repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::debug;
use uuid::Uuid;

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;
use schoolsite_entity::collection::{CreateOrderedItem, OrderedItem, UpdateOrderedItem};

use crate::connection::{ping, store_error};
use crate::store::{CollectionStore, OrderAssignment};

/// Repository for ordered items in the `ordered_items` table.
#[derive(Debug, Clone)]
pub struct PgCollectionStore {
    pool: PgPool,
}

impl PgCollectionStore {
    /// Create a new ordered item repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CollectionStore for PgCollectionStore {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }

    async fn list(&self, collection: &str, parent_id: &str) -> AppResult<Vec<OrderedItem>> {
        sqlx::query_as::<_, OrderedItem>(
            "SELECT * FROM ordered_items WHERE collection = $1 AND parent_id = $2 \
             ORDER BY order_index ASC, id ASC",
        )
        .bind(collection)
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| store_error("Failed to list items", e))
    }

    async fn find(&self, collection: &str, id: Uuid) -> AppResult<Option<OrderedItem>> {
        sqlx::query_as::<_, OrderedItem>(
            "SELECT * FROM ordered_items WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find item", e))
    }

    async fn max_order(&self, collection: &str, parent_id: &str) -> AppResult<Option<i64>> {
        sqlx::query_scalar::<_, Option<i64>>(
            "SELECT MAX(order_index) FROM ordered_items WHERE collection = $1 AND parent_id = $2",
        )
        .bind(collection)
        .bind(parent_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to read highest order", e))
    }

    async fn insert(&self, data: &CreateOrderedItem) -> AppResult<OrderedItem> {
        sqlx::query_as::<_, OrderedItem>(
            "INSERT INTO ordered_items (id, collection, parent_id, order_index, fields, asset_key) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING *",
        )
        .bind(Uuid::now_v7())
        .bind(&data.collection)
        .bind(&data.parent_id)
        .bind(data.order_index)
        .bind(&data.fields)
        .bind(&data.asset_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to create item", e))
    }

    async fn update(
        &self,
        collection: &str,
        id: Uuid,
        data: &UpdateOrderedItem,
    ) -> AppResult<OrderedItem> {
        sqlx::query_as::<_, OrderedItem>(
            "UPDATE ordered_items SET fields = $3, asset_key = $4, updated_at = NOW() \
             WHERE collection = $1 AND id = $2 RETURNING *",
        )
        .bind(collection)
        .bind(id)
        .bind(&data.fields)
        .bind(&data.asset_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update item", e))?
        .ok_or_else(|| AppError::not_found(format!("Item {id} not found")))
    }

    async fn set_order(&self, collection: &str, id: Uuid, order_index: i64) -> AppResult<()> {
        let result = sqlx::query(
            "UPDATE ordered_items SET order_index = $3, updated_at = NOW() \
             WHERE collection = $1 AND id = $2",
        )
        .bind(collection)
        .bind(id)
        .bind(order_index)
        .execute(&self.pool)
        .await
        .map_err(|e| store_error("Failed to update order", e))?;

        if result.rows_affected() == 0 {
            return Err(AppError::not_found(format!("Item {id} not found")));
        }
        Ok(())
    }

    /// Both writes run in one transaction, so readers never see them apart.
    async fn swap_orders(
        &self,
        collection: &str,
        first: OrderAssignment,
        second: OrderAssignment,
    ) -> AppResult<()> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| store_error("Failed to begin reorder", e))?;

        for assignment in [first, second] {
            let result = sqlx::query(
                "UPDATE ordered_items SET order_index = $3, updated_at = NOW() \
                 WHERE collection = $1 AND id = $2",
            )
            .bind(collection)
            .bind(assignment.id)
            .bind(assignment.order_index)
            .execute(&mut *tx)
            .await
            .map_err(|e| store_error("Failed to update order", e))?;

            if result.rows_affected() == 0 {
                return Err(AppError::not_found(format!(
                    "Item {} not found",
                    assignment.id
                )));
            }
        }

        tx.commit()
            .await
            .map_err(|e| store_error("Failed to commit reorder", e))?;

        debug!(collection, first = %first.id, second = %second.id, "Swapped orders");
        Ok(())
    }

    async fn delete(&self, collection: &str, id: Uuid) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM ordered_items WHERE collection = $1 AND id = $2")
            .bind(collection)
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(|e| store_error("Failed to delete item", e))?;
        Ok(result.rows_affected() > 0)
    }
}
