//! Section document repository implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use schoolsite_core::result::AppResult;
use schoolsite_entity::document::{SingleDocument, UpsertDocument};

use crate::connection::{ping, store_error};
use crate::store::DocumentStore;

/// Repository for the `section_documents` table.
#[derive(Debug, Clone)]
pub struct PgDocumentStore {
    pool: PgPool,
}

impl PgDocumentStore {
    /// Create a new section document repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DocumentStore for PgDocumentStore {
    fn provider_type(&self) -> &str {
        "postgres"
    }

    async fn health_check(&self) -> AppResult<bool> {
        ping(&self.pool).await
    }

    async fn find(&self, section_key: &str) -> AppResult<Option<SingleDocument>> {
        sqlx::query_as::<_, SingleDocument>(
            "SELECT * FROM section_documents WHERE section_key = $1",
        )
        .bind(section_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to find section", e))
    }

    async fn upsert(&self, data: &UpsertDocument) -> AppResult<SingleDocument> {
        sqlx::query_as::<_, SingleDocument>(
            "INSERT INTO section_documents (section_key, payload, asset_key, updated_at) \
             VALUES ($1, $2, $3, NOW()) \
             ON CONFLICT (section_key) DO UPDATE \
             SET payload = EXCLUDED.payload, asset_key = EXCLUDED.asset_key, updated_at = NOW() \
             RETURNING *",
        )
        .bind(&data.section_key)
        .bind(&data.payload)
        .bind(&data.asset_key)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| store_error("Failed to save section", e))
    }

    async fn clear_asset(&self, section_key: &str) -> AppResult<Option<SingleDocument>> {
        sqlx::query_as::<_, SingleDocument>(
            "UPDATE section_documents SET asset_key = NULL, updated_at = NOW() \
             WHERE section_key = $1 RETURNING *",
        )
        .bind(section_key)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| store_error("Failed to clear section asset", e))
    }
}
