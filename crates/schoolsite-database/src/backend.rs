//! Row store selection from configuration.

use std::sync::Arc;

use tracing::{info, warn};

use schoolsite_core::config::{DatabaseConfig, DatabaseProvider};
use schoolsite_core::result::AppResult;

use crate::connection::DatabasePool;
use crate::memory::{MemoryCollectionStore, MemoryDocumentStore};
use crate::migration::run_migrations;
use crate::repositories::{PgCollectionStore, PgDocumentStore};
use crate::store::{CollectionStore, DocumentStore};

/// The collection and document stores of one configured backend.
#[derive(Debug, Clone)]
pub struct RowStores {
    /// Ordered collection rows.
    pub collections: Arc<dyn CollectionStore>,
    /// Section documents.
    pub documents: Arc<dyn DocumentStore>,
    pool: Option<DatabasePool>,
}

impl RowStores {
    /// Connect to the backend selected by `database.provider`.
    pub async fn from_config(config: &DatabaseConfig) -> AppResult<Self> {
        match config.provider {
            DatabaseProvider::Postgres => {
                let pool = DatabasePool::connect(config).await?;
                Ok(Self {
                    collections: Arc::new(PgCollectionStore::new(pool.pool().clone())),
                    documents: Arc::new(PgDocumentStore::new(pool.pool().clone())),
                    pool: Some(pool),
                })
            }
            DatabaseProvider::Memory => {
                warn!("Using the in-memory row store; content is lost on restart");
                Ok(Self::memory())
            }
        }
    }

    /// Fresh in-memory stores.
    pub fn memory() -> Self {
        Self {
            collections: Arc::new(MemoryCollectionStore::new()),
            documents: Arc::new(MemoryDocumentStore::new()),
            pool: None,
        }
    }

    /// The PostgreSQL pool, when backed by PostgreSQL.
    pub fn pool(&self) -> Option<&DatabasePool> {
        self.pool.as_ref()
    }

    /// Apply pending migrations. Returns `false` for backends without a schema.
    pub async fn migrate(&self) -> AppResult<bool> {
        match &self.pool {
            Some(pool) => {
                run_migrations(pool.pool()).await?;
                Ok(true)
            }
            None => {
                info!("Row store has no schema to migrate");
                Ok(false)
            }
        }
    }

    /// Close the underlying pool, if any.
    pub async fn close(&self) {
        if let Some(pool) = &self.pool {
            pool.close().await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_backend_needs_no_migration() {
        let config = DatabaseConfig {
            provider: DatabaseProvider::Memory,
            ..DatabaseConfig::default()
        };
        let stores = RowStores::from_config(&config).await.unwrap();

        assert!(stores.pool().is_none());
        assert_eq!(stores.collections.provider_type(), "memory");
        assert!(!stores.migrate().await.unwrap());
    }

    #[tokio::test]
    async fn test_postgres_without_url_is_configuration_error() {
        let config = DatabaseConfig::default();
        let err = RowStores::from_config(&config).await.unwrap_err();
        assert_eq!(err.kind, schoolsite_core::error::ErrorKind::Configuration);
    }
}
