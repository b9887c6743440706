//! Storage manager: routes object operations to a bucket's provider.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use schoolsite_core::config::{StorageConfig, StorageProviderKind};
use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;
use schoolsite_core::traits::object_store::ObjectStore;

use crate::providers::{LocalObjectStore, MemoryObjectStore};

/// Holds one object store per bucket name.
#[derive(Debug, Clone, Default)]
pub struct StorageManager {
    buckets: Arc<RwLock<HashMap<String, Arc<dyn ObjectStore>>>>,
}

impl StorageManager {
    /// Create a manager with no buckets.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register every configured bucket with the configured provider.
    pub async fn from_config(config: &StorageConfig) -> AppResult<Self> {
        let manager = Self::new();
        for bucket in &config.buckets {
            let store: Arc<dyn ObjectStore> = match config.provider {
                StorageProviderKind::Local => Arc::new(
                    LocalObjectStore::new(
                        &config.local.root_path,
                        bucket,
                        &config.public_url_prefix,
                    )
                    .await?,
                ),
                StorageProviderKind::Memory => {
                    Arc::new(MemoryObjectStore::new(bucket, &config.public_url_prefix))
                }
            };
            info!(bucket = %bucket, provider = store.provider_type(), "Registered bucket");
            manager.register(bucket, store).await;
        }
        Ok(manager)
    }

    /// Register (or replace) the provider of a bucket.
    pub async fn register(&self, bucket: &str, store: Arc<dyn ObjectStore>) {
        let mut buckets = self.buckets.write().await;
        buckets.insert(bucket.to_string(), store);
    }

    /// Provider of a bucket. An unknown bucket is a configuration error.
    pub async fn get(&self, bucket: &str) -> AppResult<Arc<dyn ObjectStore>> {
        let buckets = self.buckets.read().await;
        buckets.get(bucket).cloned().ok_or_else(|| {
            AppError::configuration(format!("Bucket '{bucket}' is not configured"))
        })
    }

    /// Names of all registered buckets, sorted.
    pub async fn bucket_names(&self) -> Vec<String> {
        let buckets = self.buckets.read().await;
        let mut names: Vec<String> = buckets.keys().cloned().collect();
        names.sort();
        names
    }

    /// Fail unless every name in `required` is registered.
    pub async fn ensure_buckets(&self, required: &[String]) -> AppResult<()> {
        let buckets = self.buckets.read().await;
        let missing: Vec<&str> = required
            .iter()
            .filter(|name| !buckets.contains_key(name.as_str()))
            .map(String::as_str)
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(AppError::configuration(format!(
                "Buckets not configured: {}",
                missing.join(", ")
            )))
        }
    }

    /// Check health of all registered buckets.
    pub async fn health_check_all(&self) -> HashMap<String, bool> {
        let buckets = self.buckets.read().await;
        let mut results = HashMap::new();
        for (name, store) in buckets.iter() {
            let healthy = store.health_check().await.unwrap_or(false);
            results.insert(name.clone(), healthy);
        }
        results
    }
}
