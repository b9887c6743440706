//! In-memory object store.

use std::sync::Arc;

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Utc};
use dashmap::DashMap;

use schoolsite_core::result::AppResult;
use schoolsite_core::traits::object_store::{ObjectEntry, ObjectStore, validate_key};

#[derive(Debug, Clone)]
struct StoredObject {
    data: Bytes,
    content_type: String,
    stored_at: DateTime<Utc>,
}

/// Bucket held in process memory. Contents are lost on restart.
#[derive(Debug, Clone)]
pub struct MemoryObjectStore {
    bucket: String,
    url_prefix: String,
    objects: Arc<DashMap<String, StoredObject>>,
}

impl MemoryObjectStore {
    /// Create an empty bucket.
    pub fn new(bucket: &str, url_prefix: &str) -> Self {
        Self {
            bucket: bucket.to_string(),
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            objects: Arc::new(DashMap::new()),
        }
    }

    /// Bytes stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Bytes> {
        self.objects.get(key).map(|o| o.data.clone())
    }

    /// Number of stored objects.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the bucket is empty.
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

#[async_trait]
impl ObjectStore for MemoryObjectStore {
    fn provider_type(&self) -> &str {
        "memory"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(true)
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String> {
        validate_key(key)?;
        self.objects.insert(
            key.to_string(),
            StoredObject {
                data,
                content_type: content_type.to_string(),
                stored_at: Utc::now(),
            },
        );
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.url_prefix, self.bucket, key)
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        for key in keys {
            self.objects.remove(key);
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectEntry>> {
        let mut entries: Vec<ObjectEntry> = self
            .objects
            .iter()
            .filter(|entry| entry.key().starts_with(prefix))
            .map(|entry| ObjectEntry {
                key: entry.key().clone(),
                size_bytes: entry.data.len() as u64,
                content_type: Some(entry.content_type.clone()),
                last_modified: Some(entry.stored_at),
            })
            .collect();
        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        Ok(self.objects.contains_key(key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = MemoryObjectStore::new("documents", "/assets");
        store
            .upload("project/plan.pdf", Bytes::from("v1"), "application/pdf")
            .await
            .unwrap();
        store
            .upload("project/plan.pdf", Bytes::from("v2"), "application/pdf")
            .await
            .unwrap();

        assert_eq!(store.len(), 1);
        assert_eq!(store.get("project/plan.pdf").unwrap(), Bytes::from("v2"));
        assert_eq!(
            store.public_url("project/plan.pdf"),
            "/assets/documents/project/plan.pdf"
        );
    }

    #[tokio::test]
    async fn test_list_and_remove() {
        let store = MemoryObjectStore::new("images", "/assets");
        for key in ["b/2.png", "a/1.png", "a/0.png"] {
            store.upload(key, Bytes::from("x"), "image/png").await.unwrap();
        }

        let keys: Vec<String> = store
            .list("a/")
            .await
            .unwrap()
            .into_iter()
            .map(|e| e.key)
            .collect();
        assert_eq!(keys, vec!["a/0.png", "a/1.png"]);

        store
            .remove(&["a/0.png".to_string(), "missing".to_string()])
            .await
            .unwrap();
        assert!(!store.exists("a/0.png").await.unwrap());
        assert_eq!(store.len(), 2);
    }
}
