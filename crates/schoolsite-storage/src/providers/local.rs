//! Local filesystem object store.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use bytes::Bytes;
use tokio::fs;
use tracing::debug;

use schoolsite_core::error::{AppError, ErrorKind};
use schoolsite_core::result::AppResult;
use schoolsite_core::traits::object_store::{ObjectEntry, ObjectStore, mime_from_key, validate_key};

/// One bucket stored as a directory under the storage root.
#[derive(Debug, Clone)]
pub struct LocalObjectStore {
    /// Bucket name, used in public URLs.
    bucket: String,
    /// Directory holding the bucket's objects (`<root>/<bucket>`).
    root: PathBuf,
    /// URL prefix the API serves the storage root under.
    url_prefix: String,
}

impl LocalObjectStore {
    /// Create a bucket directory under `root_path`, creating it if needed.
    pub async fn new(root_path: &str, bucket: &str, url_prefix: &str) -> AppResult<Self> {
        validate_key(bucket)?;
        let root = PathBuf::from(root_path).join(bucket);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Failed to create bucket directory: {}", root.display()),
                e,
            )
        })?;
        Ok(Self {
            bucket: bucket.to_string(),
            root,
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
        })
    }

    /// Resolve a validated key to a path inside the bucket.
    fn resolve(&self, key: &str) -> AppResult<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(key))
    }

    async fn ensure_parent(&self, path: &Path) -> AppResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    format!("Failed to create parent directory: {}", parent.display()),
                    e,
                )
            })?;
        }
        Ok(())
    }
}

#[async_trait]
impl ObjectStore for LocalObjectStore {
    fn provider_type(&self) -> &str {
        "local"
    }

    async fn health_check(&self) -> AppResult<bool> {
        Ok(self.root.is_dir())
    }

    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String> {
        let full_path = self.resolve(key)?;
        self.ensure_parent(&full_path).await?;

        fs::write(&full_path, &data).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::StoreUnavailable,
                format!("Failed to write object: {key}"),
                e,
            )
        })?;

        debug!(bucket = %self.bucket, key, content_type, bytes = data.len(), "Stored object");
        Ok(key.to_string())
    }

    fn public_url(&self, key: &str) -> String {
        format!("{}/{}/{}", self.url_prefix, self.bucket, key)
    }

    async fn remove(&self, keys: &[String]) -> AppResult<()> {
        for key in keys {
            let full_path = self.resolve(key)?;
            match fs::remove_file(&full_path).await {
                Ok(()) => debug!(bucket = %self.bucket, key = %key, "Removed object"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(AppError::with_source(
                        ErrorKind::StoreUnavailable,
                        format!("Failed to remove object: {key}"),
                        e,
                    ));
                }
            }
        }
        Ok(())
    }

    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectEntry>> {
        let mut entries = Vec::new();
        let mut pending = vec![self.root.clone()];

        while let Some(dir_path) = pending.pop() {
            let mut dir = fs::read_dir(&dir_path).await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    format!("Failed to list directory: {}", dir_path.display()),
                    e,
                )
            })?;

            while let Some(entry) = dir.next_entry().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::StoreUnavailable,
                    "Failed to read directory entry",
                    e,
                )
            })? {
                let meta = entry.metadata().await.map_err(|e| {
                    AppError::with_source(
                        ErrorKind::StoreUnavailable,
                        "Failed to get entry metadata",
                        e,
                    )
                })?;

                if meta.is_dir() {
                    pending.push(entry.path());
                    continue;
                }

                let Ok(relative) = entry.path().strip_prefix(&self.root).map(Path::to_path_buf)
                else {
                    continue;
                };
                let key = relative
                    .components()
                    .map(|c| c.as_os_str().to_string_lossy())
                    .collect::<Vec<_>>()
                    .join("/");
                if !key.starts_with(prefix) {
                    continue;
                }

                entries.push(ObjectEntry {
                    content_type: mime_from_key(&key).map(str::to_string),
                    size_bytes: meta.len(),
                    last_modified: meta.modified().ok().map(chrono::DateTime::<chrono::Utc>::from),
                    key,
                });
            }
        }

        entries.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(entries)
    }

    async fn exists(&self, key: &str) -> AppResult<bool> {
        let full_path = self.resolve(key)?;
        Ok(fs::try_exists(&full_path).await.unwrap_or(false))
    }
}
