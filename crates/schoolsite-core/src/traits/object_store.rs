//! Binary object store contract for images and PDFs.

use async_trait::async_trait;
use bytes::Bytes;

use crate::error::AppError;
use crate::result::AppResult;

/// Metadata about a stored object.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct ObjectEntry {
    /// Key within the bucket.
    pub key: String,
    /// Size in bytes.
    pub size_bytes: u64,
    /// MIME type (if known).
    pub content_type: Option<String>,
    /// Last modified timestamp.
    pub last_modified: Option<chrono::DateTime<chrono::Utc>>,
}

/// Trait for object storage backends.
///
/// Keys are opaque `/`-separated strings chosen by the caller. The store
/// does not enforce uniqueness: writing an existing key replaces it.
#[async_trait]
pub trait ObjectStore: Send + Sync + std::fmt::Debug + 'static {
    /// Return the provider type name (e.g., "local", "memory").
    fn provider_type(&self) -> &str;

    /// Check whether the provider is healthy and reachable.
    async fn health_check(&self) -> AppResult<bool>;

    /// Store `data` under `key` and return the key.
    async fn upload(&self, key: &str, data: Bytes, content_type: &str) -> AppResult<String>;

    /// Public URL at which the object under `key` can be fetched.
    fn public_url(&self, key: &str) -> String;

    /// Remove the given keys. Keys that do not exist are ignored.
    async fn remove(&self, keys: &[String]) -> AppResult<()>;

    /// List objects whose key starts with `prefix`, sorted by key.
    async fn list(&self, prefix: &str) -> AppResult<Vec<ObjectEntry>>;

    /// Check whether an object exists under `key`.
    async fn exists(&self, key: &str) -> AppResult<bool>;
}

/// Reject keys that could escape the bucket.
pub fn validate_key(key: &str) -> AppResult<()> {
    if key.is_empty() {
        return Err(AppError::validation("Object key cannot be empty"));
    }
    if key.starts_with('/') || key.contains('\\') {
        return Err(AppError::validation(format!(
            "Object key must be a relative path: {key}"
        )));
    }
    if key.split('/').any(|segment| segment.is_empty() || segment == "." || segment == "..") {
        return Err(AppError::validation(format!("Invalid object key: {key}")));
    }
    Ok(())
}

/// Guess a MIME type from a key's extension.
pub fn mime_from_key(key: &str) -> Option<&'static str> {
    let ext = key.rsplit_once('.')?.1.to_lowercase();
    let mime = match ext.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "svg" => "image/svg+xml",
        "webp" => "image/webp",
        "avif" => "image/avif",
        _ => return None,
    };
    Some(mime)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("council/0190-ana.jpg").is_ok());
        assert!(validate_key("").is_err());
        assert!(validate_key("/etc/passwd").is_err());
        assert!(validate_key("a/../b").is_err());
        assert!(validate_key("a//b").is_err());
    }

    #[test]
    fn test_mime_detection() {
        assert_eq!(mime_from_key("plan.PDF"), Some("application/pdf"));
        assert_eq!(mime_from_key("a/b/photo.jpeg"), Some("image/jpeg"));
        assert_eq!(mime_from_key("noext"), None);
    }
}
