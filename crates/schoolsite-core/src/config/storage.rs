//! Object store configuration.

use serde::{Deserialize, Serialize};

/// Which object store holds images and PDFs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageProviderKind {
    /// Files on the local filesystem, served by the API under `public_url_prefix`.
    #[default]
    Local,
    /// Process-local maps. Data is lost on restart.
    Memory,
}

/// Top-level storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Object store backend.
    #[serde(default)]
    pub provider: StorageProviderKind,
    /// URL prefix under which stored objects are publicly reachable.
    #[serde(default = "default_public_prefix")]
    pub public_url_prefix: String,
    /// Maximum accepted asset size in bytes (default 8 MB).
    #[serde(default = "default_max_asset")]
    pub max_asset_bytes: u64,
    /// Bucket names to register.
    #[serde(default = "default_buckets")]
    pub buckets: Vec<String>,
    /// Local filesystem storage configuration.
    #[serde(default)]
    pub local: LocalStorageConfig,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            provider: StorageProviderKind::default(),
            public_url_prefix: default_public_prefix(),
            max_asset_bytes: default_max_asset(),
            buckets: default_buckets(),
            local: LocalStorageConfig::default(),
        }
    }
}

/// Local filesystem storage configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocalStorageConfig {
    /// Root path for local object storage. Each bucket is a sub-directory.
    #[serde(default = "default_local_root")]
    pub root_path: String,
}

impl Default for LocalStorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_local_root(),
        }
    }
}

fn default_public_prefix() -> String {
    "/assets".to_string()
}

fn default_max_asset() -> u64 {
    8 * 1024 * 1024
}

fn default_buckets() -> Vec<String> {
    vec!["images".to_string(), "documents".to_string()]
}

fn default_local_root() -> String {
    "./data/assets".to_string()
}
