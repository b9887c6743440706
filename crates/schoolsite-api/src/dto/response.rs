//! Response DTOs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use schoolsite_entity::collection::CollectionSpec;
use schoolsite_entity::document::SectionSpec;

/// Standard success response wrapper.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiResponse<T: Serialize> {
    /// Whether the request was successful.
    pub success: bool,
    /// Response data.
    pub data: T,
}

impl<T: Serialize> ApiResponse<T> {
    /// Creates a successful response.
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data,
        }
    }
}

/// Simple message response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageResponse {
    /// Message.
    pub message: String,
}

impl MessageResponse {
    /// Creates a message response.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Liveness and backend status.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// `"ok"` when every backend answered, `"degraded"` otherwise.
    pub status: String,
    /// Server version.
    pub version: String,
    /// Row store provider and whether it answered.
    pub row_store: BackendStatus,
    /// Per-bucket object store health.
    pub buckets: BTreeMap<String, bool>,
}

/// Health of one backend.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendStatus {
    /// Provider name.
    pub provider: String,
    /// Whether the last probe succeeded.
    pub healthy: bool,
}

/// Everything the site manages.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogResponse {
    /// Ordered collections.
    pub collections: Vec<CollectionSpec>,
    /// Single-document sections.
    pub sections: Vec<SectionSpec>,
}
