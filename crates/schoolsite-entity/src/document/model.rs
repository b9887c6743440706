//! Section document entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// The one current value of a named section (mission text, tuition table,
/// educational project PDF).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct SingleDocument {
    /// Fixed identifier of the section.
    pub section_key: String,
    /// Structured content, normalized by the section's shape.
    pub payload: serde_json::Value,
    /// Key of the associated image or PDF, if any.
    pub asset_key: Option<String>,
    /// When the document was last written.
    pub updated_at: DateTime<Utc>,
}

/// Insert-or-replace data for a section document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpsertDocument {
    /// Section key.
    pub section_key: String,
    /// Payload replacing the previous one wholesale.
    pub payload: serde_json::Value,
    /// Asset key after the write.
    pub asset_key: Option<String>,
}
