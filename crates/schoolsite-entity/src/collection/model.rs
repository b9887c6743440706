//! Ordered item entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One member of an ordered collection (a council member, a carousel photo,
/// an admission step).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct OrderedItem {
    /// Unique item identifier, assigned at creation.
    pub id: Uuid,
    /// Collection name (e.g. `council_members`).
    pub collection: String,
    /// Identifier of the owning parent (e.g. a board or block id).
    pub parent_id: String,
    /// Display position within the parent. Gaps are allowed.
    pub order_index: i64,
    /// Entity-specific attributes, normalized by the collection's shape.
    pub fields: serde_json::Value,
    /// Key of the owned image or PDF in the collection's bucket.
    pub asset_key: Option<String>,
    /// When the item was created.
    pub created_at: DateTime<Utc>,
    /// When the item was last updated.
    pub updated_at: DateTime<Utc>,
}

impl OrderedItem {
    /// Read a text field, if present.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(|v| v.as_str())
    }
}

/// Data required to create a new ordered item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrderedItem {
    /// Collection name.
    pub collection: String,
    /// Owning parent.
    pub parent_id: String,
    /// Initial position.
    pub order_index: i64,
    /// Normalized attributes.
    pub fields: serde_json::Value,
    /// Owned asset key, if any.
    pub asset_key: Option<String>,
}

/// Replacement attributes for an existing item. Order and parent are untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateOrderedItem {
    /// Normalized attributes, replacing the previous ones wholesale.
    pub fields: serde_json::Value,
    /// Owned asset key after the update.
    pub asset_key: Option<String>,
}
