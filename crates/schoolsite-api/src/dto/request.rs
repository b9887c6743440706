//! Request DTOs.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;
use schoolsite_entity::asset::NewAsset;

/// An image or PDF embedded in a JSON body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssetPayload {
    /// Original file name.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// File contents, standard base64.
    pub data_base64: String,
}

impl AssetPayload {
    /// Decode into an asset ready for upload.
    pub fn decode(self) -> AppResult<NewAsset> {
        let data = STANDARD
            .decode(self.data_base64.trim())
            .map_err(|e| AppError::validation(format!("Asset data is not valid base64: {e}")))?;
        Ok(NewAsset::new(
            self.file_name,
            self.content_type,
            Bytes::from(data),
        ))
    }
}

fn decode_optional(asset: Option<AssetPayload>) -> AppResult<Option<NewAsset>> {
    asset.map(AssetPayload::decode).transpose()
}

/// Create or update an ordered item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemRequest {
    /// Item attributes, normalized by the collection's shape.
    pub fields: Value,
    /// Replacement asset.
    #[serde(default)]
    pub asset: Option<AssetPayload>,
}

impl ItemRequest {
    /// Split into fields and the decoded asset.
    pub fn into_parts(self) -> AppResult<(Value, Option<NewAsset>)> {
        Ok((self.fields, decode_optional(self.asset)?))
    }
}

/// Replace a section document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SectionRequest {
    /// Whole new payload.
    pub payload: Value,
    /// Replacement asset. Without one the current asset is kept.
    #[serde(default)]
    pub asset: Option<AssetPayload>,
}

impl SectionRequest {
    /// Split into payload and the decoded asset.
    pub fn into_parts(self) -> AppResult<(Value, Option<NewAsset>)> {
        Ok((self.payload, decode_optional(self.asset)?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use schoolsite_core::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn test_asset_payload_decodes() {
        let payload = AssetPayload {
            file_name: "foto.png".to_string(),
            content_type: "image/png".to_string(),
            data_base64: STANDARD.encode(b"\x89PNG"),
        };
        let asset = payload.decode().unwrap();
        assert_eq!(asset.data.as_ref(), b"\x89PNG");
        assert_eq!(asset.file_name, "foto.png");
    }

    #[test]
    fn test_bad_base64_is_validation_error() {
        let request: ItemRequest = serde_json::from_value(json!({
            "fields": { "name": "Ana" },
            "asset": { "file_name": "a.png", "content_type": "image/png", "data_base64": "%%%" }
        }))
        .unwrap();
        let err = request.into_parts().unwrap_err();
        assert_eq!(err.kind, ErrorKind::Validation);
    }

    #[test]
    fn test_asset_is_optional() {
        let request: SectionRequest =
            serde_json::from_value(json!({ "payload": { "body": "x" } })).unwrap();
        let (payload, asset) = request.into_parts().unwrap();
        assert_eq!(payload["body"], "x");
        assert!(asset.is_none());
    }
}
