//! Uploaded asset model.

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use schoolsite_core::error::AppError;
use schoolsite_core::result::AppResult;

/// Category of a binary asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    /// A raster or vector image.
    Image,
    /// A PDF document.
    Pdf,
}

impl AssetKind {
    /// Classify a MIME type.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if essence == "application/pdf" {
            Some(Self::Pdf)
        } else if essence.starts_with("image/") {
            Some(Self::Image)
        } else {
            None
        }
    }
}

impl std::fmt::Display for AssetKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Image => write!(f, "image"),
            Self::Pdf => write!(f, "pdf"),
        }
    }
}

/// An image or PDF submitted for storage, not yet uploaded.
#[derive(Debug, Clone)]
pub struct NewAsset {
    /// Original file name, used to derive the storage key suffix.
    pub file_name: String,
    /// MIME type.
    pub content_type: String,
    /// Raw bytes.
    pub data: Bytes,
}

impl NewAsset {
    /// Create a new asset.
    pub fn new(file_name: impl Into<String>, content_type: impl Into<String>, data: Bytes) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            data,
        }
    }

    /// The asset's kind, if it is an image or a PDF.
    pub fn kind(&self) -> Option<AssetKind> {
        AssetKind::from_content_type(&self.content_type)
    }

    /// Check the asset against the accepted kinds and a size limit.
    pub fn validate(&self, accepted: &[AssetKind], max_bytes: u64) -> AppResult<AssetKind> {
        if self.data.is_empty() {
            return Err(AppError::validation("Uploaded file is empty"));
        }
        if self.data.len() as u64 > max_bytes {
            return Err(AppError::validation(format!(
                "Uploaded file exceeds the {max_bytes} byte limit"
            )));
        }
        let kind = self.kind().ok_or_else(|| {
            AppError::validation(format!(
                "Unsupported file type '{}': only images and PDFs are accepted",
                self.content_type
            ))
        })?;
        if !accepted.contains(&kind) {
            return Err(AppError::validation(format!(
                "A {kind} file is not accepted here"
            )));
        }
        Ok(kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_content_type() {
        assert_eq!(
            AssetKind::from_content_type("image/png"),
            Some(AssetKind::Image)
        );
        assert_eq!(
            AssetKind::from_content_type("Application/PDF; charset=binary"),
            Some(AssetKind::Pdf)
        );
        assert_eq!(AssetKind::from_content_type("text/html"), None);
    }

    #[test]
    fn test_validate_rejects_wrong_kind_and_size() {
        let pdf = NewAsset::new("plan.pdf", "application/pdf", Bytes::from_static(b"%PDF-1.7"));
        assert_eq!(pdf.validate(&[AssetKind::Pdf], 1024).unwrap(), AssetKind::Pdf);
        assert!(pdf.validate(&[AssetKind::Image], 1024).is_err());
        assert!(pdf.validate(&[AssetKind::Pdf], 4).is_err());

        let empty = NewAsset::new("x.png", "image/png", Bytes::new());
        assert!(empty.validate(&[AssetKind::Image], 1024).is_err());
    }
}
