//! Asset upload, replacement and release.

pub mod service;

pub use service::{AssetService, AssetSlot};
