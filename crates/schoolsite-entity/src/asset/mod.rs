//! Binary asset value objects.

pub mod model;

pub use model::{AssetKind, NewAsset};
