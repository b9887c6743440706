//! # schoolsite-service
//!
//! Business logic for the site's content. [`CollectionService`] manages
//! parent-scoped ordered lists, [`SectionService`] the one current
//! document of each section, and both delegate image and PDF handling to
//! [`AssetService`].
//!
//! Services follow constructor injection: stores, storage and the shared
//! [`ActionGuard`] are provided at construction time via `Arc` references.

pub mod asset;
pub mod collection;
pub mod context;
pub mod document;
pub mod guard;

pub use asset::{AssetService, AssetSlot};
pub use collection::{CollectionService, Direction, ItemView};
pub use context::RequestContext;
pub use document::{SectionService, SectionView};
pub use guard::ActionGuard;
