//! Ordered collections.

pub mod ordering;
pub mod service;

pub use ordering::Direction;
pub use service::{CollectionService, ItemView};
