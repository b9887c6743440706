//! # schoolsite-storage
//!
//! Object store providers for the site's images and PDFs, asset key
//! generation, and the [`StorageManager`] that routes each bucket to its
//! provider.

pub mod keys;
pub mod manager;
pub mod providers;

pub use keys::asset_key;
pub use manager::StorageManager;
pub use providers::{LocalObjectStore, MemoryObjectStore};
