//! Core traits defined in `schoolsite-core` and implemented by other crates.

pub mod object_store;

pub use object_store::{ObjectEntry, ObjectStore};
