//! # schoolsite-database
//!
//! The relational row store behind ordered collections and section
//! documents: the [`CollectionStore`] and [`DocumentStore`] contracts, their
//! PostgreSQL implementations, and in-memory implementations for development
//! and tests.

pub mod backend;
pub mod connection;
pub mod memory;
pub mod migration;
pub mod repositories;
pub mod store;

pub use backend::RowStores;
pub use connection::DatabasePool;
pub use memory::{MemoryCollectionStore, MemoryDocumentStore};
pub use repositories::{PgCollectionStore, PgDocumentStore};
pub use store::{CollectionStore, DocumentStore, OrderAssignment};
