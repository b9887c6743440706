//! PostgreSQL implementations of the row store contracts.

pub mod collection;
pub mod document;

pub use collection::PgCollectionStore;
pub use document::PgDocumentStore;
