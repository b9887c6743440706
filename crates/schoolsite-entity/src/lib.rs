//! # schoolsite-entity
//!
//! Domain entity models for the school site. Every struct in this crate
//! represents a database row or a domain value object. Row entities
//! additionally derive `sqlx::FromRow`.
//!
//! Entity-specific attributes are kept as JSON and described by a
//! [`Shape`](shape::Shape); the [`Catalog`](catalog::Catalog) lists the
//! shapes of every ordered collection and single-document section the site
//! knows about.

pub mod asset;
pub mod catalog;
pub mod collection;
pub mod document;
pub mod shape;

pub use asset::{AssetKind, NewAsset};
pub use catalog::Catalog;
pub use collection::{CollectionSpec, CreateOrderedItem, OrderedItem, UpdateOrderedItem};
pub use document::{SectionSpec, SingleDocument, UpsertDocument};
pub use shape::{FieldKind, FieldSpec, Shape};
