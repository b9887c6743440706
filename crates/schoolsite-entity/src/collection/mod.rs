//! Ordered collection entities.

pub mod model;
pub mod spec;

pub use model::{CreateOrderedItem, OrderedItem, UpdateOrderedItem};
pub use spec::CollectionSpec;
