//! Single-document section entities.

pub mod model;
pub mod spec;

pub use model::{SingleDocument, UpsertDocument};
pub use spec::SectionSpec;
