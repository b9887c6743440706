//! Single-document sections.

pub mod service;

pub use service::{SectionService, SectionView};
