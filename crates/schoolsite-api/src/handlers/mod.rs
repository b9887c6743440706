//! Route handlers organized by domain.

pub mod catalog;
pub mod collection;
pub mod health;
pub mod section;
