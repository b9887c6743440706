//! # schoolsite-core
//!
//! Core crate for the school site backend. Contains the object storage
//! contract, configuration schemas, and the unified error system.
//!
//! This crate has **no** internal dependencies on other schoolsite crates.

pub mod config;
pub mod error;
pub mod result;
pub mod traits;

pub use error::AppError;
pub use result::AppResult;
