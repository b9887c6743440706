//! # schoolsite-api
//!
//! HTTP API layer built on Axum.
//!
//! Public routes serve the ordered collections, section documents and
//! locally stored assets to the site's pages. Admin routes mutate them and
//! sit behind the configured [`schoolsite_auth::Authenticator`].

pub mod app;
pub mod dto;
pub mod error;
pub mod extractors;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod state;

pub use app::build_app;
pub use error::ApiError;
pub use state::AppState;
