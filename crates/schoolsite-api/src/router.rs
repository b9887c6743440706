//! Route definitions for the school site HTTP API.
//!
//! Public reads and admin mutations are mounted under `/api`; locally stored
//! assets are served under the configured public URL prefix.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{delete, get, post, put},
};
use tower_http::services::ServeDir;

use schoolsite_core::config::StorageProviderKind;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router with all routes.
///
/// Receives the fully-constructed `AppState` and threads it through
/// every route via `.with_state(state)`.
pub fn build_router(state: AppState) -> Router {
    let max_body = state.config.server.max_body_bytes;

    let api_routes = Router::new()
        .merge(public_routes())
        .merge(admin_collection_routes())
        .merge(admin_section_routes());

    let router = Router::new()
        .nest("/api", api_routes)
        .layer(DefaultBodyLimit::max(max_body));

    with_asset_files(router, &state).with_state(state)
}

/// Read-only endpoints used by the site's pages.
fn public_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health::health))
        .route("/catalog", get(handlers::catalog::catalog))
        .route(
            "/collections/{collection}/{parent_id}",
            get(handlers::collection::list_items),
        )
        .route("/sections/{key}", get(handlers::section::get_section))
}

/// Ordered collection mutations
fn admin_collection_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/admin/collections/{collection}/{parent_id}",
            post(handlers::collection::create_item),
        )
        .route(
            "/admin/collections/{collection}/{parent_id}/renumber",
            post(handlers::collection::renumber_items),
        )
        .route(
            "/admin/collections/{collection}/items/{id}",
            put(handlers::collection::update_item).delete(handlers::collection::delete_item),
        )
        .route(
            "/admin/collections/{collection}/items/{id}/move-up",
            post(handlers::collection::move_item_up),
        )
        .route(
            "/admin/collections/{collection}/items/{id}/move-down",
            post(handlers::collection::move_item_down),
        )
}

/// Section document mutations
fn admin_section_routes() -> Router<AppState> {
    Router::new()
        .route("/admin/sections/{key}", put(handlers::section::save_section))
        .route(
            "/admin/sections/{key}/asset",
            delete(handlers::section::remove_section_asset),
        )
}

/// Serve the local object store's files under the public URL prefix.
///
/// Other providers publish their own URLs and nothing is mounted.
fn with_asset_files(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    let storage = &state.config.storage;
    let prefix = storage.public_url_prefix.trim_end_matches('/');

    if storage.provider != StorageProviderKind::Local
        || !prefix.starts_with('/')
        || prefix.len() < 2
    {
        return router;
    }

    tracing::info!(
        prefix,
        root = %storage.local.root_path,
        "Serving local assets"
    );
    router.nest_service(prefix, ServeDir::new(&storage.local.root_path))
}
