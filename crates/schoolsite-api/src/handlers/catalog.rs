//! Catalog handler.

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, CatalogResponse};
use crate::state::AppState;

/// GET /api/catalog
pub async fn catalog(State(state): State<AppState>) -> Json<ApiResponse<CatalogResponse>> {
    Json(ApiResponse::ok(CatalogResponse {
        collections: state.catalog.collections().to_vec(),
        sections: state.catalog.sections().to_vec(),
    }))
}
