//! Ordered collection handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use uuid::Uuid;

use schoolsite_service::ItemView;

use crate::dto::request::ItemRequest;
use crate::dto::response::{ApiResponse, MessageResponse};
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::state::AppState;

type ItemsResponse = Json<ApiResponse<Vec<ItemView>>>;

/// GET /api/collections/{collection}/{parent_id}
pub async fn list_items(
    State(state): State<AppState>,
    Path((collection, parent_id)): Path<(String, String)>,
) -> Result<ItemsResponse, ApiError> {
    let items = state.collections.list(&collection, &parent_id).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/admin/collections/{collection}/{parent_id}
pub async fn create_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((collection, parent_id)): Path<(String, String)>,
    Json(req): Json<ItemRequest>,
) -> Result<(StatusCode, Json<ApiResponse<ItemView>>), ApiError> {
    let (fields, asset) = req.into_parts()?;
    let item = state
        .collections
        .add(&admin, &collection, &parent_id, &fields, asset)
        .await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(item))))
}

/// PUT /api/admin/collections/{collection}/items/{id}
pub async fn update_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((collection, id)): Path<(String, Uuid)>,
    Json(req): Json<ItemRequest>,
) -> Result<Json<ApiResponse<ItemView>>, ApiError> {
    let (fields, asset) = req.into_parts()?;
    let item = state
        .collections
        .update(&admin, &collection, id, &fields, asset)
        .await?;
    Ok(Json(ApiResponse::ok(item)))
}

/// DELETE /api/admin/collections/{collection}/items/{id}
pub async fn delete_item(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((collection, id)): Path<(String, Uuid)>,
) -> Result<Json<ApiResponse<MessageResponse>>, ApiError> {
    state.collections.remove(&admin, &collection, id).await?;
    Ok(Json(ApiResponse::ok(MessageResponse::new("Item removed"))))
}

/// POST /api/admin/collections/{collection}/items/{id}/move-up
pub async fn move_item_up(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((collection, id)): Path<(String, Uuid)>,
) -> Result<ItemsResponse, ApiError> {
    let items = state.collections.move_up(&admin, &collection, id).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/admin/collections/{collection}/items/{id}/move-down
pub async fn move_item_down(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((collection, id)): Path<(String, Uuid)>,
) -> Result<ItemsResponse, ApiError> {
    let items = state.collections.move_down(&admin, &collection, id).await?;
    Ok(Json(ApiResponse::ok(items)))
}

/// POST /api/admin/collections/{collection}/{parent_id}/renumber
pub async fn renumber_items(
    State(state): State<AppState>,
    admin: AdminUser,
    Path((collection, parent_id)): Path<(String, String)>,
) -> Result<ItemsResponse, ApiError> {
    let items = state
        .collections
        .renumber(&admin, &collection, &parent_id)
        .await?;
    Ok(Json(ApiResponse::ok(items)))
}
