//! Section document handlers.

use axum::Json;
use axum::extract::{Path, State};

use schoolsite_core::error::AppError;
use schoolsite_service::SectionView;

use crate::dto::request::SectionRequest;
use crate::dto::response::ApiResponse;
use crate::error::ApiError;
use crate::extractors::AdminUser;
use crate::state::AppState;

/// GET /api/sections/{key}
pub async fn get_section(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<SectionView>>, ApiError> {
    let view = state.sections.get(&key).await?.ok_or_else(|| {
        AppError::not_found(format!("Section '{key}' has not been configured yet"))
    })?;
    Ok(Json(ApiResponse::ok(view)))
}

/// PUT /api/admin/sections/{key}
pub async fn save_section(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(key): Path<String>,
    Json(req): Json<SectionRequest>,
) -> Result<Json<ApiResponse<SectionView>>, ApiError> {
    let (payload, asset) = req.into_parts()?;
    let view = state.sections.save(&admin, &key, &payload, asset).await?;
    Ok(Json(ApiResponse::ok(view)))
}

/// DELETE /api/admin/sections/{key}/asset
///
/// `data` is `null` when the section was never saved.
pub async fn remove_section_asset(
    State(state): State<AppState>,
    admin: AdminUser,
    Path(key): Path<String>,
) -> Result<Json<ApiResponse<Option<SectionView>>>, ApiError> {
    let view = state.sections.remove_asset(&admin, &key).await?;
    Ok(Json(ApiResponse::ok(view)))
}
