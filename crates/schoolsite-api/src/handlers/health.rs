//! Health check handler.

use std::collections::BTreeMap;

use axum::Json;
use axum::extract::State;

use crate::dto::response::{ApiResponse, BackendStatus, HealthResponse};
use crate::state::AppState;

/// GET /api/health
pub async fn health(State(state): State<AppState>) -> Json<ApiResponse<HealthResponse>> {
    let row_store = BackendStatus {
        provider: state.collection_store.provider_type().to_string(),
        healthy: state.collection_store.health_check().await.unwrap_or(false),
    };
    let buckets: BTreeMap<String, bool> =
        state.storage.health_check_all().await.into_iter().collect();

    let healthy = row_store.healthy && buckets.values().all(|ok| *ok);
    Json(ApiResponse::ok(HealthResponse {
        status: if healthy { "ok" } else { "degraded" }.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        row_store,
        buckets,
    }))
}
