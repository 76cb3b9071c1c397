//! API endpoint handlers

use super::extractors::JsonExtractor;
use super::types::*;
use crate::error::ServerError;
use axum::{
    extract::{Path, State},
    Json,
};
use listkeeper_store::StoreError;
use tracing::{debug, error, info};

/// Health check endpoint
pub(super) async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        store: state.store.backend_name().to_string(),
    })
}

/// Read a list
pub(super) async fn get_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
) -> Result<Json<GetListResponse>, ServerError> {
    let snapshot = state
        .store
        .get(&list_id)
        .await
        .map_err(|e| log_store_error(&list_id, e))?;

    debug!(list_id = %list_id, version = snapshot.version, "served list");

    Ok(Json(GetListResponse {
        list: snapshot.items,
        version: snapshot.version,
    }))
}

/// Replace a list if the client's version is current
pub(super) async fn post_list(
    State(state): State<AppState>,
    Path(list_id): Path<String>,
    JsonExtractor(payload): JsonExtractor<PostListRequest>,
) -> Result<Json<PostListResponse>, ServerError> {
    let snapshot = state
        .store
        .put(&list_id, payload.list, payload.version)
        .await
        .map_err(|e| log_store_error(&list_id, e))?;

    info!(
        list_id = %list_id,
        new_version = snapshot.version,
        items = snapshot.items.len(),
        "list updated"
    );

    Ok(Json(PostListResponse {
        new_version: snapshot.version,
        list: snapshot.items,
    }))
}

/// Not-found and conflicts are normal answers; only backend failures are errors
fn log_store_error(list_id: &str, err: StoreError) -> ServerError {
    match &err {
        StoreError::NotFound { .. } => debug!(list_id, "list not found"),
        StoreError::VersionConflict { expected, .. } => {
            debug!(list_id, expected, "rejected stale write")
        }
        _ => error!(list_id, "store failure: {}", err),
    }
    err.into()
}
