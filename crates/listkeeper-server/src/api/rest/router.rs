//! Router creation and configuration

use super::handlers::*;
use super::types::AppState;
use axum::{routing::get, Router};
use listkeeper_store::ListStore;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Create REST API router serving lists from `store`
pub fn create_router(store: Arc<dyn ListStore>) -> Router {
    let state = AppState { store };

    Router::new()
        .route("/health", get(health))
        .route("/api/list/:list_id", get(get_list).post(post_list))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
