//! REST API type definitions
//!
//! Field names follow the wire format the browser client already speaks
//! (`list`, `version`, `newVersion`).

use listkeeper_store::ListStore;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn ListStore>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Backend serving the lists
    pub store: String,
}

/// `GET /api/list/:listId` response
#[derive(Debug, Serialize, Deserialize)]
pub struct GetListResponse {
    pub list: Vec<Value>,
    pub version: u64,
}

/// `POST /api/list/:listId` request
#[derive(Debug, Serialize, Deserialize)]
pub struct PostListRequest {
    /// Full replacement item sequence
    pub list: Vec<Value>,

    /// Version the client last read; 0 when creating
    #[serde(default)]
    pub version: u64,
}

/// `POST /api/list/:listId` response
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostListResponse {
    pub new_version: u64,
    pub list: Vec<Value>,
}
