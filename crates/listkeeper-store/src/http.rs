//! Remote list store over HTTP
//!
//! Talks to a running `listkeeper-server` (or anything speaking the same
//! protocol). Atomicity is provided by the store behind the remote server.
//!
//! # Protocol
//!
//! ```text
//! GET  {base}/api/list/{listId}                      -> 200 {"list": [...], "version": n} | 404
//! POST {base}/api/list/{listId} {"list", "version"}  -> 200 {"newVersion": m, ...}       | 409
//! ```

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use tracing::debug;

use crate::{error::StoreError, traits::ListStore, ListSnapshot, StoreResult};

/// Remote list store
pub struct HttpListStore {
    client: Client,
    base_url: Url,
}

#[derive(Deserialize)]
struct GetListResponse {
    list: Vec<Value>,
    version: u64,
}

#[derive(Serialize)]
struct PostListRequest<'a> {
    list: &'a [Value],
    version: u64,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PostListResponse {
    new_version: u64,
}

impl HttpListStore {
    /// Create a store talking to the server at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`StoreError::Config`] if the URL cannot be parsed or cannot
    /// carry a path, and [`StoreError::StorageUnavailable`] if the HTTP
    /// client cannot be built.
    pub fn new(base_url: &str) -> StoreResult<Self> {
        Self::with_timeout(base_url, Duration::from_secs(30))
    }

    /// Create a store with a custom request timeout
    pub fn with_timeout(base_url: &str, timeout: Duration) -> StoreResult<Self> {
        let base_url = Url::parse(base_url)
            .map_err(|e| StoreError::Config(format!("Invalid API url '{}': {}", base_url, e)))?;
        if base_url.cannot_be_a_base() {
            return Err(StoreError::Config(format!(
                "API url '{}' cannot carry a path",
                base_url
            )));
        }

        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            StoreError::StorageUnavailable(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self { client, base_url })
    }

    /// `{base}/api/list/{list_id}`, with the id escaped as one path segment
    fn list_url(&self, list_id: &str) -> StoreResult<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| {
                StoreError::Config(format!("API url '{}' cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["api", "list", list_id]);
        Ok(url)
    }
}

fn unavailable(context: &str, err: reqwest::Error) -> StoreError {
    StoreError::StorageUnavailable(format!("{}: {}", context, err))
}

#[async_trait]
impl ListStore for HttpListStore {
    async fn get(&self, list_id: &str) -> StoreResult<ListSnapshot> {
        let url = self.list_url(list_id)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| unavailable("GET list failed", e))?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(StoreError::not_found(list_id)),
            status if status.is_success() => {
                let body: GetListResponse = response
                    .json()
                    .await
                    .map_err(|e| unavailable("Failed to parse list response", e))?;
                debug!(list_id, version = body.version, "remote list read");
                Ok(ListSnapshot::new(body.list, body.version))
            }
            status => Err(StoreError::StorageUnavailable(format!(
                "GET list returned error status {}",
                status
            ))),
        }
    }

    async fn put(
        &self,
        list_id: &str,
        items: Vec<Value>,
        expected_version: u64,
    ) -> StoreResult<ListSnapshot> {
        let url = self.list_url(list_id)?;
        let response = self
            .client
            .post(url)
            .json(&PostListRequest {
                list: &items,
                version: expected_version,
            })
            .send()
            .await
            .map_err(|e| unavailable("POST list failed", e))?;

        match response.status() {
            StatusCode::CONFLICT => Err(StoreError::conflict(list_id, expected_version)),
            status if status.is_success() => {
                let body: PostListResponse = response
                    .json()
                    .await
                    .map_err(|e| unavailable("Failed to parse write response", e))?;
                debug!(list_id, version = body.new_version, "remote list written");
                Ok(ListSnapshot::new(items, body.new_version))
            }
            status => Err(StoreError::StorageUnavailable(format!(
                "POST list returned error status {}",
                status
            ))),
        }
    }

    fn backend_name(&self) -> &'static str {
        "http"
    }
}
