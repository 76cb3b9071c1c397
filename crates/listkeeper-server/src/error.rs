//! Server error types

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use listkeeper_store::StoreError;
use serde_json::json;
use thiserror::Error;

/// Server error type
#[derive(Debug, Error)]
pub enum ServerError {
    /// List does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Write against a stale version
    #[error("Conflict: {0}")]
    Conflict(String),

    /// Invalid request
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Storage backend failure
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    InternalError(String),
}

impl ServerError {
    /// HTTP status for this error
    pub fn status(&self) -> StatusCode {
        match self {
            ServerError::NotFound(_) => StatusCode::NOT_FOUND,
            ServerError::Conflict(_) => StatusCode::CONFLICT,
            ServerError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ServerError::StorageError(_) | ServerError::InternalError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match self {
            ServerError::NotFound(msg)
            | ServerError::Conflict(msg)
            | ServerError::InvalidRequest(msg)
            | ServerError::StorageError(msg)
            | ServerError::InternalError(msg) => msg,
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

impl From<StoreError> for ServerError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => ServerError::NotFound(err.to_string()),
            StoreError::VersionConflict { .. } => ServerError::Conflict(
                "List has been changed, please refresh.".to_string(),
            ),
            StoreError::Config(msg) => ServerError::InternalError(msg),
            other => ServerError::StorageError(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_display() {
        let err = ServerError::NotFound("list missing".to_string());
        assert_eq!(err.to_string(), "Not found: list missing");
    }

    #[test]
    fn test_store_not_found_conversion() {
        let store_err = StoreError::NotFound {
            list_id: "abc".to_string(),
        };
        let server_err: ServerError = store_err.into();
        assert!(matches!(server_err, ServerError::NotFound(_)));
        assert!(server_err.to_string().contains("abc"));
    }

    #[test]
    fn test_store_conflict_conversion() {
        let store_err = StoreError::VersionConflict {
            list_id: "abc".to_string(),
            expected: 1,
        };
        let server_err: ServerError = store_err.into();
        assert_eq!(server_err.status(), StatusCode::CONFLICT);
    }

    #[test]
    fn test_store_unavailable_conversion() {
        let store_err = StoreError::StorageUnavailable("connection refused".to_string());
        let server_err: ServerError = store_err.into();
        assert!(matches!(server_err, ServerError::StorageError(_)));
        assert!(server_err.to_string().contains("connection refused"));
    }

    #[test]
    fn test_store_config_error_is_internal() {
        let store_err = StoreError::Config("backend disabled".to_string());
        let server_err: ServerError = store_err.into();
        assert!(matches!(server_err, ServerError::InternalError(_)));
        assert_eq!(server_err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_into_response_statuses() {
        let cases = [
            (ServerError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (ServerError::Conflict("x".into()), StatusCode::CONFLICT),
            (ServerError::InvalidRequest("x".into()), StatusCode::BAD_REQUEST),
            (ServerError::StorageError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (ServerError::InternalError("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];

        for (err, expected) in cases {
            assert_eq!(err.into_response().status(), expected);
        }
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ServerError>();
    }
}
