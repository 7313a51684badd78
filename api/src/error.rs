//! API error types.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use nextra_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Storage(String),

    #[error("{0}")]
    Upload(String),

    #[error("server error: {0}")]
    Server(String),
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl ApiError {
    pub fn invalid(message: &str) -> Self {
        ApiError::InvalidRequest(message.to_string())
    }

    /// Translate a store failure into the short message shown to clients,
    /// logging the underlying cause.
    ///
    /// Load failures read as `Error reading <collection>`; anything else as
    /// `Error <action>`.
    pub fn storage(err: StoreError, collection: &'static str, action: &'static str) -> Self {
        if let StoreError::Validation(e) = err {
            return ApiError::InvalidRequest(e.to_string());
        }
        error!(error = %err, collection, "store operation failed");
        if err.is_read() {
            ApiError::Storage(format!("Error reading {collection}"))
        } else {
            ApiError::Storage(format!("Error {action}"))
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) | ApiError::Upload(_) | ApiError::Server(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nextra_types::ValidationError;

    #[test]
    fn read_failures_name_the_collection() {
        let err = ApiError::storage(StoreError::Read("eio".into()), "users", "deleting user");
        assert_eq!(err.to_string(), "Error reading users");
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn corruption_counts_as_a_read_failure() {
        let err = ApiError::storage(StoreError::Corruption("[{".into()), "logs", "saving log");
        assert_eq!(err.to_string(), "Error reading logs");
    }

    #[test]
    fn write_failures_name_the_action() {
        let err = ApiError::storage(StoreError::Write("enospc".into()), "logs", "saving log");
        assert_eq!(err.to_string(), "Error saving log");
    }

    #[test]
    fn validation_failures_are_bad_requests() {
        let err = ApiError::storage(
            StoreError::Validation(ValidationError::MissingField("time")),
            "logs",
            "saving log",
        );
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
    }
}
