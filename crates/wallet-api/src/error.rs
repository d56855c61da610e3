//! API error types.
//!
//! Only the address book endpoints fail with an HTTP error; transaction
//! problems are reported in the `{success, message}` body instead.

use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use wallet_persistence::PersistenceError;

/// Result type for API operations.
pub type Result<T> = std::result::Result<T, ApiError>;

/// Failures answered with an HTTP error and a `{"error": ...}` body.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Request body was not the expected JSON.
    #[error("malformed body: {0}")]
    MalformedBody(String),

    /// The address book file could not be read or written.
    #[error("address book storage failed: {0}")]
    Storage(#[from] PersistenceError),
}

impl ApiError {
    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::MalformedBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::MalformedBody(rejection.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            ApiError::MalformedBody("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );

        let json_err = serde_json::from_str::<u8>("x").unwrap_err();
        let err: ApiError = PersistenceError::Json(json_err).into();
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert!(err.to_string().starts_with("address book storage failed"));
    }
}
