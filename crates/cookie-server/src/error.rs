//! Request-level error type and its JSON rendering.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use cookies::CookieError;
use thiserror::Error;
use tracing::warn;

use crate::protocol::ErrorResponse;

/// Top-level service error type.
///
/// Variants map to HTTP status codes returned to callers:
/// - [`ServiceError::BadRequest`] → 400
/// - [`ServiceError::KeyConfiguration`] → 500
/// - [`ServiceError::Internal`] → 500
#[derive(Debug, Error)]
pub enum ServiceError {
    /// The request was malformed: invalid cookie fields, bad attributes, or a
    /// `secure` cookie over plain HTTP.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// The key store cannot serve the request (no keys, unsupported cipher).
    #[error("key configuration: {0}")]
    KeyConfiguration(String),

    /// An unexpected internal error occurred.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ServiceError {
    /// Returns the HTTP status code that should be sent for this error.
    pub fn http_status(&self) -> StatusCode {
        match self {
            ServiceError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ServiceError::KeyConfiguration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable error code.
    pub fn code(&self) -> &'static str {
        match self {
            ServiceError::BadRequest(_) => "bad_request",
            ServiceError::KeyConfiguration(_) => "key_configuration",
            ServiceError::Internal(_) => "internal_error",
        }
    }

    fn message(&self) -> &str {
        match self {
            ServiceError::BadRequest(m)
            | ServiceError::KeyConfiguration(m)
            | ServiceError::Internal(m) => m,
        }
    }
}

impl From<CookieError> for ServiceError {
    fn from(err: CookieError) -> Self {
        match err {
            e if e.is_client_error() => ServiceError::BadRequest(e.to_string()),
            CookieError::KeyStore(e) => ServiceError::KeyConfiguration(e.to_string()),
            e => ServiceError::Internal(e.to_string()),
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.http_status();
        if status.is_server_error() {
            warn!(code = self.code(), error = %self, "request failed");
        }
        let body = ErrorResponse::new(self.code(), self.message());
        (status, Json(body)).into_response()
    }
}
