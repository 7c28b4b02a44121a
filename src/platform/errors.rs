//! Platform API error types.
//!
//! commercetools reports failures as a JSON body of the form:
//!
//! ```json
//! {
//!   "statusCode": 409,
//!   "message": "Object 5f1e... has a different version than expected. Expected: 1 - Actual: 2.",
//!   "errors": [
//!     { "code": "ConcurrentModification", "message": "...", "currentVersion": 2 }
//!   ]
//! }
//! ```
//!
//! [`ErrorResponse`] decodes that body. [`PlatformError`] is the error type of
//! every platform request.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::auth::AuthError;
use crate::clients::{HttpError, HttpResponseError};

/// A single error object inside an [`ErrorResponse`].
///
/// Fields beyond `code` and `message` differ per error code (for example
/// `currentVersion` on `ConcurrentModification` or `field` on
/// `DuplicateField`) and are kept in `extras`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorObject {
    /// The error code, e.g. `InvalidJsonInput`.
    pub code: String,
    /// Human readable description.
    #[serde(default)]
    pub message: String,
    /// Code-specific fields.
    #[serde(flatten)]
    pub extras: serde_json::Map<String, serde_json::Value>,
}

/// The error representation returned by the Platform API for non-2xx responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Error)]
#[serde(rename_all = "camelCase")]
#[error("{message}")]
pub struct ErrorResponse {
    /// The HTTP status code.
    pub status_code: u16,
    /// Top-level message.
    #[serde(default)]
    pub message: String,
    /// Individual errors.
    #[serde(default)]
    pub errors: Vec<ErrorObject>,
    /// The `X-Correlation-ID` of the failed request, if any.
    #[serde(skip)]
    pub correlation_id: Option<String>,
}

impl ErrorResponse {
    /// Decodes an HTTP response error into an `ErrorResponse`.
    ///
    /// Bodies that are not in the commercetools error format still produce an
    /// `ErrorResponse` carrying the status code and the transport message.
    #[must_use]
    pub fn from_http(error: HttpResponseError) -> Self {
        let mut response = serde_json::from_value::<Self>(error.body).unwrap_or_else(|_| Self {
            status_code: error.code,
            message: error.message.clone(),
            errors: Vec::new(),
            correlation_id: None,
        });
        // The status line is authoritative over the body
        response.status_code = error.code;
        if response.message.is_empty() {
            response.message = error.message;
        }
        response.correlation_id = error.error_reference;
        response
    }

    /// Returns `true` if any error object has the given code.
    #[must_use]
    pub fn has_error_code(&self, code: &str) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }

    /// Formats the error objects, including their extra fields, for logging.
    #[must_use]
    pub fn format_errors(&self) -> String {
        serde_json::to_string_pretty(&self.errors).unwrap_or_default()
    }
}

/// Error type for Platform API requests.
#[derive(Debug, Error)]
pub enum PlatformError {
    /// The API answered with an error response.
    #[error(transparent)]
    Response(#[from] ErrorResponse),

    /// Transport failure or retry exhaustion.
    #[error(transparent)]
    Http(HttpError),

    /// An access token could not be obtained.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// A request body could not be encoded.
    #[error("Failed to encode {resource} request: {source}")]
    Serialize {
        /// The resource name.
        resource: &'static str,
        /// The underlying serde error.
        source: serde_json::Error,
    },

    /// A successful response body could not be decoded.
    #[error("Failed to decode {resource} response: {source}")]
    Deserialize {
        /// The resource name.
        resource: &'static str,
        /// The underlying serde error.
        source: serde_json::Error,
    },
}

impl From<HttpError> for PlatformError {
    fn from(error: HttpError) -> Self {
        match error {
            HttpError::Response(e) => Self::Response(ErrorResponse::from_http(e)),
            other => Self::Http(other),
        }
    }
}

impl PlatformError {
    /// Returns the HTTP status code of the failed request, if there was one.
    #[must_use]
    pub const fn status_code(&self) -> Option<u16> {
        match self {
            Self::Response(e) => Some(e.status_code),
            Self::Http(e) => e.status_code(),
            Self::Auth(_) | Self::Serialize { .. } | Self::Deserialize { .. } => None,
        }
    }

    /// Returns `true` if the API answered 404.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::Response(e) if e.status_code == 404)
    }
}

// Verify PlatformError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PlatformError>();
};
