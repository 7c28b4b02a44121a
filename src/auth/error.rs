//! Authentication error types.

use thiserror::Error;

/// Errors that can occur while obtaining an access token.
///
/// # Example
///
/// ```rust
/// use commercetools_provider::auth::AuthError;
///
/// let error = AuthError::ClientCredentialsFailed {
///     status: 401,
///     message: "invalid_client".to_string(),
/// };
/// assert!(error.to_string().contains("401"));
/// ```
#[derive(Debug, Error)]
pub enum AuthError {
    /// The auth server rejected the client credentials request, or it could
    /// not be sent.
    ///
    /// A `status` of 0 means no HTTP response was received.
    #[error("Client credentials grant failed with status {status}: {message}")]
    ClientCredentialsFailed {
        /// The HTTP status code returned.
        status: u16,
        /// The error message from the response.
        message: String,
    },
}

impl AuthError {
    /// Returns the HTTP status code, or 0 for network failures.
    #[must_use]
    pub const fn status(&self) -> u16 {
        match self {
            Self::ClientCredentialsFailed { status, .. } => *status,
        }
    }
}

// Verify AuthError is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<AuthError>();
};
