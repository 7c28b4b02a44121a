//! Access tokens issued by the commercetools auth server.

use crate::auth::AuthScopes;
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Seconds before the real expiry at which a token is treated as expired,
/// so that a request never starts with a token that dies in flight.
const EXPIRY_LEEWAY_SECS: i64 = 30;

/// Token response returned by `POST /oauth/token`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct AccessTokenResponse {
    /// The bearer token.
    pub access_token: String,
    /// Token type, always `Bearer`.
    #[serde(default)]
    pub token_type: Option<String>,
    /// Lifetime of the token in seconds.
    #[serde(default)]
    pub expires_in: Option<i64>,
    /// Space-separated scopes actually granted.
    #[serde(default)]
    pub scope: Option<String>,
}

/// A bearer token used to authenticate Platform API calls.
///
/// # Example
///
/// ```rust
/// use commercetools_provider::AccessToken;
///
/// let token = AccessToken::new("abc", "manage_project:p".parse().unwrap(), None);
/// assert!(token.is_active());
/// assert_eq!(token.authorization_header(), "Bearer abc");
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    /// The raw token value.
    pub token: String,
    /// The scopes granted to this token.
    pub scopes: AuthScopes,
    /// When this token expires, if known.
    pub expires: Option<DateTime<Utc>>,
}

impl AccessToken {
    /// Creates a new token.
    #[must_use]
    pub fn new(
        token: impl Into<String>,
        scopes: AuthScopes,
        expires: Option<DateTime<Utc>>,
    ) -> Self {
        Self {
            token: token.into(),
            scopes,
            expires,
        }
    }

    /// Builds a token from an auth server response.
    ///
    /// If the response omits the granted scopes, `requested` is used.
    #[must_use]
    pub fn from_response(response: &AccessTokenResponse, requested: &AuthScopes) -> Self {
        let scopes = response
            .scope
            .as_deref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(|| requested.clone());
        let expires = response
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs));

        Self::new(response.access_token.clone(), scopes, expires)
    }

    /// Returns `true` if this token has expired or is about to.
    ///
    /// Tokens without an expiration time are considered never expired.
    #[must_use]
    pub fn expired(&self) -> bool {
        self.expires
            .is_some_and(|expires| Utc::now() + Duration::seconds(EXPIRY_LEEWAY_SECS) >= expires)
    }

    /// Returns `true` if this token is non-empty and not expired.
    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.token.is_empty() && !self.expired()
    }

    /// Returns the value for the `Authorization` header.
    #[must_use]
    pub fn authorization_header(&self) -> String {
        format!("Bearer {}", self.token)
    }
}
