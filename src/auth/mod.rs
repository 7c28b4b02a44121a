//! Authentication for the commercetools Platform API.
//!
//! - [`AuthScopes`]: A set of `permission:projectKey` scopes
//! - [`AccessToken`]: A bearer token with its expiry
//! - [`exchange_client_credentials`]: Obtains a token with the client credentials grant
//! - [`AuthError`]: Errors from the auth server

mod client_credentials;
mod error;
mod scopes;
pub mod token;

pub use client_credentials::exchange_client_credentials;
pub use error::AuthError;
pub use scopes::AuthScopes;
pub use token::{AccessToken, AccessTokenResponse};
