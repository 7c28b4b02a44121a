//! Configuration types for the commercetools provider.
//!
//! This module provides the configuration used to authenticate against the
//! commercetools auth server and to address the Platform API.
//!
//! # Overview
//!
//! - [`ProviderConfig`]: The main configuration struct holding all settings
//! - [`ProviderConfigBuilder`]: A builder for constructing [`ProviderConfig`] instances
//! - [`ClientId`]: A validated API client ID newtype
//! - [`ClientSecret`]: A validated API client secret with masked debug output
//! - [`ProjectKey`]: A validated commercetools project key
//! - [`ApiUrl`]: A validated base URL for the API or auth server
//!
//! # Example
//!
//! ```rust
//! use commercetools_provider::{ProviderConfig, ClientId, ClientSecret, ProjectKey};
//!
//! let config = ProviderConfig::builder()
//!     .client_id(ClientId::new("my-client").unwrap())
//!     .client_secret(ClientSecret::new("my-secret").unwrap())
//!     .project_key(ProjectKey::new("my-project").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.scopes().to_string(), "manage_project:my-project");
//! ```

mod newtypes;

pub use newtypes::{ApiUrl, ClientId, ClientSecret, ProjectKey};

use crate::auth::AuthScopes;
use crate::error::ConfigError;

/// Default Platform API URL (Europe, Google Cloud).
pub const DEFAULT_API_URL: &str = "https://api.europe-west1.gcp.commercetools.com";

/// Default auth server URL (Europe, Google Cloud).
pub const DEFAULT_TOKEN_URL: &str = "https://auth.europe-west1.gcp.commercetools.com";

/// Environment variable names read by [`ProviderConfig::from_env`].
pub mod env {
    /// API client ID.
    pub const CLIENT_ID: &str = "CTP_CLIENT_ID";
    /// API client secret.
    pub const CLIENT_SECRET: &str = "CTP_CLIENT_SECRET";
    /// Project key.
    pub const PROJECT_KEY: &str = "CTP_PROJECT_KEY";
    /// Space-separated scopes.
    pub const SCOPES: &str = "CTP_SCOPES";
    /// Platform API URL.
    pub const API_URL: &str = "CTP_API_URL";
    /// Auth server URL.
    pub const AUTH_URL: &str = "CTP_AUTH_URL";
}

/// Configuration for the commercetools provider.
///
/// `ProviderConfig` is `Clone`, `Send`, and `Sync`, so it can be shared
/// across async tasks.
#[derive(Clone, Debug)]
pub struct ProviderConfig {
    client_id: ClientId,
    client_secret: ClientSecret,
    project_key: ProjectKey,
    scopes: AuthScopes,
    api_url: ApiUrl,
    token_url: ApiUrl,
    user_agent_prefix: Option<String>,
}

impl ProviderConfig {
    /// Creates a new builder for constructing a `ProviderConfig`.
    #[must_use]
    pub fn builder() -> ProviderConfigBuilder {
        ProviderConfigBuilder::new()
    }

    /// Builds a configuration from `CTP_*` environment variables.
    ///
    /// `CTP_CLIENT_ID`, `CTP_CLIENT_SECRET` and `CTP_PROJECT_KEY` are required.
    /// `CTP_SCOPES`, `CTP_API_URL` and `CTP_AUTH_URL` fall back to the builder defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingEnvVar`] if a required variable is unset,
    /// or the validation error of the offending value.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds a configuration from an arbitrary variable lookup.
    ///
    /// This is what [`from_env`](Self::from_env) uses; it exists so that
    /// configuration can be sourced from something other than the process
    /// environment.
    ///
    /// # Errors
    ///
    /// Same as [`from_env`](Self::from_env).
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::MissingEnvVar { name })
        };
        let optional = |name: &'static str| lookup(name).filter(|v| !v.trim().is_empty());

        let mut builder = Self::builder()
            .client_id(ClientId::new(required(env::CLIENT_ID)?)?)
            .client_secret(ClientSecret::new(required(env::CLIENT_SECRET)?)?)
            .project_key(ProjectKey::new(required(env::PROJECT_KEY)?)?);

        if let Some(scopes) = optional(env::SCOPES) {
            builder = builder.scopes(scopes.parse()?);
        }
        if let Some(url) = optional(env::API_URL) {
            builder = builder.api_url(ApiUrl::new(url)?);
        }
        if let Some(url) = optional(env::AUTH_URL) {
            builder = builder.token_url(ApiUrl::new(url)?);
        }

        builder.build()
    }

    /// Returns the API client ID.
    #[must_use]
    pub const fn client_id(&self) -> &ClientId {
        &self.client_id
    }

    /// Returns the API client secret.
    #[must_use]
    pub const fn client_secret(&self) -> &ClientSecret {
        &self.client_secret
    }

    /// Returns the project key.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        &self.project_key
    }

    /// Returns the OAuth scopes requested from the auth server.
    #[must_use]
    pub const fn scopes(&self) -> &AuthScopes {
        &self.scopes
    }

    /// Returns the Platform API base URL.
    #[must_use]
    pub const fn api_url(&self) -> &ApiUrl {
        &self.api_url
    }

    /// Returns the auth server base URL.
    #[must_use]
    pub const fn token_url(&self) -> &ApiUrl {
        &self.token_url
    }

    /// Returns the user agent prefix, if configured.
    #[must_use]
    pub fn user_agent_prefix(&self) -> Option<&str> {
        self.user_agent_prefix.as_deref()
    }
}

// Verify ProviderConfig is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<ProviderConfig>();
};

/// Builder for constructing [`ProviderConfig`] instances.
///
/// Required fields are `client_id`, `client_secret` and `project_key`.
///
/// # Defaults
///
/// - `scopes`: `manage_project:{project_key}`
/// - `api_url`: [`DEFAULT_API_URL`]
/// - `token_url`: [`DEFAULT_TOKEN_URL`]
/// - `user_agent_prefix`: `None`
#[derive(Debug, Default)]
pub struct ProviderConfigBuilder {
    client_id: Option<ClientId>,
    client_secret: Option<ClientSecret>,
    project_key: Option<ProjectKey>,
    scopes: Option<AuthScopes>,
    api_url: Option<ApiUrl>,
    token_url: Option<ApiUrl>,
    user_agent_prefix: Option<String>,
}

impl ProviderConfigBuilder {
    /// Creates a new builder with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the API client ID (required).
    #[must_use]
    pub fn client_id(mut self, id: ClientId) -> Self {
        self.client_id = Some(id);
        self
    }

    /// Sets the API client secret (required).
    #[must_use]
    pub fn client_secret(mut self, secret: ClientSecret) -> Self {
        self.client_secret = Some(secret);
        self
    }

    /// Sets the project key (required).
    #[must_use]
    pub fn project_key(mut self, key: ProjectKey) -> Self {
        self.project_key = Some(key);
        self
    }

    /// Sets the OAuth scopes.
    #[must_use]
    pub fn scopes(mut self, scopes: AuthScopes) -> Self {
        self.scopes = Some(scopes);
        self
    }

    /// Sets the Platform API base URL.
    #[must_use]
    pub fn api_url(mut self, url: ApiUrl) -> Self {
        self.api_url = Some(url);
        self
    }

    /// Sets the auth server base URL.
    #[must_use]
    pub fn token_url(mut self, url: ApiUrl) -> Self {
        self.token_url = Some(url);
        self
    }

    /// Sets the user agent prefix for HTTP requests.
    #[must_use]
    pub fn user_agent_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.user_agent_prefix = Some(prefix.into());
        self
    }

    /// Builds the [`ProviderConfig`], validating that required fields are set.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingRequiredField`] if `client_id`,
    /// `client_secret` or `project_key` are not set.
    pub fn build(self) -> Result<ProviderConfig, ConfigError> {
        let client_id = self
            .client_id
            .ok_or(ConfigError::MissingRequiredField { field: "client_id" })?;
        let client_secret = self
            .client_secret
            .ok_or(ConfigError::MissingRequiredField {
                field: "client_secret",
            })?;
        let project_key = self
            .project_key
            .ok_or(ConfigError::MissingRequiredField {
                field: "project_key",
            })?;

        let scopes = self
            .scopes
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| AuthScopes::manage_project(&project_key));

        let api_url = match self.api_url {
            Some(url) => url,
            None => ApiUrl::new(DEFAULT_API_URL)?,
        };
        let token_url = match self.token_url {
            Some(url) => url,
            None => ApiUrl::new(DEFAULT_TOKEN_URL)?,
        };

        Ok(ProviderConfig {
            client_id,
            client_secret,
            project_key,
            scopes,
            api_url,
            token_url,
            user_agent_prefix: self.user_agent_prefix,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn base_builder() -> ProviderConfigBuilder {
        ProviderConfig::builder()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .project_key(ProjectKey::new("my-project").unwrap())
    }

    #[test]
    fn test_builder_requires_client_id() {
        let result = ProviderConfigBuilder::new()
            .client_secret(ClientSecret::new("secret").unwrap())
            .project_key(ProjectKey::new("p1").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField { field: "client_id" })
        ));
    }

    #[test]
    fn test_builder_requires_project_key() {
        let result = ProviderConfigBuilder::new()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .build();

        assert!(matches!(
            result,
            Err(ConfigError::MissingRequiredField {
                field: "project_key"
            })
        ));
    }

    #[test]
    fn test_builder_provides_sensible_defaults() {
        let config = base_builder().build().unwrap();

        assert_eq!(config.api_url().as_ref(), DEFAULT_API_URL);
        assert_eq!(config.token_url().as_ref(), DEFAULT_TOKEN_URL);
        assert_eq!(config.scopes().to_string(), "manage_project:my-project");
        assert!(config.user_agent_prefix().is_none());
    }

    #[test]
    fn test_builder_with_all_optional_fields() {
        let config = base_builder()
            .scopes("manage_customer_groups:my-project".parse().unwrap())
            .api_url(ApiUrl::new("https://api.us-central1.gcp.commercetools.com").unwrap())
            .token_url(ApiUrl::new("https://auth.us-central1.gcp.commercetools.com").unwrap())
            .user_agent_prefix("infra-pipeline/2.1")
            .build()
            .unwrap();

        assert_eq!(
            config.scopes().to_string(),
            "manage_customer_groups:my-project"
        );
        assert_eq!(
            config.api_url().host_name(),
            Some("api.us-central1.gcp.commercetools.com")
        );
        assert_eq!(config.user_agent_prefix(), Some("infra-pipeline/2.1"));
    }

    #[test]
    fn test_config_debug_masks_secret() {
        let config = base_builder().build().unwrap();
        let debug_str = format!("{:?}", config);
        assert!(debug_str.contains("ProviderConfig"));
        assert!(!debug_str.contains("\"secret\""));
    }

    #[test]
    fn test_from_lookup_reads_ctp_variables() {
        let vars: HashMap<&str, &str> = HashMap::from([
            ("CTP_CLIENT_ID", "client"),
            ("CTP_CLIENT_SECRET", "secret"),
            ("CTP_PROJECT_KEY", "shop-eu"),
            ("CTP_SCOPES", "manage_customer_groups:shop-eu view_products:shop-eu"),
            ("CTP_API_URL", "http://localhost:8080"),
        ]);

        let config =
            ProviderConfig::from_lookup(|name| vars.get(name).map(ToString::to_string)).unwrap();

        assert_eq!(config.project_key().as_ref(), "shop-eu");
        assert_eq!(config.api_url().as_ref(), "http://localhost:8080");
        assert_eq!(config.token_url().as_ref(), DEFAULT_TOKEN_URL);
        assert_eq!(config.scopes().iter().count(), 2);
    }

    #[test]
    fn test_from_lookup_reports_missing_variable() {
        let result = ProviderConfig::from_lookup(|name| {
            (name == "CTP_CLIENT_ID").then(|| "client".to_string())
        });

        assert!(matches!(
            result,
            Err(ConfigError::MissingEnvVar {
                name: "CTP_CLIENT_SECRET"
            })
        ));
    }
}
