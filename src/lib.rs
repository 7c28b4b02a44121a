//! # commercetools Provider
//!
//! Lifecycle management for commercetools resources, starting with customer
//! groups. A declarative configuration record is turned into Platform API
//! calls (create, read, update, delete), and remote state is reconciled back
//! into local state.
//!
//! ## Overview
//!
//! This crate provides:
//! - Type-safe configuration via [`ProviderConfig`] and [`ProviderConfigBuilder`]
//! - Validated newtypes for API credentials and project values
//! - OAuth2 client credentials authentication via [`exchange_client_credentials`]
//! - A typed Platform API client for the `customer-groups` endpoints
//! - Resource schemas, change tracking and retry-with-backoff via [`schema`]
//! - A [`Provider`] that plans and applies configuration changes
//!
//! ## Quick Start
//!
//! ```rust
//! use commercetools_provider::{ClientId, ClientSecret, ProjectKey, ProviderConfig};
//!
//! let config = ProviderConfig::builder()
//!     .client_id(ClientId::new("your-client-id").unwrap())
//!     .client_secret(ClientSecret::new("your-client-secret").unwrap())
//!     .project_key(ProjectKey::new("my-project").unwrap())
//!     .build()
//!     .unwrap();
//!
//! assert_eq!(config.scopes().to_string(), "manage_project:my-project");
//! ```
//!
//! Configuration can also be read from `CTP_CLIENT_ID`, `CTP_CLIENT_SECRET`,
//! `CTP_PROJECT_KEY`, `CTP_SCOPES`, `CTP_API_URL` and `CTP_AUTH_URL` with
//! [`ProviderConfig::from_env`].
//!
//! ## Managing Customer Groups
//!
//! ```rust,ignore
//! use commercetools_provider::{PlatformClient, Provider, ProviderConfig};
//! use serde_json::json;
//!
//! let client = PlatformClient::connect(ProviderConfig::from_env()?).await?;
//! let provider = Provider::new(client);
//!
//! // Create
//! let config = serde_json::from_value(json!({"name": "Resellers", "key": "resellers"}))?;
//! let state = provider
//!     .apply("commercetools_customer_group", None, Some(&config))
//!     .await?
//!     .expect("created");
//!
//! // Refresh; `None` means the group was deleted remotely
//! let state = provider.refresh("commercetools_customer_group", &state).await?;
//!
//! // Import an existing group by ID
//! let imported = provider.import("commercetools_customer_group", "some-id").await?;
//! ```
//!
//! ## Using the Platform Client Directly
//!
//! ```rust,ignore
//! use commercetools_provider::platform::CustomerGroupDraft;
//!
//! let group = client
//!     .customer_groups()
//!     .post(CustomerGroupDraft::new("Gold members").with_key("gold"))
//!     .execute()
//!     .await?;
//!
//! client
//!     .customer_groups()
//!     .with_id(&group.id)
//!     .delete()
//!     .version(group.version)
//!     .execute()
//!     .await?;
//! ```
//!
//! ## Design Principles
//!
//! - **No global state**: Configuration is instance-based and passed explicitly
//! - **Fail-fast validation**: All newtypes validate on construction
//! - **Thread-safe**: All types are `Send + Sync`
//! - **Async-first**: Designed for use with Tokio async runtime

pub mod auth;
pub mod clients;
pub mod config;
pub mod error;
pub mod platform;
pub mod provider;
pub mod resources;
pub mod schema;

// Re-export public types at crate root for convenience
pub use auth::{exchange_client_credentials, AccessToken, AuthError, AuthScopes};
pub use config::{ApiUrl, ClientId, ClientSecret, ProjectKey, ProviderConfig, ProviderConfigBuilder};
pub use error::ConfigError;

// Re-export HTTP client types
pub use clients::{
    HttpClient, HttpError, HttpMethod, HttpRequest, HttpRequestBuilder, HttpResponse,
    HttpResponseError, InvalidHttpRequestError, MaxHttpRetriesExceededError,
};

// Re-export lifecycle types
pub use platform::{PlatformClient, PlatformError};
pub use provider::{Plan, Provider, Resource};
pub use resources::CustomerGroupResource;
pub use schema::{LifecycleError, ResourceConfig, ResourceData, ResourceState};
