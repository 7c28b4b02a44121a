//! Authenticated client for a commercetools project.

use tokio::sync::Mutex;

use crate::auth::{exchange_client_credentials, AccessToken};
use crate::clients::{HttpClient, HttpMethod, HttpRequest, HttpResponse};
use crate::config::{ProjectKey, ProviderConfig};
use crate::platform::customer_group::CustomerGroupsRequestBuilder;
use crate::platform::PlatformError;

/// Number of attempts for every Platform API request.
///
/// Retries at this level only cover rate limiting and gateway errors; the
/// lifecycle layer applies its own, longer retry around resource creation.
const DEFAULT_REQUEST_TRIES: u32 = 3;

/// Client for the Platform API of a single project.
///
/// Holds the access token and transparently fetches a new one with the
/// client credentials grant once it expires.
///
/// # Example
///
/// ```rust,ignore
/// use commercetools_provider::{PlatformClient, ProviderConfig};
///
/// let client = PlatformClient::connect(ProviderConfig::from_env()?).await?;
/// let group = client.customer_groups().with_key("resellers").get().execute().await?;
/// ```
#[derive(Debug)]
pub struct PlatformClient {
    config: ProviderConfig,
    http: HttpClient,
    token: Mutex<AccessToken>,
    request_tries: u32,
}

// Verify PlatformClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PlatformClient>();
};

impl PlatformClient {
    /// Obtains an access token and creates the client.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Auth`] if the token exchange fails.
    pub async fn connect(config: ProviderConfig) -> Result<Self, PlatformError> {
        let token = exchange_client_credentials(&config).await?;
        Ok(Self::with_token(config, token))
    }

    /// Creates a client that starts out with an existing token.
    #[must_use]
    pub fn with_token(config: ProviderConfig, token: AccessToken) -> Self {
        let http = HttpClient::new(&config);
        Self {
            config,
            http,
            token: Mutex::new(token),
            request_tries: DEFAULT_REQUEST_TRIES,
        }
    }

    /// Sets how many times each request is attempted on 429 and 5xx responses.
    #[must_use]
    pub const fn with_request_tries(mut self, tries: u32) -> Self {
        self.request_tries = tries;
        self
    }

    /// Returns the project this client talks to.
    #[must_use]
    pub const fn project_key(&self) -> &ProjectKey {
        self.config.project_key()
    }

    /// Returns the provider configuration.
    #[must_use]
    pub const fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// Entry point for the `customer-groups` endpoints.
    #[must_use]
    pub const fn customer_groups(&self) -> CustomerGroupsRequestBuilder<'_> {
        CustomerGroupsRequestBuilder::new(self)
    }

    /// Returns a valid `Authorization` header value, refreshing the token if needed.
    async fn authorization(&self) -> Result<String, PlatformError> {
        let mut token = self.token.lock().await;
        if token.expired() {
            tracing::debug!(
                project = %self.project_key(),
                "Access token expired, requesting a new one"
            );
            *token = exchange_client_credentials(&self.config).await?;
        }
        Ok(token.authorization_header())
    }

    pub(crate) async fn send(
        &self,
        method: HttpMethod,
        path: &str,
        body: Option<serde_json::Value>,
        query: &[(String, String)],
    ) -> Result<HttpResponse, PlatformError> {
        let mut builder = HttpRequest::builder(method, path)
            .header("Authorization", self.authorization().await?)
            .tries(self.request_tries);
        if let Some(body) = body {
            builder = builder.body(body);
        }
        for (key, value) in query {
            builder = builder.query_param(key, value);
        }

        let request = builder.build().map_err(crate::clients::HttpError::from)?;
        Ok(self.http.request(request).await?)
    }
}
