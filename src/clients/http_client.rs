//! HTTP client for commercetools Platform API communication.
//!
//! This module provides the [`HttpClient`] type for making requests to a
//! project's API with automatic retry handling.

use std::collections::HashMap;
use std::time::Duration;

use crate::clients::errors::{HttpError, HttpResponseError, MaxHttpRetriesExceededError};
use crate::clients::http_request::{HttpMethod, HttpRequest};
use crate::clients::http_response::HttpResponse;
use crate::config::ProviderConfig;

/// Fixed retry wait time in seconds when no `Retry-After` is given.
pub const RETRY_WAIT_TIME: u64 = 1;

/// SDK version from Cargo.toml.
pub const SDK_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Status codes that are retried when a request allows more than one try.
const RETRYABLE_STATUS_CODES: [u16; 5] = [429, 500, 502, 503, 504];

/// HTTP client for making requests to the commercetools Platform API.
///
/// The client handles:
/// - Base URI construction from the configured API URL and project key
/// - Default headers including User-Agent
/// - Automatic retry logic for 429 and 5xx gateway responses
///
/// Authentication is not handled here: the `Authorization` header is supplied
/// per request by [`PlatformClient`](crate::platform::PlatformClient), which
/// owns token refresh.
///
/// `HttpClient` is `Send + Sync`, making it safe to share across async tasks.
#[derive(Debug)]
pub struct HttpClient {
    client: reqwest::Client,
    /// Base URI (e.g., `https://api.europe-west1.gcp.commercetools.com`).
    base_uri: String,
    /// Base path (e.g., `/my-project`).
    base_path: String,
    default_headers: HashMap<String, String>,
}

// Verify HttpClient is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<HttpClient>();
};

impl HttpClient {
    /// Creates a new HTTP client for the configured project.
    ///
    /// # Panics
    ///
    /// Panics if the underlying reqwest client cannot be created. This should
    /// only happen in extremely unusual circumstances (e.g., TLS initialization failure).
    #[must_use]
    pub fn new(config: &ProviderConfig) -> Self {
        let base_uri = config.api_url().as_ref().to_string();
        let base_path = format!("/{}", config.project_key());

        let user_agent_prefix = config
            .user_agent_prefix()
            .map_or(String::new(), |prefix| format!("{prefix} "));
        let rust_version = env!("CARGO_PKG_RUST_VERSION");
        let user_agent =
            format!("{user_agent_prefix}commercetools-provider/{SDK_VERSION} (Rust {rust_version})");

        let mut default_headers = HashMap::new();
        default_headers.insert("User-Agent".to_string(), user_agent);
        default_headers.insert("Accept".to_string(), "application/json".to_string());

        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_uri,
            base_path,
            default_headers,
        }
    }

    /// Returns the base URI for this client.
    #[must_use]
    pub fn base_uri(&self) -> &str {
        &self.base_uri
    }

    /// Returns the base path for this client.
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Returns the default headers for this client.
    #[must_use]
    pub const fn default_headers(&self) -> &HashMap<String, String> {
        &self.default_headers
    }

    /// Sends an HTTP request to the Platform API.
    ///
    /// # Errors
    ///
    /// Returns [`HttpError`] if:
    /// - Request validation fails (`InvalidRequest`)
    /// - Network error occurs (`Network`)
    /// - Non-2xx response received (`Response`)
    /// - Max retries exceeded (`MaxRetries`)
    pub async fn request(&self, request: HttpRequest) -> Result<HttpResponse, HttpError> {
        request.verify()?;

        let url = format!("{}{}/{}", self.base_uri, self.base_path, request.path);

        let mut headers = self.default_headers.clone();
        if request.body.is_some() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(extra) = &request.extra_headers {
            for (key, value) in extra {
                headers.insert(key.clone(), value.clone());
            }
        }

        let mut tries: u32 = 0;
        loop {
            tries += 1;

            let mut req_builder = match request.http_method {
                HttpMethod::Get => self.client.get(&url),
                HttpMethod::Post => self.client.post(&url),
                HttpMethod::Delete => self.client.delete(&url),
            };

            for (key, value) in &headers {
                req_builder = req_builder.header(key, value);
            }

            if let Some(query) = &request.query {
                req_builder = req_builder.query(query);
            }

            if let Some(body) = &request.body {
                req_builder = req_builder.body(body.to_string());
            }

            tracing::debug!(
                method = %request.http_method,
                %url,
                attempt = tries,
                "Sending request"
            );

            let res = req_builder.send().await?;

            let code = res.status().as_u16();
            let res_headers = Self::parse_response_headers(res.headers());
            let body_text = res.text().await.unwrap_or_default();

            let body = if body_text.is_empty() {
                serde_json::json!({})
            } else {
                serde_json::from_str(&body_text)
                    .unwrap_or_else(|_| serde_json::json!({ "raw_body": body_text }))
            };

            let response = HttpResponse::new(code, res_headers, body);

            if response.is_ok() {
                return Ok(response);
            }

            let error_message = Self::error_message(&response);
            let error_reference = response.correlation_id().map(String::from);

            if !RETRYABLE_STATUS_CODES.contains(&code) || request.tries == 1 {
                return Err(HttpError::Response(HttpResponseError {
                    code,
                    message: error_message,
                    body: response.body,
                    error_reference,
                }));
            }

            if tries >= request.tries {
                return Err(HttpError::MaxRetries(MaxHttpRetriesExceededError {
                    code,
                    tries: request.tries,
                    message: error_message,
                    error_reference,
                }));
            }

            let delay = Self::calculate_retry_delay(&response);
            tracing::warn!(
                status = code,
                attempt = tries,
                delay_ms = u64::try_from(delay.as_millis()).unwrap_or(u64::MAX),
                "Retrying request to {}",
                request.path
            );
            tokio::time::sleep(delay).await;
        }
    }

    fn parse_response_headers(
        headers: &reqwest::header::HeaderMap,
    ) -> HashMap<String, Vec<String>> {
        let mut result: HashMap<String, Vec<String>> = HashMap::new();
        for (name, value) in headers {
            let key = name.as_str().to_lowercase();
            let value = value.to_str().unwrap_or_default().to_string();
            result.entry(key).or_default().push(value);
        }
        result
    }

    /// Uses `Retry-After` when the server sent one, otherwise a fixed delay.
    fn calculate_retry_delay(response: &HttpResponse) -> Duration {
        response
            .retry_request_after
            .filter(|secs| secs.is_finite() && *secs >= 0.0)
            .map_or_else(
                || Duration::from_secs(RETRY_WAIT_TIME),
                Duration::from_secs_f64,
            )
    }

    /// Extracts the top-level `message` of a commercetools error body.
    fn error_message(response: &HttpResponse) -> String {
        response
            .body
            .get("message")
            .and_then(serde_json::Value::as_str)
            .map_or_else(
                || format!("HTTP {}: {}", response.code, response.body),
                ToString::to_string,
            )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{ApiUrl, ClientId, ClientSecret, ProjectKey};

    fn config(prefix: Option<&str>) -> ProviderConfig {
        let mut builder = ProviderConfig::builder()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .project_key(ProjectKey::new("my-project").unwrap())
            .api_url(ApiUrl::new("https://api.example.com").unwrap());
        if let Some(prefix) = prefix {
            builder = builder.user_agent_prefix(prefix);
        }
        builder.build().unwrap()
    }

    #[test]
    fn test_client_construction_from_config() {
        let client = HttpClient::new(&config(None));

        assert_eq!(client.base_uri(), "https://api.example.com");
        assert_eq!(client.base_path(), "/my-project");
    }

    #[test]
    fn test_user_agent_header_format() {
        let client = HttpClient::new(&config(None));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("commercetools-provider/"));
        assert!(user_agent.contains("Rust"));
    }

    #[test]
    fn test_user_agent_with_prefix() {
        let client = HttpClient::new(&config(Some("infra/1.0")));

        let user_agent = client.default_headers().get("User-Agent").unwrap();
        assert!(user_agent.starts_with("infra/1.0 commercetools-provider/"));
    }

    #[test]
    fn test_accept_header_is_json() {
        let client = HttpClient::new(&config(None));

        assert_eq!(
            client.default_headers().get("Accept"),
            Some(&"application/json".to_string())
        );
    }

    #[test]
    fn test_error_message_prefers_body_message() {
        let response = HttpResponse::new(
            400,
            HashMap::new(),
            serde_json::json!({"statusCode": 400, "message": "Request body does not contain valid JSON."}),
        );
        assert_eq!(
            HttpClient::error_message(&response),
            "Request body does not contain valid JSON."
        );

        let response = HttpResponse::new(502, HashMap::new(), serde_json::json!({"raw_body": "Bad Gateway"}));
        assert!(HttpClient::error_message(&response).starts_with("HTTP 502"));
    }

    #[test]
    fn test_retry_delay_uses_retry_after() {
        let mut headers = HashMap::new();
        headers.insert("retry-after".to_string(), vec!["0.25".to_string()]);
        let response = HttpResponse::new(429, headers, serde_json::json!({}));
        assert_eq!(
            HttpClient::calculate_retry_delay(&response),
            Duration::from_millis(250)
        );

        let response = HttpResponse::new(503, HashMap::new(), serde_json::json!({}));
        assert_eq!(
            HttpClient::calculate_retry_delay(&response),
            Duration::from_secs(RETRY_WAIT_TIME)
        );
    }
}
