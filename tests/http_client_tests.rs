//! Integration tests for the HTTP client functionality.
//!
//! These tests verify the client configuration, request building,
//! retry handling, and error mapping behavior.

use commercetools_provider::clients::{HttpClient, HttpMethod, HttpRequest};
use commercetools_provider::{
    ApiUrl, ClientId, ClientSecret, HttpError, InvalidHttpRequestError, ProjectKey, ProviderConfig,
};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Creates a configuration pointing at the given API URL.
fn create_test_config(api_url: &str, project: &str) -> ProviderConfig {
    ProviderConfig::builder()
        .client_id(ClientId::new("client").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .project_key(ProjectKey::new(project).unwrap())
        .api_url(ApiUrl::new(api_url).unwrap())
        .build()
        .unwrap()
}

// ============================================================================
// Configuration
// ============================================================================

#[test]
fn test_client_built_from_config() {
    let config = create_test_config("https://api.us-central1.gcp.commercetools.com/", "shop-us");
    let client = HttpClient::new(&config);

    assert_eq!(client.base_uri(), "https://api.us-central1.gcp.commercetools.com");
    assert_eq!(client.base_path(), "/shop-us");

    let user_agent = client.default_headers().get("User-Agent").unwrap();
    assert!(user_agent.starts_with("commercetools-provider/"));
}

#[test]
fn test_user_agent_prefix() {
    let config = ProviderConfig::builder()
        .client_id(ClientId::new("client").unwrap())
        .client_secret(ClientSecret::new("secret").unwrap())
        .project_key(ProjectKey::new("shop-eu").unwrap())
        .user_agent_prefix("terraform/1.7")
        .build()
        .unwrap();
    let client = HttpClient::new(&config);

    let user_agent = client.default_headers().get("User-Agent").unwrap();
    assert!(user_agent.starts_with("terraform/1.7 commercetools-provider/"));
}

#[test]
fn test_multiple_clients_for_different_projects() {
    let client1 = HttpClient::new(&create_test_config("https://api.example.com", "project-one"));
    let client2 = HttpClient::new(&create_test_config("https://api.example.com", "project-two"));

    assert_eq!(client1.base_path(), "/project-one");
    assert_eq!(client2.base_path(), "/project-two");
}

#[test]
fn test_invalid_request_produces_correct_error() {
    let result = HttpRequest::builder(HttpMethod::Post, "customer-groups").build();
    assert!(matches!(
        result,
        Err(InvalidHttpRequestError::MissingBody { .. })
    ));

    let result = HttpRequest::builder(HttpMethod::Get, "customer-groups")
        .tries(0)
        .build();
    assert!(matches!(result, Err(InvalidHttpRequestError::ZeroTries)));
}

// ============================================================================
// Requests against a mock server
// ============================================================================

#[tokio::test]
async fn test_request_sends_body_query_and_headers() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/test-project/customer-groups"))
        .and(query_param("expand", "none"))
        .and(header("content-type", "application/json"))
        .and(header("x-custom", "value"))
        .and(body_json(json!({"groupName": "Gold"})))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "test-project"));
    let request = HttpRequest::builder(HttpMethod::Post, "customer-groups")
        .body(json!({"groupName": "Gold"}))
        .query_param("expand", "none")
        .header("X-Custom", "value")
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert_eq!(response.code, 201);
    assert_eq!(response.body["id"], "abc");
}

#[tokio::test]
async fn test_client_error_is_not_retried() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-project/customer-groups/abc"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("X-Correlation-ID", "projects-test-1234")
                .set_body_json(json!({
                    "statusCode": 404,
                    "message": "The Resource with ID 'abc' was not found.",
                    "errors": [{"code": "ResourceNotFound", "message": "The Resource with ID 'abc' was not found."}]
                })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "test-project"));
    let request = HttpRequest::builder(HttpMethod::Get, "customer-groups/abc")
        .tries(3)
        .build()
        .unwrap();

    match client.request(request).await {
        Err(HttpError::Response(e)) => {
            assert_eq!(e.code, 404);
            assert_eq!(e.message, "The Resource with ID 'abc' was not found.");
            assert_eq!(e.error_reference.as_deref(), Some("projects-test-1234"));
        }
        other => panic!("Expected response error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_server_error_is_retried_until_success() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-project/customer-groups/abc"))
        .respond_with(
            ResponseTemplate::new(503)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"statusCode": 503, "message": "Service unavailable"})),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/test-project/customer-groups/abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "abc"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "test-project"));
    let request = HttpRequest::builder(HttpMethod::Get, "customer-groups/abc")
        .tries(2)
        .build()
        .unwrap();

    let response = client.request(request).await.unwrap();

    assert!(response.is_ok());
}

#[tokio::test]
async fn test_max_retries_exceeded() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/test-project/customer-groups/abc"))
        .respond_with(
            ResponseTemplate::new(429)
                .insert_header("Retry-After", "0")
                .set_body_json(json!({"statusCode": 429, "message": "Too many requests"})),
        )
        .expect(2)
        .mount(&server)
        .await;

    let client = HttpClient::new(&create_test_config(&server.uri(), "test-project"));
    let request = HttpRequest::builder(HttpMethod::Get, "customer-groups/abc")
        .tries(2)
        .build()
        .unwrap();

    match client.request(request).await {
        Err(error @ HttpError::MaxRetries(_)) => {
            assert_eq!(error.status_code(), Some(429));
        }
        other => panic!("Expected max retries error, got {other:?}"),
    }
}
