//! HTTP response type for the commercetools Platform API.

use std::collections::HashMap;

/// An HTTP response from the Platform API.
///
/// Contains the response status code, headers, body, and the parsed
/// `Retry-After` value.
#[derive(Clone, Debug)]
pub struct HttpResponse {
    /// The HTTP status code.
    pub code: u16,
    /// Response headers, lowercased (headers may have multiple values).
    pub headers: HashMap<String, Vec<String>>,
    /// The parsed response body.
    pub body: serde_json::Value,
    /// Seconds to wait before retrying (from `Retry-After` header).
    pub retry_request_after: Option<f64>,
}

impl HttpResponse {
    /// Creates a new `HttpResponse`, parsing `Retry-After` from the headers.
    #[must_use]
    pub fn new(code: u16, headers: HashMap<String, Vec<String>>, body: serde_json::Value) -> Self {
        let retry_request_after = headers
            .get("retry-after")
            .and_then(|values| values.first())
            .and_then(|value| value.parse::<f64>().ok());

        Self {
            code,
            headers,
            body,
            retry_request_after,
        }
    }

    /// Returns `true` if the response status code is in the 2xx range.
    #[must_use]
    pub const fn is_ok(&self) -> bool {
        self.code >= 200 && self.code <= 299
    }

    /// Returns the `X-Correlation-ID` header value, if present.
    ///
    /// commercetools support asks for this ID when investigating failed requests.
    #[must_use]
    pub fn correlation_id(&self) -> Option<&str> {
        self.headers
            .get("x-correlation-id")
            .and_then(|values| values.first())
            .map(String::as_str)
    }
}
