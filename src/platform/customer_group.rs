//! Customer group models and the `customer-groups` endpoints.
//!
//! A customer can be a member of a customer group (for example reseller or
//! gold member). Special prices can be assigned to products based on a
//! customer group.
//!
//! # Example
//!
//! ```rust,ignore
//! use commercetools_provider::platform::{CustomerGroupDraft, PlatformClient};
//!
//! let group = client
//!     .customer_groups()
//!     .post(CustomerGroupDraft::new("Resellers").with_key("resellers"))
//!     .execute()
//!     .await?;
//!
//! let fetched = client.customer_groups().with_id(&group.id).get().execute().await?;
//! assert_eq!(fetched.version, group.version);
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::clients::HttpMethod;
use crate::platform::{PlatformClient, PlatformError};

/// Endpoint path relative to the project.
const ENDPOINT: &str = "customer-groups";

/// Resource name used in errors.
const RESOURCE: &str = "CustomerGroup";

/// A customer group as stored by commercetools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroup {
    /// Server-assigned identifier.
    pub id: String,
    /// Version used for optimistic concurrency control.
    pub version: i64,
    /// Unique within the project.
    pub name: String,
    /// User-specific unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_at: Option<DateTime<Utc>>,
}

/// Payload for creating a customer group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerGroupDraft {
    /// Name of the new group.
    pub group_name: String,
    /// Optional user-specific unique identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
}

impl CustomerGroupDraft {
    /// Creates a draft without a key.
    #[must_use]
    pub fn new(group_name: impl Into<String>) -> Self {
        Self {
            group_name: group_name.into(),
            key: None,
        }
    }

    /// Sets the key.
    #[must_use]
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }
}

/// A single update action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "action", rename_all = "camelCase")]
pub enum CustomerGroupUpdateAction {
    /// Renames the group.
    ChangeName {
        /// The new name.
        name: String,
    },
    /// Sets the key. `None` removes it.
    SetKey {
        #[serde(default, skip_serializing_if = "Option::is_none")]
        key: Option<String>,
    },
}

/// Payload for updating a customer group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerGroupUpdate {
    /// Expected current version of the group.
    pub version: i64,
    /// Actions applied in order.
    pub actions: Vec<CustomerGroupUpdateAction>,
}

/// Entry point for the `customer-groups` endpoints.
///
/// Obtained from [`PlatformClient::customer_groups`].
#[derive(Debug, Clone, Copy)]
pub struct CustomerGroupsRequestBuilder<'a> {
    client: &'a PlatformClient,
}

impl<'a> CustomerGroupsRequestBuilder<'a> {
    pub(crate) const fn new(client: &'a PlatformClient) -> Self {
        Self { client }
    }

    /// `POST /customer-groups`: creates a group.
    #[must_use]
    pub fn post(self, draft: CustomerGroupDraft) -> CustomerGroupRequest<'a, CustomerGroupDraft> {
        CustomerGroupRequest::new(self.client, HttpMethod::Post, ENDPOINT.to_string())
            .with_body(draft)
    }

    /// Addresses a single group by ID.
    #[must_use]
    pub fn with_id(self, id: impl AsRef<str>) -> CustomerGroupByPathRequestBuilder<'a> {
        CustomerGroupByPathRequestBuilder {
            client: self.client,
            path: format!("{ENDPOINT}/{}", urlencoding::encode(id.as_ref())),
        }
    }

    /// Addresses a single group by key.
    #[must_use]
    pub fn with_key(self, key: impl AsRef<str>) -> CustomerGroupByPathRequestBuilder<'a> {
        CustomerGroupByPathRequestBuilder {
            client: self.client,
            path: format!("{ENDPOINT}/key={}", urlencoding::encode(key.as_ref())),
        }
    }
}

/// Operations on a single customer group, addressed by ID or key.
#[derive(Debug, Clone)]
pub struct CustomerGroupByPathRequestBuilder<'a> {
    client: &'a PlatformClient,
    path: String,
}

impl<'a> CustomerGroupByPathRequestBuilder<'a> {
    /// `GET`: fetches the group.
    #[must_use]
    pub fn get(self) -> CustomerGroupRequest<'a> {
        CustomerGroupRequest::new(self.client, HttpMethod::Get, self.path)
    }

    /// `POST`: applies update actions.
    #[must_use]
    pub fn post(
        self,
        update: CustomerGroupUpdate,
    ) -> CustomerGroupRequest<'a, CustomerGroupUpdate> {
        CustomerGroupRequest::new(self.client, HttpMethod::Post, self.path).with_body(update)
    }

    /// `DELETE`: deletes the group. Set the expected version with
    /// [`CustomerGroupRequest::version`].
    #[must_use]
    pub fn delete(self) -> CustomerGroupRequest<'a> {
        CustomerGroupRequest::new(self.client, HttpMethod::Delete, self.path)
    }
}

/// A prepared request that resolves to a [`CustomerGroup`].
#[derive(Debug)]
pub struct CustomerGroupRequest<'a, B = ()> {
    client: &'a PlatformClient,
    method: HttpMethod,
    path: String,
    body: Option<B>,
    query: Vec<(String, String)>,
}

impl<'a> CustomerGroupRequest<'a> {
    const fn new(client: &'a PlatformClient, method: HttpMethod, path: String) -> Self {
        Self {
            client,
            method,
            path,
            body: None,
            query: Vec::new(),
        }
    }

    fn with_body<B>(self, body: B) -> CustomerGroupRequest<'a, B> {
        CustomerGroupRequest {
            client: self.client,
            method: self.method,
            path: self.path,
            body: Some(body),
            query: self.query,
        }
    }
}

impl<B: Serialize> CustomerGroupRequest<'_, B> {
    /// Adds the `version` query parameter required by `DELETE`.
    #[must_use]
    pub fn version(mut self, version: i64) -> Self {
        self.query.push(("version".to_string(), version.to_string()));
        self
    }

    /// Returns the request path relative to the project.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Sends the request.
    ///
    /// # Errors
    ///
    /// Returns [`PlatformError::Response`] for API errors, or another
    /// [`PlatformError`] variant for transport, auth or decoding failures.
    pub async fn execute(self) -> Result<CustomerGroup, PlatformError> {
        let body = self
            .body
            .as_ref()
            .map(serde_json::to_value)
            .transpose()
            .map_err(|source| PlatformError::Serialize {
                resource: RESOURCE,
                source,
            })?;

        let response = self
            .client
            .send(self.method, &self.path, body, &self.query)
            .await?;

        serde_json::from_value(response.body).map_err(|source| PlatformError::Deserialize {
            resource: RESOURCE,
            source,
        })
    }
}
