//! The `commercetools_customer_group` resource.
//!
//! A customer can be a member of a customer group (for example reseller or
//! gold member). Special prices can be assigned to specific products based on
//! a customer group.
//!
//! See also the [Customer Group API Documentation](https://docs.commercetools.com/api/projects/customerGroups).

use std::time::Duration;

use async_trait::async_trait;

use crate::clients::HttpError;
use crate::platform::{
    CustomerGroup, CustomerGroupDraft, CustomerGroupUpdate, CustomerGroupUpdateAction,
    PlatformClient, PlatformError,
};
use crate::provider::Resource;
use crate::schema::{
    retry, Attribute, AttributeType, LifecycleError, ResourceData, ResourceSchema, RetryError,
    RetryPolicy, SchemaError,
};

/// Type name under which the resource is registered.
pub const TYPE_NAME: &str = "commercetools_customer_group";

/// Time budget for retrying the create call.
pub const CREATE_TIMEOUT: Duration = Duration::from_secs(60);

/// Lifecycle callbacks for customer groups.
#[derive(Debug, Clone)]
pub struct CustomerGroupResource {
    schema: ResourceSchema,
    create_retry: RetryPolicy,
}

impl Default for CustomerGroupResource {
    fn default() -> Self {
        Self::new()
    }
}

impl CustomerGroupResource {
    /// Creates the resource with its schema and default retry policy.
    #[must_use]
    pub fn new() -> Self {
        let schema = ResourceSchema::new(
            "A Customer can be a member of a customer group (for example reseller, gold member). \
             Special prices can be assigned to specific products based on a customer group.",
        )
        .attribute(
            Attribute::optional("key", AttributeType::String)
                .describe("User-specific unique identifier for the customer group"),
        )
        .attribute(Attribute::computed("version", AttributeType::Int))
        .attribute(
            Attribute::required("name", AttributeType::String)
                .describe("Unique within the project"),
        )
        .importable();

        Self {
            schema,
            create_retry: RetryPolicy::with_timeout(CREATE_TIMEOUT),
        }
    }

    /// Overrides the retry policy used around create.
    #[must_use]
    pub const fn with_create_retry(mut self, policy: RetryPolicy) -> Self {
        self.create_retry = policy;
        self
    }

    fn draft(d: &ResourceData) -> Result<CustomerGroupDraft, LifecycleError> {
        let name = d
            .get_string("name")
            .ok_or(SchemaError::MissingRequiredAttribute { name: "name" })?;
        let mut draft = CustomerGroupDraft::new(name);
        if let Some(key) = d.get_string("key") {
            draft = draft.with_key(key);
        }
        Ok(draft)
    }

    fn update_actions(d: &ResourceData) -> Vec<CustomerGroupUpdateAction> {
        let mut actions = Vec::new();

        if d.has_change("name") {
            if let Some(name) = d.get_string("name") {
                actions.push(CustomerGroupUpdateAction::ChangeName {
                    name: name.to_string(),
                });
            }
        }

        if d.has_change("key") {
            actions.push(CustomerGroupUpdateAction::SetKey {
                key: d.get_string("key").map(ToString::to_string),
            });
        }

        actions
    }

    fn apply_remote(d: &mut ResourceData, group: &CustomerGroup) {
        d.set("version", group.version);
        d.set("name", group.name.clone());
        d.set("key", group.key.clone());
    }
}

#[async_trait]
impl Resource for CustomerGroupResource {
    fn type_name(&self) -> &'static str {
        TYPE_NAME
    }

    fn schema(&self) -> &ResourceSchema {
        &self.schema
    }

    async fn create(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError> {
        let draft = Self::draft(d)?;

        let group = retry(self.create_retry, || async {
            client
                .customer_groups()
                .post(draft.clone())
                .execute()
                .await
                .map_err(handle_commercetools_error)
        })
        .await?;

        d.set_id(group.id.clone());
        d.set("version", group.version);

        self.read(d, client).await
    }

    async fn read(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError> {
        tracing::debug!(
            "Reading customer group from commercetools, with customer group id: {}",
            d.id()
        );

        let group = match client.customer_groups().with_id(d.id()).get().execute().await {
            Ok(group) => group,
            Err(e) if e.is_not_found() => {
                tracing::debug!(
                    id = d.id(),
                    "Customer group no longer exists, removing from state"
                );
                d.set_id("");
                return Ok(());
            }
            Err(e) => return Err(e.into()),
        };

        tracing::debug!(
            "Found following customer group:\n{}",
            serde_json::to_string_pretty(&group).unwrap_or_default()
        );
        Self::apply_remote(d, &group);

        Ok(())
    }

    async fn update(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError> {
        let current = client
            .customer_groups()
            .with_id(d.id())
            .get()
            .execute()
            .await?;

        let input = CustomerGroupUpdate {
            version: current.version,
            actions: Self::update_actions(d),
        };

        tracing::debug!(
            "Will perform update operation with the following actions:\n{}",
            serde_json::to_string_pretty(&input.actions).unwrap_or_default()
        );

        if input.actions.is_empty() {
            d.set("version", current.version);
            return self.read(d, client).await;
        }

        if let Err(e) = client
            .customer_groups()
            .with_id(d.id())
            .post(input)
            .execute()
            .await
        {
            if let PlatformError::Response(response) = &e {
                tracing::debug!("{}: {}", response, response.format_errors());
            }
            return Err(e.into());
        }

        self.read(d, client).await
    }

    async fn delete(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError> {
        let version = d.get_int("version").unwrap_or_default();

        let result = client
            .customer_groups()
            .with_id(d.id())
            .delete()
            .version(version)
            .execute()
            .await;

        if let Err(e) = result {
            tracing::error!("Error during deleting customer group resource {}", e);
        }
        Ok(())
    }
}

/// Classifies a platform error for [`retry`].
///
/// Transport failures, throttling, conflicts and server errors are worth
/// another attempt; any other API response means the request itself is wrong.
#[must_use]
pub fn handle_commercetools_error(error: PlatformError) -> RetryError {
    let retryable = match &error {
        PlatformError::Response(response) => {
            matches!(response.status_code, 409 | 429 | 500..=599)
                || response.has_error_code("ConcurrentModification")
        }
        PlatformError::Http(HttpError::InvalidRequest(_)) => false,
        PlatformError::Http(e) => e.status_code().map_or(true, |code| code == 429 || code >= 500),
        PlatformError::Auth(e) => e.status() == 0 || e.status() >= 500,
        PlatformError::Serialize { .. } | PlatformError::Deserialize { .. } => false,
    };

    if retryable {
        RetryError::retryable(error)
    } else {
        tracing::debug!("Received non-retryable error: {}", error);
        RetryError::non_retryable(error)
    }
}
