//! Resource registry and lifecycle driver.
//!
//! [`Provider`] owns a [`PlatformClient`] and dispatches plan, apply, refresh
//! and import requests to the [`Resource`] registered for a type name.

use std::collections::BTreeMap;

use async_trait::async_trait;

use crate::platform::PlatformClient;
use crate::resources::CustomerGroupResource;
use crate::schema::{
    LifecycleError, ResourceConfig, ResourceData, ResourceSchema, ResourceState,
};

/// Lifecycle callbacks of one resource type.
///
/// Callbacks read configuration from and write remote state into the given
/// [`ResourceData`]. A callback that finds the remote object gone clears the ID.
#[async_trait]
pub trait Resource: Send + Sync {
    /// The type name used in configuration.
    fn type_name(&self) -> &'static str;

    /// The attribute schema.
    fn schema(&self) -> &ResourceSchema;

    /// Creates the remote object and records its ID.
    async fn create(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError>;

    /// Refreshes local state from the remote object.
    async fn read(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError>;

    /// Applies changed attributes to the remote object.
    async fn update(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError>;

    /// Deletes the remote object.
    async fn delete(
        &self,
        d: &mut ResourceData,
        client: &PlatformClient,
    ) -> Result<(), LifecycleError>;

    /// Prepares data for importing an existing object by ID.
    ///
    /// The default takes the ID as is.
    ///
    /// # Errors
    ///
    /// Implementations may reject malformed IDs.
    fn import(&self, id: &str) -> Result<ResourceData, LifecycleError> {
        let mut d = ResourceData::default();
        d.set_id(id);
        Ok(d)
    }
}

/// The action [`Provider::apply`] takes for a prior state and configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Plan {
    /// Nothing exists yet.
    Create,
    /// The listed attributes differ from the prior state.
    Update(Vec<String>),
    /// The configuration was removed.
    Delete,
    /// Nothing to do.
    NoOp,
}

/// Registry of resource types bound to a platform client.
///
/// # Example
///
/// ```rust,ignore
/// let client = PlatformClient::connect(config).await?;
/// let provider = Provider::new(client);
///
/// let config = serde_json::from_value(json!({"name": "Resellers"}))?;
/// let state = provider
///     .apply("commercetools_customer_group", None, Some(&config))
///     .await?;
/// ```
pub struct Provider {
    client: PlatformClient,
    resources: BTreeMap<&'static str, Box<dyn Resource>>,
}

impl Provider {
    /// Creates a provider with all built-in resource types registered.
    #[must_use]
    pub fn new(client: PlatformClient) -> Self {
        Self {
            client,
            resources: BTreeMap::new(),
        }
        .with_resource(CustomerGroupResource::new())
    }

    /// Registers a resource type, replacing any with the same name.
    #[must_use]
    pub fn with_resource(mut self, resource: impl Resource + 'static) -> Self {
        self.resources.insert(resource.type_name(), Box::new(resource));
        self
    }

    /// Returns the platform client.
    #[must_use]
    pub const fn client(&self) -> &PlatformClient {
        &self.client
    }

    /// Iterates the registered type names.
    pub fn resource_types(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.resources.keys().copied()
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource, LifecycleError> {
        self.resources
            .get(type_name)
            .map(|resource| &**resource)
            .ok_or_else(|| LifecycleError::UnknownResourceType {
                type_name: type_name.to_string(),
            })
    }

    /// Returns the schema of a resource type.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownResourceType`] if the type is not registered.
    pub fn schema(&self, type_name: &str) -> Result<&ResourceSchema, LifecycleError> {
        Ok(self.resource(type_name)?.schema())
    }

    /// Decides what [`apply`](Self::apply) would do.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::UnknownResourceType`] if the type is not registered.
    pub fn plan(
        &self,
        type_name: &str,
        prior: Option<&ResourceState>,
        config: Option<&ResourceConfig>,
    ) -> Result<Plan, LifecycleError> {
        let resource = self.resource(type_name)?;

        Ok(match (prior, config) {
            (None, None) => Plan::NoOp,
            (None, Some(_)) => Plan::Create,
            (Some(_), None) => Plan::Delete,
            (Some(prior), Some(config)) => {
                let schema = resource.schema();
                let d = ResourceData::for_update(prior, config, schema);
                let changed: Vec<String> = schema
                    .configurable()
                    .filter(|a| d.has_change(a.name))
                    .map(|a| a.name.to_string())
                    .collect();
                if changed.is_empty() {
                    Plan::NoOp
                } else {
                    Plan::Update(changed)
                }
            }
        })
    }

    /// Converges the remote object toward `config`.
    ///
    /// Returns the new state, or `None` if the object was deleted or has gone.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::Schema`] for an invalid configuration, or the
    /// error of the failed callback.
    pub async fn apply(
        &self,
        type_name: &str,
        prior: Option<&ResourceState>,
        config: Option<&ResourceConfig>,
    ) -> Result<Option<ResourceState>, LifecycleError> {
        let resource = self.resource(type_name)?;
        if let Some(config) = config {
            resource.schema().validate(config)?;
        }

        let plan = self.plan(type_name, prior, config)?;
        tracing::debug!(type_name, ?plan, "Applying resource");

        match (plan, prior, config) {
            (Plan::Create, _, Some(config)) => {
                let mut d = ResourceData::new(config.clone());
                resource.create(&mut d, &self.client).await?;
                Ok(d.into_state())
            }
            (Plan::Update(_), Some(prior), Some(config)) => {
                let mut d = ResourceData::for_update(prior, config, resource.schema());
                resource.update(&mut d, &self.client).await?;
                Ok(d.into_state())
            }
            (Plan::Delete, Some(prior), _) => {
                let mut d = ResourceData::from_state(prior);
                resource.delete(&mut d, &self.client).await?;
                Ok(None)
            }
            (_, prior, _) => Ok(prior.cloned()),
        }
    }

    /// Re-reads a resource's remote state.
    ///
    /// Returns `None` if the object no longer exists.
    ///
    /// # Errors
    ///
    /// Returns the error of the read callback.
    pub async fn refresh(
        &self,
        type_name: &str,
        state: &ResourceState,
    ) -> Result<Option<ResourceState>, LifecycleError> {
        let resource = self.resource(type_name)?;
        let mut d = ResourceData::from_state(state);
        resource.read(&mut d, &self.client).await?;
        Ok(d.into_state())
    }

    /// Imports an existing remote object by ID.
    ///
    /// Returns `None` if no object has this ID.
    ///
    /// # Errors
    ///
    /// Returns [`LifecycleError::ImportNotSupported`] if the schema is not
    /// importable, or the error of the read callback.
    pub async fn import(
        &self,
        type_name: &str,
        id: &str,
    ) -> Result<Option<ResourceState>, LifecycleError> {
        let resource = self.resource(type_name)?;
        if !resource.schema().importable {
            return Err(LifecycleError::ImportNotSupported {
                type_name: type_name.to_string(),
            });
        }

        let mut d = resource.import(id)?;
        resource.read(&mut d, &self.client).await?;
        Ok(d.into_state())
    }
}

impl std::fmt::Debug for Provider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Provider")
            .field("client", &self.client)
            .field("resources", &self.resources.keys().collect::<Vec<_>>())
            .finish()
    }
}

// Verify Provider is Send + Sync at compile time
const _: fn() = || {
    const fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Provider>();
};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::{AccessToken, AuthScopes};
    use crate::config::{ClientId, ClientSecret, ProjectKey, ProviderConfig};
    use serde_json::json;

    fn provider() -> Provider {
        let config = ProviderConfig::builder()
            .client_id(ClientId::new("client").unwrap())
            .client_secret(ClientSecret::new("secret").unwrap())
            .project_key(ProjectKey::new("my-project").unwrap())
            .build()
            .unwrap();
        let token = AccessToken::new("token", AuthScopes::new(), None);
        Provider::new(PlatformClient::with_token(config, token))
    }

    fn state() -> ResourceState {
        ResourceState {
            id: "abc".to_string(),
            attributes: serde_json::from_value(json!({"name": "Gold", "key": "gold", "version": 3}))
                .unwrap(),
        }
    }

    fn config(value: serde_json::Value) -> ResourceConfig {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_registers_customer_group() {
        let provider = provider();
        let types: Vec<_> = provider.resource_types().collect();
        assert_eq!(types, vec!["commercetools_customer_group"]);
        assert!(provider.schema("commercetools_customer_group").is_ok());
    }

    #[test]
    fn test_unknown_resource_type() {
        let binding = provider();
        let result = binding.schema("commercetools_channel");
        assert!(matches!(
            result,
            Err(LifecycleError::UnknownResourceType { type_name })
                if type_name == "commercetools_channel"
        ));
    }

    #[test]
    fn test_plan() {
        let provider = provider();
        let t = "commercetools_customer_group";
        let prior = state();

        assert_eq!(provider.plan(t, None, None).unwrap(), Plan::NoOp);
        assert_eq!(
            provider.plan(t, None, Some(&config(json!({"name": "Gold"})))).unwrap(),
            Plan::Create
        );
        assert_eq!(provider.plan(t, Some(&prior), None).unwrap(), Plan::Delete);
        assert_eq!(
            provider
                .plan(t, Some(&prior), Some(&config(json!({"name": "Gold", "key": "gold"}))))
                .unwrap(),
            Plan::NoOp
        );
        assert_eq!(
            provider
                .plan(t, Some(&prior), Some(&config(json!({"name": "Silver"}))))
                .unwrap(),
            Plan::Update(vec!["key".to_string(), "name".to_string()])
        );
    }

    #[test]
    fn test_plan_treats_empty_key_as_unset() {
        let provider = provider();
        let t = "commercetools_customer_group";
        let prior = ResourceState {
            id: "abc".to_string(),
            attributes: serde_json::from_value(json!({"name": "Gold", "version": 1})).unwrap(),
        };

        assert_eq!(
            provider
                .plan(t, Some(&prior), Some(&config(json!({"name": "Gold", "key": ""}))))
                .unwrap(),
            Plan::NoOp
        );
        assert_eq!(
            provider
                .plan(t, Some(&state()), Some(&config(json!({"name": "Gold", "key": ""}))))
                .unwrap(),
            Plan::Update(vec!["key".to_string()])
        );
    }

    #[tokio::test]
    async fn test_apply_rejects_invalid_config_before_calling_api() {
        let result = provider()
            .apply(
                "commercetools_customer_group",
                None,
                Some(&config(json!({"key": "gold"}))),
            )
            .await;
        assert!(matches!(result, Err(LifecycleError::Schema(_))));
    }

    #[tokio::test]
    async fn test_apply_noop_returns_prior_state() {
        let prior = state();
        let result = provider()
            .apply(
                "commercetools_customer_group",
                Some(&prior),
                Some(&config(json!({"name": "Gold", "key": "gold"}))),
            )
            .await
            .unwrap();
        assert_eq!(result, Some(prior));
    }
}
