//! Attribute values exchanged between the lifecycle driver and callbacks.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::schema::{AttributeMode, ResourceSchema};

/// Declared configuration of one resource instance, keyed by attribute name.
pub type ResourceConfig = BTreeMap<String, Value>;

/// Persisted state of one resource instance.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Remote identifier.
    pub id: String,
    /// Attribute values as last read from the remote side.
    #[serde(default)]
    pub attributes: BTreeMap<String, Value>,
}

impl ResourceState {
    /// Returns an attribute value, treating `null` and `""` as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|v| is_set(v))
    }
}

/// `null` and the empty string both mean "unset".
pub(crate) fn is_set(value: &Value) -> bool {
    !value.is_null() && value.as_str() != Some("")
}

/// The working set of attribute values for one lifecycle callback.
///
/// Values read through [`get`](Self::get) reflect configuration merged over
/// prior state; [`has_change`](Self::has_change) compares a value against the
/// prior state.
///
/// An empty ID means the resource does not exist remotely.
///
/// # Example
///
/// ```rust
/// use commercetools_provider::schema::ResourceData;
/// use serde_json::json;
///
/// let mut d = ResourceData::new(serde_json::from_value(json!({"name": "Gold"})).unwrap());
/// assert!(d.has_change("name"));
///
/// d.set_id("abc");
/// d.set("version", 1);
/// let state = d.into_state().unwrap();
/// assert_eq!(state.id, "abc");
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResourceData {
    id: String,
    prior: BTreeMap<String, Value>,
    current: BTreeMap<String, Value>,
}

impl ResourceData {
    /// Data for a resource that does not exist yet.
    #[must_use]
    pub fn new(config: ResourceConfig) -> Self {
        Self {
            id: String::new(),
            prior: BTreeMap::new(),
            current: config,
        }
    }

    /// Data holding exactly the given state, with no pending changes.
    #[must_use]
    pub fn from_state(state: &ResourceState) -> Self {
        Self {
            id: state.id.clone(),
            prior: state.attributes.clone(),
            current: state.attributes.clone(),
        }
    }

    /// Data for updating `state` to `config`.
    ///
    /// Computed attributes keep their state values; all others take the
    /// configured value, or become unset if configuration omits them.
    #[must_use]
    pub fn for_update(
        state: &ResourceState,
        config: &ResourceConfig,
        schema: &ResourceSchema,
    ) -> Self {
        let mut current = BTreeMap::new();
        for attribute in &schema.attributes {
            let value = if attribute.mode == AttributeMode::Computed {
                state.attributes.get(attribute.name)
            } else {
                config.get(attribute.name)
            };
            if let Some(value) = value {
                current.insert(attribute.name.to_string(), value.clone());
            }
        }

        Self {
            id: state.id.clone(),
            prior: state.attributes.clone(),
            current,
        }
    }

    /// Returns the remote identifier, empty if the resource does not exist.
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Sets the remote identifier. An empty ID marks the resource as gone.
    pub fn set_id(&mut self, id: impl Into<String>) {
        self.id = id.into();
    }

    /// Returns a value, treating `null` and `""` as absent.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.current.get(name).filter(|v| is_set(v))
    }

    /// Returns a string value.
    #[must_use]
    pub fn get_string(&self, name: &str) -> Option<&str> {
        self.get(name).and_then(Value::as_str)
    }

    /// Returns an integer value.
    #[must_use]
    pub fn get_int(&self, name: &str) -> Option<i64> {
        self.get(name).and_then(Value::as_i64)
    }

    /// Sets a value. `None` converts to `null`, which unsets it, as does `""`.
    pub fn set(&mut self, name: &str, value: impl Into<Value>) {
        self.current.insert(name.to_string(), value.into());
    }

    /// Returns `true` if the value differs from the prior state.
    #[must_use]
    pub fn has_change(&self, name: &str) -> bool {
        let prior = self.prior.get(name).filter(|v| is_set(v));
        prior != self.get(name)
    }

    /// Converts into persisted state, or `None` if the ID is empty.
    ///
    /// Unset values are dropped.
    #[must_use]
    pub fn into_state(self) -> Option<ResourceState> {
        if self.id.is_empty() {
            return None;
        }
        let attributes = self
            .current
            .into_iter()
            .filter(|(_, v)| is_set(v))
            .collect();
        Some(ResourceState {
            id: self.id,
            attributes,
        })
    }
}
