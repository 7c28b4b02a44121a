//! Resource schemas and the lifecycle primitives callbacks are written against.
//!
//! - [`ResourceSchema`] and [`Attribute`]: Declared attributes of a resource type
//! - [`ResourceData`]: The attribute values a callback reads and writes
//! - [`ResourceState`]: Persisted state of one resource instance
//! - [`retry`]: Retry-with-backoff for transient remote failures
//! - [`LifecycleError`] and [`SchemaError`]: Errors surfaced to the caller

mod errors;
mod resource_data;
mod retry;

pub use errors::{LifecycleError, SchemaError};
pub use resource_data::{ResourceConfig, ResourceData, ResourceState};
pub use retry::{retry, RetryError, RetryPolicy};

use serde_json::Value;

/// The value type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeType {
    /// A JSON string.
    String,
    /// A JSON integer.
    Int,
}

impl AttributeType {
    const fn name(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Int => "int",
        }
    }

    fn accepts(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Int => value.as_i64().is_some(),
        }
    }
}

/// Who supplies an attribute's value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AttributeMode {
    /// Must be set in configuration.
    Required,
    /// May be set in configuration.
    Optional,
    /// Set only by the resource from remote state.
    Computed,
}

/// A single declared attribute.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    /// Attribute name.
    pub name: &'static str,
    /// Value type.
    pub kind: AttributeType,
    /// Who supplies the value.
    pub mode: AttributeMode,
    /// Documentation shown to users.
    pub description: &'static str,
}

impl Attribute {
    /// Declares a required attribute.
    #[must_use]
    pub const fn required(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            mode: AttributeMode::Required,
            description: "",
        }
    }

    /// Declares an optional attribute.
    #[must_use]
    pub const fn optional(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            mode: AttributeMode::Optional,
            description: "",
        }
    }

    /// Declares a computed attribute.
    #[must_use]
    pub const fn computed(name: &'static str, kind: AttributeType) -> Self {
        Self {
            name,
            kind,
            mode: AttributeMode::Computed,
            description: "",
        }
    }

    /// Sets the description.
    #[must_use]
    pub const fn describe(mut self, description: &'static str) -> Self {
        self.description = description;
        self
    }
}

/// The declared shape of a resource type.
///
/// # Example
///
/// ```rust
/// use commercetools_provider::schema::{Attribute, AttributeType, ResourceSchema};
/// use serde_json::json;
///
/// let schema = ResourceSchema::new("A tag")
///     .attribute(Attribute::required("name", AttributeType::String))
///     .attribute(Attribute::computed("version", AttributeType::Int));
///
/// let config = serde_json::from_value(json!({"name": "x"})).unwrap();
/// assert!(schema.validate(&config).is_ok());
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ResourceSchema {
    /// Documentation shown to users.
    pub description: &'static str,
    /// Declared attributes.
    pub attributes: Vec<Attribute>,
    /// Whether existing remote objects can be imported by ID.
    pub importable: bool,
}

impl ResourceSchema {
    /// Creates an empty schema.
    #[must_use]
    pub const fn new(description: &'static str) -> Self {
        Self {
            description,
            attributes: Vec::new(),
            importable: false,
        }
    }

    /// Adds an attribute.
    #[must_use]
    pub fn attribute(mut self, attribute: Attribute) -> Self {
        self.attributes.push(attribute);
        self
    }

    /// Enables import by ID.
    #[must_use]
    pub const fn importable(mut self) -> Self {
        self.importable = true;
        self
    }

    /// Looks up an attribute by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    /// Iterates the attributes that configuration may set.
    pub fn configurable(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes
            .iter()
            .filter(|a| a.mode != AttributeMode::Computed)
    }

    /// Checks a configuration against this schema.
    ///
    /// `null` values are treated as unset, and so are empty strings for
    /// required attributes.
    ///
    /// # Errors
    ///
    /// Returns the first [`SchemaError`] found.
    pub fn validate(&self, config: &ResourceConfig) -> Result<(), SchemaError> {
        for (name, value) in config {
            let attribute = self
                .get(name)
                .ok_or_else(|| SchemaError::UnknownAttribute { name: name.clone() })?;

            if value.is_null() {
                continue;
            }
            if attribute.mode == AttributeMode::Computed {
                return Err(SchemaError::ComputedAttributeSet {
                    name: attribute.name,
                });
            }
            if !attribute.kind.accepts(value) {
                return Err(SchemaError::TypeMismatch {
                    name: attribute.name,
                    expected: attribute.kind.name(),
                });
            }
        }

        for attribute in &self.attributes {
            if attribute.mode == AttributeMode::Required
                && !config.get(attribute.name).is_some_and(resource_data::is_set)
            {
                return Err(SchemaError::MissingRequiredAttribute {
                    name: attribute.name,
                });
            }
        }

        Ok(())
    }
}
