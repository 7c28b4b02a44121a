//! Lifecycle error types.

use std::time::Duration;

use thiserror::Error;

use crate::platform::PlatformError;

/// A configuration does not match its resource schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SchemaError {
    /// A required attribute is unset.
    #[error("The argument '{name}' is required, but no definition was found.")]
    MissingRequiredAttribute {
        /// Attribute name.
        name: &'static str,
    },

    /// A value has the wrong type.
    #[error("Inappropriate value for attribute '{name}': {expected} required.")]
    TypeMismatch {
        /// Attribute name.
        name: &'static str,
        /// Expected type name.
        expected: &'static str,
    },

    /// A computed attribute was set in configuration.
    #[error("Attribute '{name}' is computed and cannot be set in configuration.")]
    ComputedAttributeSet {
        /// Attribute name.
        name: &'static str,
    },

    /// An attribute is not declared by the schema.
    #[error("An argument named '{name}' is not expected here.")]
    UnknownAttribute {
        /// Attribute name.
        name: String,
    },
}

/// Error returned by resource lifecycle operations.
#[derive(Debug, Error)]
pub enum LifecycleError {
    /// The Platform API call failed.
    #[error(transparent)]
    Platform(#[from] PlatformError),

    /// The configuration is invalid.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// A retried operation did not succeed in time.
    #[error("timeout while waiting for state to become 'success' (timeout: {timeout:?}): {source}")]
    Timeout {
        /// The configured timeout.
        timeout: Duration,
        /// The error of the last attempt.
        source: Box<LifecycleError>,
    },

    /// No resource type with this name is registered.
    #[error("Unknown resource type '{type_name}'")]
    UnknownResourceType {
        /// The requested type name.
        type_name: String,
    },

    /// The resource type does not support import.
    #[error("Resource type '{type_name}' does not support import")]
    ImportNotSupported {
        /// The requested type name.
        type_name: String,
    },
}

impl LifecycleError {
    /// Returns the platform error at the root of this error, if any.
    #[must_use]
    pub fn platform_error(&self) -> Option<&PlatformError> {
        match self {
            Self::Platform(e) => Some(e),
            Self::Timeout { source, .. } => source.platform_error(),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_error_messages() {
        assert_eq!(
            SchemaError::MissingRequiredAttribute { name: "name" }.to_string(),
            "The argument 'name' is required, but no definition was found."
        );
        assert!(SchemaError::TypeMismatch {
            name: "version",
            expected: "int"
        }
        .to_string()
        .contains("int required"));
    }

    #[test]
    fn test_timeout_wraps_last_error() {
        let error = LifecycleError::Timeout {
            timeout: Duration::from_secs(60),
            source: Box::new(LifecycleError::UnknownResourceType {
                type_name: "boom".to_string(),
            }),
        };
        let message = error.to_string();
        assert!(message.contains("60s"));
        assert!(message.contains("boom"));
        assert!(error.platform_error().is_none());
    }
}
