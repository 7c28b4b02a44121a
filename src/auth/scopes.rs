//! OAuth scope handling for the commercetools auth server.
//!
//! This module provides the [`AuthScopes`] type for managing OAuth scopes,
//! including parsing and serialization.

use crate::config::ProjectKey;
use crate::error::ConfigError;
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// A set of OAuth scopes for commercetools API access.
///
/// commercetools scopes have the form `permission:projectKey`, for example
/// `manage_customer_groups:my-project`. They are sent to the auth server as
/// a space-separated list.
///
/// # Example
///
/// ```rust
/// use commercetools_provider::AuthScopes;
///
/// let scopes: AuthScopes = "manage_customer_groups:shop view_products:shop".parse().unwrap();
/// assert_eq!(scopes.to_string(), "manage_customer_groups:shop view_products:shop");
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct AuthScopes {
    scopes: BTreeSet<String>,
}

impl AuthScopes {
    /// Creates an empty scope set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the default scope for a project: `manage_project:{key}`.
    #[must_use]
    pub fn manage_project(project_key: &ProjectKey) -> Self {
        let mut scopes = BTreeSet::new();
        scopes.insert(format!("manage_project:{project_key}"));
        Self { scopes }
    }

    /// Returns `true` if the scope set is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }

    /// Returns an iterator over the scopes.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.scopes.iter().map(String::as_str)
    }

    fn validate(scope: &str) -> Result<(), ConfigError> {
        let valid = scope
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | ':' | '-'));
        if valid {
            Ok(())
        } else {
            Err(ConfigError::InvalidScopes {
                reason: format!("Invalid characters in scope: '{scope}'"),
            })
        }
    }
}

impl FromStr for AuthScopes {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut scopes = BTreeSet::new();

        // Accept commas as well as whitespace; the env var is often comma separated
        for scope in s.split(|c: char| c.is_whitespace() || c == ',') {
            if scope.is_empty() {
                continue;
            }
            Self::validate(scope)?;
            scopes.insert(scope.to_string());
        }

        Ok(Self { scopes })
    }
}

impl fmt::Display for AuthScopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scopes: Vec<&str> = self.scopes.iter().map(String::as_str).collect();
        f.write_str(&scopes.join(" "))
    }
}

impl Serialize for AuthScopes {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for AuthScopes {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(de::Error::custom)
    }
}
