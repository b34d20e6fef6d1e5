//! Permission keys and permission sets.
//!
//! A permission key is an opaque `module:action` string such as
//! `"users:create"`. The module part only matters for grouping keys in the
//! catalog; access checks compare whole keys.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};

/// A validated `module:action` permission identifier.
///
/// # Examples
///
/// ```
/// use staff_policy_engine::models::PermissionKey;
///
/// let key = PermissionKey::parse("vacations:approve").unwrap();
/// assert_eq!(key.module(), "vacations");
/// assert_eq!(key.action(), "approve");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PermissionKey(String);

impl PermissionKey {
    /// Parses a key, requiring exactly one `:` with non-empty parts.
    pub fn parse(key: &str) -> PolicyResult<Self> {
        let invalid = |message: &str| PolicyError::InvalidPermissionKey {
            key: key.to_string(),
            message: message.to_string(),
        };

        let (module, action) = key
            .split_once(':')
            .ok_or_else(|| invalid("expected 'module:action'"))?;

        if module.is_empty() {
            return Err(invalid("module is empty"));
        }
        if action.is_empty() {
            return Err(invalid("action is empty"));
        }
        if action.contains(':') {
            return Err(invalid("more than one ':' separator"));
        }

        Ok(Self(key.to_string()))
    }

    /// Returns the full key.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the module namespace (the part before `:`).
    pub fn module(&self) -> &str {
        self.0.split_once(':').map(|(m, _)| m).unwrap_or(&self.0)
    }

    /// Returns the action (the part after `:`).
    pub fn action(&self) -> &str {
        self.0.split_once(':').map(|(_, a)| a).unwrap_or_default()
    }
}

impl fmt::Display for PermissionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl TryFrom<String> for PermissionKey {
    type Error = PolicyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<PermissionKey> for String {
    fn from(key: PermissionKey) -> Self {
        key.0
    }
}

/// The set of permission keys granted to a user or a role default.
///
/// Presence is binary. Keys are stored as plain strings so the evaluator can
/// check arbitrary input without validating it first.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionSet(HashSet<String>);

impl PermissionSet {
    /// Creates an empty permission set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a key. Returns false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        self.0.insert(key.into())
    }

    /// Returns true if the key is present.
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains(key)
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if no keys are granted.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the keys in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Returns the keys sorted, for stable display.
    pub fn sorted(&self) -> Vec<&str> {
        let mut keys: Vec<&str> = self.iter().collect();
        keys.sort_unstable();
        keys
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self(iter.into_iter().map(Into::into).collect())
    }
}
