//! Permission catalog.
//!
//! The catalog lists every grantable permission grouped by module, for the
//! permission editor in the admin panel. Grouping is purely for display; it
//! has no effect on access checks.

use serde::{Deserialize, Serialize};

use crate::error::{PolicyError, PolicyResult};
use crate::models::{PermissionKey, PermissionSet};

/// A single grantable permission with its display label.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionEntry {
    /// The permission key.
    pub key: PermissionKey,
    /// Human-readable label.
    pub label: String,
}

/// A display group of related permissions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionModule {
    /// Module identifier (e.g. "users").
    pub key: String,
    /// Human-readable label.
    pub label: String,
    /// Permissions listed under this module.
    pub permissions: Vec<PermissionEntry>,
}

/// All grantable permissions, grouped by module.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionCatalog {
    /// Modules in display order.
    pub modules: Vec<PermissionModule>,
}

impl PermissionCatalog {
    /// Creates a catalog from modules.
    pub fn new(modules: Vec<PermissionModule>) -> Self {
        Self { modules }
    }

    /// Iterates over every key in display order.
    pub fn keys(&self) -> impl Iterator<Item = &PermissionKey> {
        self.modules
            .iter()
            .flat_map(|m| m.permissions.iter().map(|p| &p.key))
    }

    /// Returns true if the catalog lists the key.
    pub fn contains(&self, key: &str) -> bool {
        self.keys().any(|k| k.as_str() == key)
    }

    /// Looks up a module by its identifier.
    pub fn module(&self, key: &str) -> Option<&PermissionModule> {
        self.modules.iter().find(|m| m.key == key)
    }

    /// Checks that every key in the set is listed in the catalog.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPermissionKey` for the first unlisted or malformed key,
    /// in sorted order.
    pub fn validate(&self, set: &PermissionSet) -> PolicyResult<()> {
        for key in set.sorted() {
            PermissionKey::parse(key)?;
            if !self.contains(key) {
                return Err(PolicyError::InvalidPermissionKey {
                    key: key.to_string(),
                    message: "not listed in the permission catalog".to_string(),
                });
            }
        }
        Ok(())
    }
}
