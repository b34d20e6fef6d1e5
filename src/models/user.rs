//! User model.

use serde::{Deserialize, Serialize};

use super::{PermissionSet, Role};

/// A staff member as seen by the access layer.
///
/// `permissions` holds an explicit per-user grant. When it is `None` the
/// role's default permission set applies instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique identifier for the user.
    pub id: String,
    /// Display name.
    pub name: String,
    /// The role tag.
    pub role: Role,
    /// Explicit permission grant, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub permissions: Option<PermissionSet>,
}

impl User {
    /// Creates a user that relies on its role default permissions.
    pub fn new(id: impl Into<String>, name: impl Into<String>, role: Role) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role,
            permissions: None,
        }
    }

    /// Sets an explicit permission grant.
    pub fn with_permissions(mut self, permissions: PermissionSet) -> Self {
        self.permissions = Some(permissions);
        self
    }
}
