//! Role model.
//!
//! Roles are the coarse access tier a staff member holds within a restaurant
//! group. Which roles bypass permission checks is configuration, not a
//! property of the role itself.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::PolicyError;

/// Represents the role tag assigned to a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Role {
    /// Platform operator with access to every tenant.
    SystemArchitect,
    /// Owner-level administrator of a restaurant group.
    SuperAdmin,
    /// Restaurant administrator.
    Admin,
    /// Shift or floor manager.
    Manager,
    /// Regular staff member.
    Worker,
}

impl Role {
    /// Every role, from most to least privileged.
    pub const ALL: [Role; 5] = [
        Role::SystemArchitect,
        Role::SuperAdmin,
        Role::Admin,
        Role::Manager,
        Role::Worker,
    ];

    /// Returns the wire tag for this role.
    ///
    /// # Examples
    ///
    /// ```
    /// use staff_policy_engine::models::Role;
    ///
    /// assert_eq!(Role::SuperAdmin.as_str(), "SUPER_ADMIN");
    /// ```
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::SystemArchitect => "SYSTEM_ARCHITECT",
            Role::SuperAdmin => "SUPER_ADMIN",
            Role::Admin => "ADMIN",
            Role::Manager => "MANAGER",
            Role::Worker => "WORKER",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Role::ALL
            .into_iter()
            .find(|role| role.as_str() == s)
            .ok_or_else(|| PolicyError::UnknownRole {
                role: s.to_string(),
            })
    }
}
