//! Permission evaluation.
//!
//! The evaluator answers one question: may a user with this role and this
//! permission set perform the action named by a permission key. God-mode
//! roles are granted everything; every other role needs the exact key.

use std::collections::HashSet;

use crate::models::{PermissionSet, Role};

/// Roles that hold every permission unless configured otherwise.
pub const DEFAULT_GOD_MODE_ROLES: [Role; 2] = [Role::SystemArchitect, Role::SuperAdmin];

/// Decides whether a role and permission set grant a permission key.
///
/// The set of god-mode roles is injected so that callers and tests can vary
/// it without touching process-wide state.
///
/// # Examples
///
/// ```
/// use staff_policy_engine::access::PermissionEvaluator;
/// use staff_policy_engine::models::{PermissionSet, Role};
///
/// let evaluator = PermissionEvaluator::default();
/// let granted: PermissionSet = ["schedule:view"].into_iter().collect();
///
/// assert!(evaluator.is_granted(Role::Worker, &granted, "schedule:view"));
/// assert!(!evaluator.is_granted(Role::Worker, &granted, "schedule:edit"));
/// assert!(evaluator.is_granted(Role::SuperAdmin, &PermissionSet::new(), "schedule:edit"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PermissionEvaluator {
    god_mode_roles: HashSet<Role>,
}

impl PermissionEvaluator {
    /// Creates an evaluator with the given god-mode roles.
    pub fn new(god_mode_roles: impl IntoIterator<Item = Role>) -> Self {
        Self {
            god_mode_roles: god_mode_roles.into_iter().collect(),
        }
    }

    /// Returns true if the role bypasses permission checks.
    pub fn is_god_mode(&self, role: Role) -> bool {
        self.god_mode_roles.contains(&role)
    }

    /// Returns the configured god-mode roles, sorted.
    pub fn god_mode_roles(&self) -> Vec<Role> {
        let mut roles: Vec<Role> = self.god_mode_roles.iter().copied().collect();
        roles.sort();
        roles
    }

    /// Returns true if `required` is granted.
    ///
    /// No wildcard matching and no hierarchy: a non-god-mode role needs the
    /// exact key in `granted`.
    pub fn is_granted(&self, role: Role, granted: &PermissionSet, required: &str) -> bool {
        self.is_god_mode(role) || granted.contains(required)
    }

    /// Returns true if any of `required` is granted.
    ///
    /// An empty slice grants nothing, except to god-mode roles.
    pub fn is_granted_any(&self, role: Role, granted: &PermissionSet, required: &[&str]) -> bool {
        self.is_god_mode(role) || required.iter().any(|key| granted.contains(key))
    }
}

impl Default for PermissionEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_GOD_MODE_ROLES)
    }
}
