//! Session-backed access guard.
//!
//! The guard turns a session token into a [`User`] and checks permissions
//! through the [`PermissionEvaluator`]. It keeps "not signed in" and
//! "signed in but not allowed" apart so pages can show different messages.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::{debug, warn};

use crate::error::{PolicyError, PolicyResult};
use crate::models::{PermissionSet, Role, User};

use super::PermissionEvaluator;

/// Resolves session tokens to users.
///
/// Storage-backed implementations live in the application shell; the crate
/// ships [`InMemorySessions`] for tests and single-process deployments.
pub trait SessionResolver: Send + Sync {
    /// Returns the user behind the token, if the session is live.
    fn resolve_session(&self, token: &str) -> Option<User>;
}

/// A session table held in process memory.
#[derive(Debug, Default)]
pub struct InMemorySessions {
    sessions: RwLock<HashMap<String, User>>,
}

impl InMemorySessions {
    /// Creates an empty session table.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a session token for a user, replacing any previous holder.
    pub fn insert(&self, token: impl Into<String>, user: User) {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.insert(token.into(), user);
    }

    /// Ends a session. Returns the user it belonged to, if any.
    pub fn revoke(&self, token: &str) -> Option<User> {
        let mut sessions = self
            .sessions
            .write()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.remove(token)
    }
}

impl SessionResolver for InMemorySessions {
    fn resolve_session(&self, token: &str) -> Option<User> {
        let sessions = self
            .sessions
            .read()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        sessions.get(token).cloned()
    }
}

/// Guards operations behind an authenticated session and a permission.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use std::sync::Arc;
/// use staff_policy_engine::access::{AccessGuard, InMemorySessions, PermissionEvaluator};
/// use staff_policy_engine::error::PolicyError;
/// use staff_policy_engine::models::{Role, User};
///
/// let sessions = Arc::new(InMemorySessions::new());
/// sessions.insert("tok_1", User::new("usr_001", "Ana", Role::Worker));
///
/// let guard = AccessGuard::new(PermissionEvaluator::default(), HashMap::new(), sessions);
///
/// assert!(matches!(
///     guard.require_permission(None, "users:create"),
///     Err(PolicyError::Unauthenticated)
/// ));
/// assert!(matches!(
///     guard.require_permission(Some("tok_1"), "users:create"),
///     Err(PolicyError::PermissionDenied { .. })
/// ));
/// ```
#[derive(Clone)]
pub struct AccessGuard {
    evaluator: PermissionEvaluator,
    role_defaults: HashMap<Role, PermissionSet>,
    sessions: Arc<dyn SessionResolver>,
}

impl AccessGuard {
    /// Creates a guard from an evaluator, per-role default grants and a
    /// session resolver.
    pub fn new(
        evaluator: PermissionEvaluator,
        role_defaults: HashMap<Role, PermissionSet>,
        sessions: Arc<dyn SessionResolver>,
    ) -> Self {
        Self {
            evaluator,
            role_defaults,
            sessions,
        }
    }

    /// Returns the evaluator used by this guard.
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Returns the permissions that apply to a user: the explicit grant if
    /// present, otherwise the role default, otherwise nothing.
    pub fn effective_permissions(&self, user: &User) -> PermissionSet {
        user.permissions
            .clone()
            .or_else(|| self.role_defaults.get(&user.role).cloned())
            .unwrap_or_default()
    }

    /// Resolves the session to a user.
    ///
    /// # Errors
    ///
    /// Returns `Unauthenticated` if there is no token or the session is unknown.
    pub fn require_user(&self, token: Option<&str>) -> PolicyResult<User> {
        let token = token.ok_or(PolicyError::Unauthenticated)?;
        self.sessions.resolve_session(token).ok_or_else(|| {
            debug!("Session token did not resolve to a user");
            PolicyError::Unauthenticated
        })
    }

    /// Resolves the session and checks that the user holds `required`.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if there is no live session
    /// - `PermissionDenied` if the user lacks the permission
    pub fn require_permission(&self, token: Option<&str>, required: &str) -> PolicyResult<User> {
        let user = self.require_user(token)?;
        let granted = self.effective_permissions(&user);

        if !self.evaluator.is_granted(user.role, &granted, required) {
            warn!(
                user_id = %user.id,
                role = %user.role,
                permission = required,
                "Permission denied"
            );
            return Err(PolicyError::PermissionDenied {
                user_id: user.id,
                permission: required.to_string(),
            });
        }

        Ok(user)
    }

    /// Resolves the session and checks that the user holds at least one of
    /// `required`. Used for pages reachable through several permissions.
    ///
    /// # Errors
    ///
    /// - `Unauthenticated` if there is no live session
    /// - `PermissionDenied` if the user holds none of the permissions; the
    ///   error names them joined by `|`
    pub fn require_any_permission(
        &self,
        token: Option<&str>,
        required: &[&str],
    ) -> PolicyResult<User> {
        let user = self.require_user(token)?;
        let granted = self.effective_permissions(&user);

        if !self.evaluator.is_granted_any(user.role, &granted, required) {
            let permission = required.join("|");
            warn!(
                user_id = %user.id,
                role = %user.role,
                permission = %permission,
                "Permission denied"
            );
            return Err(PolicyError::PermissionDenied {
                user_id: user.id,
                permission,
            });
        }

        Ok(user)
    }
}
