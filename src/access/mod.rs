//! Access control for the Staff Policy Engine.
//!
//! This module contains the permission evaluator, the permission catalog used
//! by the admin panel, and the session-backed guard that request handlers call
//! before doing privileged work.
//!
//! # Example
//!
//! ```
//! use staff_policy_engine::access::PermissionEvaluator;
//! use staff_policy_engine::models::{PermissionSet, Role};
//!
//! let evaluator = PermissionEvaluator::default();
//! assert!(evaluator.is_granted(Role::SystemArchitect, &PermissionSet::new(), "users:delete"));
//! ```

mod catalog;
mod evaluator;
mod guard;

pub use catalog::{PermissionCatalog, PermissionEntry, PermissionModule};
pub use evaluator::{DEFAULT_GOD_MODE_ROLES, PermissionEvaluator};
pub use guard::{AccessGuard, InMemorySessions, SessionResolver};
