//! Application state for the Staff Policy Engine API.
//!
//! This module defines the shared application state that is available
//! to all request handlers.

use std::sync::Arc;

use crate::access::{AccessGuard, SessionResolver};
use crate::config::ConfigLoader;

/// Shared application state.
///
/// Holds the loaded configuration and the access guard built from it.
#[derive(Clone)]
pub struct AppState {
    /// The loaded policy configuration.
    config: Arc<ConfigLoader>,
    /// Guard resolving sessions and checking permissions.
    guard: AccessGuard,
}

impl AppState {
    /// Creates application state from configuration and a session resolver.
    pub fn new(config: ConfigLoader, sessions: Arc<dyn SessionResolver>) -> Self {
        let policy = config.config();
        let guard = AccessGuard::new(
            policy.evaluator().clone(),
            policy.role_defaults().clone(),
            sessions,
        );
        Self {
            config: Arc::new(config),
            guard,
        }
    }

    /// Returns a reference to the configuration loader.
    pub fn config(&self) -> &ConfigLoader {
        &self.config
    }

    /// Returns the access guard.
    pub fn guard(&self) -> &AccessGuard {
        &self.guard
    }
}
