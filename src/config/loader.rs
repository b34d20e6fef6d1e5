//! Configuration loading functionality.
//!
//! This module provides the [`ConfigLoader`] type for loading policy
//! configuration from YAML files.

use std::collections::HashMap;
use std::fs;
use std::path::Path;

use tracing::debug;

use crate::access::{PermissionCatalog, PermissionEvaluator};
use crate::error::{PolicyError, PolicyResult};
use crate::models::{PermissionSet, Role};

use super::types::{AccessConfig, PolicyConfig, VacationConfig};

/// Loads and provides access to policy configuration.
///
/// # Directory Structure
///
/// ```text
/// config/default/
/// ├── access.yaml       # God-mode roles and role default permissions
/// ├── permissions.yaml  # Permission catalog grouped by module
/// └── vacation.yaml     # First tracked year and default allowance
/// ```
///
/// # Example
///
/// ```no_run
/// use staff_policy_engine::config::ConfigLoader;
/// use staff_policy_engine::models::Role;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// assert!(loader.config().evaluator().is_god_mode(Role::SuperAdmin));
/// println!("First tracked year: {}", loader.first_year());
/// ```
#[derive(Debug, Clone)]
pub struct ConfigLoader {
    config: PolicyConfig,
}

impl ConfigLoader {
    /// Loads configuration from the specified directory.
    ///
    /// # Returns
    ///
    /// Returns a `ConfigLoader` instance on success, or an error if:
    /// - Any required file is missing
    /// - Any file contains invalid YAML
    /// - A role default names a key that is malformed or not in the catalog
    pub fn load<P: AsRef<Path>>(path: P) -> PolicyResult<Self> {
        let path = path.as_ref();

        let access = Self::load_yaml::<AccessConfig>(&path.join("access.yaml"))?;
        let catalog = Self::load_yaml::<PermissionCatalog>(&path.join("permissions.yaml"))?;
        let vacation = Self::load_yaml::<VacationConfig>(&path.join("vacation.yaml"))?;

        let role_defaults = Self::build_role_defaults(access.role_defaults, &catalog)?;
        let evaluator = PermissionEvaluator::new(access.god_mode_roles);

        debug!(
            path = %path.display(),
            modules = catalog.modules.len(),
            first_year = vacation.first_year,
            "Loaded policy configuration"
        );

        Ok(Self {
            config: PolicyConfig::new(evaluator, role_defaults, catalog, vacation),
        })
    }

    /// Loads and parses a YAML file.
    fn load_yaml<T: serde::de::DeserializeOwned>(path: &Path) -> PolicyResult<T> {
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| PolicyError::ConfigNotFound {
            path: path_str.clone(),
        })?;

        serde_yaml::from_str(&content).map_err(|e| PolicyError::ConfigParseError {
            path: path_str,
            message: e.to_string(),
        })
    }

    /// Converts raw role defaults into permission sets, rejecting keys the
    /// catalog does not list.
    fn build_role_defaults(
        raw: HashMap<Role, Vec<String>>,
        catalog: &PermissionCatalog,
    ) -> PolicyResult<HashMap<Role, PermissionSet>> {
        raw.into_iter()
            .map(|(role, keys)| {
                let set: PermissionSet = keys.into_iter().collect();
                catalog.validate(&set)?;
                Ok((role, set))
            })
            .collect()
    }

    /// Returns the underlying policy configuration.
    pub fn config(&self) -> &PolicyConfig {
        &self.config
    }

    /// Returns the first tracked vacation year.
    pub fn first_year(&self) -> i32 {
        self.config.vacation().first_year
    }

    /// Returns the default annual vacation allowance.
    pub fn default_allowance(&self) -> rust_decimal::Decimal {
        self.config.vacation().default_allowance
    }

    /// Returns the default permission set for a role, if one is configured.
    pub fn role_default(&self, role: Role) -> Option<&PermissionSet> {
        self.config.role_defaults().get(&role)
    }
}
