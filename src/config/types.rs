//! Configuration types for the policy engine.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::access::{PermissionCatalog, PermissionEvaluator};
use crate::models::{PermissionSet, Role};
use crate::vacation::DEFAULT_FIRST_YEAR;

/// Access configuration from access.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct AccessConfig {
    /// Roles that implicitly hold every permission.
    pub god_mode_roles: Vec<Role>,
    /// Default permission keys per role, used when a user has no explicit grant.
    #[serde(default)]
    pub role_defaults: HashMap<Role, Vec<String>>,
}

/// Vacation policy from vacation.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct VacationConfig {
    /// First tracked year; the carryover fold starts here.
    #[serde(default = "default_first_year")]
    pub first_year: i32,
    /// Annual entitlement for users without an explicit allowance.
    pub default_allowance: Decimal,
}

fn default_first_year() -> i32 {
    DEFAULT_FIRST_YEAR
}

/// The complete policy configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PolicyConfig {
    /// Evaluator built from the configured god-mode roles.
    evaluator: PermissionEvaluator,
    /// Validated default permission sets per role.
    role_defaults: HashMap<Role, PermissionSet>,
    /// Permission catalog for display.
    catalog: PermissionCatalog,
    /// Vacation policy.
    vacation: VacationConfig,
}

impl PolicyConfig {
    /// Creates a PolicyConfig from its component parts.
    pub fn new(
        evaluator: PermissionEvaluator,
        role_defaults: HashMap<Role, PermissionSet>,
        catalog: PermissionCatalog,
        vacation: VacationConfig,
    ) -> Self {
        Self {
            evaluator,
            role_defaults,
            catalog,
            vacation,
        }
    }

    /// Returns the permission evaluator.
    pub fn evaluator(&self) -> &PermissionEvaluator {
        &self.evaluator
    }

    /// Returns the default permission sets per role.
    pub fn role_defaults(&self) -> &HashMap<Role, PermissionSet> {
        &self.role_defaults
    }

    /// Returns the permission catalog.
    pub fn catalog(&self) -> &PermissionCatalog {
        &self.catalog
    }

    /// Returns the vacation policy.
    pub fn vacation(&self) -> &VacationConfig {
        &self.vacation
    }
}
