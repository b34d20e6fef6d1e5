//! Request types for the Staff Policy Engine API.
//!
//! This module defines the JSON request structures for the access and
//! vacation endpoints.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::{PermissionSet, Role, VacationRequest, YearlyAllowance, YearlyUsage};
use crate::vacation::{VacationLedger, usage_records};

/// Request body for `POST /access/check`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PermissionCheckRequest {
    /// The role to evaluate.
    pub role: Role,
    /// Explicitly granted permission keys.
    #[serde(default)]
    pub permissions: PermissionSet,
    /// The permission key being asked for.
    pub required: String,
}

/// Request body for `POST /access/require`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirePermissionRequest {
    /// The permission key the session user must hold.
    pub permission: String,
}

/// Request body for `POST /access/require-any`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequireAnyPermissionRequest {
    /// Permission keys of which the session user must hold at least one.
    pub permissions: Vec<String>,
}

/// Request body for `POST /vacation/carryover`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarryoverRequest {
    /// Explicit allowance overrides.
    #[serde(default)]
    pub allowances: Vec<YearlyAllowance>,
    /// Approved usage per year.
    #[serde(default)]
    pub usage: Vec<YearlyUsage>,
    /// Fallback annual entitlement. The configured default applies if absent.
    #[serde(default)]
    pub default_allowance: Option<Decimal>,
    /// Banked balance brought into the first tracked year.
    #[serde(default)]
    pub default_carryover: Decimal,
    /// The year to compute.
    pub target_year: i32,
    /// Whether to include the per-year fold in the response.
    #[serde(default)]
    pub include_breakdown: bool,
}

impl CarryoverRequest {
    /// Builds the ledger, falling back to `configured_allowance`.
    pub fn ledger(&self, configured_allowance: Decimal) -> VacationLedger {
        VacationLedger::from_records(
            &self.allowances,
            &self.usage,
            self.default_allowance.unwrap_or(configured_allowance),
            self.default_carryover,
        )
    }
}

/// Request body for `POST /vacation/balance`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BalanceRequest {
    /// Explicit allowance overrides.
    #[serde(default)]
    pub allowances: Vec<YearlyAllowance>,
    /// The user's vacation requests; only approved ones count as usage.
    #[serde(default)]
    pub requests: Vec<VacationRequest>,
    /// Fallback annual entitlement. The configured default applies if absent.
    #[serde(default)]
    pub default_allowance: Option<Decimal>,
    /// Banked balance brought into the first tracked year.
    #[serde(default)]
    pub default_carryover: Decimal,
    /// The year to compute.
    pub year: i32,
}

impl BalanceRequest {
    /// Builds the ledger with usage derived from approved requests.
    pub fn ledger(&self, configured_allowance: Decimal) -> VacationLedger {
        VacationLedger::from_records(
            &self.allowances,
            &usage_records(&self.requests),
            self.default_allowance.unwrap_or(configured_allowance),
            self.default_carryover,
        )
    }
}
