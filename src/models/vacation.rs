//! Vacation models.
//!
//! This module defines per-year allowance and usage records, vacation
//! requests, and the derived carryover and balance figures. Day quantities
//! are exact decimals and may be fractional (half days).

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// An explicit vacation entitlement for one user and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyAllowance {
    /// The calendar year.
    pub year: i32,
    /// Entitled days for the year.
    pub days: Decimal,
}

/// Approved and consumed vacation days for one user and year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearlyUsage {
    /// The calendar year.
    pub year: i32,
    /// Days consumed by approved requests.
    pub days: Decimal,
}

/// Lifecycle state of a vacation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    /// Submitted, awaiting a decision.
    Pending,
    /// Approved; counts towards usage.
    Approved,
    /// Rejected by a manager.
    Rejected,
    /// Withdrawn by the requester.
    Cancelled,
}

/// A vacation request submitted by a staff member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationRequest {
    /// Unique identifier for the request.
    pub id: Uuid,
    /// The requesting user.
    pub user_id: String,
    /// First day off (inclusive).
    pub start_date: NaiveDate,
    /// Last day off (inclusive).
    pub end_date: NaiveDate,
    /// Vacation days charged for the request.
    pub days: Decimal,
    /// Current status.
    pub status: RequestStatus,
}

impl VacationRequest {
    /// Returns true if the request counts towards usage.
    pub fn is_approved(&self) -> bool {
        self.status == RequestStatus::Approved
    }
}

/// Effective allowance for a target year.
///
/// `total` is always `allowance + carried_over`.
///
/// # Example
///
/// ```
/// use staff_policy_engine::models::CarryoverResult;
/// use rust_decimal::Decimal;
///
/// let result = CarryoverResult::new(Decimal::from(20), Decimal::from(5));
/// assert_eq!(result.total, Decimal::from(25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryoverResult {
    /// Entitlement for the target year itself.
    pub allowance: Decimal,
    /// Unused days brought forward from earlier years.
    pub carried_over: Decimal,
    /// Allowance plus carryover.
    pub total: Decimal,
}

impl CarryoverResult {
    /// Builds a result, deriving the total.
    ///
    /// The sum saturates at `Decimal::MAX` / `Decimal::MIN`.
    pub fn new(allowance: Decimal, carried_over: Decimal) -> Self {
        Self {
            allowance,
            carried_over,
            total: allowance.saturating_add(carried_over),
        }
    }
}

/// One folded year in a carryover computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct YearLedgerEntry {
    /// The calendar year.
    pub year: i32,
    /// Entitlement for the year (override or default).
    pub allowance: Decimal,
    /// Days carried into the year.
    pub carried_in: Decimal,
    /// Allowance plus carried-in days.
    pub total: Decimal,
    /// Days used in the year.
    pub used: Decimal,
    /// Days forwarded to the next year, floored at zero.
    pub remaining: Decimal,
}

/// A carryover result together with the years that produced it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarryoverBreakdown {
    /// The final result for the target year.
    pub result: CarryoverResult,
    /// Folded years, oldest first. Empty when the target is at or before
    /// the first tracked year.
    pub years: Vec<YearLedgerEntry>,
}

/// Vacation position for one year: what is available and what is left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VacationBalance {
    /// The calendar year.
    pub year: i32,
    /// Entitlement for the year.
    pub allowance: Decimal,
    /// Days brought forward.
    pub carried_over: Decimal,
    /// Allowance plus carryover.
    pub total: Decimal,
    /// Days used in the year.
    pub used: Decimal,
    /// `total - used`. Negative when the year is over-booked.
    pub remaining: Decimal,
}
