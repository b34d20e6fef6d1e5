//! Core data models for the Staff Policy Engine.
//!
//! This module contains the domain models shared by the access and
//! vacation components.

mod permission;
mod role;
mod user;
mod vacation;

pub use permission::{PermissionKey, PermissionSet};
pub use role::Role;
pub use user::User;
pub use vacation::{
    CarryoverBreakdown, CarryoverResult, RequestStatus, VacationBalance, VacationRequest,
    YearLedgerEntry, YearlyAllowance, YearlyUsage,
};
