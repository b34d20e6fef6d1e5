//! Vacation calculations for the Staff Policy Engine.
//!
//! This module contains the year-by-year carryover fold, per-year usage
//! aggregation from approved requests, and the single-year balance shown on
//! vacation request pages. All functions are pure; results are recomputed
//! on demand and never persisted.

mod balance;
mod carryover;
mod usage;

pub use balance::calculate_balance;
pub use carryover::{DEFAULT_FIRST_YEAR, VacationLedger, calculate_carryover, carryover_breakdown};
pub use usage::{usage_records, used_days_by_year};
