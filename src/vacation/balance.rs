//! Vacation balance for a single year.

use crate::models::VacationBalance;

use super::{VacationLedger, calculate_carryover};

/// Computes what a user has available and left in `year`.
///
/// `remaining` is `total - used` and is not floored, so an over-booked year
/// shows a negative balance. Flooring only happens when days are carried
/// into the next year.
///
/// # Examples
///
/// ```
/// use staff_policy_engine::vacation::{calculate_balance, VacationLedger};
/// use rust_decimal::Decimal;
///
/// let ledger = VacationLedger::new(Decimal::from(20), Decimal::from(5))
///     .with_used(2025, Decimal::from(8));
///
/// let balance = calculate_balance(&ledger, 2025, 2025);
/// assert_eq!(balance.total, Decimal::from(25));
/// assert_eq!(balance.remaining, Decimal::from(17));
/// ```
pub fn calculate_balance(ledger: &VacationLedger, first_year: i32, year: i32) -> VacationBalance {
    let result = calculate_carryover(ledger, first_year, year);
    let used = ledger.used_in(year);

    VacationBalance {
        year,
        allowance: result.allowance,
        carried_over: result.carried_over,
        total: result.total,
        used,
        remaining: result.total.saturating_sub(used),
    }
}
