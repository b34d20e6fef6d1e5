//! Vacation carryover calculation.
//!
//! Unused vacation days roll forward year by year, starting at the first
//! tracked year. A user's pre-existing banked balance enters the fold once,
//! at that first year. Over-use in a year only empties the balance; it is
//! never charged against later years.

use std::collections::HashMap;

use rust_decimal::Decimal;

use crate::models::{
    CarryoverBreakdown, CarryoverResult, YearLedgerEntry, YearlyAllowance, YearlyUsage,
};

/// The first year tracked when no configuration says otherwise.
pub const DEFAULT_FIRST_YEAR: i32 = 2025;

/// A user's vacation history, as loaded from storage.
///
/// Years without an explicit allowance use `default_allowance`; years
/// without recorded usage count as zero days used.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VacationLedger {
    /// Explicit allowance overrides by year.
    pub allowances_by_year: HashMap<i32, Decimal>,
    /// Approved days used by year.
    pub used_by_year: HashMap<i32, Decimal>,
    /// Fallback annual entitlement.
    pub default_allowance: Decimal,
    /// Banked balance brought into the first tracked year.
    pub default_carryover: Decimal,
}

impl VacationLedger {
    /// Creates an empty ledger with the given defaults.
    pub fn new(default_allowance: Decimal, default_carryover: Decimal) -> Self {
        Self {
            default_allowance,
            default_carryover,
            ..Self::default()
        }
    }

    /// Builds a ledger from stored allowance and usage records.
    ///
    /// Repeated usage records for the same year are summed. For repeated
    /// allowance records the last one wins.
    pub fn from_records(
        allowances: &[YearlyAllowance],
        usage: &[YearlyUsage],
        default_allowance: Decimal,
        default_carryover: Decimal,
    ) -> Self {
        let mut ledger = Self::new(default_allowance, default_carryover);
        for allowance in allowances {
            ledger.allowances_by_year.insert(allowance.year, allowance.days);
        }
        for record in usage {
            let used = ledger.used_by_year.entry(record.year).or_default();
            *used = used.saturating_add(record.days);
        }
        ledger
    }

    /// Sets an explicit allowance for a year.
    pub fn with_allowance(mut self, year: i32, days: Decimal) -> Self {
        self.allowances_by_year.insert(year, days);
        self
    }

    /// Sets the days used in a year.
    pub fn with_used(mut self, year: i32, days: Decimal) -> Self {
        self.used_by_year.insert(year, days);
        self
    }

    /// Allowance for a year: the override if present, else the default.
    pub fn allowance_for(&self, year: i32) -> Decimal {
        self.allowances_by_year
            .get(&year)
            .copied()
            .unwrap_or(self.default_allowance)
    }

    /// Days used in a year, zero when nothing is recorded.
    pub fn used_in(&self, year: i32) -> Decimal {
        self.used_by_year.get(&year).copied().unwrap_or(Decimal::ZERO)
    }

    /// The earliest year in `from..before` with an allowance or usage record.
    fn next_recorded_year(&self, from: i64, before: i64) -> Option<i32> {
        self.allowances_by_year
            .keys()
            .chain(self.used_by_year.keys())
            .copied()
            .filter(|&year| (from..before).contains(&i64::from(year)))
            .min()
    }
}

/// Calculates the effective allowance for `target_year`.
///
/// # Arguments
///
/// * `ledger` - The user's allowance and usage history
/// * `first_year` - The first tracked year; the fold starts here
/// * `target_year` - The year to compute the allowance for
///
/// # Returns
///
/// A [`CarryoverResult`] where `total = allowance + carried_over`.
///
/// # Rules
///
/// - At or before `first_year` nothing is folded. The banked
///   `default_carryover` applies only when `target_year == first_year`.
/// - After `first_year`, each year from `first_year` to `target_year - 1`
///   forwards `max(0, allowance + carried_in - used)`.
/// - No cap and no rounding are applied. Sums saturate at the `Decimal`
///   bounds, so any year and any amount is accepted.
///
/// # Examples
///
/// ```
/// use staff_policy_engine::vacation::{calculate_carryover, VacationLedger};
/// use rust_decimal::Decimal;
///
/// let ledger = VacationLedger::new(Decimal::from(20), Decimal::from(5))
///     .with_used(2025, Decimal::from(10));
///
/// let first = calculate_carryover(&ledger, 2025, 2025);
/// assert_eq!(first.total, Decimal::from(25));
///
/// let next = calculate_carryover(&ledger, 2025, 2026);
/// assert_eq!(next.carried_over, Decimal::from(15));
/// assert_eq!(next.total, Decimal::from(35));
/// ```
pub fn calculate_carryover(
    ledger: &VacationLedger,
    first_year: i32,
    target_year: i32,
) -> CarryoverResult {
    let allowance = ledger.allowance_for(target_year);
    if target_year <= first_year {
        let carried_over = opening_carryover(ledger, first_year, target_year);
        return CarryoverResult::new(allowance, carried_over);
    }

    let target = i64::from(target_year);
    let mut remaining = fold_year(ledger, first_year, ledger.default_carryover).remaining;
    let mut year = i64::from(first_year) + 1;

    // Years without records all fold the same way, so each gap between
    // recorded years is applied in one step.
    while year < target {
        match ledger.next_recorded_year(year, target) {
            Some(recorded) => {
                remaining = skip_unrecorded(ledger, remaining, i64::from(recorded) - year);
                remaining = fold_year(ledger, recorded, remaining).remaining;
                year = i64::from(recorded) + 1;
            }
            None => {
                remaining = skip_unrecorded(ledger, remaining, target - year);
                year = target;
            }
        }
    }

    CarryoverResult::new(allowance, remaining)
}

/// Calculates the carryover for `target_year` and returns every folded year.
///
/// The result is identical to [`calculate_carryover`]; the extra entries let
/// reporting pages show how the balance was reached. One entry is produced
/// per year between `first_year` and `target_year`, so callers exposing this
/// to untrusted input should bound the span first.
pub fn carryover_breakdown(
    ledger: &VacationLedger,
    first_year: i32,
    target_year: i32,
) -> CarryoverBreakdown {
    let allowance = ledger.allowance_for(target_year);

    if target_year <= first_year {
        let carried_over = opening_carryover(ledger, first_year, target_year);
        return CarryoverBreakdown {
            result: CarryoverResult::new(allowance, carried_over),
            years: Vec::new(),
        };
    }

    let mut years = Vec::new();
    let mut remaining = Decimal::ZERO;

    for year in first_year..target_year {
        let carried_in = if year == first_year {
            ledger.default_carryover
        } else {
            remaining
        };
        let entry = fold_year(ledger, year, carried_in);
        remaining = entry.remaining;
        years.push(entry);
    }

    CarryoverBreakdown {
        result: CarryoverResult::new(allowance, remaining),
        years,
    }
}

/// Carryover for a target at or before the first tracked year.
fn opening_carryover(ledger: &VacationLedger, first_year: i32, target_year: i32) -> Decimal {
    if target_year == first_year {
        ledger.default_carryover
    } else {
        Decimal::ZERO
    }
}

/// Folds a single year. `remaining` is floored at zero.
fn fold_year(ledger: &VacationLedger, year: i32, carried_in: Decimal) -> YearLedgerEntry {
    let allowance = ledger.allowance_for(year);
    let total = allowance.saturating_add(carried_in);
    let used = ledger.used_in(year);

    YearLedgerEntry {
        year,
        allowance,
        carried_in,
        total,
        used,
        remaining: total.saturating_sub(used).max(Decimal::ZERO),
    }
}

/// Folds `years` consecutive years that have no records.
///
/// Each such year forwards `max(0, remaining + default_allowance)`. Starting
/// from a non-negative `remaining`, `n` of them forward
/// `max(0, remaining + n * default_allowance)`.
fn skip_unrecorded(ledger: &VacationLedger, remaining: Decimal, years: i64) -> Decimal {
    if years <= 0 {
        return remaining;
    }
    let accrued = ledger.default_allowance.saturating_mul(Decimal::from(years));
    remaining.saturating_add(accrued).max(Decimal::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    const FIRST: i32 = DEFAULT_FIRST_YEAR;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn base_ledger() -> VacationLedger {
        VacationLedger::new(dec("20"), dec("5"))
    }

    /// VC-001: first tracked year gets the banked balance
    #[test]
    fn test_first_year_includes_default_carryover() {
        let result = calculate_carryover(&base_ledger(), FIRST, FIRST);

        assert_eq!(result.allowance, dec("20"));
        assert_eq!(result.carried_over, dec("5"));
        assert_eq!(result.total, dec("25"));
    }

    /// VC-002: fully used first year forwards nothing
    #[test]
    fn test_fully_used_year_forwards_zero() {
        let ledger = base_ledger().with_used(FIRST, dec("25"));
        let result = calculate_carryover(&ledger, FIRST, FIRST + 1);

        assert_eq!(result.carried_over, Decimal::ZERO);
        assert_eq!(result.total, dec("20"));
    }

    /// VC-003: partially used first year forwards the rest
    #[test]
    fn test_partially_used_year_forwards_remainder() {
        let ledger = base_ledger().with_used(FIRST, dec("10"));
        let result = calculate_carryover(&ledger, FIRST, FIRST + 1);

        assert_eq!(result.carried_over, dec("15"));
        assert_eq!(result.total, dec("35"));
    }

    /// VC-004: over-use floors at zero and is not charged to later years
    #[test]
    fn test_overuse_does_not_go_negative() {
        let ledger = base_ledger().with_used(FIRST, dec("40"));
        let result = calculate_carryover(&ledger, FIRST, FIRST + 2);

        // 2025 forwards 0, 2026 forwards its full 20.
        assert_eq!(result.carried_over, dec("20"));
    }

    /// VC-005: years before the first tracked year carry nothing
    #[test]
    fn test_before_first_year_has_no_carryover() {
        let ledger = base_ledger().with_allowance(FIRST - 1, dec("18"));
        let result = calculate_carryover(&ledger, FIRST, FIRST - 1);

        assert_eq!(result.allowance, dec("18"));
        assert_eq!(result.carried_over, Decimal::ZERO);
        assert_eq!(result.total, dec("18"));
    }

    #[test]
    fn test_override_allowance_for_target_year() {
        let ledger = base_ledger().with_allowance(FIRST + 1, dec("24"));
        let result = calculate_carryover(&ledger, FIRST, FIRST + 1);

        assert_eq!(result.allowance, dec("24"));
        assert_eq!(result.carried_over, dec("25"));
        assert_eq!(result.total, dec("49"));
    }

    #[test]
    fn test_override_allowance_in_folded_year() {
        let ledger = base_ledger()
            .with_allowance(FIRST + 1, dec("10"))
            .with_used(FIRST, dec("25"))
            .with_used(FIRST + 1, dec("4"));
        let result = calculate_carryover(&ledger, FIRST, FIRST + 2);

        assert_eq!(result.carried_over, dec("6"));
        assert_eq!(result.total, dec("26"));
    }

    #[test]
    fn test_multi_year_fold_accumulates_unused_days() {
        let ledger = VacationLedger::new(dec("20"), Decimal::ZERO);
        let result = calculate_carryover(&ledger, FIRST, FIRST + 3);

        // Nothing used for three years, no cap.
        assert_eq!(result.carried_over, dec("60"));
        assert_eq!(result.total, dec("80"));
    }

    #[test]
    fn test_fractional_days_are_not_rounded() {
        let ledger =
            VacationLedger::new(dec("20.5"), dec("0.25")).with_used(FIRST, dec("3.5"));
        let result = calculate_carryover(&ledger, FIRST, FIRST + 1);

        assert_eq!(result.carried_over, dec("17.25"));
        assert_eq!(result.total, dec("37.75"));
    }

    #[test]
    fn test_negative_default_carryover_in_first_year_passes_through() {
        let ledger = VacationLedger::new(dec("20"), dec("-3"));
        let result = calculate_carryover(&ledger, FIRST, FIRST);

        assert_eq!(result.carried_over, dec("-3"));
        assert_eq!(result.total, dec("17"));
    }

    #[test]
    fn test_custom_first_year() {
        let ledger = base_ledger().with_used(2030, dec("5"));
        let result = calculate_carryover(&ledger, 2030, 2031);

        assert_eq!(result.carried_over, dec("20"));
    }

    #[test]
    fn test_calculation_is_idempotent() {
        let ledger = base_ledger().with_used(FIRST, dec("7"));
        let first = calculate_carryover(&ledger, FIRST, FIRST + 2);
        let second = calculate_carryover(&ledger, FIRST, FIRST + 2);
        assert_eq!(first, second);
    }

    #[test]
    fn test_breakdown_lists_folded_years() {
        let ledger = base_ledger()
            .with_used(FIRST, dec("10"))
            .with_used(FIRST + 1, dec("30"));
        let breakdown = carryover_breakdown(&ledger, FIRST, FIRST + 2);

        assert_eq!(breakdown.years.len(), 2);

        let first = &breakdown.years[0];
        assert_eq!(first.year, FIRST);
        assert_eq!(first.carried_in, dec("5"));
        assert_eq!(first.total, dec("25"));
        assert_eq!(first.remaining, dec("15"));

        let second = &breakdown.years[1];
        assert_eq!(second.carried_in, dec("15"));
        assert_eq!(second.total, dec("35"));
        assert_eq!(second.remaining, dec("5"));

        assert_eq!(breakdown.result.carried_over, dec("5"));
        assert_eq!(breakdown.result, calculate_carryover(&ledger, FIRST, FIRST + 2));
    }

    #[test]
    fn test_breakdown_empty_at_first_year() {
        let breakdown = carryover_breakdown(&base_ledger(), FIRST, FIRST);
        assert!(breakdown.years.is_empty());
    }

    #[test]
    fn test_from_records_sums_usage_and_keeps_last_allowance() {
        let ledger = VacationLedger::from_records(
            &[
                YearlyAllowance { year: FIRST, days: dec("18") },
                YearlyAllowance { year: FIRST, days: dec("21") },
            ],
            &[
                YearlyUsage { year: FIRST, days: dec("2") },
                YearlyUsage { year: FIRST, days: dec("3.5") },
            ],
            dec("20"),
            Decimal::ZERO,
        );

        assert_eq!(ledger.allowance_for(FIRST), dec("21"));
        assert_eq!(ledger.allowance_for(FIRST + 1), dec("20"));
        assert_eq!(ledger.used_in(FIRST), dec("5.5"));
        assert_eq!(ledger.used_in(FIRST + 1), Decimal::ZERO);
    }

    #[test]
    fn test_far_future_target_folds_without_per_year_work() {
        let ledger = VacationLedger::new(dec("20"), Decimal::ZERO);
        let result = calculate_carryover(&ledger, FIRST, i32::MAX);

        let years = Decimal::from(i64::from(i32::MAX) - i64::from(FIRST));
        assert_eq!(result.carried_over, dec("20") * years);
        assert_eq!(result.total, result.carried_over + dec("20"));
    }

    #[test]
    fn test_full_year_range_with_negative_first_year() {
        let ledger = VacationLedger::new(dec("20"), Decimal::ZERO);
        let result = calculate_carryover(&ledger, i32::MIN, i32::MAX);

        // 2^32 - 1 folded years, none used.
        assert_eq!(result.carried_over, dec("85899345900"));
    }

    #[test]
    fn test_far_past_target_carries_nothing() {
        let ledger = base_ledger();
        let result = calculate_carryover(&ledger, FIRST, i32::MIN);

        assert_eq!(result.allowance, dec("20"));
        assert_eq!(result.carried_over, Decimal::ZERO);

        let breakdown = carryover_breakdown(&ledger, i32::MAX, i32::MIN);
        assert!(breakdown.years.is_empty());
    }

    #[test]
    fn test_records_between_gaps_are_folded() {
        let ledger = VacationLedger::new(dec("20"), dec("5"))
            .with_used(FIRST, dec("25"))
            .with_allowance(FIRST + 10, dec("2"))
            .with_used(FIRST + 10, dec("500"))
            .with_used(FIRST + 20, dec("1.5"));

        let folded = calculate_carryover(&ledger, FIRST, FIRST + 30);
        assert_eq!(folded, carryover_breakdown(&ledger, FIRST, FIRST + 30).result);
        // FIRST+10 empties the balance; ten years of 20 follow, 1.5 of them used,
        // then nine more years of 20.
        assert_eq!(folded.carried_over, dec("378.5"));
    }

    #[test]
    fn test_negative_default_allowance_floors_over_long_gaps() {
        let ledger = VacationLedger::new(dec("-3"), dec("10"));

        assert_eq!(calculate_carryover(&ledger, FIRST, FIRST + 3).carried_over, dec("1"));
        assert_eq!(
            calculate_carryover(&ledger, FIRST, FIRST + 4).carried_over,
            Decimal::ZERO
        );
        assert_eq!(
            calculate_carryover(&ledger, FIRST, i32::MAX).carried_over,
            Decimal::ZERO
        );
    }

    #[test]
    fn test_decimal_max_amounts_saturate() {
        let ledger = VacationLedger::new(Decimal::MAX, Decimal::MAX);

        let first = calculate_carryover(&ledger, FIRST, FIRST);
        assert_eq!(first.total, Decimal::MAX);

        let later = calculate_carryover(&ledger, FIRST, FIRST + 5);
        assert_eq!(later.carried_over, Decimal::MAX);
        assert_eq!(later.total, Decimal::MAX);
        assert_eq!(later, carryover_breakdown(&ledger, FIRST, FIRST + 5).result);

        let far = calculate_carryover(&ledger, FIRST, i32::MAX);
        assert_eq!(far.total, Decimal::MAX);
    }

    #[test]
    fn test_decimal_min_usage_saturates() {
        let ledger = VacationLedger::new(dec("20"), Decimal::ZERO).with_used(FIRST, Decimal::MIN);
        let result = calculate_carryover(&ledger, FIRST, FIRST + 1);

        assert_eq!(result.carried_over, Decimal::MAX);
        assert_eq!(result.total, Decimal::MAX);
    }

    #[test]
    fn test_from_records_saturates_usage_sum() {
        let ledger = VacationLedger::from_records(
            &[],
            &[
                YearlyUsage { year: FIRST, days: Decimal::MAX },
                YearlyUsage { year: FIRST, days: Decimal::MAX },
            ],
            dec("20"),
            Decimal::ZERO,
        );

        assert_eq!(ledger.used_in(FIRST), Decimal::MAX);
    }
}
