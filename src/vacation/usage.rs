//! Vacation usage aggregation.
//!
//! Turns a user's vacation requests into per-year usage. Only approved
//! requests count, and each request is charged to the year it starts in.

use std::collections::BTreeMap;

use chrono::Datelike;
use rust_decimal::Decimal;

use crate::error::{PolicyError, PolicyResult};
use crate::models::{VacationRequest, YearlyUsage};

impl VacationRequest {
    /// Checks that the request is internally consistent.
    ///
    /// # Errors
    ///
    /// Returns `InvalidVacationRequest` if the end date precedes the start
    /// date or the charged days are not positive.
    pub fn validate(&self) -> PolicyResult<()> {
        if self.end_date < self.start_date {
            return Err(PolicyError::InvalidVacationRequest {
                request_id: self.id.to_string(),
                message: format!(
                    "end date {} is before start date {}",
                    self.end_date, self.start_date
                ),
            });
        }
        if self.days <= Decimal::ZERO {
            return Err(PolicyError::InvalidVacationRequest {
                request_id: self.id.to_string(),
                message: format!("days must be positive, got {}", self.days),
            });
        }
        Ok(())
    }
}

/// Sums approved request days per calendar year of the start date.
///
/// # Examples
///
/// ```
/// use staff_policy_engine::models::{RequestStatus, VacationRequest};
/// use staff_policy_engine::vacation::used_days_by_year;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
/// use uuid::Uuid;
///
/// let request = VacationRequest {
///     id: Uuid::new_v4(),
///     user_id: "usr_001".to_string(),
///     start_date: NaiveDate::from_ymd_opt(2025, 8, 4).unwrap(),
///     end_date: NaiveDate::from_ymd_opt(2025, 8, 8).unwrap(),
///     days: Decimal::from(5),
///     status: RequestStatus::Approved,
/// };
///
/// let used = used_days_by_year(&[request]);
/// assert_eq!(used[&2025], Decimal::from(5));
/// ```
pub fn used_days_by_year(requests: &[VacationRequest]) -> BTreeMap<i32, Decimal> {
    let mut used = BTreeMap::new();
    for request in requests.iter().filter(|r| r.is_approved()) {
        let days = used.entry(request.start_date.year()).or_insert(Decimal::ZERO);
        *days = days.saturating_add(request.days);
    }
    used
}

/// Same as [`used_days_by_year`], as usage records ordered by year.
pub fn usage_records(requests: &[VacationRequest]) -> Vec<YearlyUsage> {
    used_days_by_year(requests)
        .into_iter()
        .map(|(year, days)| YearlyUsage { year, days })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::RequestStatus;
    use chrono::NaiveDate;
    use std::str::FromStr;
    use uuid::Uuid;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn request(start: &str, end: &str, days: &str, status: RequestStatus) -> VacationRequest {
        VacationRequest {
            id: Uuid::new_v4(),
            user_id: "usr_001".to_string(),
            start_date: date(start),
            end_date: date(end),
            days: dec(days),
            status,
        }
    }

    #[test]
    fn test_only_approved_requests_count() {
        let requests = vec![
            request("2025-03-03", "2025-03-07", "5", RequestStatus::Approved),
            request("2025-04-01", "2025-04-02", "2", RequestStatus::Pending),
            request("2025-05-01", "2025-05-02", "2", RequestStatus::Rejected),
            request("2025-06-01", "2025-06-02", "2", RequestStatus::Cancelled),
        ];

        let used = used_days_by_year(&requests);
        assert_eq!(used.len(), 1);
        assert_eq!(used[&2025], dec("5"));
    }

    #[test]
    fn test_requests_grouped_by_start_year() {
        let requests = vec![
            request("2025-12-29", "2026-01-02", "4", RequestStatus::Approved),
            request("2026-02-10", "2026-02-10", "0.5", RequestStatus::Approved),
        ];

        let used = used_days_by_year(&requests);
        assert_eq!(used[&2025], dec("4"));
        assert_eq!(used[&2026], dec("0.5"));
    }

    #[test]
    fn test_usage_records_ordered_by_year() {
        let requests = vec![
            request("2027-01-10", "2027-01-11", "2", RequestStatus::Approved),
            request("2025-01-10", "2025-01-11", "1", RequestStatus::Approved),
        ];

        let records = usage_records(&requests);
        let years: Vec<i32> = records.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2025, 2027]);
    }

    #[test]
    fn test_no_requests_means_no_usage() {
        assert!(used_days_by_year(&[]).is_empty());
    }

    #[test]
    fn test_validate_accepts_single_day() {
        let r = request("2025-03-03", "2025-03-03", "1", RequestStatus::Pending);
        assert!(r.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_reversed_dates() {
        let r = request("2025-03-07", "2025-03-03", "5", RequestStatus::Pending);
        match r.validate() {
            Err(PolicyError::InvalidVacationRequest { message, .. }) => {
                assert!(message.contains("before start date"));
            }
            other => panic!("Expected InvalidVacationRequest, got {:?}", other),
        }
    }

    #[test]
    fn test_validate_rejects_non_positive_days() {
        let r = request("2025-03-03", "2025-03-04", "0", RequestStatus::Pending);
        assert!(r.validate().is_err());
    }
}
