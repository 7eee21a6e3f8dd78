//! Upcoming-Date Resolution
//!
//! Annual recurrence math for important dates. Only the month and day
//! of a stored date are meaningful; the year it was entered with is a
//! storage artifact.

use chrono::{Datelike, NaiveDate};

/// Project a recurring date into the given year.
///
/// Feb 29 in a non-leap target year resolves to Feb 28.
fn recurrence_in_year(date: NaiveDate, year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, date.month(), date.day())
        .or_else(|| NaiveDate::from_ymd_opt(year, 2, 28))
        .unwrap_or(date)
}

/// Compute the next occurrence of an annually recurring date and the
/// number of days until it.
///
/// The candidate is built in `today`'s year; if that has already
/// passed, it wraps to next year. A date falling on `today` resolves
/// to `days_until = 0`.
pub fn resolve_next_occurrence(date: NaiveDate, today: NaiveDate) -> (NaiveDate, i64) {
    let mut candidate = recurrence_in_year(date, today.year());
    if candidate < today {
        candidate = recurrence_in_year(date, today.year() + 1);
    }
    let days_until = (candidate - today).num_days();
    (candidate, days_until)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upcoming_date_in_current_year() {
        let today = date(2025, 1, 10);
        let (next, days) = resolve_next_occurrence(date(1990, 1, 15), today);
        assert_eq!(next, date(2025, 1, 15));
        assert_eq!(days, 5);
    }

    #[test]
    fn test_passed_date_wraps_to_next_year() {
        let today = date(2025, 1, 10);
        let (next, days) = resolve_next_occurrence(date(1990, 1, 5), today);
        assert_eq!(next, date(2026, 1, 5));
        assert_eq!(days, (date(2026, 1, 5) - today).num_days());
        assert_eq!(days, 360);
    }

    #[test]
    fn test_same_day_resolves_to_zero() {
        let today = date(2025, 6, 20);
        let (next, days) = resolve_next_occurrence(date(1988, 6, 20), today);
        assert_eq!(next, today);
        assert_eq!(days, 0);
    }

    #[test]
    fn test_year_boundary_late_december() {
        let today = date(2025, 12, 30);
        let (next, days) = resolve_next_occurrence(date(2001, 1, 2), today);
        assert_eq!(next, date(2026, 1, 2));
        assert_eq!(days, 3);
    }

    #[test]
    fn test_leap_day_in_non_leap_year_maps_to_feb_28() {
        let today = date(2025, 2, 1);
        let (next, days) = resolve_next_occurrence(date(2000, 2, 29), today);
        assert_eq!(next, date(2025, 2, 28));
        assert_eq!(days, 27);
    }

    #[test]
    fn test_leap_day_in_leap_year_stays_feb_29() {
        let today = date(2024, 1, 10);
        let (next, _) = resolve_next_occurrence(date(2000, 2, 29), today);
        assert_eq!(next, date(2024, 2, 29));
    }
}
