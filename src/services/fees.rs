//! Overdue fee calculator
//!
//! Pure arithmetic, shared by lending completion (where the result is frozen
//! onto the record) and by read paths projecting a fee for outstanding
//! overdue lendings.

use chrono::NaiveDate;
use rust_decimal::Decimal;

/// Fee owed as of `as_of` for a lending due on `due_date`.
///
/// Zero on or before the due date, otherwise whole days late times the daily
/// rate. Callers must never overwrite an already-recorded fee with this.
pub fn overdue_fee(due_date: NaiveDate, as_of: NaiveDate, daily_rate: Decimal) -> Decimal {
    let days_late = (as_of - due_date).num_days();
    if days_late <= 0 {
        return Decimal::ZERO;
    }
    Decimal::from(days_late) * daily_rate
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn no_fee_on_due_date() {
        let due = date(2024, 3, 10);
        assert_eq!(overdue_fee(due, due, Decimal::from(5)), Decimal::ZERO);
    }

    #[test]
    fn no_fee_before_due_date() {
        let due = date(2024, 3, 10);
        assert_eq!(
            overdue_fee(due, due - Duration::days(2), Decimal::from(5)),
            Decimal::ZERO
        );
    }

    #[test]
    fn three_days_late_at_five_per_day() {
        let due = date(2024, 3, 10);
        assert_eq!(
            overdue_fee(due, due + Duration::days(3), Decimal::from(5)),
            Decimal::from(15)
        );
    }

    #[test]
    fn five_days_late_at_two_per_day() {
        let due = date(2024, 3, 10);
        assert_eq!(
            overdue_fee(due, due + Duration::days(5), Decimal::from(2)),
            Decimal::from(10)
        );
    }

    #[test]
    fn fractional_daily_rate() {
        let due = date(2024, 3, 10);
        let rate = Decimal::new(25, 1); // 2.5
        assert_eq!(
            overdue_fee(due, due + Duration::days(4), rate),
            Decimal::from(10)
        );
    }
}
