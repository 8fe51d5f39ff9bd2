//! Rotation policy for the recommendation engine.
//!
//! The policy is calendar-month-based: the active period is simply the
//! calendar month of the supplied timestamp, independent of year, and the
//! preview period is the following month (December wraps to January).  This
//! keeps the rotation aligned with the real calendar the manuals are keyed
//! by, at the cost of serving the same month's content every year until new
//! manuals are uploaded.

use chrono::{DateTime, Datelike, Utc};

use lectio_store::Month;

/// The month whose manuals are currently active.
pub fn active_month(now: DateTime<Utc>) -> Month {
    Month::from_index(now.month0() as usize)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn active_month_follows_the_calendar() {
        let jan = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(active_month(jan), Month::January);

        let dec = Utc.with_ymd_and_hms(2026, 12, 31, 23, 59, 59).unwrap();
        assert_eq!(active_month(dec), Month::December);
    }

    #[test]
    fn year_does_not_matter() {
        let a = Utc.with_ymd_and_hms(2026, 7, 1, 0, 0, 0).unwrap();
        let b = Utc.with_ymd_and_hms(2031, 7, 20, 6, 30, 0).unwrap();
        assert_eq!(active_month(a), active_month(b));
    }
}
