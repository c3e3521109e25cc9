//! Day offset since the start of tracking.

use chrono::{Local, NaiveDate};

use crate::error::Error;

/// Today's local calendar date.
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Whole calendar days from `start` to `today`.
///
/// A start date after today means the clock or the config is wrong, and the
/// run cannot produce a meaningful row key.
pub fn days_between(start: NaiveDate, today: NaiveDate) -> Result<u32, Error> {
    if today < start {
        return Err(Error::StartDateInFuture { start, today });
    }
    let days = (today - start).num_days();
    u32::try_from(days).map_err(|_| Error::other(format!("Day offset out of range: {}", days)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_same_day_is_zero() {
        assert_eq!(days_between(date(2024, 3, 7), date(2024, 3, 7)).unwrap(), 0);
    }

    #[test]
    fn test_counts_calendar_days() {
        assert_eq!(days_between(date(2024, 3, 7), date(2024, 3, 8)).unwrap(), 1);
        // 2024 is a leap year
        assert_eq!(days_between(date(2024, 2, 28), date(2024, 3, 1)).unwrap(), 2);
        assert_eq!(days_between(date(2024, 3, 7), date(2025, 3, 7)).unwrap(), 365);
    }

    #[test]
    fn test_future_start_is_rejected() {
        let err = days_between(date(2024, 3, 8), date(2024, 3, 7)).unwrap_err();
        assert!(matches!(err, Error::StartDateInFuture { .. }));
    }
}
