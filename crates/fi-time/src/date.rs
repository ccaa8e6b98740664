//! Calendar dates.
//!
//! Dates are plain [`chrono::NaiveDate`] values; [`DateExt`] adds the
//! month/year stepping and day-difference helpers the rest of the workspace
//! needs. Month stepping clamps to the last day of the target month
//! (31 Jan + 1M = 28/29 Feb).

use chrono::{Datelike, Duration, Months, NaiveDate, Weekday};
use fi_core::errors::{Error, Result};

/// A calendar date without time-zone information.
pub type Date = NaiveDate;

/// Build a date from year, month and day, failing on invalid input.
///
/// ```
/// use fi_time::date::ymd;
/// assert!(ymd(2024, 2, 29).is_ok());
/// assert!(ymd(2023, 2, 29).is_err());
/// ```
pub fn ymd(year: i32, month: u32, day: u32) -> Result<Date> {
    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| Error::Date(format!("invalid date {year:04}-{month:02}-{day:02}")))
}

/// Return `true` if `year` is a Gregorian leap year.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Date arithmetic used by schedules, curves and engines.
pub trait DateExt: Sized {
    /// Shift by a signed number of calendar months.
    fn add_months(self, months: i32) -> Self;

    /// Shift by a signed number of years.
    fn add_years(self, years: i32) -> Self {
        self.add_months(12 * years)
    }

    /// Shift by a signed number of calendar days.
    fn add_days(self, days: i64) -> Self;

    /// Signed number of actual days from `self` to `other`.
    fn days_until(self, other: Self) -> i64;

    /// Saturday or Sunday.
    fn is_weekend(self) -> bool;
}

impl DateExt for Date {
    fn add_months(self, months: i32) -> Self {
        let shifted = if months >= 0 {
            self.checked_add_months(Months::new(months.unsigned_abs()))
        } else {
            self.checked_sub_months(Months::new(months.unsigned_abs()))
        };
        shifted.unwrap_or(if months >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
    }

    fn add_days(self, days: i64) -> Self {
        self.checked_add_signed(Duration::days(days))
            .unwrap_or(if days >= 0 { NaiveDate::MAX } else { NaiveDate::MIN })
    }

    fn days_until(self, other: Self) -> i64 {
        other.signed_duration_since(self).num_days()
    }

    fn is_weekend(self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }
}
