//! `DayCounter` trait, the four supported conventions and the
//! [`DayCountConvention`] factory.
//!
//! A day counter computes the **day count fraction**, the fraction of a year
//! between two dates, used when discounting or accruing interest.

use std::str::FromStr;

use chrono::Datelike;
use fi_core::{errors::Error, Real, Time};
use serde::{Deserialize, Serialize};

use crate::date::{is_leap_year, Date, DateExt};

/// A convention for counting the fraction of a year between two dates.
pub trait DayCounter: std::fmt::Debug + Send + Sync {
    /// Human-readable name of this convention (e.g. `"Actual/365 (Fixed)"`).
    fn name(&self) -> &str;

    /// Number of days between `d1` and `d2` according to this convention.
    fn day_count(&self, d1: Date, d2: Date) -> i64;

    /// Fraction of a year between `d1` and `d2`.
    fn year_fraction(&self, d1: Date, d2: Date) -> Time;
}

/// Actual/360: actual days over 360.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual360;

impl DayCounter for Actual360 {
    fn name(&self) -> &str {
        "Actual/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_until(d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/365 (Fixed): actual days over 365.
#[derive(Debug, Clone, Copy, Default)]
pub struct Actual365Fixed;

impl DayCounter for Actual365Fixed {
    fn name(&self) -> &str {
        "Actual/365 (Fixed)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_until(d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 365.0
    }
}

/// Thirty/360 (bond basis).
///
/// Both day-of-month values are capped at 30, then
/// `day_count = 360(Y2−Y1) + 30(M2−M1) + (D2−D1)`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Thirty360;

impl DayCounter for Thirty360 {
    fn name(&self) -> &str {
        "30/360"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        let dd1 = d1.day().min(30) as i64;
        let dd2 = d2.day().min(30) as i64;
        360 * (d2.year() - d1.year()) as i64
            + 30 * (d2.month() as i64 - d1.month() as i64)
            + (dd2 - dd1)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_count(d1, d2) as Real / 360.0
    }
}

/// Actual/Actual (ISDA).
///
/// The period is split at year boundaries; each piece is divided by the
/// length (365 or 366) of the year it falls in.
#[derive(Debug, Clone, Copy, Default)]
pub struct ActualActual;

fn days_in_year(year: i32) -> Real {
    if is_leap_year(year) {
        366.0
    } else {
        365.0
    }
}

impl DayCounter for ActualActual {
    fn name(&self) -> &str {
        "Actual/Actual (ISDA)"
    }

    fn day_count(&self, d1: Date, d2: Date) -> i64 {
        d1.days_until(d2)
    }

    fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        if d1 == d2 {
            return 0.0;
        }
        if d2 < d1 {
            return -self.year_fraction(d2, d1);
        }
        let (y1, y2) = (d1.year(), d2.year());
        if y1 == y2 {
            return self.day_count(d1, d2) as Real / days_in_year(y1);
        }
        let (Some(next_jan1), Some(last_jan1)) = (
            Date::from_ymd_opt(y1 + 1, 1, 1),
            Date::from_ymd_opt(y2, 1, 1),
        ) else {
            return self.day_count(d1, d2) as Real / 365.0;
        };
        let head = d1.days_until(next_jan1) as Real / days_in_year(y1);
        let tail = last_jan1.days_until(d2) as Real / days_in_year(y2);
        head + tail + (y2 - y1 - 1) as Real
    }
}

// ── Convention enum / factory ─────────────────────────────────────────────────

/// Day-count convention selector carried by instrument records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum DayCountConvention {
    /// Actual/360.
    Actual360,
    /// Actual/365 (Fixed).
    #[default]
    Actual365,
    /// 30/360.
    Thirty360,
    /// Actual/Actual.
    ActualActual,
}

impl DayCountConvention {
    /// Build the day counter implementing this convention.
    pub fn day_counter(&self) -> Box<dyn DayCounter> {
        match self {
            DayCountConvention::Actual360 => Box::new(Actual360),
            DayCountConvention::Actual365 => Box::new(Actual365Fixed),
            DayCountConvention::Thirty360 => Box::new(Thirty360),
            DayCountConvention::ActualActual => Box::new(ActualActual),
        }
    }

    /// Shorthand for `self.day_counter().year_fraction(d1, d2)`.
    pub fn year_fraction(&self, d1: Date, d2: Date) -> Time {
        self.day_counter().year_fraction(d1, d2)
    }
}

impl FromStr for DayCountConvention {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "act360" | "actual360" => Ok(DayCountConvention::Actual360),
            "act365" | "actual365" | "act365f" | "actual365fixed" => {
                Ok(DayCountConvention::Actual365)
            }
            "30360" | "thirty360" => Ok(DayCountConvention::Thirty360),
            "actact" | "actualactual" | "actactisda" => Ok(DayCountConvention::ActualActual),
            _ => Err(Error::Validation(format!("unknown day-count convention '{s}'"))),
        }
    }
}
