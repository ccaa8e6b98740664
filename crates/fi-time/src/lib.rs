//! # fi-time
//!
//! Dates, day counters, coupon frequencies, calendars, business-day
//! conventions and backward schedule generation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Business-day adjustment conventions.
pub mod business_day_convention;

/// Calendar trait and built-in implementations.
pub mod calendar;

/// `Date` alias and date arithmetic helpers.
pub mod date;

/// `DayCounter` trait, built-in conventions and the convention factory.
pub mod day_counter;

/// Coupon / payment frequency.
pub mod frequency;

/// Backward payment-schedule generation.
pub mod schedule;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use business_day_convention::BusinessDayConvention;
pub use calendar::{Calendar, HolidayCalendar, WeekendsOnly};
pub use date::{Date, DateExt};
pub use day_counter::{
    Actual360, Actual365Fixed, ActualActual, DayCountConvention, DayCounter, Thirty360,
};
pub use frequency::CouponFrequency;
pub use schedule::Schedule;
