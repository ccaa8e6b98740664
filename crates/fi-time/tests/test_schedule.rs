//! Integration tests for backward schedule generation.

use fi_time::date::ymd;
use fi_time::{BusinessDayConvention, CouponFrequency, Date, HolidayCalendar, Schedule, WeekendsOnly};

fn date(y: i32, m: u32, d: u32) -> Date {
    ymd(y, m, d).unwrap()
}

/// Assert that the schedule dates match `expected` exactly.
fn check_dates(s: &Schedule, expected: &[Date]) {
    assert_eq!(
        s.size(),
        expected.len(),
        "expected {} dates, found {}.\n  actual:   {:?}\n  expected: {:?}",
        expected.len(),
        s.size(),
        s.dates(),
        expected,
    );
    for (i, exp) in expected.iter().enumerate() {
        assert_eq!(s.date(i), Some(*exp), "at index {i}");
    }
}

#[test]
fn test_annual_schedule_unadjusted() {
    let s = Schedule::backward(
        date(2024, 1, 15),
        date(2027, 1, 15),
        CouponFrequency::Annual,
        &WeekendsOnly,
        BusinessDayConvention::Unadjusted,
    )
    .unwrap();
    check_dates(&s, &[date(2025, 1, 15), date(2026, 1, 15), date(2027, 1, 15)]);
}

#[test]
fn test_short_first_period_is_at_the_front() {
    // Ten months with semi-annual payments: first period is short.
    let s = Schedule::backward(
        date(2024, 3, 10),
        date(2025, 1, 10),
        CouponFrequency::SemiAnnual,
        &WeekendsOnly,
        BusinessDayConvention::Unadjusted,
    )
    .unwrap();
    check_dates(&s, &[date(2024, 7, 10), date(2025, 1, 10)]);
}

#[test]
fn test_zero_frequency_pays_at_end_only() {
    let s = Schedule::backward(
        date(2024, 1, 1),
        date(2029, 6, 30), // Saturday
        CouponFrequency::Zero,
        &WeekendsOnly,
        BusinessDayConvention::Following,
    )
    .unwrap();
    check_dates(&s, &[date(2029, 7, 2)]);
}

#[test]
fn test_dates_are_adjusted_with_holidays() {
    let cal = HolidayCalendar::new("test", [date(2025, 7, 15)]);
    let s = Schedule::backward(
        date(2025, 1, 15),
        date(2026, 1, 15),
        CouponFrequency::SemiAnnual,
        &cal,
        BusinessDayConvention::Following,
    )
    .unwrap();
    check_dates(&s, &[date(2025, 7, 16), date(2026, 1, 15)]);
}

#[test]
fn test_month_end_steps_from_maturity() {
    let s = Schedule::backward(
        date(2024, 8, 31),
        date(2025, 8, 31),
        CouponFrequency::Quarterly,
        &WeekendsOnly,
        BusinessDayConvention::Unadjusted,
    )
    .unwrap();
    check_dates(
        &s,
        &[date(2024, 11, 30), date(2025, 2, 28), date(2025, 5, 31), date(2025, 8, 31)],
    );
}

#[test]
fn test_start_after_end_is_rejected() {
    assert!(Schedule::backward(
        date(2025, 1, 1),
        date(2024, 1, 1),
        CouponFrequency::Annual,
        &WeekendsOnly,
        BusinessDayConvention::Unadjusted,
    )
    .is_err());
}
