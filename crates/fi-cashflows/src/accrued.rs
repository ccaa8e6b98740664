//! Accrued interest.

use fi_core::{Rate, Real};
use fi_time::{Date, DayCountConvention};

/// Coupon accrued from `last_coupon_date` to `settlement_date`:
/// `N · c · dcf(last, settlement)`, or `0` when settlement is on or before
/// the last coupon date.
pub fn accrued_interest(
    last_coupon_date: Date,
    settlement_date: Date,
    coupon_rate: Rate,
    notional: Real,
    day_count: DayCountConvention,
) -> Real {
    if settlement_date <= last_coupon_date {
        return 0.0;
    }
    notional * coupon_rate * day_count.year_fraction(last_coupon_date, settlement_date)
}
