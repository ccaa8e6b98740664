//! Fixed-rate leg generation.

use fi_core::{errors::Result, Rate, Real};
use fi_time::{
    BusinessDayConvention, Calendar, CouponFrequency, Date, DayCountConvention, Schedule,
    WeekendsOnly,
};

use crate::cashflow::{CashFlow, Leg};

/// Builder for a fixed-rate leg running from `start` to `end`.
///
/// Each coupon pays `N · c · dcf(prev, pay)`; the final flow also repays
/// the notional.
///
/// # Example
/// ```
/// use fi_cashflows::FixedLegBuilder;
/// use fi_time::{date::ymd, CouponFrequency};
///
/// let leg = FixedLegBuilder::new(ymd(2025, 1, 15)?, ymd(2027, 1, 15)?)
///     .with_notional(100.0)
///     .with_coupon_rate(0.05)
///     .with_frequency(CouponFrequency::SemiAnnual)
///     .build()?;
/// assert_eq!(leg.len(), 4);
/// # Ok::<(), fi_core::Error>(())
/// ```
#[derive(Debug)]
pub struct FixedLegBuilder<'a> {
    start: Date,
    end: Date,
    notional: Real,
    coupon_rate: Rate,
    frequency: CouponFrequency,
    day_count: DayCountConvention,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
}

impl<'a> FixedLegBuilder<'a> {
    /// Start a builder: notional 1, zero coupon rate, annual, Act/365,
    /// weekends-only calendar, following convention.
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start,
            end,
            notional: 1.0,
            coupon_rate: 0.0,
            frequency: CouponFrequency::Annual,
            day_count: DayCountConvention::Actual365,
            calendar: &WeekendsOnly,
            convention: BusinessDayConvention::Following,
        }
    }

    /// Set the notional.
    pub fn with_notional(mut self, notional: Real) -> Self {
        self.notional = notional;
        self
    }

    /// Set the coupon rate.
    pub fn with_coupon_rate(mut self, rate: Rate) -> Self {
        self.coupon_rate = rate;
        self
    }

    /// Set the coupon frequency.
    pub fn with_frequency(mut self, frequency: CouponFrequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Set the accrual day-count convention.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Set the calendar used to adjust payment dates.
    pub fn with_calendar(mut self, calendar: &'a dyn Calendar) -> Self {
        self.calendar = calendar;
        self
    }

    /// Set the business-day convention.
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Generate the leg.
    pub fn build(self) -> Result<Leg> {
        let schedule = Schedule::backward(
            self.start,
            self.end,
            self.frequency,
            self.calendar,
            self.convention,
        )?;
        let day_counter = self.day_count.day_counter();
        let last = schedule.size().saturating_sub(1);

        let mut prev = self.start;
        let mut leg = Vec::with_capacity(schedule.size());
        for (i, &pay) in schedule.iter().enumerate() {
            let dcf = day_counter.year_fraction(prev, pay);
            let mut amount = self.notional * self.coupon_rate * dcf;
            if i == last {
                amount += self.notional;
            }
            leg.push(CashFlow::new(pay, amount, self.notional, dcf));
            prev = pay;
        }
        Ok(leg)
    }
}
