//! Floating-rate leg projection.

use fi_core::{errors::Result, Real, Spread};
use fi_termstructures::YieldTermStructure;
use fi_time::{
    BusinessDayConvention, Calendar, CouponFrequency, Date, DayCountConvention, Schedule,
    WeekendsOnly,
};

use crate::cashflow::{CashFlow, Leg};

/// Builder for a floating-rate leg projected off a forecast curve.
///
/// Each coupon pays `N · (f(prev, pay) + spread) · dcf(prev, pay)`, where
/// `f` is the curve's forward rate over the period; the final flow also
/// repays the notional.
#[derive(Debug)]
pub struct FloatingLegBuilder<'a> {
    start: Date,
    end: Date,
    notional: Real,
    spread: Spread,
    frequency: CouponFrequency,
    day_count: DayCountConvention,
    calendar: &'a dyn Calendar,
    convention: BusinessDayConvention,
}

impl<'a> FloatingLegBuilder<'a> {
    /// Start a builder: notional 1, no spread, quarterly, Act/360,
    /// weekends-only calendar, following convention.
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start,
            end,
            notional: 1.0,
            spread: 0.0,
            frequency: CouponFrequency::Quarterly,
            day_count: DayCountConvention::Actual360,
            calendar: &WeekendsOnly,
            convention: BusinessDayConvention::Following,
        }
    }

    /// Set the notional.
    pub fn with_notional(mut self, notional: Real) -> Self {
        self.notional = notional;
        self
    }

    /// Set the spread over the projected forward.
    pub fn with_spread(mut self, spread: Spread) -> Self {
        self.spread = spread;
        self
    }

    /// Set the reset / payment frequency.
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

    /// Project the leg off `forecast`.
    pub fn build(self, forecast: &dyn YieldTermStructure) -> Result<Leg> {
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
            let forward = forecast.forward_rate(prev, pay);
            let mut amount = self.notional * (forward + self.spread) * dcf;
            if i == last {
                amount += self.notional;
            }
            leg.push(CashFlow::new(pay, amount, self.notional, dcf));
            prev = pay;
        }
        Ok(leg)
    }
}
