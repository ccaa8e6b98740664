//! Yield term structure queries.
//!
//! Implementors provide the valuation date and the discount factor as a
//! function of time; discount factors by date, continuously-compounded zero
//! rates and period forward rates are derived here. Time is measured as
//! calendar days from the valuation date divided by [`DAYS_PER_YEAR`].

use fi_core::{DiscountFactor, Rate, Time};
use fi_time::{Date, DateExt};

/// Day basis for converting date spans into curve time.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// A yield (interest-rate) term structure.
pub trait YieldTermStructure: std::fmt::Debug + Send + Sync {
    /// The date at which discount factors equal one.
    fn valuation_date(&self) -> Date;

    /// Discount factor for time `t > 0` (years from the valuation date).
    fn discount(&self, t: Time) -> DiscountFactor;

    /// Curve time of `date`: days from the valuation date / 365.
    fn time_from_reference(&self, date: Date) -> Time {
        self.valuation_date().days_until(date) as Time / DAYS_PER_YEAR
    }

    /// Discount factor for `date`; `1` on or before the valuation date.
    fn discount_factor(&self, date: Date) -> DiscountFactor {
        if date <= self.valuation_date() {
            return 1.0;
        }
        self.discount(self.time_from_reference(date))
    }

    /// Continuously-compounded zero rate to `maturity`; `0` on or before the
    /// valuation date.
    fn zero_rate(&self, maturity: Date) -> Rate {
        if maturity <= self.valuation_date() {
            return 0.0;
        }
        self.zero_rate_at(self.time_from_reference(maturity))
    }

    /// Continuously-compounded zero rate to curve time `t`; `0` for
    /// `t <= 0`.
    fn zero_rate_at(&self, t: Time) -> Rate {
        if t <= 0.0 {
            return 0.0;
        }
        -self.discount(t).ln() / t
    }

    /// Continuously-compounded forward rate between `start` and `end`;
    /// `0` unless `start < end`.
    fn forward_rate(&self, start: Date, end: Date) -> Rate {
        if start >= end {
            return 0.0;
        }
        let df_start = self.discount_factor(start);
        let df_end = self.discount_factor(end);
        let dt = start.days_until(end) as Time / DAYS_PER_YEAR;
        -(df_end / df_start).ln() / dt
    }
}
