//! Vanilla interest-rate swap record.

use fi_core::{Rate, Spread};
use fi_time::{CouponFrequency, DayCountConvention};
use serde::{Deserialize, Serialize};

use crate::enums::FloatingRateIndex;
use crate::instrument::InstrumentTerms;

/// Fixed-for-floating swap on a single notional.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterestRateSwap {
    /// Shared terms.
    #[serde(flatten)]
    pub terms: InstrumentTerms,
    /// Fixed coupon rate.
    pub fixed_rate: Rate,
    /// Fixed-leg frequency.
    pub fixed_frequency: CouponFrequency,
    /// Fixed-leg accrual.
    pub fixed_day_count: DayCountConvention,
    /// Floating index.
    #[serde(default)]
    pub float_index: FloatingRateIndex,
    /// Floating-leg frequency.
    pub float_frequency: CouponFrequency,
    /// Floating-leg accrual.
    pub float_day_count: DayCountConvention,
    /// Spread over the floating index.
    #[serde(default)]
    pub spread: Spread,
    /// `true` when paying fixed and receiving floating.
    pub pay_fixed: bool,
}

impl InterestRateSwap {
    /// A swap with identical fixed and floating conventions and no spread.
    pub fn new(
        terms: InstrumentTerms,
        fixed_rate: Rate,
        frequency: CouponFrequency,
        day_count: DayCountConvention,
        pay_fixed: bool,
    ) -> Self {
        Self {
            terms,
            fixed_rate,
            fixed_frequency: frequency,
            fixed_day_count: day_count,
            float_index: FloatingRateIndex::default(),
            float_frequency: frequency,
            float_day_count: day_count,
            spread: 0.0,
            pay_fixed,
        }
    }

    /// Set floating-leg conventions.
    pub fn with_floating_leg(
        mut self,
        index: FloatingRateIndex,
        frequency: CouponFrequency,
        day_count: DayCountConvention,
        spread: Spread,
    ) -> Self {
        self.float_index = index;
        self.float_frequency = frequency;
        self.float_day_count = day_count;
        self.spread = spread;
        self
    }
}
