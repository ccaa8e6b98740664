//! Discounting swap pricing engine.
//!
//! Both legs run from the valuation date to maturity; the floating leg is
//! projected off the same curve it is discounted on.
//!
//! ```text
//! NPV = float − fixed   (pay fixed)
//! NPV = fixed − float   (receive fixed)
//! ```

use std::sync::Arc;

use fi_cashflows::{cashflows, FixedLegBuilder, FloatingLegBuilder, Leg};
use fi_core::{errors::Result, Error, Real};
use fi_instruments::{Instrument, InterestRateSwap, PricingEngine, PricingResult};
use fi_termstructures::YieldTermStructure;

/// Discounting swap pricing engine.
#[derive(Debug, Clone)]
pub struct DiscountingSwapEngine {
    discount_curve: Arc<dyn YieldTermStructure>,
}

impl DiscountingSwapEngine {
    /// Create a new engine with the given discount curve.
    pub fn new(discount_curve: Arc<dyn YieldTermStructure>) -> Self {
        Self { discount_curve }
    }

    /// Fixed and floating legs of `swap` as seen from the valuation date.
    pub fn legs(&self, swap: &InterestRateSwap) -> Result<(Leg, Leg)> {
        let start = self.discount_curve.valuation_date();
        let end = swap.terms.maturity_date;
        if end <= start {
            return Ok((Leg::new(), Leg::new()));
        }
        let fixed = FixedLegBuilder::new(start, end)
            .with_notional(swap.terms.notional)
            .with_coupon_rate(swap.fixed_rate)
            .with_frequency(swap.fixed_frequency)
            .with_day_count(swap.fixed_day_count)
            .build()?;
        let floating = FloatingLegBuilder::new(start, end)
            .with_notional(swap.terms.notional)
            .with_spread(swap.spread)
            .with_frequency(swap.float_frequency)
            .with_day_count(swap.float_day_count)
            .build(self.discount_curve.as_ref())?;
        Ok((fixed, floating))
    }

    fn leg_npv(&self, leg: &[fi_cashflows::CashFlow]) -> Real {
        cashflows::npv(leg, self.discount_curve.as_ref(), self.discount_curve.valuation_date())
    }
}

impl PricingEngine for DiscountingSwapEngine {
    fn name(&self) -> &'static str {
        "DiscountingSwapEngine"
    }

    fn price(&self, instrument: &Instrument) -> Result<PricingResult> {
        let Instrument::InterestRateSwap(swap) = instrument else {
            return Err(Error::unsupported(self.name(), instrument.type_name()));
        };
        let (fixed, floating) = self.legs(swap)?;
        let fixed_npv = self.leg_npv(&fixed);
        let floating_npv = self.leg_npv(&floating);
        let npv = if swap.pay_fixed {
            floating_npv - fixed_npv
        } else {
            fixed_npv - floating_npv
        };

        Ok(PricingResult::from_npv(&swap.terms.id, npv)
            .with_result("fixed_leg_npv", fixed_npv)
            .with_result("floating_leg_npv", floating_npv))
    }
}
