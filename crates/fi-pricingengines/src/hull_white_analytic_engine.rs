//! Hull-White analytic surrogate.
//!
//! A cheap zero-coupon-style price per unit notional,
//!
//! ```text
//! P = d(T) · (1 + σ√T − 0.1·a·T)
//! ```
//!
//! smooth and monotone in `(a, σ)`, which is all the calibrator needs from
//! it. It is not a rigorous Hull-White bond formula.

use std::sync::Arc;

use fi_core::{errors::Result, Error, Real};
use fi_instruments::{Instrument, PricingEngine, PricingResult};
use fi_models::HullWhite;
use fi_termstructures::YieldTermStructure;

/// Closed-form Hull-White surrogate for bonds.
#[derive(Debug, Clone)]
pub struct HullWhiteAnalyticEngine {
    curve: Arc<dyn YieldTermStructure>,
    model: HullWhite,
}

impl HullWhiteAnalyticEngine {
    /// Create an engine for `model` over `curve`.
    pub fn new(curve: Arc<dyn YieldTermStructure>, model: HullWhite) -> Self {
        Self { curve, model }
    }

    /// Model parameters.
    pub fn model(&self) -> HullWhite {
        self.model
    }

    fn unit_price(&self, instrument: &Instrument) -> Real {
        let maturity = instrument.maturity_date();
        let t = self.curve.time_from_reference(maturity);
        if t <= 0.0 {
            return 0.0;
        }
        let HullWhite { a, sigma } = self.model;
        self.curve.discount_factor(maturity) * (1.0 + sigma * t.sqrt() - 0.1 * a * t)
    }
}

impl PricingEngine for HullWhiteAnalyticEngine {
    fn name(&self) -> &'static str {
        "HullWhiteEngine"
    }

    fn price(&self, instrument: &Instrument) -> Result<PricingResult> {
        match instrument {
            Instrument::ZeroCouponBond(_) | Instrument::FixedRateBond(_) => Ok(
                PricingResult::from_npv(instrument.id(), self.unit_price(instrument)),
            ),
            Instrument::InterestRateSwap(_) | Instrument::Swaption(_) | Instrument::CapFloor(_) => {
                Err(Error::unsupported(self.name(), instrument.type_name()))
            }
        }
    }
}
