//! Discounting bond pricing engine.
//!
//! Prices bonds by discounting their future cash flows on the curve:
//! `dirty = Σ cf.amount × d(cf.date)` over flows paid after the valuation
//! date. Accrued interest runs from the last coupon on or before the
//! valuation date (the issue date before the first coupon).

use std::sync::Arc;

use fi_cashflows::{accrued_interest, cashflows, CashFlow, FixedLegBuilder, Leg};
use fi_core::{errors::Result, Error, Real};
use fi_instruments::{FixedRateBond, Instrument, PricingEngine, PricingResult};
use fi_termstructures::YieldTermStructure;
use tracing::debug;

/// Accuracy of the yield-to-maturity solve.
const YIELD_ACCURACY: Real = 1e-12;

/// Discounting bond pricing engine.
#[derive(Debug, Clone)]
pub struct DiscountingBondEngine {
    discount_curve: Arc<dyn YieldTermStructure>,
}

impl DiscountingBondEngine {
    /// Create a new engine with the given discount curve.
    pub fn new(discount_curve: Arc<dyn YieldTermStructure>) -> Self {
        Self { discount_curve }
    }

    /// Coupon and redemption flows of a fixed-rate bond.
    pub fn fixed_rate_leg(bond: &FixedRateBond) -> Result<Leg> {
        FixedLegBuilder::new(bond.terms.issue_date, bond.terms.maturity_date)
            .with_notional(bond.terms.notional)
            .with_coupon_rate(bond.coupon_rate)
            .with_frequency(bond.frequency)
            .with_day_count(bond.terms.day_count)
            .build()
    }

    /// Attach the yield of `leg` at the result's dirty price. Left unset for
    /// a worthless leg or a yield outside the solver's bracket.
    fn with_yield(&self, result: PricingResult, leg: &[CashFlow]) -> PricingResult {
        if result.dirty_price <= 0.0 {
            return result;
        }
        let valuation = self.discount_curve.valuation_date();
        match cashflows::yield_rate(leg, result.dirty_price, valuation, YIELD_ACCURACY) {
            Ok(y) => result.with_yield_to_maturity(y),
            Err(err) => {
                debug!(instrument = %result.instrument_id, error = %err, "yield to maturity not solved");
                result
            }
        }
    }

    fn accrued(&self, bond: &FixedRateBond, leg: &[CashFlow]) -> Real {
        let valuation = self.discount_curve.valuation_date();
        if bond.terms.maturity_date <= valuation {
            return 0.0;
        }
        let last = cashflows::previous_cashflow_date(leg, valuation).unwrap_or(bond.terms.issue_date);
        accrued_interest(
            last,
            valuation,
            bond.coupon_rate,
            bond.terms.notional,
            bond.terms.day_count,
        )
    }
}

impl PricingEngine for DiscountingBondEngine {
    fn name(&self) -> &'static str {
        "DiscountingBondEngine"
    }

    fn price(&self, instrument: &Instrument) -> Result<PricingResult> {
        let valuation = self.discount_curve.valuation_date();
        match instrument {
            Instrument::ZeroCouponBond(bond) => {
                let leg = [CashFlow::simple(bond.terms.maturity_date, bond.terms.notional)];
                let dirty = cashflows::npv(&leg, self.discount_curve.as_ref(), valuation);
                Ok(self.with_yield(PricingResult::from_npv(&bond.terms.id, dirty), &leg))
            }
            Instrument::FixedRateBond(bond) => {
                let leg = Self::fixed_rate_leg(bond)?;
                let dirty = cashflows::npv(&leg, self.discount_curve.as_ref(), valuation);
                let result = PricingResult::from_npv(&bond.terms.id, dirty)
                    .with_accrued_interest(self.accrued(bond, &leg));
                Ok(self.with_yield(result, &leg))
            }
            other => Err(Error::unsupported(self.name(), other.type_name())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fi_instruments::{InstrumentTerms, ZeroCouponBond};
    use fi_termstructures::YieldCurve;
    use fi_time::{date::ymd, CouponFrequency, Date, DateExt};

    fn valuation() -> Date {
        ymd(2025, 1, 15).unwrap()
    }

    fn engine(rate: Real) -> DiscountingBondEngine {
        DiscountingBondEngine::new(Arc::new(YieldCurve::flat(valuation(), rate).unwrap()))
    }

    #[test]
    fn zero_coupon_bond_discounts_notional() {
        let bond: Instrument = ZeroCouponBond::new(InstrumentTerms::new(
            "Z1",
            1_000_000.0,
            valuation(),
            valuation().add_days(365),
        ))
        .into();
        let result = engine(0.05).price(&bond).unwrap();
        assert_abs_diff_eq!(result.dirty_price, 951_229.424_500_714, epsilon = 1e-6);
        assert_eq!(result.accrued_interest, 0.0);
        assert_eq!(result.instrument_id, "Z1");
        assert_abs_diff_eq!(result.yield_to_maturity.unwrap(), 0.05, epsilon = 1e-9);
    }

    #[test]
    fn coupon_bond_yield_matches_flat_curve() {
        let terms = InstrumentTerms::new("B4", 100.0, ymd(2024, 7, 15).unwrap(), ymd(2031, 7, 15).unwrap());
        let bond: Instrument = FixedRateBond::new(terms, 0.06, CouponFrequency::SemiAnnual).into();
        let result = engine(0.042).price(&bond).unwrap();
        // Curve and yield both discount continuously over days/365.
        assert_abs_diff_eq!(result.yield_to_maturity.unwrap(), 0.042, epsilon = 1e-9);
        let cheaper = engine(0.05).price(&bond).unwrap();
        assert!(cheaper.yield_to_maturity.unwrap() > result.yield_to_maturity.unwrap());
    }

    #[test]
    fn coupon_bond_below_par_when_coupon_below_rate() {
        let terms = InstrumentTerms::new("B1", 100.0, valuation(), ymd(2030, 1, 15).unwrap());
        let bond: Instrument = FixedRateBond::new(terms, 0.03, CouponFrequency::SemiAnnual).into();
        let result = engine(0.05).price(&bond).unwrap();
        assert!(result.dirty_price < 100.0 && result.dirty_price > 85.0, "{}", result.dirty_price);
        assert_eq!(result.clean_price, result.dirty_price);
    }

    #[test]
    fn seasoned_bond_accrues_since_last_coupon() {
        let terms = InstrumentTerms::new("B2", 100.0, ymd(2024, 7, 15).unwrap(), ymd(2027, 7, 15).unwrap());
        let bond: Instrument = FixedRateBond::new(terms, 0.06, CouponFrequency::Annual).into();
        let result = engine(0.04).price(&bond).unwrap();
        // 184 days from 2024-07-15 to 2025-01-15 on Act/365.
        assert_abs_diff_eq!(result.accrued_interest, 100.0 * 0.06 * 184.0 / 365.0, epsilon = 1e-12);
        assert_abs_diff_eq!(
            result.clean_price,
            result.dirty_price - result.accrued_interest,
            epsilon = 1e-12
        );
    }

    #[test]
    fn matured_bond_is_worth_nothing() {
        let terms = InstrumentTerms::new("B3", 100.0, ymd(2020, 1, 15).unwrap(), ymd(2024, 1, 15).unwrap());
        let bond: Instrument = FixedRateBond::new(terms, 0.05, CouponFrequency::Annual).into();
        let result = engine(0.05).price(&bond).unwrap();
        assert_eq!(result.dirty_price, 0.0);
        assert_eq!(result.accrued_interest, 0.0);
        assert_eq!(result.yield_to_maturity, None);
    }
}
