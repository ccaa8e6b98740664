//! Black-76 engine for swaptions and caps/floors.
//!
//! Forwards and annuities come from the discount curve, volatilities from
//! a [`VolatilitySurface`] keyed by expiry, whole-year tenor label and
//! strike.
//!
//! * Swaption: `F = (d(expiry) − d(end)) / A` with `A = Σ τᵢ·d(tᵢ)` over
//!   the underlying fixed-leg schedule; payer `N·A·(F·Φ(d1) − K·Φ(d2))`,
//!   receiver `N·A·(K·Φ(−d2) − F·Φ(−d1))`.
//! * Cap/floor: one caplet per period after the first, each
//!   `d(end)·τ·N·black(F, K, σ, T)` with `F` the simple forward over the
//!   period.
//!
//! Options with non-positive time to expiry are worth zero.

use std::sync::Arc;

use fi_core::{errors::Result, Error, Rate, Real, Time, Volatility};
use fi_instruments::{CapFloor, Instrument, OptionType, PricingEngine, PricingResult, Swaption};
use fi_math::normal_cdf;
use fi_termstructures::{VolatilitySurface, YieldTermStructure, DAYS_PER_YEAR};
use fi_time::{BusinessDayConvention, Date, DateExt, Schedule, WeekendsOnly};

/// Undiscounted Black-76 value of a call (`is_call`) or put on a forward.
///
/// With no time value (`σ√T ≤ 0`) or a non-positive forward or strike the
/// intrinsic value is returned instead of propagating `NaN`.
///
/// # Example
/// ```
/// use fi_pricingengines::black_formula;
/// let atm = black_formula(true, 0.04, 0.04, 0.2, 1.0);
/// assert!((atm - 0.04 * (2.0 * fi_math::normal_cdf(0.1) - 1.0)).abs() < 1e-15);
/// ```
pub fn black_formula(is_call: bool, forward: Rate, strike: Rate, sigma: Volatility, t: Time) -> Real {
    let std_dev = sigma * t.max(0.0).sqrt();
    if std_dev <= 0.0 || forward <= 0.0 || strike <= 0.0 {
        return if is_call {
            (forward - strike).max(0.0)
        } else {
            (strike - forward).max(0.0)
        };
    }
    let d1 = ((forward / strike).ln() + 0.5 * std_dev * std_dev) / std_dev;
    let d2 = d1 - std_dev;
    if is_call {
        forward * normal_cdf(d1) - strike * normal_cdf(d2)
    } else {
        strike * normal_cdf(-d2) - forward * normal_cdf(-d1)
    }
}

/// Black-76 pricing engine.
#[derive(Debug, Clone)]
pub struct Black76Engine {
    curve: Arc<dyn YieldTermStructure>,
    volatility: Arc<dyn VolatilitySurface>,
}

impl Black76Engine {
    /// Create an engine over `curve` with volatilities from `volatility`.
    pub fn new(curve: Arc<dyn YieldTermStructure>, volatility: Arc<dyn VolatilitySurface>) -> Self {
        Self { curve, volatility }
    }

    fn years_between(start: Date, end: Date) -> Time {
        start.days_until(end) as Time / DAYS_PER_YEAR
    }

    /// Fixed-leg annuity `Σ τᵢ·d(tᵢ)` of a swap starting at `start`.
    pub fn annuity(&self, swaption: &Swaption) -> Result<Real> {
        let swap = &swaption.underlying;
        let start = swaption.expiry_date;
        let end = swap.terms.maturity_date;
        if end <= start {
            return Ok(0.0);
        }
        let schedule = Schedule::backward(
            start,
            end,
            swap.fixed_frequency,
            &WeekendsOnly,
            BusinessDayConvention::Unadjusted,
        )?;
        let mut previous = start;
        let mut annuity = 0.0;
        for &date in schedule.iter() {
            let tau = swap.fixed_day_count.year_fraction(previous, date);
            annuity += tau * self.curve.discount_factor(date);
            previous = date;
        }
        Ok(annuity)
    }

    fn price_swaption(&self, swaption: &Swaption) -> Result<PricingResult> {
        let is_call = match swaption.option_type {
            OptionType::Payer => true,
            OptionType::Receiver => false,
            other => {
                return Err(Error::Validation(format!(
                    "swaption option type must be Payer or Receiver, got {other}"
                )))
            }
        };
        let id = &swaption.terms.id;
        let t = self.curve.time_from_reference(swaption.expiry_date);
        if t <= 0.0 {
            return Ok(PricingResult::from_npv(id, 0.0));
        }

        let swap = &swaption.underlying;
        let strike = swaption.strike();
        let annuity = self.annuity(swaption)?;
        let forward = if annuity > 0.0 {
            (self.curve.discount_factor(swaption.expiry_date)
                - self.curve.discount_factor(swap.terms.maturity_date))
                / annuity
        } else {
            strike
        };

        let tenor_years = Self::years_between(swaption.expiry_date, swap.terms.maturity_date);
        let tenor = format!("{}Y", tenor_years.round() as i64);
        let sigma = self.volatility.volatility(swaption.expiry_date, &tenor, strike);

        let value = swaption.terms.notional * annuity * black_formula(is_call, forward, strike, sigma, t);
        Ok(PricingResult::from_npv(id, value)
            .with_result("annuity", annuity)
            .with_result("forward_rate", forward)
            .with_result("volatility", sigma))
    }

    fn price_cap_floor(&self, cap: &CapFloor) -> Result<PricingResult> {
        let is_call = match cap.option_type {
            OptionType::Cap => true,
            OptionType::Floor => false,
            other => {
                return Err(Error::Validation(format!(
                    "cap/floor option type must be Cap or Floor, got {other}"
                )))
            }
        };
        // A zero frequency has no caplet periods; price it quarterly.
        let months = cap.frequency.months().unwrap_or(3);
        let valuation = self.curve.valuation_date();
        let issue = cap.terms.issue_date;

        let mut total = 0.0;
        let mut caplets = 0usize;
        // Period k runs from issue + k·m to issue + (k+1)·m; the first
        // period (k = 0) is already fixed and skipped.
        let mut k = 1;
        loop {
            let start = issue.add_months(months * k);
            let end = issue.add_months(months * (k + 1));
            if end > cap.terms.maturity_date {
                break;
            }
            k += 1;

            let t = Self::years_between(valuation, start);
            if t <= 0.0 {
                continue;
            }
            let tau = cap.terms.day_count.year_fraction(start, end);
            let forward = (self.curve.discount_factor(start) / self.curve.discount_factor(end) - 1.0) / tau;
            let tenor = format!("{}Y", Self::years_between(valuation, end).ceil() as i64);
            let sigma = self.volatility.volatility(start, &tenor, cap.strike);

            total += self.curve.discount_factor(end)
                * tau
                * cap.terms.notional
                * black_formula(is_call, forward, cap.strike, sigma, t);
            caplets += 1;
        }

        Ok(PricingResult::from_npv(&cap.terms.id, total).with_result("caplets", caplets as Real))
    }
}

impl PricingEngine for Black76Engine {
    fn name(&self) -> &'static str {
        "BlackEngine"
    }

    fn price(&self, instrument: &Instrument) -> Result<PricingResult> {
        match instrument {
            Instrument::Swaption(swaption) => self.price_swaption(swaption),
            Instrument::CapFloor(cap) => self.price_cap_floor(cap),
            Instrument::ZeroCouponBond(_) | Instrument::FixedRateBond(_) | Instrument::InterestRateSwap(_) => {
                Err(Error::unsupported(self.name(), instrument.type_name()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;
    use fi_instruments::{FixedRateBond, InstrumentTerms, InterestRateSwap};
    use fi_termstructures::{FlatVolatility, SwaptionVolatilityCube, YieldCurve};
    use fi_time::{date::ymd, CouponFrequency, DayCountConvention};

    fn valuation() -> Date {
        ymd(2025, 1, 15).unwrap()
    }

    fn curve() -> Arc<YieldCurve> {
        Arc::new(YieldCurve::flat(valuation(), 0.04).unwrap())
    }

    fn engine(vol: Volatility) -> Black76Engine {
        Black76Engine::new(curve(), Arc::new(FlatVolatility::new(vol)))
    }

    fn swaption(strike: Rate, option_type: OptionType) -> Swaption {
        let expiry = ymd(2026, 1, 15).unwrap();
        let maturity = ymd(2031, 1, 15).unwrap();
        let swap = InterestRateSwap::new(
            InstrumentTerms::new("U", 1e6, expiry, maturity),
            strike,
            CouponFrequency::Annual,
            DayCountConvention::Actual365,
            true,
        );
        Swaption::new(InstrumentTerms::new("SW", 1e6, valuation(), maturity), swap, expiry, option_type)
    }

    fn cap(strike: Rate, option_type: OptionType) -> CapFloor {
        CapFloor::new(
            InstrumentTerms::new("CF", 1e6, valuation(), ymd(2028, 1, 15).unwrap()),
            strike,
            CouponFrequency::Quarterly,
            option_type,
        )
    }

    #[test]
    fn atm_black_formula() {
        let sigma = 0.2;
        let expected = 0.05 * (2.0 * normal_cdf(0.5 * sigma) - 1.0);
        assert_abs_diff_eq!(black_formula(true, 0.05, 0.05, sigma, 1.0), expected, epsilon = 1e-15);
        assert_abs_diff_eq!(black_formula(false, 0.05, 0.05, sigma, 1.0), expected, epsilon = 1e-15);
    }

    #[test]
    fn degenerate_inputs_give_intrinsic_value() {
        assert_eq!(black_formula(true, 0.05, 0.04, 0.0, 1.0), 0.05 - 0.04);
        assert_eq!(black_formula(false, 0.05, 0.04, 0.2, 0.0), 0.0);
        assert_eq!(black_formula(false, 0.05, 0.0, 0.2, 1.0), 0.0);
        assert!(black_formula(true, 0.05, 0.04, 0.0, 0.0).is_finite());
    }

    #[test]
    fn swaption_put_call_parity() {
        let e = engine(0.25);
        let payer = e.price(&swaption(0.035, OptionType::Payer).into()).unwrap();
        let receiver = e.price(&swaption(0.035, OptionType::Receiver).into()).unwrap();
        let annuity = payer.additional_results["annuity"];
        let forward = payer.additional_results["forward_rate"];
        assert!(annuity > 4.0 && annuity < 5.0, "{annuity}");
        assert_abs_diff_eq!(
            payer.npv - receiver.npv,
            1e6 * annuity * (forward - 0.035),
            epsilon = 1e-6
        );
    }

    #[test]
    fn forward_swap_rate_near_flat_rate() {
        let payer = engine(0.2).price(&swaption(0.04, OptionType::Payer).into()).unwrap();
        // Simple annual rate equivalent to 4% continuous.
        assert_abs_diff_eq!(payer.additional_results["forward_rate"], 0.04_f64.exp() - 1.0, epsilon = 2e-4);
        assert!(payer.npv > 0.0);
    }

    #[test]
    fn swaption_vol_looked_up_by_tenor() {
        let cube = SwaptionVolatilityCube::new(0.2).with_tenor("5Y", 0.3);
        let e = Black76Engine::new(curve(), Arc::new(cube));
        let r = e.price(&swaption(0.04, OptionType::Payer).into()).unwrap();
        assert_eq!(r.additional_results["volatility"], 0.3);
    }

    #[test]
    fn expired_swaption_is_worth_zero() {
        let mut s = swaption(0.04, OptionType::Payer);
        s.expiry_date = valuation();
        assert_eq!(engine(0.2).npv(&s.into()).unwrap(), 0.0);
    }

    #[test]
    fn cap_floor_parity() {
        let e = engine(0.3);
        let c = e.price(&cap(0.04, OptionType::Cap).into()).unwrap();
        let f = e.price(&cap(0.04, OptionType::Floor).into()).unwrap();
        // Three years of quarters, first skipped.
        assert_eq!(c.additional_results["caplets"], 11.0);

        let zero_vol = engine(0.0);
        let intrinsic_cap = zero_vol.npv(&cap(0.04, OptionType::Cap).into()).unwrap();
        let intrinsic_floor = zero_vol.npv(&cap(0.04, OptionType::Floor).into()).unwrap();
        assert_abs_diff_eq!(c.npv - f.npv, intrinsic_cap - intrinsic_floor, epsilon = 1e-6);
        assert!(c.npv > intrinsic_cap);
    }

    #[test]
    fn higher_strike_cap_is_cheaper() {
        let e = engine(0.2);
        let low = e.npv(&cap(0.03, OptionType::Cap).into()).unwrap();
        let high = e.npv(&cap(0.05, OptionType::Cap).into()).unwrap();
        assert!(low > high);
    }

    #[test]
    fn wrong_option_type_is_validation_error() {
        let err = engine(0.2).price(&cap(0.04, OptionType::Payer).into()).unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[test]
    fn bonds_are_unsupported() {
        let terms = InstrumentTerms::new("B", 100.0, valuation(), ymd(2030, 1, 15).unwrap());
        let bond: Instrument = FixedRateBond::new(terms, 0.05, CouponFrequency::Annual).into();
        assert_eq!(
            engine(0.2).price(&bond).unwrap_err().to_string(),
            "BlackEngine does not support instrument type: FixedRateBond"
        );
    }

    proptest! {
        #[test]
        fn black_formula_parity_and_bounds(
            forward in 0.001..0.2_f64,
            strike in 0.001..0.2_f64,
            sigma in 0.0..1.0_f64,
            t in 0.0..10.0_f64,
        ) {
            let call = black_formula(true, forward, strike, sigma, t);
            let put = black_formula(false, forward, strike, sigma, t);
            prop_assert!((call - put - (forward - strike)).abs() < 1e-12);
            prop_assert!(call >= (forward - strike).max(0.0) - 1e-12);
            prop_assert!(call <= forward + 1e-12);
        }
    }
}
