//! Hull-White Monte Carlo engine.
//!
//! Simulates `simulations` short-rate paths (in antithetic pairs) with an
//! Euler step per trading day, `max(10, ⌊252·T⌋)` steps in total. The path
//! starts at the one-day zero rate and drifts with `θ = a · zero(T)`.
//!
//! Payoffs are terminal amounts: `N·(1 + c/f)` for a fixed-rate bond and
//! `N` for a zero-coupon bond. Their average is discounted with the curve
//! discount factor to maturity. The pathwise discount `exp(−∫r dt)` is
//! averaged alongside and reported as `mean_path_discount`.

use std::sync::Arc;

use fi_core::{errors::Result, Error, Real};
use fi_instruments::{Instrument, PricingEngine, PricingResult};
use fi_math::random_numbers::mersenne_twister;
use fi_methods::{HullWhitePathGenerator, MonteCarloModel, ShortRatePath};
use fi_models::HullWhite;
use fi_termstructures::YieldTermStructure;
use fi_time::DateExt;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Trading days per year used for the step count.
const STEPS_PER_YEAR: Real = 252.0;

/// Minimum number of time steps per path.
const MIN_STEPS: usize = 10;

/// Simulation settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonteCarloConfig {
    /// Number of paths, drawn in antithetic pairs.
    pub simulations: usize,
    /// Seed of the Mersenne-Twister generator used by [`MonteCarloEngine::price`].
    pub seed: u64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            simulations: 10_000,
            seed: 42,
        }
    }
}

/// Monte Carlo engine for the Hull-White model.
#[derive(Debug, Clone)]
pub struct MonteCarloEngine {
    curve: Arc<dyn YieldTermStructure>,
    model: HullWhite,
    config: MonteCarloConfig,
}

impl MonteCarloEngine {
    /// Create an engine with default settings.
    pub fn new(curve: Arc<dyn YieldTermStructure>, model: HullWhite) -> Self {
        Self::with_config(curve, model, MonteCarloConfig::default())
    }

    /// Create an engine with explicit settings.
    pub fn with_config(
        curve: Arc<dyn YieldTermStructure>,
        model: HullWhite,
        config: MonteCarloConfig,
    ) -> Self {
        Self { curve, model, config }
    }

    /// Price drawing randomness from `rng` instead of a fresh seeded
    /// generator.
    pub fn price_with_rng<R: Rng + ?Sized>(
        &self,
        instrument: &Instrument,
        rng: &mut R,
    ) -> Result<PricingResult> {
        let terminal_amount = match instrument {
            Instrument::ZeroCouponBond(bond) => bond.terms.notional,
            Instrument::FixedRateBond(bond) => match bond.frequency.periods_per_year() {
                0 => bond.terms.notional,
                f => bond.terms.notional * (1.0 + bond.coupon_rate / f as Real),
            },
            Instrument::InterestRateSwap(_) | Instrument::Swaption(_) | Instrument::CapFloor(_) => {
                return Err(Error::unsupported(self.name(), instrument.type_name()));
            }
        };

        let maturity = instrument.maturity_date();
        let horizon = self.curve.time_from_reference(maturity);
        if horizon <= 0.0 {
            return Ok(PricingResult::from_npv(instrument.id(), 0.0));
        }
        fi_core::ensure!(
            self.config.simulations >= 2,
            "need at least one antithetic pair, got {} simulations",
            self.config.simulations
        );

        let steps = ((STEPS_PER_YEAR * horizon).floor() as usize).max(MIN_STEPS);
        let valuation = self.curve.valuation_date();
        let r0 = self.curve.zero_rate(valuation.add_days(1));
        let theta = self.curve.zero_rate(maturity) * self.model.a;
        let generator = HullWhitePathGenerator::new(self.model, r0, theta, horizon, steps)?;

        let payoff = |_: &ShortRatePath| terminal_amount;
        let (stats, path_discounts) = MonteCarloModel::new(&generator, &payoff)
            .simulate_with_discounts(self.config.simulations, rng);

        let df = self.curve.discount_factor(maturity);
        let (Some(mean), Some(error), Some(path_discount)) =
            (stats.mean(), stats.error_estimate(), path_discounts.mean())
        else {
            fi_core::fail!("simulation produced no samples");
        };
        debug!(
            instrument = instrument.id(),
            paths = stats.samples(),
            steps,
            mean,
            error,
            path_discount,
            "monte carlo simulation finished"
        );

        Ok(PricingResult::from_npv(instrument.id(), mean * df)
            .with_error_estimate(error * df)
            .with_result("simulations", stats.samples() as Real)
            .with_result("steps", steps as Real)
            .with_result("mean_path_discount", path_discount))
    }
}

impl PricingEngine for MonteCarloEngine {
    fn name(&self) -> &'static str {
        "MonteCarloEngine"
    }

    fn price(&self, instrument: &Instrument) -> Result<PricingResult> {
        let mut rng = mersenne_twister(self.config.seed);
        self.price_with_rng(instrument, &mut rng)
    }
}
