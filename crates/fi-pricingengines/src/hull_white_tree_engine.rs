//! Hull-White trinomial-tree engine.
//!
//! The short rate at node `(i, j)` is the curve's zero rate at `tᵢ` plus
//! `j·dx`; no exact `α(t)` fitting is performed. Bonds pay a unit amount at
//! the terminal nodes and none of the supported instruments can be
//! exercised early, so the induction reduces to European valuation.

use std::sync::Arc;

use fi_core::{errors::Result, Error, Real, Time};
use fi_instruments::{Instrument, PricingEngine, PricingResult};
use fi_methods::TrinomialTree;
use fi_models::HullWhite;
use fi_termstructures::{YieldTermStructure, DAYS_PER_YEAR};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Lattice settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TreeConfig {
    /// Number of time steps.
    pub steps: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self { steps: 50 }
    }
}

/// Trinomial-tree engine for the Hull-White model.
#[derive(Debug, Clone)]
pub struct HullWhiteTreeEngine {
    curve: Arc<dyn YieldTermStructure>,
    model: HullWhite,
    config: TreeConfig,
}

impl HullWhiteTreeEngine {
    /// Create an engine with the default 50-step lattice.
    pub fn new(curve: Arc<dyn YieldTermStructure>, model: HullWhite) -> Self {
        Self::with_config(curve, model, TreeConfig::default())
    }

    /// Create an engine with explicit lattice settings.
    pub fn with_config(curve: Arc<dyn YieldTermStructure>, model: HullWhite, config: TreeConfig) -> Self {
        Self { curve, model, config }
    }

    /// Curve zero rate at `t`, read no earlier than one day out.
    fn base_rate(&self, t: Time) -> Real {
        self.curve.zero_rate_at(t.max(1.0 / DAYS_PER_YEAR))
    }

    fn unit_price(&self, horizon: Time) -> Result<Real> {
        let tree = TrinomialTree::new(self.model, horizon, self.config.steps)?;
        let dx = tree.dx();
        Ok(tree.roll_back(
            |_| 1.0,
            |i, j| self.base_rate(tree.time(i)) + j as Real * dx,
            |_, _| 0.0,
        ))
    }
}

impl PricingEngine for HullWhiteTreeEngine {
    fn name(&self) -> &'static str {
        "HullWhiteTreeEngine"
    }

    fn price(&self, instrument: &Instrument) -> Result<PricingResult> {
        match instrument {
            Instrument::ZeroCouponBond(_) | Instrument::FixedRateBond(_) => {
                let horizon = self.curve.time_from_reference(instrument.maturity_date());
                let value = if horizon <= 0.0 { 0.0 } else { self.unit_price(horizon)? };
                debug!(instrument = instrument.id(), horizon, steps = self.config.steps, value, "tree rolled back");
                Ok(PricingResult::from_npv(instrument.id(), value)
                    .with_result("steps", self.config.steps as Real))
            }
            Instrument::InterestRateSwap(_) | Instrument::Swaption(_) | Instrument::CapFloor(_) => {
                Err(Error::unsupported(self.name(), instrument.type_name()))
            }
        }
    }
}
