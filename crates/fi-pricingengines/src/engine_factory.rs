//! Engine selection and construction.
//!
//! [`EngineKind::for_instrument`] is the dispatch table from instrument
//! variant to default engine. It is an exhaustive `match`, so a new
//! instrument variant does not compile until it is mapped here.
//! [`engine_factory`] turns a kind into a `curve → engine` closure, which is
//! how the risk layer reprices an instrument against shocked curves.

use std::sync::Arc;

use fi_instruments::{Instrument, PricingEngine};
use fi_models::{HullWhite, HullWhiteCalibrator};
use fi_termstructures::{VolatilitySurface, YieldCurve, YieldTermStructure};

use crate::black76_engine::Black76Engine;
use crate::discounting_bond_engine::DiscountingBondEngine;
use crate::discounting_swap_engine::DiscountingSwapEngine;
use crate::hull_white_analytic_engine::HullWhiteAnalyticEngine;
use crate::hull_white_tree_engine::{HullWhiteTreeEngine, TreeConfig};
use crate::monte_carlo_engine::{MonteCarloConfig, MonteCarloEngine};

/// Builds an engine for a given curve.
pub type EngineFactory = Arc<dyn Fn(Arc<YieldCurve>) -> Box<dyn PricingEngine> + Send + Sync>;

/// The engines that can be built from a curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum EngineKind {
    /// [`DiscountingBondEngine`].
    DiscountingBond,
    /// [`DiscountingSwapEngine`].
    DiscountingSwap,
    /// [`Black76Engine`]; needs a volatility surface.
    Black76,
    /// [`HullWhiteAnalyticEngine`] with the given parameters.
    HullWhiteAnalytic(HullWhite),
    /// [`HullWhiteTreeEngine`] with the given parameters.
    HullWhiteTree(HullWhite, TreeConfig),
    /// [`MonteCarloEngine`] with the given parameters.
    MonteCarlo(HullWhite, MonteCarloConfig),
}

impl EngineKind {
    /// Default engine for `instrument`.
    pub fn for_instrument(instrument: &Instrument) -> Self {
        match instrument {
            Instrument::ZeroCouponBond(_) | Instrument::FixedRateBond(_) => Self::DiscountingBond,
            Instrument::InterestRateSwap(_) => Self::DiscountingSwap,
            Instrument::Swaption(_) | Instrument::CapFloor(_) => Self::Black76,
        }
    }

    /// Build the engine over `curve`; `volatility` is only read by Black-76.
    pub fn build(
        self,
        curve: Arc<YieldCurve>,
        volatility: &Arc<dyn VolatilitySurface>,
    ) -> Box<dyn PricingEngine> {
        let curve: Arc<dyn YieldTermStructure> = curve;
        match self {
            Self::DiscountingBond => Box::new(DiscountingBondEngine::new(curve)),
            Self::DiscountingSwap => Box::new(DiscountingSwapEngine::new(curve)),
            Self::Black76 => Box::new(Black76Engine::new(curve, Arc::clone(volatility))),
            Self::HullWhiteAnalytic(model) => Box::new(HullWhiteAnalyticEngine::new(curve, model)),
            Self::HullWhiteTree(model, config) => {
                Box::new(HullWhiteTreeEngine::with_config(curve, model, config))
            }
            Self::MonteCarlo(model, config) => {
                Box::new(MonteCarloEngine::with_config(curve, model, config))
            }
        }
    }
}

/// A `curve → engine` closure for `kind`.
pub fn engine_factory(kind: EngineKind, volatility: Arc<dyn VolatilitySurface>) -> EngineFactory {
    Arc::new(move |curve| kind.build(curve, &volatility))
}

/// A calibrator that prices through the analytic Hull-White engine on
/// `curve`.
pub fn hull_white_calibrator(
    curve: Arc<dyn YieldTermStructure>,
) -> HullWhiteCalibrator<impl Fn(HullWhite) -> Box<dyn PricingEngine>> {
    HullWhiteCalibrator::new(move |model: HullWhite| -> Box<dyn PricingEngine> {
        Box::new(HullWhiteAnalyticEngine::new(Arc::clone(&curve), model))
    })
}
