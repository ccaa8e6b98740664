//! Bump-and-reprice sensitivities.
//!
//! With `V₀` the value on the base curve and `V±` the values on flat curves
//! at the base one-year zero rate ±1bp:
//!
//! * `DV01 = −(V₊ − V₀)`
//! * `ModifiedDuration = −(V₊ − V₋) / (2·V₀·1bp)`
//! * `Convexity = (V₊ + V₋ − 2·V₀) / (V₀·1bp²)`
//!
//! Duration and convexity of a zero-valued instrument are reported as `0`.

use std::collections::BTreeMap;
use std::sync::Arc;

use fi_core::{errors::Result, Real, BASIS_POINT};
use fi_instruments::Instrument;
use fi_pricingengines::EngineFactory;
use fi_termstructures::YieldCurve;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::portfolio::Portfolio;

/// Sensitivities of an instrument or portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskResult {
    /// Instrument id, or the portfolio name for portfolio-level results.
    pub instrument_id: String,
    /// Value change for a 1bp fall in rates.
    pub dv01: Real,
    /// Percentage price sensitivity per unit rate change.
    pub modified_duration: Real,
    /// Second-order rate sensitivity.
    pub convexity: Real,
    /// Volatility sensitivity; not modelled, always `0`.
    pub vega: Real,
    /// Time decay; not modelled, always `0`.
    pub theta: Real,
    /// Key-rate durations by tenor label; not computed.
    pub key_rate_durations: Option<BTreeMap<String, Real>>,
}

impl RiskResult {
    fn from_values(id: impl Into<String>, base: Real, up: Real, down: Real) -> Self {
        let (modified_duration, convexity) = if base == 0.0 {
            (0.0, 0.0)
        } else {
            (
                -(up - down) / (2.0 * base * BASIS_POINT),
                (up + down - 2.0 * base) / (base * BASIS_POINT * BASIS_POINT),
            )
        };
        Self {
            instrument_id: id.into(),
            dv01: -(up - base),
            modified_duration,
            convexity,
            vega: 0.0,
            theta: 0.0,
            key_rate_durations: None,
        }
    }
}

/// Computes greeks against one base curve.
#[derive(Debug, Clone)]
pub struct GreeksCalculator {
    curve: Arc<YieldCurve>,
}

impl GreeksCalculator {
    /// Calculator over `curve`.
    pub fn new(curve: Arc<YieldCurve>) -> Self {
        Self { curve }
    }

    /// The base curve.
    pub fn curve(&self) -> &Arc<YieldCurve> {
        &self.curve
    }

    fn bumped(&self, bump: Real) -> Result<Arc<YieldCurve>> {
        Ok(Arc::new(self.curve.bumped(bump)?))
    }

    fn value(factory: &EngineFactory, instrument: &Instrument, curve: &Arc<YieldCurve>) -> Result<Real> {
        factory(Arc::clone(curve)).npv(instrument)
    }

    /// `−(V(+1bp) − V)`.
    pub fn dv01(&self, instrument: &Instrument, factory: &EngineFactory) -> Result<Real> {
        let base = Self::value(factory, instrument, &self.curve)?;
        let up = Self::value(factory, instrument, &self.bumped(BASIS_POINT)?)?;
        Ok(-(up - base))
    }

    /// `−(V(+1bp) − V(−1bp)) / (2·V·1bp)`.
    pub fn modified_duration(&self, instrument: &Instrument, factory: &EngineFactory) -> Result<Real> {
        Ok(self.risk(instrument, factory)?.modified_duration)
    }

    /// `(V(+1bp) + V(−1bp) − 2V) / (V·1bp²)`.
    pub fn convexity(&self, instrument: &Instrument, factory: &EngineFactory) -> Result<Real> {
        Ok(self.risk(instrument, factory)?.convexity)
    }

    /// All greeks of one instrument from three reprices.
    pub fn risk(&self, instrument: &Instrument, factory: &EngineFactory) -> Result<RiskResult> {
        let base = Self::value(factory, instrument, &self.curve)?;
        let up = Self::value(factory, instrument, &self.bumped(BASIS_POINT)?)?;
        let down = Self::value(factory, instrument, &self.bumped(-BASIS_POINT)?)?;
        let result = RiskResult::from_values(instrument.id(), base, up, down);
        debug!(
            instrument = instrument.id(),
            dv01 = result.dv01,
            duration = result.modified_duration,
            "greeks computed"
        );
        Ok(result)
    }

    /// Greeks of the whole portfolio, quantity-weighted.
    ///
    /// Positions that fail to price on any of the three curves are left
    /// out.
    pub fn portfolio_risk(&self, portfolio: &Portfolio) -> Result<RiskResult> {
        let base_values = portfolio.position_values(&self.curve);
        let up_curve = self.bumped(BASIS_POINT)?;
        let down_curve = self.bumped(-BASIS_POINT)?;

        let (mut base, mut up, mut down) = (0.0, 0.0, 0.0);
        for (position, v0) in portfolio.positions().iter().zip(base_values) {
            let Some(v0) = v0 else { continue };
            if let (Ok(vu), Ok(vd)) = (position.value(&up_curve), position.value(&down_curve)) {
                base += v0;
                up += vu;
                down += vd;
            }
        }
        Ok(RiskResult::from_values(portfolio.name(), base, up, down))
    }
}
