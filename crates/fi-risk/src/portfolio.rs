//! Positions, portfolios and the report records built over them.

use std::fmt;
use std::sync::Arc;

use fi_core::{errors::Result, Real};
use fi_instruments::{Instrument, PricingResult};
use fi_pricingengines::{engine_factory, EngineFactory, EngineKind};
use fi_termstructures::{VolatilitySurface, YieldCurve};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::greeks::RiskResult;
use crate::scenario::ScenarioResult;
use crate::var::VaRResult;

/// A quantity of one instrument, with the factory that prices it.
#[derive(Clone)]
pub struct Position {
    instrument: Instrument,
    quantity: Real,
    factory: EngineFactory,
}

impl Position {
    /// Position priced by engines from `factory`.
    pub fn new(instrument: impl Into<Instrument>, quantity: Real, factory: EngineFactory) -> Self {
        Self {
            instrument: instrument.into(),
            quantity,
            factory,
        }
    }

    /// Position priced by the default engine for its instrument variant.
    pub fn with_default_engine(
        instrument: impl Into<Instrument>,
        quantity: Real,
        volatility: Arc<dyn VolatilitySurface>,
    ) -> Self {
        let instrument = instrument.into();
        let kind = EngineKind::for_instrument(&instrument);
        Self::new(instrument, quantity, engine_factory(kind, volatility))
    }

    /// The instrument held.
    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    /// Number of units held; negative for short positions.
    pub fn quantity(&self) -> Real {
        self.quantity
    }

    /// Engine factory used for every reprice.
    pub fn factory(&self) -> &EngineFactory {
        &self.factory
    }

    /// Price one unit of the instrument under `curve`.
    pub fn price(&self, curve: &Arc<YieldCurve>) -> Result<PricingResult> {
        (self.factory)(Arc::clone(curve)).price(&self.instrument)
    }

    /// `npv · quantity` under `curve`.
    pub fn value(&self, curve: &Arc<YieldCurve>) -> Result<Real> {
        Ok(self.price(curve)?.npv * self.quantity)
    }
}

impl fmt::Debug for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Position")
            .field("instrument", &self.instrument.id())
            .field("quantity", &self.quantity)
            .finish_non_exhaustive()
    }
}

/// A named list of positions.
#[derive(Debug, Clone, Default)]
pub struct Portfolio {
    name: String,
    positions: Vec<Position>,
}

impl Portfolio {
    /// Empty portfolio.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            positions: Vec::new(),
        }
    }

    /// Builder-style [`Portfolio::add`].
    pub fn with_position(mut self, position: Position) -> Self {
        self.positions.push(position);
        self
    }

    /// Append a position.
    pub fn add(&mut self, position: Position) {
        self.positions.push(position);
    }

    /// Portfolio name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Positions in insertion order.
    pub fn positions(&self) -> &[Position] {
        &self.positions
    }

    /// Number of positions.
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    /// `true` if the portfolio holds no positions.
    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// Value of each position under `curve`; `None` where pricing failed.
    pub fn position_values(&self, curve: &Arc<YieldCurve>) -> Vec<Option<Real>> {
        self.positions
            .iter()
            .map(|position| match position.value(curve) {
                Ok(value) => Some(value),
                Err(err) => {
                    warn!(
                        portfolio = %self.name,
                        instrument = position.instrument.id(),
                        error = %err,
                        "position excluded from portfolio value"
                    );
                    None
                }
            })
            .collect()
    }

    /// Σ price·quantity under `curve`, over the positions that price.
    pub fn total_npv(&self, curve: &Arc<YieldCurve>) -> Real {
        self.position_values(curve).into_iter().flatten().sum()
    }

    /// `(base, shocked)` totals over positions that price both under the
    /// base curve (`base_values`) and under `curve`.
    pub(crate) fn revalue(&self, base_values: &[Option<Real>], curve: &Arc<YieldCurve>) -> (Real, Real) {
        self.positions
            .iter()
            .zip(base_values)
            .filter_map(|(position, base)| {
                let base = (*base)?;
                match position.value(curve) {
                    Ok(shocked) => Some((base, shocked)),
                    Err(err) => {
                        debug!(
                            instrument = position.instrument.id(),
                            error = %err,
                            "position excluded from shocked revaluation"
                        );
                        None
                    }
                }
            })
            .fold((0.0, 0.0), |(base, shocked), (b, s)| (base + b, shocked + s))
    }

    /// Per-position values under `curve`.
    pub fn report(&self, curve: &Arc<YieldCurve>) -> PortfolioReport {
        let items: Vec<PositionDetail> = self
            .positions
            .iter()
            .zip(self.position_values(curve))
            .map(|(position, npv)| PositionDetail {
                instrument_id: position.instrument.id().to_string(),
                instrument_type: position.instrument.type_name().to_string(),
                quantity: position.quantity,
                npv,
            })
            .collect();
        PortfolioReport {
            portfolio_name: self.name.clone(),
            total_npv: items.iter().filter_map(|item| item.npv).sum(),
            items,
        }
    }
}

/// One line of a [`PortfolioReport`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PositionDetail {
    /// Instrument identifier.
    pub instrument_id: String,
    /// Instrument variant name.
    pub instrument_type: String,
    /// Units held.
    pub quantity: Real,
    /// Position value, `None` if the instrument failed to price.
    pub npv: Option<Real>,
}

/// Valuation of every position in a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioReport {
    /// Portfolio name.
    pub portfolio_name: String,
    /// Sum of the priced position values.
    pub total_npv: Real,
    /// One entry per position.
    pub items: Vec<PositionDetail>,
}

/// Portfolio-level greeks with optional VaR and scenario results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskReport {
    /// Portfolio name.
    pub portfolio_name: String,
    /// Greeks of the whole portfolio.
    pub portfolio_greeks: RiskResult,
    /// VaR run, if any.
    pub var: Option<VaRResult>,
    /// Scenario runs.
    pub scenario_results: Vec<ScenarioResult>,
}

impl RiskReport {
    /// Report holding only the greeks.
    pub fn new(portfolio_name: impl Into<String>, portfolio_greeks: RiskResult) -> Self {
        Self {
            portfolio_name: portfolio_name.into(),
            portfolio_greeks,
            var: None,
            scenario_results: Vec::new(),
        }
    }

    /// Attach a VaR result.
    pub fn with_var(mut self, var: VaRResult) -> Self {
        self.var = Some(var);
        self
    }

    /// Attach scenario results.
    pub fn with_scenarios(mut self, scenarios: Vec<ScenarioResult>) -> Self {
        self.scenario_results = scenarios;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fi_instruments::{FixedRateBond, InstrumentTerms, InterestRateSwap, ZeroCouponBond};
    use fi_models::HullWhite;
    use fi_termstructures::FlatVolatility;
    use fi_time::{date::ymd, CouponFrequency, Date, DateExt, DayCountConvention};

    fn valuation() -> Date {
        ymd(2025, 1, 15).unwrap()
    }

    fn curve() -> Arc<YieldCurve> {
        Arc::new(YieldCurve::flat(valuation(), 0.05).unwrap())
    }

    fn vol() -> Arc<dyn VolatilitySurface> {
        Arc::new(FlatVolatility::new(0.2))
    }

    fn zero(id: &str, years: i32) -> ZeroCouponBond {
        ZeroCouponBond::new(InstrumentTerms::new(id, 1000.0, valuation(), valuation().add_years(years)))
    }

    #[test]
    fn total_npv_scales_by_quantity() {
        let single = Portfolio::new("one").with_position(Position::with_default_engine(zero("Z", 1), 1.0, vol()));
        let triple = Portfolio::new("three").with_position(Position::with_default_engine(zero("Z", 1), 3.0, vol()));
        let v = single.total_npv(&curve());
        assert!(v > 0.0);
        assert_abs_diff_eq!(triple.total_npv(&curve()), 3.0 * v, epsilon = 1e-9);
    }

    #[test]
    fn failing_position_is_excluded() {
        let swap = InterestRateSwap::new(
            InstrumentTerms::new("S", 1e6, valuation(), valuation().add_years(5)),
            0.05,
            CouponFrequency::Annual,
            DayCountConvention::Actual360,
            true,
        );
        let analytic = engine_factory(EngineKind::HullWhiteAnalytic(HullWhite::default()), vol());
        let bond = FixedRateBond::new(
            InstrumentTerms::new("B", 1000.0, valuation(), valuation().add_years(3)),
            0.05,
            CouponFrequency::Annual,
        );
        let portfolio = Portfolio::new("mixed")
            .with_position(Position::with_default_engine(bond.clone(), 1.0, vol()))
            .with_position(Position::new(swap, 1.0, analytic));
        let bond_only = Portfolio::new("bond").with_position(Position::with_default_engine(bond, 1.0, vol()));

        assert_eq!(portfolio.total_npv(&curve()), bond_only.total_npv(&curve()));

        let report = portfolio.report(&curve());
        assert_eq!(report.items.len(), 2);
        assert!(report.items[0].npv.is_some());
        assert_eq!(report.items[1].npv, None);
        assert_eq!(report.items[1].instrument_type, "InterestRateSwap");
        assert_eq!(report.total_npv, report.items[0].npv.unwrap());
    }

    #[test]
    fn revalue_skips_positions_missing_from_base() {
        let portfolio = Portfolio::new("p")
            .with_position(Position::with_default_engine(zero("A", 1), 1.0, vol()))
            .with_position(Position::with_default_engine(zero("B", 2), 1.0, vol()));
        let base = portfolio.position_values(&curve());
        let (b, s) = portfolio.revalue(&[base[0], None], &curve());
        assert_eq!(b, base[0].unwrap());
        assert_eq!(s, base[0].unwrap());
    }

    #[test]
    fn empty_portfolio() {
        let portfolio = Portfolio::default();
        assert!(portfolio.is_empty());
        assert_eq!(portfolio.total_npv(&curve()), 0.0);
    }
}
