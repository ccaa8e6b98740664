//! Parallel-shift scenario analysis.

use std::sync::Arc;

use fi_core::{errors::Result, Real, BASIS_POINT};
use fi_termstructures::YieldCurve;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::portfolio::Portfolio;

/// Shift ladder in basis points, from −100bp to +100bp.
pub const STANDARD_SHIFTS_BP: [Real; 9] = [-100.0, -50.0, -25.0, -10.0, 0.0, 10.0, 25.0, 50.0, 100.0];

/// Portfolio value under one scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioResult {
    /// Scenario label, e.g. `Parallel +25bp`.
    pub scenario_name: String,
    /// Value on the base curve.
    pub base_value: Real,
    /// Value on the shocked curve.
    pub shocked_value: Real,
    /// `shocked_value − base_value`.
    pub pnl: Real,
    /// `pnl / |base_value|`, `0` for a zero base.
    pub percentage_change: Real,
}

impl ScenarioResult {
    /// Result from base and shocked values.
    pub fn new(scenario_name: impl Into<String>, base_value: Real, shocked_value: Real) -> Self {
        let pnl = shocked_value - base_value;
        let percentage_change = if base_value != 0.0 {
            pnl / base_value.abs()
        } else {
            0.0
        };
        Self {
            scenario_name: scenario_name.into(),
            base_value,
            shocked_value,
            pnl,
            percentage_change,
        }
    }

    /// `true` for a negative P&L.
    pub fn is_loss(&self) -> bool {
        self.pnl < 0.0
    }
}

/// Reprice `portfolio` on flat curves at the base one-year zero rate plus
/// each shift in `shifts_bp`.
///
/// Results come back in the order of `shifts_bp`.
pub fn parallel_shift_scenarios(
    portfolio: &Portfolio,
    curve: &Arc<YieldCurve>,
    shifts_bp: &[Real],
) -> Result<Vec<ScenarioResult>> {
    let base_values = portfolio.position_values(curve);
    let shocked: Vec<(Real, Arc<YieldCurve>)> = shifts_bp
        .iter()
        .map(|&bp| Ok((bp, Arc::new(curve.bumped(bp * BASIS_POINT)?))))
        .collect::<Result<_>>()?;

    let results: Vec<ScenarioResult> = shocked
        .par_iter()
        .map(|(bp, shocked_curve)| {
            let (base, value) = portfolio.revalue(&base_values, shocked_curve);
            ScenarioResult::new(format!("Parallel {bp:+}bp"), base, value)
        })
        .collect();

    info!(
        portfolio = portfolio.name(),
        scenarios = results.len(),
        "scenario analysis complete"
    );
    Ok(results)
}

#[cfg(test)]
mod tests {
    use super::*;
    use fi_instruments::{FixedRateBond, InstrumentTerms};
    use fi_termstructures::{FlatVolatility, VolatilitySurface};
    use fi_time::{date::ymd, CouponFrequency, Date, DateExt};
    use proptest::prelude::*;

    use crate::portfolio::Position;

    fn valuation() -> Date {
        ymd(2025, 1, 15).unwrap()
    }

    fn bond_portfolio(years: i32) -> Portfolio {
        let vol: Arc<dyn VolatilitySurface> = Arc::new(FlatVolatility::new(0.2));
        let terms = InstrumentTerms::new("B", 1_000_000.0, valuation(), valuation().add_years(years));
        Portfolio::new("bonds").with_position(Position::with_default_engine(
            FixedRateBond::new(terms, 0.04, CouponFrequency::SemiAnnual),
            1.0,
            vol,
        ))
    }

    #[test]
    fn zero_shift_on_flat_curve_is_flat() {
        let curve = Arc::new(YieldCurve::flat(valuation(), 0.04).unwrap());
        let results = parallel_shift_scenarios(&bond_portfolio(5), &curve, &[0.0]).unwrap();
        assert!(results[0].pnl.abs() < 1e-6, "pnl = {}", results[0].pnl);
        assert_eq!(results[0].scenario_name, "Parallel +0bp");
    }

    #[test]
    fn pnl_rises_as_rates_fall() {
        let curve = Arc::new(YieldCurve::flat(valuation(), 0.04).unwrap());
        let results = parallel_shift_scenarios(&bond_portfolio(10), &curve, &STANDARD_SHIFTS_BP).unwrap();
        assert_eq!(results.len(), STANDARD_SHIFTS_BP.len());
        assert_eq!(results[0].scenario_name, "Parallel -100bp");
        assert_eq!(results[8].scenario_name, "Parallel +100bp");
        for pair in results.windows(2) {
            assert!(pair[0].pnl > pair[1].pnl);
        }
        assert!(results[8].is_loss());
        assert!(results[8].percentage_change < 0.0);
    }

    #[test]
    fn percentage_change_of_zero_base() {
        let result = ScenarioResult::new("s", 0.0, 5.0);
        assert_eq!(result.pnl, 5.0);
        assert_eq!(result.percentage_change, 0.0);
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(16))]

        #[test]
        fn pnl_monotone_in_shift(rate in 0.0..0.08f64, years in 1i32..15) {
            let curve = Arc::new(YieldCurve::flat(valuation(), rate).unwrap());
            let shifts = [100.0, 50.0, 0.0, -50.0, -100.0];
            let results = parallel_shift_scenarios(&bond_portfolio(years), &curve, &shifts).unwrap();
            for pair in results.windows(2) {
                prop_assert!(pair[1].pnl > pair[0].pnl);
            }
        }
    }
}
