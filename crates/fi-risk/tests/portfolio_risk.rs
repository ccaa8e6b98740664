use std::sync::Arc;

use fi_instruments::{
    CapFloor, FixedRateBond, Instrument, InstrumentTerms, InterestRateSwap, OptionType, Swaption,
    ZeroCouponBond,
};
use fi_math::InterpolationMethod;
use fi_pricingengines::{engine_factory, EngineKind};
use fi_risk::{
    parallel_shift_scenarios, GreeksCalculator, HistoricalRateEntry, Portfolio, Position, RiskReport,
    VaRConfig, VaRMethod, ValueAtRisk, STANDARD_SHIFTS_BP,
};
use fi_termstructures::{
    bootstrap, CapFloorVolatilitySurface, Quote, SwaptionVolatilityCube, VolatilitySurface, YieldCurve,
};
use fi_time::{date::ymd, CouponFrequency, Date, DateExt, DayCountConvention};

fn valuation() -> Date {
    ymd(2025, 1, 15).unwrap()
}

fn flat_curve() -> Arc<YieldCurve> {
    Arc::new(YieldCurve::flat(valuation(), 0.045).unwrap())
}

fn bootstrapped_curve() -> Arc<YieldCurve> {
    let quotes: Vec<Quote> = [(1, 0.042), (2, 0.043), (5, 0.045), (10, 0.047), (30, 0.048)]
        .into_iter()
        .map(|(years, rate)| Quote::new(valuation().add_years(years), rate))
        .collect();
    Arc::new(
        bootstrap(valuation(), &quotes, DayCountConvention::Actual360, InterpolationMethod::LogLinear)
            .unwrap(),
    )
}

fn terms(id: &str, notional: f64, years: i32) -> InstrumentTerms {
    InstrumentTerms::new(id, notional, valuation(), valuation().add_years(years))
}

fn book() -> Portfolio {
    let swaption_vol: Arc<dyn VolatilitySurface> =
        Arc::new(SwaptionVolatilityCube::new(0.20).with_tenor("5Y", 0.18));
    let cap_vol: Arc<dyn VolatilitySurface> = Arc::new(CapFloorVolatilitySurface::new(0.25));

    let swap = InterestRateSwap::new(
        terms("IRS", 10_000_000.0, 5),
        0.0425,
        CouponFrequency::Annual,
        DayCountConvention::Actual360,
        true,
    );
    let underlying = InterestRateSwap::new(
        InstrumentTerms::new("SWPN-U", 10_000_000.0, valuation().add_years(1), valuation().add_years(6)),
        0.045,
        CouponFrequency::Annual,
        DayCountConvention::Thirty360,
        true,
    );
    let swaption = Swaption::new(
        terms("SWPN", 10_000_000.0, 6),
        underlying,
        valuation().add_years(1),
        OptionType::Payer,
    );
    let cap = CapFloor::new(terms("CAP", 10_000_000.0, 3), 0.045, CouponFrequency::Quarterly, OptionType::Cap);

    Portfolio::new("rates book")
        .with_position(Position::with_default_engine(
            FixedRateBond::new(terms("UST-10Y", 1_000_000.0, 10), 0.045, CouponFrequency::SemiAnnual),
            5.0,
            Arc::clone(&swaption_vol),
        ))
        .with_position(Position::with_default_engine(
            ZeroCouponBond::new(terms("ZCB-2Y", 1_000_000.0, 2)),
            2.0,
            Arc::clone(&swaption_vol),
        ))
        .with_position(Position::with_default_engine(swap, 1.0, Arc::clone(&swaption_vol)))
        .with_position(Position::with_default_engine(swaption, 1.0, swaption_vol))
        .with_position(Position::with_default_engine(cap, 1.0, cap_vol))
}

fn history() -> Vec<HistoricalRateEntry> {
    let rates = [0.0420, 0.0424, 0.0419, 0.0415, 0.0421, 0.0428, 0.0426, 0.0418, 0.0422, 0.0430, 0.0427];
    rates
        .iter()
        .enumerate()
        .map(|(i, &r)| HistoricalRateEntry {
            date: valuation().add_days(-(i as i64)),
            rate_1m: r - 0.0015,
            rate_3m: r - 0.0010,
            rate_6m: r - 0.0005,
            rate_1y: r,
            rate_2y: r + 0.0008 + 0.1 * (r - 0.042),
            rate_5y: r + 0.0025,
            rate_10y: r + 0.0045,
            rate_30y: r + 0.0060,
        })
        .collect()
}

#[test]
fn every_position_prices() {
    let report = book().report(&bootstrapped_curve());
    assert_eq!(report.items.len(), 5);
    assert!(report.items.iter().all(|item| item.npv.is_some()), "{report:?}");
    assert!(report.total_npv > 0.0);
}

#[test]
fn option_greeks_rebuild_black_engine_with_its_surface() {
    let calc = GreeksCalculator::new(flat_curve());
    let portfolio = book();
    let swaption = &portfolio.positions()[3];
    let risk = calc.risk(swaption.instrument(), swaption.factory()).unwrap();
    // A payer swaption gains when rates rise.
    assert!(risk.dv01 < 0.0, "dv01 = {}", risk.dv01);

    let cap = &portfolio.positions()[4];
    assert!(calc.dv01(cap.instrument(), cap.factory()).unwrap() < 0.0);
}

#[test]
fn full_risk_report() {
    let curve = flat_curve();
    let portfolio = book();
    let greeks = GreeksCalculator::new(Arc::clone(&curve)).portfolio_risk(&portfolio).unwrap();
    let scenarios = parallel_shift_scenarios(&portfolio, &curve, &STANDARD_SHIFTS_BP).unwrap();
    let config = VaRConfig {
        simulations: 2_000,
        ..VaRConfig::default()
    };
    let var = ValueAtRisk::with_config(&portfolio, Arc::clone(&curve), config)
        .monte_carlo()
        .unwrap();

    let report = RiskReport::new(portfolio.name(), greeks)
        .with_var(var)
        .with_scenarios(scenarios);
    assert_eq!(report.portfolio_name, "rates book");
    assert_eq!(report.scenario_results.len(), 9);
    let calc = GreeksCalculator::new(Arc::clone(&curve));
    let summed: f64 = portfolio
        .positions()
        .iter()
        .map(|p| p.quantity() * calc.dv01(p.instrument(), p.factory()).unwrap())
        .sum();
    assert!((report.portfolio_greeks.dv01 - summed).abs() < 1e-6 * summed.abs().max(1.0));
    let var = report.var.unwrap();
    assert_eq!(var.method, VaRMethod::MonteCarlo);
    assert!(var.var_amount > 0.0);
    assert!(var.expected_shortfall >= var.var_amount);
}

#[test]
fn historical_and_parametric_var() {
    let portfolio = book();
    let calc = ValueAtRisk::new(&portfolio, flat_curve());
    let historical = calc.compute(VaRMethod::Historical, &history()).unwrap();
    assert_eq!(historical.method, VaRMethod::Historical);
    assert!(historical.var_amount > 0.0);

    let parametric = calc.compute(VaRMethod::Parametric, &[]).unwrap();
    assert!(parametric.var_amount > 0.0);
}

#[test]
fn pca_of_history() {
    let changes = fi_risk::rate_changes(&history()).unwrap();
    let pca = fi_risk::principal_components(&changes).unwrap();
    assert_eq!(pca.factors(), HistoricalRateEntry::TENORS.len());
    let ratios = pca.explained_variance_ratio();
    assert!(ratios[0] > 0.9, "{ratios:?}");
}

#[test]
fn unsupported_position_does_not_abort_var() {
    let curve = flat_curve();
    let bond: Instrument = FixedRateBond::new(terms("B", 1_000_000.0, 5), 0.04, CouponFrequency::Annual).into();
    let vol: Arc<dyn VolatilitySurface> = Arc::new(CapFloorVolatilitySurface::new(0.2));
    let with_bad = Portfolio::new("with bad")
        .with_position(Position::with_default_engine(bond.clone(), 1.0, Arc::clone(&vol)))
        .with_position(Position::new(bond.clone(), 1.0, engine_factory(EngineKind::DiscountingSwap, Arc::clone(&vol))));
    let clean = Portfolio::new("clean").with_position(Position::with_default_engine(bond, 1.0, vol));

    let config = VaRConfig {
        simulations: 200,
        ..VaRConfig::default()
    };
    let a = ValueAtRisk::with_config(&with_bad, Arc::clone(&curve), config).monte_carlo().unwrap();
    let b = ValueAtRisk::with_config(&clean, curve, config).monte_carlo().unwrap();
    assert_eq!(a.var_amount, b.var_amount);
}
