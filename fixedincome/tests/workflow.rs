//! Quotes → curve → calibration → pricing → risk, through the façade.

use std::sync::Arc;

use approx::assert_abs_diff_eq;
use fixedincome::instruments::{
    FixedRateBond, Instrument, InstrumentTerms, InterestRateSwap, PricingEngine, ZeroCouponBond,
};
use fixedincome::models::HullWhite;
use fixedincome::pricingengines::{
    hull_white_calibrator, DiscountingBondEngine, DiscountingSwapEngine, HullWhiteAnalyticEngine,
    HullWhiteTreeEngine, MonteCarloEngine,
};
use fixedincome::risk::{parallel_shift_scenarios, GreeksCalculator, Portfolio, Position, ValueAtRisk};
use fixedincome::termstructures::{bootstrap, FlatVolatility, Quote, YieldCurve, YieldTermStructure};
use fixedincome::time::{date::ymd, CouponFrequency, Date, DateExt, DayCountConvention};
use fixedincome::Settings;

fn valuation() -> Date {
    ymd(2025, 1, 15).unwrap()
}

fn zero(years: i32) -> Instrument {
    ZeroCouponBond::new(InstrumentTerms::new(format!("ZCB-{years}Y"), 1.0, valuation(), valuation().add_years(years)))
        .into()
}

#[test]
fn flat_curve_zero_coupon_bond() {
    let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(valuation(), 0.05).unwrap());
    let bond: Instrument = ZeroCouponBond::new(InstrumentTerms::new(
        "ZCB",
        1_000_000.0,
        valuation(),
        valuation().add_days(365),
    ))
    .into();
    let npv = DiscountingBondEngine::new(curve).npv(&bond).unwrap();
    assert_abs_diff_eq!(npv, 951_229.42, epsilon = 0.01);
}

#[test]
fn single_quote_bootstrap() {
    let maturity = valuation().add_months(6);
    let curve = bootstrap(
        valuation(),
        &[Quote::new(maturity, 0.04)],
        DayCountConvention::Actual360,
        Settings::default().interpolation,
    )
    .unwrap();
    let tau = valuation().days_until(maturity) as f64 / 360.0;
    assert_abs_diff_eq!(curve.discount_factor(maturity), 1.0 / (1.0 + 0.04 * tau), epsilon = 1e-12);
}

#[test]
fn par_swap_on_flat_curve() {
    let curve: Arc<dyn YieldTermStructure> = Arc::new(YieldCurve::flat(valuation(), 0.05).unwrap());
    // Continuous forwards on matching Act/365 periods: par rate = curve rate.
    let par = 0.05;
    let swap = InterestRateSwap::new(
        InstrumentTerms::new("IRS", 1e7, valuation(), valuation().add_years(5)),
        par,
        CouponFrequency::Annual,
        DayCountConvention::Actual365,
        true,
    )
    .with_floating_leg(Default::default(), CouponFrequency::Annual, DayCountConvention::Actual365, 0.0);
    let npv = DiscountingSwapEngine::new(curve).npv(&swap.into()).unwrap();
    assert_abs_diff_eq!(npv, 0.0, epsilon = 1e-4);
}

#[test]
fn calibrate_then_price_with_every_short_rate_engine() {
    let settings = Settings::from_toml_str(
        r#"
        [tree]
        steps = 100

        [monte_carlo]
        simulations = 4000
        "#,
    )
    .unwrap();
    let quotes: Vec<Quote> = [(1, 0.040), (2, 0.042), (5, 0.045), (10, 0.047)]
        .into_iter()
        .map(|(y, r)| Quote::new(valuation().add_years(y), r))
        .collect();
    let curve: Arc<dyn YieldTermStructure> =
        Arc::new(bootstrap(valuation(), &quotes, settings.day_count, settings.interpolation).unwrap());

    let instruments: Vec<Instrument> = [1, 3, 5].into_iter().map(zero).collect();
    let truth = HullWhiteAnalyticEngine::new(Arc::clone(&curve), HullWhite::new(0.08, 0.012));
    let market: Vec<f64> = instruments.iter().map(|i| truth.npv(i).unwrap()).collect();

    let result = hull_white_calibrator(Arc::clone(&curve))
        .with_config(settings.calibration.clone())
        .calibrate(&instruments, &market)
        .unwrap();
    assert!(result.converged);
    assert!(result.rmse < 1e-3, "rmse = {}", result.rmse);

    let model = result.model;
    let five_year = zero(5);
    let analytic = HullWhiteAnalyticEngine::new(Arc::clone(&curve), model).npv(&five_year).unwrap();
    let tree = HullWhiteTreeEngine::with_config(Arc::clone(&curve), model, settings.tree)
        .npv(&five_year)
        .unwrap();
    let mc = MonteCarloEngine::with_config(Arc::clone(&curve), model, settings.monte_carlo)
        .npv(&five_year)
        .unwrap();
    let df = curve.discount_factor(valuation().add_years(5));
    for value in [analytic, tree, mc] {
        assert!(value > 0.0 && value.is_finite());
    }
    assert_abs_diff_eq!(mc, df, epsilon = 1e-12);
    assert!((analytic - df).abs() < 0.05);
}

#[test]
fn bond_book_risk() {
    let curve = Arc::new(YieldCurve::flat(valuation(), 0.045).unwrap());
    let bond = FixedRateBond::new(
        InstrumentTerms::new("UST-10Y", 1_000_000.0, valuation(), valuation().add_years(10)),
        0.045,
        CouponFrequency::SemiAnnual,
    );
    let portfolio = Portfolio::new("bonds").with_position(Position::with_default_engine(
        bond,
        1.0,
        Arc::new(FlatVolatility::new(0.2)),
    ));

    let greeks = GreeksCalculator::new(Arc::clone(&curve)).portfolio_risk(&portfolio).unwrap();
    assert!(greeks.dv01 > 0.0);

    let scenarios = parallel_shift_scenarios(&portfolio, &curve, &[-100.0, 100.0]).unwrap();
    assert!(scenarios[0].pnl > 0.0 && scenarios[1].pnl < 0.0);

    let var = ValueAtRisk::new(&portfolio, curve).parametric().unwrap();
    assert!(var.var_amount > 0.0);
}
