//! Leg analytics.

use fi_core::{errors::Result, Rate, Real};
use fi_math::solvers1d::brent;
use fi_termstructures::{YieldTermStructure, DAYS_PER_YEAR};
use fi_time::{Date, DateExt};

use crate::cashflow::CashFlow;

/// Present value of the flows paid strictly after `settlement_date`.
pub fn npv(leg: &[CashFlow], curve: &dyn YieldTermStructure, settlement_date: Date) -> Real {
    leg.iter()
        .filter(|cf| !cf.has_occurred(settlement_date))
        .map(|cf| cf.amount * curve.discount_factor(cf.date))
        .sum()
}

/// The last payment date of a leg.
pub fn maturity_date(leg: &[CashFlow]) -> Option<Date> {
    leg.iter().map(|cf| cf.date).max()
}

/// The latest payment date on or before `ref_date`.
pub fn previous_cashflow_date(leg: &[CashFlow], ref_date: Date) -> Option<Date> {
    leg.iter()
        .filter(|cf| cf.date <= ref_date)
        .map(|cf| cf.date)
        .max()
}

/// The earliest payment date strictly after `ref_date`.
pub fn next_cashflow_date(leg: &[CashFlow], ref_date: Date) -> Option<Date> {
    leg.iter()
        .filter(|cf| cf.date > ref_date)
        .map(|cf| cf.date)
        .min()
}

/// Present value of the flows paid strictly after `settlement_date` at a
/// flat continuously-compounded `yield_rate`, with time in days/365.
pub fn npv_at_yield(leg: &[CashFlow], yield_rate: Rate, settlement_date: Date) -> Real {
    leg.iter()
        .filter(|cf| !cf.has_occurred(settlement_date))
        .map(|cf| {
            let t = settlement_date.days_until(cf.date) as Real / DAYS_PER_YEAR;
            cf.amount * (-yield_rate * t).exp()
        })
        .sum()
}

/// The flat continuously-compounded yield at which the leg is worth
/// `target_npv`, searched in `[−10%, 200%]`.
pub fn yield_rate(leg: &[CashFlow], target_npv: Real, settlement_date: Date, accuracy: Real) -> Result<Rate> {
    brent(
        |y| npv_at_yield(leg, y, settlement_date) - target_npv,
        -0.10,
        2.0,
        accuracy,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fi_termstructures::YieldCurve;
    use fi_time::date::ymd;

    fn leg() -> Vec<CashFlow> {
        vec![
            CashFlow::simple(ymd(2024, 7, 15).unwrap(), 5.0),
            CashFlow::simple(ymd(2025, 7, 15).unwrap(), 5.0),
            CashFlow::simple(ymd(2026, 7, 15).unwrap(), 105.0),
        ]
    }

    #[test]
    fn npv_skips_paid_flows() {
        let v = ymd(2025, 1, 15).unwrap();
        let curve = YieldCurve::flat(v, 0.0).unwrap();
        assert_abs_diff_eq!(npv(&leg(), &curve, v), 110.0, epsilon = 1e-12);
        let after_coupon = ymd(2025, 7, 15).unwrap();
        assert_abs_diff_eq!(npv(&leg(), &curve, after_coupon), 105.0, epsilon = 1e-12);
    }

    #[test]
    fn yield_reprices_leg() {
        let v = ymd(2025, 1, 15).unwrap();
        let price = npv_at_yield(&leg(), 0.06, v);
        let y = yield_rate(&leg(), price, v, 1e-12).unwrap();
        assert_abs_diff_eq!(y, 0.06, epsilon = 1e-9);
        // Undiscounted value of the live flows.
        assert_abs_diff_eq!(npv_at_yield(&leg(), 0.0, v), 110.0, epsilon = 1e-12);
        assert!(yield_rate(&leg(), -1.0, v, 1e-12).is_err());
    }

    #[test]
    fn date_queries() {
        let v = ymd(2025, 1, 15).unwrap();
        assert_eq!(maturity_date(&leg()), ymd(2026, 7, 15).ok());
        assert_eq!(previous_cashflow_date(&leg(), v), ymd(2024, 7, 15).ok());
        assert_eq!(next_cashflow_date(&leg(), v), ymd(2025, 7, 15).ok());
        assert_eq!(previous_cashflow_date(&leg(), ymd(2020, 1, 1).unwrap()), None);
    }
}
