//! `YieldCurve`: a discount-factor curve interpolated over time.
//!
//! The curve stores `(t, d)` nodes with `t₀ = 0`, `d₀ = 1` and strictly
//! increasing times. It is immutable: a shocked curve is always a new
//! instance built with [`YieldCurve::flat`] or [`YieldCurve::bumped`].

use fi_core::{errors::Result, DiscountFactor, Rate, Spread, Time};
use fi_math::{InterpolationMethod, Interpolator};
use fi_time::{Date, DateExt};

use crate::yield_term_structure::YieldTermStructure;

/// Horizon of the second node of a flat curve, in years.
const FLAT_CURVE_HORIZON: Time = 50.0;

/// A yield curve defined by discount factors at known times.
///
/// Log-linear interpolation on discount factors gives piecewise-constant
/// forward rates and is the default for bootstrapped curves.
#[derive(Debug)]
pub struct YieldCurve {
    valuation_date: Date,
    times: Vec<Time>,
    discounts: Vec<DiscountFactor>,
    method: InterpolationMethod,
    interp: Box<dyn Interpolator>,
}

impl YieldCurve {
    /// Build a curve from `(time, discount factor)` nodes.
    ///
    /// # Errors
    /// [`fi_core::Error::Validation`] if the node slices differ in length,
    /// hold fewer than 2 points, times are not strictly increasing from `0`
    /// or the first discount factor is not `1`.
    pub fn new(
        valuation_date: Date,
        times: Vec<Time>,
        discounts: Vec<DiscountFactor>,
        method: InterpolationMethod,
    ) -> Result<Self> {
        fi_core::validate!(
            times.first() == Some(&0.0),
            "first curve node must be at t = 0"
        );
        fi_core::validate!(
            discounts.first().map_or(false, |d| (d - 1.0).abs() < 1e-12),
            "first discount factor must be 1.0"
        );
        let interp = method.build(&times, &discounts)?;
        Ok(Self {
            valuation_date,
            times,
            discounts,
            method,
            interp,
        })
    }

    /// Two-node curve `(0, 1), (50, e^{-50r})` under log-linear
    /// interpolation, reproducing the constant zero rate `rate`.
    pub fn flat(valuation_date: Date, rate: Rate) -> Result<Self> {
        Self::new(
            valuation_date,
            vec![0.0, FLAT_CURVE_HORIZON],
            vec![1.0, (-rate * FLAT_CURVE_HORIZON).exp()],
            InterpolationMethod::LogLinear,
        )
    }

    /// Zero rate to one year after the valuation date.
    pub fn one_year_zero_rate(&self) -> Rate {
        self.zero_rate(self.valuation_date.add_years(1))
    }

    /// Flat curve at this curve's one-year zero rate plus `bump`.
    ///
    /// This is a parallel-shift approximation: the shape of the original
    /// curve is not preserved.
    pub fn bumped(&self, bump: Spread) -> Result<Self> {
        Self::flat(self.valuation_date, self.one_year_zero_rate() + bump)
    }

    /// Node times.
    pub fn times(&self) -> &[Time] {
        &self.times
    }

    /// Node discount factors.
    pub fn discounts(&self) -> &[DiscountFactor] {
        &self.discounts
    }

    /// Interpolation scheme over the nodes.
    pub fn interpolation(&self) -> InterpolationMethod {
        self.method
    }
}

impl YieldTermStructure for YieldCurve {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn discount(&self, t: Time) -> DiscountFactor {
        if t <= 0.0 {
            return 1.0;
        }
        self.interp.interpolate(t)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use fi_core::Error;
    use fi_time::date::ymd;

    fn valuation() -> Date {
        ymd(2025, 1, 15).unwrap()
    }

    #[test]
    fn flat_curve_reproduces_rate() {
        let curve = YieldCurve::flat(valuation(), 0.05).unwrap();
        let one_year = valuation().add_years(1);
        assert_abs_diff_eq!(curve.discount_factor(one_year), (-0.05_f64).exp(), epsilon = 1e-14);
        assert_abs_diff_eq!(curve.zero_rate(one_year), 0.05, epsilon = 1e-12);
        assert_abs_diff_eq!(curve.one_year_zero_rate(), 0.05, epsilon = 1e-12);
    }

    #[test]
    fn dates_on_or_before_valuation() {
        let curve = YieldCurve::flat(valuation(), 0.05).unwrap();
        let past = ymd(2024, 6, 1).unwrap();
        assert_eq!(curve.discount_factor(past), 1.0);
        assert_eq!(curve.discount_factor(valuation()), 1.0);
        assert_eq!(curve.zero_rate(valuation()), 0.0);
        assert_eq!(curve.forward_rate(valuation(), past), 0.0);
        assert_eq!(curve.forward_rate(valuation(), valuation()), 0.0);
    }

    #[test]
    fn forward_rate_on_flat_curve() {
        let curve = YieldCurve::flat(valuation(), 0.03).unwrap();
        let start = ymd(2026, 1, 15).unwrap();
        let end = ymd(2027, 7, 15).unwrap();
        assert_abs_diff_eq!(curve.forward_rate(start, end), 0.03, epsilon = 1e-12);
    }

    #[test]
    fn bumped_is_flat_at_one_year_rate_plus_bump() {
        let curve = YieldCurve::new(
            valuation(),
            vec![0.0, 1.0, 5.0],
            vec![1.0, (-0.02_f64).exp(), (-0.04_f64 * 5.0).exp()],
            InterpolationMethod::LogLinear,
        )
        .unwrap();
        let base = curve.one_year_zero_rate();
        let up = curve.bumped(0.0001).unwrap();
        let far = valuation().add_years(10);
        assert_abs_diff_eq!(up.zero_rate(far), base + 0.0001, epsilon = 1e-12);
        assert_eq!(up.times(), &[0.0, 50.0]);
    }

    #[test]
    fn rejects_bad_nodes() {
        let err = YieldCurve::new(
            valuation(),
            vec![0.5, 1.0],
            vec![1.0, 0.95],
            InterpolationMethod::Linear,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = YieldCurve::new(
            valuation(),
            vec![0.0, 1.0],
            vec![0.99, 0.95],
            InterpolationMethod::Linear,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));

        let err = YieldCurve::new(
            valuation(),
            vec![0.0, 1.0, 2.0],
            vec![1.0, 0.95],
            InterpolationMethod::Linear,
        )
        .unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }
}
