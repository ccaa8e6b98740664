//! Single-pass bootstrap of money-market quotes.
//!
//! Each quote is treated as a simple deposit: `d = 1 / (1 + r·τ)` with `τ`
//! the day-count year fraction from the valuation date. The node time is
//! the curve time (`days / 365`) of the maturity, and `(0, 1)` is
//! prepended.

use fi_core::{errors::Result, Rate};
use fi_math::InterpolationMethod;
use fi_time::{Date, DateExt, DayCountConvention};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::yield_curve::YieldCurve;
use crate::yield_term_structure::DAYS_PER_YEAR;

/// A market quote: simple rate to a maturity date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    /// Maturity of the deposit.
    pub maturity: Date,
    /// Simple annual rate as a decimal.
    pub rate: Rate,
}

impl Quote {
    /// Create a quote.
    pub fn new(maturity: Date, rate: Rate) -> Self {
        Self { maturity, rate }
    }
}

/// Bootstrap a discount curve from deposit quotes.
///
/// Quotes are sorted by maturity first; they must all mature strictly after
/// the valuation date and on distinct dates.
pub fn bootstrap(
    valuation_date: Date,
    quotes: &[Quote],
    day_count: DayCountConvention,
    method: InterpolationMethod,
) -> Result<YieldCurve> {
    fi_core::validate!(!quotes.is_empty(), "cannot bootstrap a curve from no quotes");

    let mut sorted = quotes.to_vec();
    sorted.sort_by_key(|q| q.maturity);

    let day_counter = day_count.day_counter();
    let mut times = Vec::with_capacity(sorted.len() + 1);
    let mut discounts = Vec::with_capacity(sorted.len() + 1);
    times.push(0.0);
    discounts.push(1.0);

    for quote in &sorted {
        fi_core::validate!(
            quote.maturity > valuation_date,
            "quote maturity {} is not after valuation date {}",
            quote.maturity,
            valuation_date
        );
        let tau = day_counter.year_fraction(valuation_date, quote.maturity);
        let df = 1.0 / (1.0 + quote.rate * tau);
        fi_core::validate!(
            df.is_finite() && df > 0.0,
            "quote {} at {} implies a non-positive discount factor",
            quote.rate,
            quote.maturity
        );
        times.push(valuation_date.days_until(quote.maturity) as f64 / DAYS_PER_YEAR);
        discounts.push(df);
    }

    debug!(
        valuation_date = %valuation_date,
        nodes = times.len(),
        day_count = ?day_count,
        interpolation = %method,
        "bootstrapped discount curve"
    );

    YieldCurve::new(valuation_date, times, discounts, method)
}
