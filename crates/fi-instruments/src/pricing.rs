//! Pricing results and the engine trait.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use fi_core::{errors::Result, Real};
use serde::{Deserialize, Serialize};

use crate::instrument::Instrument;

/// Result of one `price()` call. Never cached: every call produces a fresh
/// value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PricingResult {
    /// Identifier of the priced instrument.
    pub instrument_id: String,
    /// Net present value (equal to the dirty price).
    pub npv: Real,
    /// Dirty price less accrued interest.
    pub clean_price: Real,
    /// Present value including accrued interest.
    pub dirty_price: Real,
    /// Interest accrued since the last coupon.
    pub accrued_interest: Real,
    /// Flat continuously-compounded yield that reprices the dirty price;
    /// set by the discounting bond engine.
    pub yield_to_maturity: Option<Real>,
    /// Standard error of a simulated price.
    pub error_estimate: Option<Real>,
    /// When the price was produced.
    pub timestamp: DateTime<Utc>,
    /// Engine-specific named results (e.g. leg values).
    pub additional_results: BTreeMap<String, Real>,
}

impl PricingResult {
    /// A result with no accrued interest: clean = dirty = npv.
    pub fn from_npv(instrument_id: impl Into<String>, npv: Real) -> Self {
        Self {
            instrument_id: instrument_id.into(),
            npv,
            clean_price: npv,
            dirty_price: npv,
            accrued_interest: 0.0,
            yield_to_maturity: None,
            error_estimate: None,
            timestamp: Utc::now(),
            additional_results: BTreeMap::new(),
        }
    }

    /// Set accrued interest; the clean price becomes `dirty - accrued`.
    pub fn with_accrued_interest(mut self, accrued: Real) -> Self {
        self.accrued_interest = accrued;
        self.clean_price = self.dirty_price - accrued;
        self
    }

    /// Attach a yield to maturity.
    pub fn with_yield_to_maturity(mut self, yield_rate: Real) -> Self {
        self.yield_to_maturity = Some(yield_rate);
        self
    }

    /// Attach a simulation error estimate.
    pub fn with_error_estimate(mut self, error: Real) -> Self {
        self.error_estimate = Some(error);
        self
    }

    /// Attach a named result.
    pub fn with_result(mut self, key: impl Into<String>, value: Real) -> Self {
        self.additional_results.insert(key.into(), value);
        self
    }
}

/// Prices instruments against the market data captured at construction.
///
/// Engines fail with [`fi_core::Error::UnsupportedInstrument`] for variants
/// they do not handle.
pub trait PricingEngine: std::fmt::Debug + Send + Sync {
    /// Engine name used in error messages and logs.
    fn name(&self) -> &'static str;

    /// Price `instrument`.
    fn price(&self, instrument: &Instrument) -> Result<PricingResult>;

    /// Shorthand for the NPV of `instrument`.
    fn npv(&self, instrument: &Instrument) -> Result<Real> {
        self.price(instrument).map(|r| r.npv)
    }
}
