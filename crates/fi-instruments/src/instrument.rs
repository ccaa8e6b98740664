//! The `Instrument` tagged variant.
//!
//! Instruments are plain records consumed read-only by engines. Dispatch
//! over the variants is an exhaustive `match`, so adding a variant forces
//! every engine and dispatch table to handle it.

use fi_core::Real;
use fi_time::{Date, DayCountConvention};
use serde::{Deserialize, Serialize};

use crate::bond::{FixedRateBond, ZeroCouponBond};
use crate::enums::{Currency, InstrumentType};
use crate::option::{CapFloor, Swaption};
use crate::swap::InterestRateSwap;

/// Terms shared by every instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstrumentTerms {
    /// Identifier reported back in pricing results.
    pub id: String,
    /// Face / notional amount.
    pub notional: Real,
    /// Settlement currency.
    #[serde(default)]
    pub currency: Currency,
    /// Issue (or effective) date.
    pub issue_date: Date,
    /// Final maturity date.
    pub maturity_date: Date,
    /// Accrual convention.
    #[serde(default)]
    pub day_count: DayCountConvention,
}

impl InstrumentTerms {
    /// Terms in USD accruing Act/365.
    pub fn new(id: impl Into<String>, notional: Real, issue_date: Date, maturity_date: Date) -> Self {
        Self {
            id: id.into(),
            notional,
            currency: Currency::default(),
            issue_date,
            maturity_date,
            day_count: DayCountConvention::default(),
        }
    }

    /// Set the currency.
    pub fn with_currency(mut self, currency: Currency) -> Self {
        self.currency = currency;
        self
    }

    /// Set the day-count convention.
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }
}

/// A priceable instrument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Instrument {
    /// Single redemption at maturity.
    ZeroCouponBond(ZeroCouponBond),
    /// Periodic fixed coupons plus redemption.
    FixedRateBond(FixedRateBond),
    /// Fixed-for-floating swap.
    InterestRateSwap(InterestRateSwap),
    /// Option on a swap.
    Swaption(Swaption),
    /// Cap or floor on a floating index.
    CapFloor(CapFloor),
}

impl Instrument {
    /// Shared terms.
    pub fn terms(&self) -> &InstrumentTerms {
        match self {
            Instrument::ZeroCouponBond(b) => &b.terms,
            Instrument::FixedRateBond(b) => &b.terms,
            Instrument::InterestRateSwap(s) => &s.terms,
            Instrument::Swaption(s) => &s.terms,
            Instrument::CapFloor(c) => &c.terms,
        }
    }

    /// Identifier.
    pub fn id(&self) -> &str {
        &self.terms().id
    }

    /// Notional amount.
    pub fn notional(&self) -> Real {
        self.terms().notional
    }

    /// Maturity date.
    pub fn maturity_date(&self) -> Date {
        self.terms().maturity_date
    }

    /// Kind tag; a cap/floor reports `Cap` or `Floor` from its option type.
    pub fn instrument_type(&self) -> InstrumentType {
        match self {
            Instrument::ZeroCouponBond(_) => InstrumentType::ZeroCouponBond,
            Instrument::FixedRateBond(_) => InstrumentType::FixedRateBond,
            Instrument::InterestRateSwap(_) => InstrumentType::InterestRateSwap,
            Instrument::Swaption(_) => InstrumentType::Swaption,
            Instrument::CapFloor(c) if c.is_floor() => InstrumentType::Floor,
            Instrument::CapFloor(_) => InstrumentType::Cap,
        }
    }

    /// Name used in error messages.
    pub fn type_name(&self) -> &'static str {
        match self {
            Instrument::ZeroCouponBond(_) => "ZeroCouponBond",
            Instrument::FixedRateBond(_) => "FixedRateBond",
            Instrument::InterestRateSwap(_) => "InterestRateSwap",
            Instrument::Swaption(_) => "Swaption",
            Instrument::CapFloor(_) => "CapFloor",
        }
    }

    /// `true` once the valuation date has reached maturity.
    pub fn is_expired(&self, valuation_date: Date) -> bool {
        self.maturity_date() <= valuation_date
    }
}

impl From<ZeroCouponBond> for Instrument {
    fn from(b: ZeroCouponBond) -> Self {
        Instrument::ZeroCouponBond(b)
    }
}

impl From<FixedRateBond> for Instrument {
    fn from(b: FixedRateBond) -> Self {
        Instrument::FixedRateBond(b)
    }
}

impl From<InterestRateSwap> for Instrument {
    fn from(s: InterestRateSwap) -> Self {
        Instrument::InterestRateSwap(s)
    }
}

impl From<Swaption> for Instrument {
    fn from(s: Swaption) -> Self {
        Instrument::Swaption(s)
    }
}

impl From<CapFloor> for Instrument {
    fn from(c: CapFloor) -> Self {
        Instrument::CapFloor(c)
    }
}
