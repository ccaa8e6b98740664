//! Swaption and cap/floor records.

use fi_core::Rate;
use fi_time::{CouponFrequency, Date};
use serde::{Deserialize, Serialize};

use crate::enums::{FloatingRateIndex, OptionType, SettlementType};
use crate::instrument::InstrumentTerms;
use crate::swap::InterestRateSwap;

/// European option to enter `underlying` at `expiry_date`.
///
/// The strike is the underlying's fixed rate; `option_type` is `Payer` or
/// `Receiver`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Swaption {
    /// Shared terms (maturity is the underlying swap's maturity).
    #[serde(flatten)]
    pub terms: InstrumentTerms,
    /// Swap entered on exercise.
    pub underlying: InterestRateSwap,
    /// Exercise date.
    pub expiry_date: Date,
    /// `Payer` or `Receiver`.
    pub option_type: OptionType,
    /// Settlement style.
    #[serde(default)]
    pub settlement_type: SettlementType,
}

impl Swaption {
    /// Create a physically-settled swaption.
    pub fn new(
        terms: InstrumentTerms,
        underlying: InterestRateSwap,
        expiry_date: Date,
        option_type: OptionType,
    ) -> Self {
        Self {
            terms,
            underlying,
            expiry_date,
            option_type,
            settlement_type: SettlementType::Physical,
        }
    }

    /// Strike rate (the underlying fixed rate).
    pub fn strike(&self) -> Rate {
        self.underlying.fixed_rate
    }
}

/// Strip of caplets or floorlets from issue to maturity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CapFloor {
    /// Shared terms.
    #[serde(flatten)]
    pub terms: InstrumentTerms,
    /// Strike rate.
    pub strike: Rate,
    /// Floating index.
    #[serde(default)]
    pub index: FloatingRateIndex,
    /// Reset frequency.
    pub frequency: CouponFrequency,
    /// `Cap` or `Floor`.
    pub option_type: OptionType,
}

impl CapFloor {
    /// Create a cap (`OptionType::Cap`) or floor (`OptionType::Floor`).
    pub fn new(
        terms: InstrumentTerms,
        strike: Rate,
        frequency: CouponFrequency,
        option_type: OptionType,
    ) -> Self {
        Self {
            terms,
            strike,
            index: FloatingRateIndex::default(),
            frequency,
            option_type,
        }
    }

    /// `true` for a floor.
    pub fn is_floor(&self) -> bool {
        self.option_type == OptionType::Floor
    }
}
