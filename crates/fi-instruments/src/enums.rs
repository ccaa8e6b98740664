//! Enumerations carried by instrument records.

use std::fmt;
use std::str::FromStr;

use fi_core::Error;
use serde::{Deserialize, Serialize};

fn normalize(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .collect::<String>()
        .to_ascii_lowercase()
}

/// Settlement currency (ISO 4217 codes).
#[allow(clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Currency {
    /// US dollar.
    #[default]
    USD,
    /// Euro.
    EUR,
    /// Pound sterling.
    GBP,
    /// Japanese yen.
    JPY,
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for Currency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "usd" => Ok(Currency::USD),
            "eur" => Ok(Currency::EUR),
            "gbp" => Ok(Currency::GBP),
            "jpy" => Ok(Currency::JPY),
            _ => Err(Error::Validation(format!("unknown currency '{s}'"))),
        }
    }
}

/// Reference index of a floating leg.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FloatingRateIndex {
    /// Secured Overnight Financing Rate.
    #[default]
    Sofr,
    /// 1-month term rate.
    Libor1M,
    /// 3-month term rate.
    Libor3M,
    /// 6-month term rate.
    Libor6M,
    /// 12-month term rate.
    Libor12M,
    /// Overnight indexed swap rate.
    Ois,
}

/// Option flavour of a swaption or cap/floor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OptionType {
    /// Right to pay fixed.
    Payer,
    /// Right to receive fixed.
    Receiver,
    /// Strip of caplets.
    Cap,
    /// Strip of floorlets.
    Floor,
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// Swaption settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum SettlementType {
    /// Delivery of the underlying swap.
    #[default]
    Physical,
    /// Cash settlement.
    Cash,
}

/// Instrument kind tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InstrumentType {
    /// Zero-coupon bond.
    ZeroCouponBond,
    /// Fixed-rate coupon bond.
    FixedRateBond,
    /// Fixed-for-floating swap.
    InterestRateSwap,
    /// European swaption.
    Swaption,
    /// Interest-rate cap.
    Cap,
    /// Interest-rate floor.
    Floor,
}

impl fmt::Display for InstrumentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

impl FromStr for InstrumentType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize(s).as_str() {
            "zerocouponbond" | "zcb" => Ok(InstrumentType::ZeroCouponBond),
            "fixedratebond" | "bond" => Ok(InstrumentType::FixedRateBond),
            "interestrateswap" | "vanillaswap" | "swap" => Ok(InstrumentType::InterestRateSwap),
            "swaption" => Ok(InstrumentType::Swaption),
            "cap" => Ok(InstrumentType::Cap),
            "floor" => Ok(InstrumentType::Floor),
            _ => Err(Error::Validation(format!("unknown instrument type '{s}'"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_instrument_types() {
        assert_eq!("VanillaSwap".parse::<InstrumentType>().unwrap(), InstrumentType::InterestRateSwap);
        assert_eq!("zero-coupon-bond".parse::<InstrumentType>().unwrap(), InstrumentType::ZeroCouponBond);
        assert!(matches!("collar".parse::<InstrumentType>(), Err(Error::Validation(_))));
    }

    #[test]
    fn parse_currency() {
        assert_eq!("eur".parse::<Currency>().unwrap(), Currency::EUR);
        assert!("chf".parse::<Currency>().is_err());
    }
}
