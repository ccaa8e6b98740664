//! Bond records.

use fi_core::Rate;
use fi_time::CouponFrequency;
use serde::{Deserialize, Serialize};

use crate::instrument::InstrumentTerms;

/// A bond paying its notional at maturity and nothing else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZeroCouponBond {
    /// Shared terms.
    #[serde(flatten)]
    pub terms: InstrumentTerms,
}

impl ZeroCouponBond {
    /// Create a zero-coupon bond.
    pub fn new(terms: InstrumentTerms) -> Self {
        Self { terms }
    }
}

/// A bond paying a fixed coupon at a regular frequency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixedRateBond {
    /// Shared terms.
    #[serde(flatten)]
    pub terms: InstrumentTerms,
    /// Annual coupon rate.
    pub coupon_rate: Rate,
    /// Coupon frequency.
    pub frequency: CouponFrequency,
}

impl FixedRateBond {
    /// Create a fixed-rate bond.
    pub fn new(terms: InstrumentTerms, coupon_rate: Rate, frequency: CouponFrequency) -> Self {
        Self {
            terms,
            coupon_rate,
            frequency,
        }
    }
}
