//! `CouponFrequency`: how often coupons are paid.

use std::str::FromStr;

use fi_core::errors::Error;
use serde::{Deserialize, Serialize};

/// Coupon payment frequency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CouponFrequency {
    /// Single payment at maturity.
    Zero,
    /// Once per year.
    Annual,
    /// Twice per year.
    SemiAnnual,
    /// Four times per year.
    Quarterly,
    /// Twelve times per year.
    Monthly,
}

impl CouponFrequency {
    /// Number of payments per year (`0` for [`CouponFrequency::Zero`]).
    pub fn periods_per_year(&self) -> u32 {
        match self {
            CouponFrequency::Zero => 0,
            CouponFrequency::Annual => 1,
            CouponFrequency::SemiAnnual => 2,
            CouponFrequency::Quarterly => 4,
            CouponFrequency::Monthly => 12,
        }
    }

    /// Months between two payments, `None` for [`CouponFrequency::Zero`].
    pub fn months(&self) -> Option<i32> {
        match self.periods_per_year() {
            0 => None,
            n => Some(12 / n as i32),
        }
    }
}

impl std::fmt::Display for CouponFrequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            CouponFrequency::Zero => "Zero",
            CouponFrequency::Annual => "Annual",
            CouponFrequency::SemiAnnual => "SemiAnnual",
            CouponFrequency::Quarterly => "Quarterly",
            CouponFrequency::Monthly => "Monthly",
        };
        write!(f, "{s}")
    }
}

impl FromStr for CouponFrequency {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "zero" | "once" => Ok(CouponFrequency::Zero),
            "annual" | "1y" => Ok(CouponFrequency::Annual),
            "semiannual" | "semi-annual" | "6m" => Ok(CouponFrequency::SemiAnnual),
            "quarterly" | "3m" => Ok(CouponFrequency::Quarterly),
            "monthly" | "1m" => Ok(CouponFrequency::Monthly),
            other => Err(Error::Validation(format!("unknown coupon frequency '{other}'"))),
        }
    }
}
