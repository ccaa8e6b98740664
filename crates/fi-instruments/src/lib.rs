//! # fi-instruments
//!
//! The closed set of priceable instruments, the [`PricingResult`] every
//! engine returns and the [`PricingEngine`] trait engines implement.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Zero-coupon and fixed-rate bonds.
pub mod bond;

/// Currency, option type and other instrument enums.
pub mod enums;

/// The `Instrument` tagged variant and shared terms.
pub mod instrument;

/// `PricingEngine` trait and `PricingResult`.
pub mod pricing;

/// Cap/floor and swaption records.
pub mod option;

/// Vanilla interest-rate swap.
pub mod swap;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bond::{FixedRateBond, ZeroCouponBond};
pub use enums::{Currency, FloatingRateIndex, InstrumentType, OptionType, SettlementType};
pub use instrument::{Instrument, InstrumentTerms};
pub use option::{CapFloor, Swaption};
pub use pricing::{PricingEngine, PricingResult};
pub use swap::InterestRateSwap;
