//! # fi-termstructures
//!
//! Discount curves built from market quotes, the simple-deposit bootstrap
//! and the volatility surfaces consumed by the Black-76 engine.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Simple-deposit bootstrap from `(maturity, rate)` quotes.
pub mod bootstrap;

/// Volatility lookups `(expiry, tenor, strike) → σ`.
pub mod volatility;

/// `YieldCurve`: discount factors interpolated over time.
pub mod yield_curve;

/// `YieldTermStructure`: discount / zero / forward queries.
pub mod yield_term_structure;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use bootstrap::{bootstrap, Quote};
pub use volatility::{
    CapFloorVolatilitySurface, CapletVolStripper, FlatVolatility, SwaptionVolatilityCube,
    VolatilitySurface,
};
pub use yield_curve::YieldCurve;
pub use yield_term_structure::{YieldTermStructure, DAYS_PER_YEAR};
