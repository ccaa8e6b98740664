//! # fixedincome
//!
//! Fixed-income pricing and risk: discount curves, Hull-White analytic,
//! tree and Monte Carlo engines, Black-76 for swaptions and caps/floors,
//! bump-and-reprice greeks, scenario analysis, VaR and PCA.
//!
//! This crate is a façade that re-exports the `fi-*` workspace crates and
//! adds TOML-loadable [`Settings`] and [`init_tracing`].
//!
//! ```rust
//! use fixedincome::instruments::{InstrumentTerms, PricingEngine, ZeroCouponBond};
//! use fixedincome::pricingengines::DiscountingBondEngine;
//! use fixedincome::termstructures::YieldCurve;
//! use fixedincome::time::{date::ymd, DateExt};
//! use std::sync::Arc;
//!
//! let today = ymd(2025, 1, 15).unwrap();
//! let curve = Arc::new(YieldCurve::flat(today, 0.05).unwrap());
//! let bond = ZeroCouponBond::new(InstrumentTerms::new("Z", 100.0, today, today.add_years(1)));
//! let npv = DiscountingBondEngine::new(curve).npv(&bond.into()).unwrap();
//! assert!((npv - 100.0 * (-0.05f64).exp()).abs() < 1e-9);
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod logging;
mod settings;

pub use logging::init_tracing;
pub use settings::Settings;

/// Core types, aliases, and error definitions.
pub use fi_core as core;

/// Dates, day counters, calendars and schedules.
pub use fi_time as time;

/// Interpolation, optimisation, distributions, RNG and linear algebra.
pub use fi_math as math;

/// Yield curves, bootstrap and volatility surfaces.
pub use fi_termstructures as termstructures;

/// Cash flows and leg builders.
pub use fi_cashflows as cashflows;

/// Instrument records and the pricing-engine interface.
pub use fi_instruments as instruments;

/// Hull-White parameters and calibration.
pub use fi_models as models;

/// Trinomial lattice and Monte Carlo path generation.
pub use fi_methods as methods;

/// Pricing engines.
pub use fi_pricingengines as pricingengines;

/// Greeks, scenarios, VaR and PCA.
pub use fi_risk as risk;
