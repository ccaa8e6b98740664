//! # fi-pricingengines
//!
//! Pricing engines over a shared yield curve.
//!
//! ## Engines
//!
//! - [`DiscountingBondEngine`]: discounted cash flows for zero-coupon and fixed-rate bonds
//! - [`DiscountingSwapEngine`]: fixed minus floating leg value for vanilla swaps
//! - [`HullWhiteAnalyticEngine`]: cheap closed-form surrogate used by calibration
//! - [`HullWhiteTreeEngine`]: trinomial-tree backward induction
//! - [`MonteCarloEngine`]: antithetic Euler simulation of the short rate
//! - [`Black76Engine`]: Black-76 for swaptions and caps/floors
//!
//! [`EngineKind`] maps every instrument variant to its default engine and
//! [`engine_factory`] turns a kind into a `curve → engine` closure for the
//! risk layer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black76_engine;
pub mod discounting_bond_engine;
pub mod discounting_swap_engine;
pub mod engine_factory;
pub mod hull_white_analytic_engine;
pub mod hull_white_tree_engine;
pub mod monte_carlo_engine;

pub use black76_engine::{black_formula, Black76Engine};
pub use discounting_bond_engine::DiscountingBondEngine;
pub use discounting_swap_engine::DiscountingSwapEngine;
pub use engine_factory::{engine_factory, hull_white_calibrator, EngineFactory, EngineKind};
pub use hull_white_analytic_engine::HullWhiteAnalyticEngine;
pub use hull_white_tree_engine::{HullWhiteTreeEngine, TreeConfig};
pub use monte_carlo_engine::{MonteCarloConfig, MonteCarloEngine};
