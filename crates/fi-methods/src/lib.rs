//! # fi-methods
//!
//! Numerical methods for the Hull-White engines: a recombining trinomial
//! lattice with backward induction, and Euler path simulation of the short
//! rate with antithetic variates.
//!
//! # Modules
//!
//! * [`lattice`]: time grid, trinomial tree, backward induction
//! * [`monte_carlo`]: short-rate paths, path generator, path pricing

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Lattice methods: trinomial tree and backward induction.
pub mod lattice;

/// Monte Carlo simulation: short-rate paths and antithetic sampling.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use lattice::{TimeGrid, TrinomialGrid, TrinomialTree};
pub use monte_carlo::{HullWhitePathGenerator, MonteCarloModel, PathPricer, ShortRatePath};
