//! # fi-math
//!
//! Mathematical utilities: 1-D interpolation strategies, the Nelder–Mead
//! simplex optimizer, Brent root finding, the standard normal distribution
//! (via statrs), seedable random number generation and symmetric
//! eigen-decomposition (over nalgebra).

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Standard normal distribution.
pub mod distributions;

/// 1D interpolation schemes.
pub mod interpolations;

/// Covariance and eigen-decomposition helpers.
pub mod matrix_utilities;

/// Derivative-free optimization.
pub mod optimization;

/// Random number generators.
pub mod random_numbers;

/// One-dimensional root finding.
pub mod solvers1d;

/// Sample statistics.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use distributions::{normal_cdf, normal_cdf_inverse, normal_pdf};
pub use interpolations::{InterpolationMethod, Interpolator};
pub use random_numbers::{mersenne_twister, standard_normal, MersenneTwister};
