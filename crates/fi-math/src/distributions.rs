//! Standard normal distribution helpers backed by `statrs`.

use std::f64::consts::{PI, SQRT_2};

use fi_core::Real;
use statrs::function::erf::{erfc, erfc_inv};

/// Standard normal probability density `φ(x) = exp(-x²/2) / √(2π)`.
#[inline]
pub fn normal_pdf(x: Real) -> Real {
    (-0.5 * x * x).exp() / (2.0 * PI).sqrt()
}

/// Standard normal cumulative distribution `Φ(x) = ½·erfc(-x/√2)`.
pub fn normal_cdf(x: Real) -> Real {
    0.5 * erfc(-x / SQRT_2)
}

/// Inverse standard normal CDF `Φ⁻¹(p)` for `p ∈ (0, 1)`.
///
/// Returns `-∞` / `+∞` at the endpoints.
pub fn normal_cdf_inverse(p: Real) -> Real {
    -SQRT_2 * erfc_inv(2.0 * p)
}
