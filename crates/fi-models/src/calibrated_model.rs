//! Calibration infrastructure: bounded [`ModelParameter`]s and the RMSE
//! objective.

use fi_core::{errors::Result, Real};
use serde::{Deserialize, Serialize};

/// Objective value returned for trial points outside a parameter's bounds.
pub const OUT_OF_BOUNDS_PENALTY: Real = 1e10;

/// A named, bounded model parameter.
///
/// Bounds are soft: the calibrator penalizes trial values outside
/// `[lower_bound, upper_bound]` rather than rejecting them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelParameter {
    /// Name reported in calibration results.
    pub name: String,
    /// Current (initial) value.
    pub value: Real,
    /// Lowest admissible value.
    pub lower_bound: Real,
    /// Highest admissible value.
    pub upper_bound: Real,
    /// Fixed parameters are left out of the optimization.
    #[serde(default)]
    pub is_fixed: bool,
}

impl ModelParameter {
    /// A free parameter.
    pub fn new(name: impl Into<String>, value: Real, lower_bound: Real, upper_bound: Real) -> Self {
        Self {
            name: name.into(),
            value,
            lower_bound,
            upper_bound,
            is_fixed: false,
        }
    }

    /// Exclude this parameter from calibration.
    pub fn fixed(mut self) -> Self {
        self.is_fixed = true;
        self
    }

    /// Replace the value, keeping name and bounds.
    pub fn with_value(mut self, value: Real) -> Self {
        self.value = value;
        self
    }

    /// `true` if `value` lies in `[lower_bound, upper_bound]`.
    pub fn admits(&self, value: Real) -> bool {
        value >= self.lower_bound && value <= self.upper_bound
    }
}

/// Root-mean-square error between model and market values.
///
/// # Errors
/// [`fi_core::Error::Validation`] if the slices differ in length or are
/// empty.
pub fn rmse(model: &[Real], market: &[Real]) -> Result<Real> {
    weighted_rmse(model, market, &vec![1.0; model.len()])
}

/// Weighted RMSE, `sqrt(Σ wᵢ(modelᵢ − marketᵢ)² / Σ wᵢ)`.
pub fn weighted_rmse(model: &[Real], market: &[Real], weights: &[Real]) -> Result<Real> {
    fi_core::validate!(
        model.len() == market.len() && model.len() == weights.len(),
        "model, market and weight arrays must have the same length ({}, {}, {})",
        model.len(),
        market.len(),
        weights.len()
    );
    fi_core::validate!(!model.is_empty(), "cannot compute RMSE of no values");
    let total_weight: Real = weights.iter().sum();
    fi_core::validate!(total_weight > 0.0, "weights must sum to a positive value");

    let sum_sq: Real = model
        .iter()
        .zip(market)
        .zip(weights)
        .map(|((m, k), w)| w * (m - k) * (m - k))
        .sum();
    Ok((sum_sq / total_weight).sqrt())
}
