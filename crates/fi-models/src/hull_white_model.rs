//! Hull-White (extended Vasicek) one-factor model.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ dW
//! ```
//!
//! The engines in `fi-pricingengines` approximate `θ(t)` from the curve
//! rather than fitting it exactly; this module only carries the two model
//! parameters.

use fi_core::{Real, Volatility};
use serde::{Deserialize, Serialize};

use crate::calibrated_model::ModelParameter;

/// Name of the mean-reversion parameter in calibration results.
pub const MEAN_REVERSION: &str = "MeanReversion";
/// Name of the volatility parameter in calibration results.
pub const VOLATILITY: &str = "Volatility";

/// A Hull-White parameter point `(a, σ)` handed to engines.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HullWhite {
    /// Mean-reversion speed.
    pub a: Real,
    /// Short-rate volatility.
    pub sigma: Volatility,
}

impl HullWhite {
    /// Create a new parameter point.
    pub fn new(a: Real, sigma: Volatility) -> Self {
        Self { a, sigma }
    }
}

impl Default for HullWhite {
    fn default() -> Self {
        HullWhiteParameters::default().model()
    }
}

/// The two calibratable Hull-White parameters with their bounds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HullWhiteParameters {
    /// Mean reversion `a`, default 0.03 in `[0.001, 0.5]`.
    pub mean_reversion: ModelParameter,
    /// Volatility `σ`, default 0.01 in `[0.0001, 0.1]`.
    pub volatility: ModelParameter,
}

impl Default for HullWhiteParameters {
    fn default() -> Self {
        Self {
            mean_reversion: ModelParameter::new(MEAN_REVERSION, 0.03, 0.001, 0.5),
            volatility: ModelParameter::new(VOLATILITY, 0.01, 0.0001, 0.1),
        }
    }
}

impl HullWhiteParameters {
    /// Default bounds with the given starting values.
    pub fn with_initial(a: Real, sigma: Volatility) -> Self {
        let d = Self::default();
        Self {
            mean_reversion: d.mean_reversion.with_value(a),
            volatility: d.volatility.with_value(sigma),
        }
    }

    /// Both parameters in `(a, σ)` order.
    pub fn as_array(&self) -> [&ModelParameter; 2] {
        [&self.mean_reversion, &self.volatility]
    }

    /// The current values as a model point.
    pub fn model(&self) -> HullWhite {
        HullWhite::new(self.mean_reversion.value, self.volatility.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_parameters() {
        let p = HullWhiteParameters::default();
        assert_eq!(p.mean_reversion.name, "MeanReversion");
        assert_eq!(p.model(), HullWhite::new(0.03, 0.01));
        assert_eq!(p.volatility.lower_bound, 0.0001);
        assert_eq!(p.mean_reversion.upper_bound, 0.5);
    }

    #[test]
    fn with_initial_keeps_bounds() {
        let p = HullWhiteParameters::with_initial(0.1, 0.02);
        assert_eq!(p.model(), HullWhite::new(0.1, 0.02));
        assert_eq!(p.volatility.upper_bound, 0.1);
    }
}
