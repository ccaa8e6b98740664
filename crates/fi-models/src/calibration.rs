//! Hull-White calibration by Nelder–Mead on the pricing RMSE.
//!
//! For a trial point `(a, σ)` the calibrator builds an engine through the
//! caller's factory, prices every calibration instrument and scores the
//! weighted root-mean-square error against the market prices. Trial
//! values outside a parameter's bounds score [`OUT_OF_BOUNDS_PENALTY`], as
//! do trial points the engine fails to price.
//! Fixed parameters keep their value and are not optimized.
//!
//! Non-convergence is never an error: the best point found is returned
//! with `converged == false`.

use std::collections::BTreeMap;
use std::fmt;

use fi_core::{errors::Result, Real};
use fi_instruments::{Instrument, PricingEngine};
use fi_math::optimization::{Array, EndCriteria, Simplex};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::calibrated_model::{weighted_rmse, OUT_OF_BOUNDS_PENALTY};
use crate::hull_white_model::{HullWhite, HullWhiteParameters};

/// An instrument with its observed market price.
#[derive(Debug, Clone, PartialEq)]
pub struct CalibrationInstrument {
    /// Instrument to reprice.
    pub instrument: Instrument,
    /// Observed (dirty) price.
    pub market_price: Real,
    /// Weight in the RMSE objective.
    pub weight: Real,
}

impl CalibrationInstrument {
    /// A calibration instrument with unit weight.
    pub fn new(instrument: Instrument, market_price: Real) -> Self {
        Self {
            instrument,
            market_price,
            weight: 1.0,
        }
    }

    /// Set the objective weight.
    pub fn with_weight(mut self, weight: Real) -> Self {
        self.weight = weight;
        self
    }
}

/// Optimizer settings for a calibration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationConfig {
    /// Stop once the RMSE, or the spread of simplex values, falls below this.
    pub tolerance: Real,
    /// Iteration cap.
    pub max_iterations: usize,
    /// Iterations without improvement before stopping.
    pub max_stationary_iterations: usize,
    /// Size of the initial simplex around the starting point.
    pub initial_step: Real,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-6,
            max_iterations: 1000,
            max_stationary_iterations: 100,
            initial_step: 0.005,
        }
    }
}

impl CalibrationConfig {
    fn end_criteria(&self) -> EndCriteria {
        EndCriteria::new(
            self.max_iterations,
            self.max_stationary_iterations,
            self.tolerance,
            self.tolerance,
        )
    }
}

/// Outcome of one calibration run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalibrationResult {
    /// Calibrated values by parameter name.
    pub parameters: BTreeMap<String, Real>,
    /// The calibrated parameter point.
    pub model: HullWhite,
    /// Weighted RMSE at the calibrated point.
    pub rmse: Real,
    /// Optimizer iterations.
    pub iterations: usize,
    /// `false` if the iteration budget ran out first.
    pub converged: bool,
    /// Model minus market price per instrument.
    pub per_instrument_errors: Vec<Real>,
}

impl CalibrationResult {
    /// Value of the named parameter.
    pub fn parameter(&self, name: &str) -> Option<Real> {
        self.parameters.get(name).copied()
    }

    /// `parameters` with their values replaced by the calibrated ones.
    pub fn apply_to(&self, parameters: &HullWhiteParameters) -> HullWhiteParameters {
        HullWhiteParameters {
            mean_reversion: parameters.mean_reversion.clone().with_value(self.model.a),
            volatility: parameters.volatility.clone().with_value(self.model.sigma),
        }
    }
}

/// Fits Hull-White `(a, σ)` to market prices.
///
/// `F` turns a trial parameter point into an engine; calibration normally
/// uses the analytic Hull-White engine over a fixed curve.
pub struct HullWhiteCalibrator<F> {
    parameters: HullWhiteParameters,
    config: CalibrationConfig,
    engine_factory: F,
}

impl<F> fmt::Debug for HullWhiteCalibrator<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HullWhiteCalibrator")
            .field("parameters", &self.parameters)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<F> HullWhiteCalibrator<F>
where
    F: Fn(HullWhite) -> Box<dyn PricingEngine>,
{
    /// Calibrator with default parameters and settings.
    pub fn new(engine_factory: F) -> Self {
        Self {
            parameters: HullWhiteParameters::default(),
            config: CalibrationConfig::default(),
            engine_factory,
        }
    }

    /// Use `parameters` as starting point and bounds.
    pub fn with_parameters(mut self, parameters: HullWhiteParameters) -> Self {
        self.parameters = parameters;
        self
    }

    /// Use `config` for the optimizer.
    pub fn with_config(mut self, config: CalibrationConfig) -> Self {
        self.config = config;
        self
    }

    /// Starting parameters.
    pub fn parameters(&self) -> &HullWhiteParameters {
        &self.parameters
    }

    /// Calibrate to `instruments` priced at `market_prices`, all with unit
    /// weight.
    ///
    /// # Errors
    /// [`fi_core::Error::Validation`] if the counts differ, or any error
    /// the engine raises for an instrument at the starting point.
    pub fn calibrate(
        &self,
        instruments: &[Instrument],
        market_prices: &[Real],
    ) -> Result<CalibrationResult> {
        fi_core::validate!(
            instruments.len() == market_prices.len(),
            "instrument count ({}) does not match market price count ({})",
            instruments.len(),
            market_prices.len()
        );
        let helpers: Vec<CalibrationInstrument> = instruments
            .iter()
            .zip(market_prices)
            .map(|(inst, &price)| CalibrationInstrument::new(inst.clone(), price))
            .collect();
        self.calibrate_instruments(&helpers)
    }

    /// Calibrate to weighted calibration instruments.
    pub fn calibrate_instruments(
        &self,
        helpers: &[CalibrationInstrument],
    ) -> Result<CalibrationResult> {
        fi_core::validate!(!helpers.is_empty(), "no calibration instruments");
        let market: Vec<Real> = helpers.iter().map(|h| h.market_price).collect();
        let weights: Vec<Real> = helpers.iter().map(|h| h.weight).collect();

        // Surface unsupported instruments before optimizing.
        self.model_prices(helpers, self.parameters.model())?;

        let params = self.parameters.as_array();
        let free: Vec<usize> = (0..params.len()).filter(|&i| !params[i].is_fixed).collect();
        let base = [params[0].value, params[1].value];

        info!(
            instruments = helpers.len(),
            free_parameters = free.len(),
            "starting Hull-White calibration"
        );

        let assemble = |x: &Array| -> [Real; 2] {
            let mut values = base;
            for (k, &i) in free.iter().enumerate() {
                values[i] = x[k];
            }
            values
        };

        let (values, iterations, converged) = if free.is_empty() {
            (base, 0, true)
        } else {
            let objective = |x: &Array| -> Real {
                if free.iter().enumerate().any(|(k, &i)| !params[i].admits(x[k])) {
                    return OUT_OF_BOUNDS_PENALTY;
                }
                let [a, sigma] = assemble(x);
                self.model_prices(helpers, HullWhite::new(a, sigma))
                    .and_then(|model| weighted_rmse(&model, &market, &weights))
                    .unwrap_or(OUT_OF_BOUNDS_PENALTY)
            };
            let initial = Array::from_iterator(free.len(), free.iter().map(|&i| base[i]));
            let outcome = Simplex::new(self.config.initial_step).minimize(
                &objective,
                &initial,
                &self.config.end_criteria(),
            )?;
            (
                assemble(&outcome.x),
                outcome.iterations,
                outcome.end_type.is_converged(),
            )
        };

        let model = HullWhite::new(values[0], values[1]);
        let model_prices = self.model_prices(helpers, model)?;
        let rmse = weighted_rmse(&model_prices, &market, &weights)?;
        let per_instrument_errors = model_prices.iter().zip(&market).map(|(m, k)| m - k).collect();
        let parameters = params
            .iter()
            .zip(values)
            .map(|(p, v)| (p.name.clone(), v))
            .collect();

        if converged {
            info!(a = model.a, sigma = model.sigma, rmse, iterations, "calibration finished");
        } else {
            warn!(
                a = model.a,
                sigma = model.sigma,
                rmse,
                iterations,
                "calibration stopped at the iteration cap without converging"
            );
        }

        Ok(CalibrationResult {
            parameters,
            model,
            rmse,
            iterations,
            converged,
            per_instrument_errors,
        })
    }

    fn model_prices(&self, helpers: &[CalibrationInstrument], model: HullWhite) -> Result<Vec<Real>> {
        let engine = (self.engine_factory)(model);
        helpers
            .iter()
            .map(|h| engine.price(&h.instrument).map(|r| r.dirty_price))
            .collect()
    }
}
