//! Engine, calibration and risk settings loaded from TOML.
//!
//! Every section and key is optional:
//!
//! ```toml
//! log_level = "debug"
//! interpolation = "LogLinear"
//! day_count = "Actual360"
//!
//! [tree]
//! steps = 200
//!
//! [var]
//! confidence = 0.99
//! ```

use std::path::Path;

use fi_core::{errors::Result, Error};
use fi_math::InterpolationMethod;
use fi_models::CalibrationConfig;
use fi_pricingengines::{MonteCarloConfig, TreeConfig};
use fi_risk::VaRConfig;
use fi_time::DayCountConvention;
use serde::{Deserialize, Serialize};

/// Aggregated configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Default filter for [`crate::init_tracing`].
    pub log_level: String,
    /// Interpolation used when bootstrapping curves.
    pub interpolation: InterpolationMethod,
    /// Day count used when bootstrapping curves.
    pub day_count: DayCountConvention,
    /// Trinomial tree settings.
    pub tree: TreeConfig,
    /// Monte Carlo engine settings.
    pub monte_carlo: MonteCarloConfig,
    /// Hull-White calibration settings.
    pub calibration: CalibrationConfig,
    /// VaR settings.
    pub var: VaRConfig,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            interpolation: InterpolationMethod::LogLinear,
            day_count: DayCountConvention::Actual360,
            tree: TreeConfig::default(),
            monte_carlo: MonteCarloConfig::default(),
            calibration: CalibrationConfig::default(),
            var: VaRConfig::default(),
        }
    }
}

impl Settings {
    /// Parse settings from a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| Error::Validation(format!("invalid settings: {e}")))
    }

    /// Read and parse a TOML settings file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Runtime(format!("cannot read settings file {}: {e}", path.display())))?;
        Self::from_toml_str(&content)
    }

    /// Serialize to TOML.
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string(self).map_err(|e| Error::Runtime(format!("cannot serialize settings: {e}")))
    }
}
