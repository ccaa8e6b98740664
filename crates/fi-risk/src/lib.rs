//! # fi-risk
//!
//! Risk measures built from repeated repricing under shocked curves.
//!
//! Every [`Position`] carries an [`EngineFactory`](fi_pricingengines::EngineFactory),
//! so bumped or shocked curves always rebuild the right engine for the
//! instrument, Black-76 with its volatility surface included. Curve shocks
//! are parallel: a flat curve at the base one-year zero rate plus the shock.
//!
//! Scenario and VaR repricing fans out over `rayon`; shocks are drawn up
//! front from an explicit seeded generator, so results do not depend on the
//! thread count. A position that fails to price is left out of the
//! aggregate with a `warn` event rather than failing the batch.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod greeks;
pub mod pca;
pub mod portfolio;
pub mod scenario;
pub mod var;

pub use greeks::{GreeksCalculator, RiskResult};
pub use pca::{principal_components, PcaResult};
pub use portfolio::{Portfolio, PortfolioReport, Position, PositionDetail, RiskReport};
pub use scenario::{parallel_shift_scenarios, ScenarioResult, STANDARD_SHIFTS_BP};
pub use var::{
    historical_volatility, parametric_var, rate_changes, HistoricalRateEntry, VaRConfig,
    VaRMethod, VaRResult, ValueAtRisk,
};
