//! # fi-models
//!
//! The one-factor Hull-White short-rate model and its calibration.
//!
//! ```text
//! dr = (θ(t) − a·r) dt + σ dW
//! ```
//!
//! A model is exactly two [`ModelParameter`]s, mean reversion `a` and
//! volatility `σ`. The [`HullWhiteCalibrator`] fits them to observed prices
//! through any engine built from a [`HullWhite`] value.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Infrastructure ───────────────────────────────────────────────────────
pub mod calibrated_model;

// ── Short-rate model ─────────────────────────────────────────────────────
pub mod hull_white_model;

// ── Calibration ──────────────────────────────────────────────────────────
pub mod calibration;

// ── Re-exports ───────────────────────────────────────────────────────────
pub use calibrated_model::{rmse, ModelParameter, OUT_OF_BOUNDS_PENALTY};
pub use calibration::{
    CalibrationConfig, CalibrationInstrument, CalibrationResult, HullWhiteCalibrator,
};
pub use hull_white_model::{HullWhite, HullWhiteParameters};
