//! Volatility surfaces consumed by the Black-76 engine.
//!
//! A surface answers `(expiry, tenor label, strike) → σ`. Tenor labels are
//! whole-year strings such as `"5Y"`.

use std::collections::HashMap;
use std::sync::Arc;

use fi_core::{Real, Volatility};
use fi_time::Date;

use crate::yield_curve::YieldCurve;

/// A Black volatility lookup.
pub trait VolatilitySurface: std::fmt::Debug + Send + Sync {
    /// Black volatility for an option expiring on `expiry` on an underlying
    /// of tenor `tenor` struck at `strike`.
    fn volatility(&self, expiry: Date, tenor: &str, strike: Real) -> Volatility;
}

// ── FlatVolatility ───────────────────────────────────────────────────────────

/// The same volatility for every expiry, tenor and strike.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlatVolatility {
    volatility: Volatility,
}

impl FlatVolatility {
    /// Create a flat surface.
    pub fn new(volatility: Volatility) -> Self {
        Self { volatility }
    }
}

impl VolatilitySurface for FlatVolatility {
    fn volatility(&self, _expiry: Date, _tenor: &str, _strike: Real) -> Volatility {
        self.volatility
    }
}

// ── Swaptions ────────────────────────────────────────────────────────────────

/// Swaption volatilities keyed by underlying tenor label, with a default
/// for tenors that are not quoted.
#[derive(Debug, Clone, Default)]
pub struct SwaptionVolatilityCube {
    default_volatility: Volatility,
    by_tenor: HashMap<String, Volatility>,
}

impl SwaptionVolatilityCube {
    /// A cube that returns `volatility` for every tenor.
    pub fn new(volatility: Volatility) -> Self {
        Self {
            default_volatility: volatility,
            by_tenor: HashMap::new(),
        }
    }

    /// Add (or replace) the quote for one tenor label.
    pub fn with_tenor(mut self, tenor: impl Into<String>, volatility: Volatility) -> Self {
        self.by_tenor.insert(tenor.into(), volatility);
        self
    }
}

impl VolatilitySurface for SwaptionVolatilityCube {
    fn volatility(&self, _expiry: Date, tenor: &str, _strike: Real) -> Volatility {
        self.by_tenor
            .get(tenor)
            .copied()
            .unwrap_or(self.default_volatility)
    }
}

// ── Caps / floors ────────────────────────────────────────────────────────────

/// Flat cap/floor volatility.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CapFloorVolatilitySurface {
    volatility: Volatility,
}

impl CapFloorVolatilitySurface {
    /// Create a flat cap/floor surface.
    pub fn new(volatility: Volatility) -> Self {
        Self { volatility }
    }
}

impl VolatilitySurface for CapFloorVolatilitySurface {
    fn volatility(&self, _expiry: Date, _tenor: &str, _strike: Real) -> Volatility {
        self.volatility
    }
}

/// Turns quoted (flat) cap volatilities into caplet volatilities.
///
/// Caplet vols are taken equal to the quoted cap vol; no sequential
/// stripping is performed.
#[derive(Debug, Clone, Copy, Default)]
pub struct CapletVolStripper;

impl CapletVolStripper {
    /// Strip `cap_surface` against `curve`.
    pub fn strip(
        &self,
        cap_surface: Arc<dyn VolatilitySurface>,
        _curve: &YieldCurve,
    ) -> Arc<dyn VolatilitySurface> {
        cap_surface
    }
}
