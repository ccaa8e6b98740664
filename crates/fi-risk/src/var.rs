//! Value-at-Risk: Monte Carlo, historical and parametric.
//!
//! The simulation methods build a P&L sample by repricing the portfolio on
//! flat curves at the base one-year zero rate plus a shock, sort it and read
//! the `⌊(1 − c)·n⌋`-th order statistic. VaR is that loss as a positive
//! number; expected shortfall is the negated mean of the P&L at or below it.

use std::fmt;
use std::sync::Arc;

use fi_core::{errors::Result, Error, Rate, Real};
use fi_math::random_numbers::{mersenne_twister, normal};
use fi_math::statistics::Statistics;
use fi_math::{normal_cdf_inverse, normal_pdf};
use fi_termstructures::YieldCurve;
use fi_time::Date;
use nalgebra::DMatrix;
use rand::Rng;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::portfolio::Portfolio;

/// Trading days per year.
const TRADING_DAYS: Real = 252.0;

/// Floor applied by [`historical_volatility`] to implausibly small values.
const MIN_HISTORICAL_VOLATILITY: Real = 0.001;

/// Value substituted when the historical volatility falls below the floor.
const FALLBACK_HISTORICAL_VOLATILITY: Real = 0.005;

/// VaR settings.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VaRConfig {
    /// Confidence level in `(0, 1)`.
    pub confidence: Real,
    /// Number of Monte Carlo shocks.
    pub simulations: usize,
    /// Standard deviation of the Monte Carlo rate shock; for the parametric
    /// method, the annualised value volatility.
    pub volatility: Real,
    /// Holding period of the parametric method, in trading days.
    pub horizon_days: u32,
    /// Seed of the Monte Carlo generator.
    pub seed: u64,
}

impl Default for VaRConfig {
    fn default() -> Self {
        Self {
            confidence: 0.95,
            simulations: 10_000,
            volatility: 0.01,
            horizon_days: 1,
            seed: 42,
        }
    }
}

/// How a [`VaRResult`] was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VaRMethod {
    /// Gaussian rate shocks.
    #[serde(rename = "Monte Carlo Simulation")]
    MonteCarlo,
    /// Day-over-day historical rate changes.
    #[serde(rename = "Historical Simulation")]
    Historical,
    /// Closed-form normal approximation.
    #[serde(rename = "Parametric")]
    Parametric,
}

impl VaRMethod {
    /// Display label.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::MonteCarlo => "Monte Carlo Simulation",
            Self::Historical => "Historical Simulation",
            Self::Parametric => "Parametric",
        }
    }
}

impl fmt::Display for VaRMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of one VaR run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VaRResult {
    /// Confidence level used.
    pub confidence_level: Real,
    /// Loss threshold, positive for a loss.
    pub var_amount: Real,
    /// Mean loss at or beyond the threshold.
    pub expected_shortfall: Real,
    /// Method tag.
    pub method: VaRMethod,
}

/// One day of historical zero rates by tenor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HistoricalRateEntry {
    /// Observation date.
    pub date: Date,
    /// 1-month rate.
    pub rate_1m: Rate,
    /// 3-month rate.
    pub rate_3m: Rate,
    /// 6-month rate.
    pub rate_6m: Rate,
    /// 1-year rate.
    pub rate_1y: Rate,
    /// 2-year rate.
    pub rate_2y: Rate,
    /// 5-year rate.
    pub rate_5y: Rate,
    /// 10-year rate.
    pub rate_10y: Rate,
    /// 30-year rate.
    pub rate_30y: Rate,
}

impl HistoricalRateEntry {
    /// Tenor labels in the order of [`HistoricalRateEntry::rates`].
    pub const TENORS: [&'static str; 8] = ["1M", "3M", "6M", "1Y", "2Y", "5Y", "10Y", "30Y"];

    /// Rates from the shortest tenor to the longest.
    pub fn rates(&self) -> [Rate; 8] {
        [
            self.rate_1m,
            self.rate_3m,
            self.rate_6m,
            self.rate_1y,
            self.rate_2y,
            self.rate_5y,
            self.rate_10y,
            self.rate_30y,
        ]
    }
}

fn chronological(history: &[HistoricalRateEntry]) -> Vec<HistoricalRateEntry> {
    let mut sorted = history.to_vec();
    sorted.sort_by_key(|entry| entry.date);
    sorted
}

/// Day-over-day changes of every tenor (rows are days, columns tenors),
/// after sorting `history` by date.
pub fn rate_changes(history: &[HistoricalRateEntry]) -> Result<DMatrix<Real>> {
    fi_core::validate!(
        history.len() >= 2,
        "need at least 2 historical entries, got {}",
        history.len()
    );
    let sorted = chronological(history);
    let rows = sorted.len() - 1;
    Ok(DMatrix::from_fn(rows, HistoricalRateEntry::TENORS.len(), |i, j| {
        sorted[i + 1].rates()[j] - sorted[i].rates()[j]
    }))
}

/// Annualised volatility of day-over-day one-year rate changes.
///
/// Values below 0.1% are replaced by 0.5%.
pub fn historical_volatility(history: &[HistoricalRateEntry]) -> Result<Real> {
    fi_core::validate!(
        history.len() >= 3,
        "need at least 3 historical entries for a volatility, got {}",
        history.len()
    );
    let sorted = chronological(history);
    let stats: Statistics = sorted.windows(2).map(|w| w[1].rate_1y - w[0].rate_1y).collect();
    let daily = stats.standard_deviation().unwrap_or(0.0);
    let annual = daily * TRADING_DAYS.sqrt();
    Ok(if annual < MIN_HISTORICAL_VOLATILITY {
        FALLBACK_HISTORICAL_VOLATILITY
    } else {
        annual
    })
}

/// `|npv|·Φ⁻¹(c)·σ·√(h/252)`.
pub fn parametric_var(portfolio_npv: Real, volatility: Real, confidence: Real, horizon_days: u32) -> Real {
    portfolio_npv.abs() * normal_cdf_inverse(confidence) * scaled_volatility(volatility, horizon_days)
}

fn scaled_volatility(volatility: Real, horizon_days: u32) -> Real {
    volatility * (Real::from(horizon_days) / TRADING_DAYS).sqrt()
}

fn check_confidence(confidence: Real) -> Result<()> {
    fi_core::validate!(
        confidence > 0.0 && confidence < 1.0,
        "confidence level must lie in (0, 1), got {confidence}"
    );
    Ok(())
}

/// `(VaR, expected shortfall)` of a P&L sample; sorts `pnl` in place.
pub(crate) fn tail_statistics(pnl: &mut [Real], confidence: Real) -> Result<(Real, Real)> {
    fi_core::ensure!(!pnl.is_empty(), "cannot compute VaR of an empty P&L sample");
    pnl.sort_by(Real::total_cmp);
    let n = pnl.len();
    let index = (((1.0 - confidence) * n as Real).floor() as usize).min(n - 1);
    let tail = &pnl[..=index];
    let shortfall = tail.iter().sum::<Real>() / tail.len() as Real;
    Ok((-pnl[index], -shortfall))
}

/// VaR calculator for one portfolio on one base curve.
#[derive(Debug, Clone)]
pub struct ValueAtRisk<'a> {
    portfolio: &'a Portfolio,
    curve: Arc<YieldCurve>,
    config: VaRConfig,
}

impl<'a> ValueAtRisk<'a> {
    /// Calculator with default settings.
    pub fn new(portfolio: &'a Portfolio, curve: Arc<YieldCurve>) -> Self {
        Self::with_config(portfolio, curve, VaRConfig::default())
    }

    /// Calculator with explicit settings.
    pub fn with_config(portfolio: &'a Portfolio, curve: Arc<YieldCurve>, config: VaRConfig) -> Self {
        Self {
            portfolio,
            curve,
            config,
        }
    }

    /// Settings in use.
    pub fn config(&self) -> &VaRConfig {
        &self.config
    }

    /// P&L of the portfolio under each one-year rate shock.
    fn shocked_pnl(&self, shocks: &[Real]) -> Result<Vec<Real>> {
        let base_values = self.portfolio.position_values(&self.curve);
        let curves: Vec<Arc<YieldCurve>> = shocks
            .iter()
            .map(|&shock| Ok(Arc::new(self.curve.bumped(shock)?)))
            .collect::<Result<_>>()?;
        Ok(curves
            .par_iter()
            .map(|curve| {
                let (base, shocked) = self.portfolio.revalue(&base_values, curve);
                shocked - base
            })
            .collect())
    }

    fn summarise(&self, mut pnl: Vec<Real>, method: VaRMethod) -> Result<VaRResult> {
        let (var_amount, expected_shortfall) = tail_statistics(&mut pnl, self.config.confidence)?;
        info!(
            portfolio = self.portfolio.name(),
            method = %method,
            samples = pnl.len(),
            var = var_amount,
            expected_shortfall,
            "VaR computed"
        );
        Ok(VaRResult {
            confidence_level: self.config.confidence,
            var_amount,
            expected_shortfall,
            method,
        })
    }

    /// Monte Carlo VaR with a generator seeded from the config.
    pub fn monte_carlo(&self) -> Result<VaRResult> {
        let mut rng = mersenne_twister(self.config.seed);
        self.monte_carlo_with_rng(&mut rng)
    }

    /// Monte Carlo VaR drawing `N(0, volatility)` shocks from `rng`.
    pub fn monte_carlo_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Result<VaRResult> {
        check_confidence(self.config.confidence)?;
        fi_core::ensure!(self.config.simulations > 0, "VaR needs at least one simulation");
        let shocks: Vec<Real> = (0..self.config.simulations)
            .map(|_| normal(rng, 0.0, self.config.volatility))
            .collect();
        let pnl = self.shocked_pnl(&shocks)?;
        self.summarise(pnl, VaRMethod::MonteCarlo)
    }

    /// Historical VaR from day-over-day one-year rate changes.
    pub fn historical(&self, history: &[HistoricalRateEntry]) -> Result<VaRResult> {
        check_confidence(self.config.confidence)?;
        fi_core::validate!(
            history.len() >= 2,
            "historical VaR needs at least 2 entries, got {}",
            history.len()
        );
        let sorted = chronological(history);
        let shocks: Vec<Real> = sorted.windows(2).map(|w| w[1].rate_1y - w[0].rate_1y).collect();
        let pnl = self.shocked_pnl(&shocks)?;
        self.summarise(pnl, VaRMethod::Historical)
    }

    /// Parametric VaR of the base portfolio value.
    ///
    /// Expected shortfall uses the normal tail mean `φ(z)/(1 − c)`.
    pub fn parametric(&self) -> Result<VaRResult> {
        let confidence = self.config.confidence;
        check_confidence(confidence)?;
        let npv = self.portfolio.total_npv(&self.curve);
        let sigma = npv.abs() * scaled_volatility(self.config.volatility, self.config.horizon_days);
        let z = normal_cdf_inverse(confidence);
        let var_amount = parametric_var(npv, self.config.volatility, confidence, self.config.horizon_days);
        let expected_shortfall = sigma * normal_pdf(z) / (1.0 - confidence);
        info!(
            portfolio = self.portfolio.name(),
            method = %VaRMethod::Parametric,
            var = var_amount,
            expected_shortfall,
            "VaR computed"
        );
        Ok(VaRResult {
            confidence_level: confidence,
            var_amount,
            expected_shortfall,
            method: VaRMethod::Parametric,
        })
    }

    /// Dispatch on `method`; historical VaR reads `history`.
    pub fn compute(&self, method: VaRMethod, history: &[HistoricalRateEntry]) -> Result<VaRResult> {
        match method {
            VaRMethod::MonteCarlo => self.monte_carlo(),
            VaRMethod::Historical => self.historical(history),
            VaRMethod::Parametric => self.parametric(),
        }
    }
}

impl std::str::FromStr for VaRMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().replace([' ', '_', '-'], "").as_str() {
            "montecarlo" | "montecarlosimulation" | "mc" => Ok(Self::MonteCarlo),
            "historical" | "historicalsimulation" => Ok(Self::Historical),
            "parametric" => Ok(Self::Parametric),
            _ => Err(Error::Validation(format!("unknown VaR method: {s}"))),
        }
    }
}
