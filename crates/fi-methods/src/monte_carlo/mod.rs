//! Monte Carlo simulation of the Hull-White short rate.
//!
//! # Overview
//!
//! * [`ShortRatePath`]: one simulated rate path over `steps + 1` points
//! * [`HullWhitePathGenerator`]: Euler scheme `r += (θ − a·r)·dt + σ·√dt·ε`
//! * [`PathPricer`]: payoff evaluated on a path
//! * [`MonteCarloModel`]: antithetic sampling loop feeding [`Statistics`]
//!
//! Randomness always comes from a caller-provided generator, so a seeded
//! generator reproduces a run exactly.

use fi_core::{errors::Result, Rate, Real, Time};
use fi_math::random_numbers::standard_normal;
use fi_math::statistics::Statistics;
use fi_models::HullWhite;
use rand::Rng;

// ─── Path ─────────────────────────────────────────────────────────────────────

/// A simulated short-rate path on a uniform grid.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortRatePath {
    dt: Time,
    rates: Vec<Rate>,
}

impl ShortRatePath {
    /// Rates at `0, dt, …, steps·dt`.
    pub fn rates(&self) -> &[Rate] {
        &self.rates
    }

    /// Number of time steps (= len − 1).
    pub fn steps(&self) -> usize {
        self.rates.len() - 1
    }

    /// Step length.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// The initial rate.
    pub fn front(&self) -> Rate {
        self.rates[0]
    }

    /// The final rate.
    pub fn back(&self) -> Rate {
        self.rates[self.rates.len() - 1]
    }

    /// `∫ r dt` over the path by the trapezoidal rule.
    pub fn integral(&self) -> Real {
        self.rates
            .windows(2)
            .map(|w| 0.5 * (w[0] + w[1]) * self.dt)
            .sum()
    }

    /// Pathwise discount factor `exp(−∫ r dt)`.
    pub fn discount(&self) -> Real {
        (-self.integral()).exp()
    }
}

// ─── Generator ────────────────────────────────────────────────────────────────

/// Euler path generator for `dr = (θ − a·r)dt + σ·dW` with constant `θ`.
#[derive(Debug, Clone)]
pub struct HullWhitePathGenerator {
    model: HullWhite,
    r0: Rate,
    theta: Real,
    dt: Time,
    steps: usize,
}

impl HullWhitePathGenerator {
    /// Generator starting at `r0` over `horizon` in `steps` steps.
    pub fn new(model: HullWhite, r0: Rate, theta: Real, horizon: Time, steps: usize) -> Result<Self> {
        fi_core::ensure!(steps > 0, "path generator needs at least one step");
        fi_core::ensure!(horizon > 0.0, "simulation horizon must be positive, got {horizon}");
        Ok(Self {
            model,
            r0,
            theta,
            dt: horizon / steps as Real,
            steps,
        })
    }

    /// Number of steps per path.
    pub fn steps(&self) -> usize {
        self.steps
    }

    fn evolve(&self, r: Rate, epsilon: Real) -> Rate {
        r + (self.theta - self.model.a * r) * self.dt + self.model.sigma * self.dt.sqrt() * epsilon
    }

    /// Draw one path.
    pub fn next_path<R: Rng + ?Sized>(&self, rng: &mut R) -> ShortRatePath {
        let mut rates = Vec::with_capacity(self.steps + 1);
        let mut r = self.r0;
        rates.push(r);
        for _ in 0..self.steps {
            r = self.evolve(r, standard_normal(rng));
            rates.push(r);
        }
        ShortRatePath { dt: self.dt, rates }
    }

    /// Draw a path and its mirror driven by the negated increments.
    pub fn next_antithetic_pair<R: Rng + ?Sized>(&self, rng: &mut R) -> (ShortRatePath, ShortRatePath) {
        let mut rates = Vec::with_capacity(self.steps + 1);
        let mut mirror = Vec::with_capacity(self.steps + 1);
        let (mut r, mut m) = (self.r0, self.r0);
        rates.push(r);
        mirror.push(m);
        for _ in 0..self.steps {
            let epsilon = standard_normal(rng);
            r = self.evolve(r, epsilon);
            m = self.evolve(m, -epsilon);
            rates.push(r);
            mirror.push(m);
        }
        (
            ShortRatePath { dt: self.dt, rates },
            ShortRatePath {
                dt: self.dt,
                rates: mirror,
            },
        )
    }
}

// ─── Pricing ──────────────────────────────────────────────────────────────────

/// Evaluates a payoff on a simulated path.
pub trait PathPricer {
    /// Payoff of one path.
    fn value(&self, path: &ShortRatePath) -> Real;
}

impl<F> PathPricer for F
where
    F: Fn(&ShortRatePath) -> Real,
{
    fn value(&self, path: &ShortRatePath) -> Real {
        self(path)
    }
}

/// Antithetic Monte Carlo driver.
///
/// Each sample is the payoff of one path; `samples / 2` pairs are drawn,
/// so an odd sample count is rounded down to an even one.
#[derive(Debug)]
pub struct MonteCarloModel<'a, P: ?Sized> {
    generator: &'a HullWhitePathGenerator,
    pricer: &'a P,
}

impl<'a, P: PathPricer + ?Sized> MonteCarloModel<'a, P> {
    /// Combine a generator with a payoff.
    pub fn new(generator: &'a HullWhitePathGenerator, pricer: &'a P) -> Self {
        Self { generator, pricer }
    }

    /// Simulate `samples` paths and collect their payoffs.
    pub fn simulate<R: Rng + ?Sized>(&self, samples: usize, rng: &mut R) -> Statistics {
        let mut stats = Statistics::new();
        for _ in 0..samples / 2 {
            let (path, mirror) = self.generator.next_antithetic_pair(rng);
            stats.add(self.pricer.value(&path));
            stats.add(self.pricer.value(&mirror));
        }
        stats
    }

    /// [`MonteCarloModel::simulate`], also collecting each path's
    /// [`ShortRatePath::discount`] from the same draws.
    pub fn simulate_with_discounts<R: Rng + ?Sized>(
        &self,
        samples: usize,
        rng: &mut R,
    ) -> (Statistics, Statistics) {
        let mut payoffs = Statistics::new();
        let mut discounts = Statistics::new();
        for _ in 0..samples / 2 {
            let (path, mirror) = self.generator.next_antithetic_pair(rng);
            for p in [&path, &mirror] {
                payoffs.add(self.pricer.value(p));
                discounts.add(p.discount());
            }
        }
        (payoffs, discounts)
    }
}
