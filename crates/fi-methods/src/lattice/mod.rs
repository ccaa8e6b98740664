//! Lattice methods for short-rate pricing.
//!
//! # Overview
//!
//! * [`TimeGrid`]: uniform grid of time points used by the tree
//! * [`TrinomialTree`]: recombining Hull-White trinomial tree
//! * [`TrinomialGrid`]: triangular node values filled by backward induction

pub mod trinomial_tree;

pub use trinomial_tree::{TrinomialGrid, TrinomialTree};

use fi_core::{errors::Result, Real, Time};

// ─── TimeGrid ─────────────────────────────────────────────────────────────────

/// A uniform grid of time points `0, dt, 2·dt, …, end`.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeGrid {
    end: Time,
    steps: usize,
}

impl TimeGrid {
    /// Create a uniform time grid from 0 to `end` with `steps` intervals.
    ///
    /// # Errors
    /// [`fi_core::Error::Precondition`] unless `steps > 0` and `end > 0`.
    pub fn uniform(end: Time, steps: usize) -> Result<Self> {
        fi_core::ensure!(steps > 0, "time grid needs at least one step");
        fi_core::ensure!(end > 0.0, "time grid end must be positive, got {end}");
        Ok(Self { end, steps })
    }

    /// Number of steps (= time points − 1).
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Uniform step length.
    pub fn dt(&self) -> Time {
        self.end / self.steps as Real
    }

    /// Time at index `i`.
    pub fn time(&self, i: usize) -> Time {
        i as Real * self.dt()
    }

    /// Final time.
    pub fn end(&self) -> Time {
        self.end
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn time_grid_uniform() {
        let g = TimeGrid::uniform(1.0, 4).unwrap();
        assert_eq!(g.steps(), 4);
        assert_abs_diff_eq!(g.time(0), 0.0);
        assert_abs_diff_eq!(g.time(4), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(g.dt(), 0.25, epsilon = 1e-15);
    }

    #[test]
    fn degenerate_grids_rejected() {
        assert!(TimeGrid::uniform(1.0, 0).is_err());
        assert!(TimeGrid::uniform(0.0, 10).is_err());
    }
}
