//! Recombining trinomial tree for the Hull-White short rate.
//!
//! Node `(i, index)` sits at step `i` with `index ∈ [0, 2i]`; its centred
//! offset is `j = index − i` and its state is `x = j·dx` with spacing
//! `dx = σ√(3·dt)`. Every node branches to `index`, `index + 1` and
//! `index + 2` at step `i + 1` with
//!
//! ```text
//! ν  = −a·j·dx·dt
//! pu = 1/6 + ν²/(2dx²) + ν/(2dx)
//! pm = 2/3 − ν²/dx²
//! pd = 1/6 + ν²/(2dx²) − ν/(2dx)
//! ```
//!
//! The tree is not truncated at a maximum offset. Since `ν²/dx² = (a·j·dt)²`,
//! `pm` turns negative once `|j| > √(2/3)/(a·dt)`, which happens at the outer
//! nodes of coarse trees over long horizons (for `a = 0.5`, 50 steps over 30
//! years, `pm ≈ −224` at `j = 50`). The probabilities still sum to one and
//! are used as computed.

use std::ops::{Index, IndexMut};

use fi_core::{errors::Result, Real, Time};
use fi_models::HullWhite;

use super::TimeGrid;

/// Triangular array of node values, one row per step.
///
/// Row `i` holds `2i + 1` values.
#[derive(Debug, Clone, PartialEq)]
pub struct TrinomialGrid {
    rows: Vec<Vec<Real>>,
}

impl TrinomialGrid {
    /// A zero-filled grid with `steps + 1` rows.
    pub fn new(steps: usize) -> Self {
        Self {
            rows: (0..=steps).map(|i| vec![0.0; 2 * i + 1]).collect(),
        }
    }

    /// Number of steps.
    pub fn steps(&self) -> usize {
        self.rows.len() - 1
    }

    /// Values at step `i`.
    pub fn row(&self, i: usize) -> &[Real] {
        &self.rows[i]
    }
}

impl Index<(usize, usize)> for TrinomialGrid {
    type Output = Real;

    fn index(&self, (i, j): (usize, usize)) -> &Real {
        &self.rows[i][j]
    }
}

impl IndexMut<(usize, usize)> for TrinomialGrid {
    fn index_mut(&mut self, (i, j): (usize, usize)) -> &mut Real {
        &mut self.rows[i][j]
    }
}

/// A Hull-White trinomial tree over a uniform time grid.
#[derive(Debug, Clone)]
pub struct TrinomialTree {
    a: Real,
    dx: Real,
    grid: TimeGrid,
}

impl TrinomialTree {
    /// Build a tree for `model` with `steps` steps up to `horizon`.
    pub fn new(model: HullWhite, horizon: Time, steps: usize) -> Result<Self> {
        let grid = TimeGrid::uniform(horizon, steps)?;
        let dx = model.sigma * (3.0 * grid.dt()).sqrt();
        Ok(Self {
            a: model.a,
            dx,
            grid,
        })
    }

    /// Number of time steps.
    pub fn steps(&self) -> usize {
        self.grid.steps()
    }

    /// Step length.
    pub fn dt(&self) -> Time {
        self.grid.dt()
    }

    /// State spacing `σ√(3·dt)`.
    pub fn dx(&self) -> Real {
        self.dx
    }

    /// Time at step `i`.
    pub fn time(&self, i: usize) -> Time {
        self.grid.time(i)
    }

    /// Number of nodes at step `i`.
    pub fn size(&self, i: usize) -> usize {
        2 * i + 1
    }

    /// Centred offset `j` of node `(i, index)`.
    pub fn offset(&self, i: usize, index: usize) -> i64 {
        index as i64 - i as i64
    }

    /// Branching probabilities `(pu, pm, pd)` at centred offset `j`.
    ///
    /// Not clamped: `pm < 0` for `|j| > √(2/3)/(a·dt)`.
    pub fn probabilities(&self, j: i64) -> (Real, Real, Real) {
        let dt = self.dt();
        let nu = -self.a * j as Real * self.dx * dt;
        let dx2 = self.dx * self.dx;
        if dx2 == 0.0 {
            // Zero volatility: all mass on the middle branch.
            return (0.0, 1.0, 0.0);
        }
        let pu = 1.0 / 6.0 + nu * nu / (2.0 * dx2) + nu / (2.0 * self.dx);
        let pm = 2.0 / 3.0 - nu * nu / dx2;
        let pd = 1.0 / 6.0 + nu * nu / (2.0 * dx2) - nu / (2.0 * self.dx);
        (pu, pm, pd)
    }

    /// Value a claim by backward induction and return the root value.
    ///
    /// * `payoff(j)`: terminal value at centred offset `j`
    /// * `short_rate(i, j)`: rate used to discount over step `i`
    /// * `exercise(i, j)`: early-exercise value, `max`-combined with the
    ///   continuation value at every earlier node
    pub fn roll_back<P, R, E>(&self, payoff: P, short_rate: R, exercise: E) -> Real
    where
        P: Fn(i64) -> Real,
        R: Fn(usize, i64) -> Real,
        E: Fn(usize, i64) -> Real,
    {
        self.induce(payoff, short_rate, exercise)[(0, 0)]
    }

    /// Backward induction returning the full grid of node values.
    pub fn induce<P, R, E>(&self, payoff: P, short_rate: R, exercise: E) -> TrinomialGrid
    where
        P: Fn(i64) -> Real,
        R: Fn(usize, i64) -> Real,
        E: Fn(usize, i64) -> Real,
    {
        let n = self.steps();
        let dt = self.dt();
        let mut values = TrinomialGrid::new(n);

        for index in 0..self.size(n) {
            values[(n, index)] = payoff(self.offset(n, index));
        }

        for i in (0..n).rev() {
            for index in 0..self.size(i) {
                let j = self.offset(i, index);
                let (pu, pm, pd) = self.probabilities(j);
                let expected = pu * values[(i + 1, index + 2)]
                    + pm * values[(i + 1, index + 1)]
                    + pd * values[(i + 1, index)];
                let continuation = expected * (-short_rate(i, j) * dt).exp();
                values[(i, index)] = continuation.max(exercise(i, j));
            }
        }
        values
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    fn tree(a: Real, sigma: Real) -> TrinomialTree {
        TrinomialTree::new(HullWhite::new(a, sigma), 2.0, 50).unwrap()
    }

    #[test]
    fn grid_is_triangular() {
        let g = TrinomialGrid::new(3);
        assert_eq!(g.steps(), 3);
        assert_eq!(g.row(0).len(), 1);
        assert_eq!(g.row(3).len(), 7);
    }

    #[test]
    fn spacing_matches_model() {
        let t = tree(0.03, 0.01);
        assert_abs_diff_eq!(t.dt(), 0.04, epsilon = 1e-15);
        assert_abs_diff_eq!(t.dx(), 0.01 * (0.12_f64).sqrt(), epsilon = 1e-15);
    }

    #[test]
    fn centre_node_is_symmetric() {
        let (pu, pm, pd) = tree(0.1, 0.01).probabilities(0);
        assert_abs_diff_eq!(pu, 1.0 / 6.0, epsilon = 1e-15);
        assert_abs_diff_eq!(pm, 2.0 / 3.0, epsilon = 1e-15);
        assert_abs_diff_eq!(pd, 1.0 / 6.0, epsilon = 1e-15);
    }

    #[test]
    fn mean_reversion_pulls_towards_centre() {
        let t = tree(0.5, 0.01);
        let (pu, _, pd) = t.probabilities(10);
        assert!(pd > pu);
        let (pu, _, pd) = t.probabilities(-10);
        assert!(pu > pd);
    }

    #[test]
    fn zero_rate_keeps_unit_payoff() {
        let v = tree(0.03, 0.01).roll_back(|_| 1.0, |_, _| 0.0, |_, _| 0.0);
        assert_abs_diff_eq!(v, 1.0, epsilon = 1e-12);
    }

    #[test]
    fn constant_rate_discounts_exactly() {
        let v = tree(0.03, 0.01).roll_back(|_| 1.0, |_, _| 0.05, |_, _| 0.0);
        assert_abs_diff_eq!(v, (-0.05_f64 * 2.0).exp(), epsilon = 1e-12);
    }

    #[test]
    fn exercise_value_floors_nodes() {
        let v = tree(0.03, 0.01).roll_back(|_| 0.0, |_, _| 0.05, |_, _| 0.25);
        assert_abs_diff_eq!(v, 0.25, epsilon = 1e-15);
    }

    #[test]
    fn outer_nodes_of_coarse_tree_have_negative_middle_branch() {
        let tree = TrinomialTree::new(HullWhite::new(0.5, 0.01), 30.0, 50).unwrap();
        assert_abs_diff_eq!(tree.dt(), 0.6, epsilon = 1e-12);
        let (pu, pm, pd) = tree.probabilities(50);
        // (a·j·dt)² = 15² = 225.
        assert_abs_diff_eq!(pm, 2.0 / 3.0 - 225.0, epsilon = 1e-9);
        assert_abs_diff_eq!(pu + pm + pd, 1.0, epsilon = 1e-9);
        let (_, centre, _) = tree.probabilities(0);
        assert_abs_diff_eq!(centre, 2.0 / 3.0, epsilon = 1e-12);
    }

    proptest! {
        #[test]
        fn probabilities_sum_to_one(a in 0.001..0.5_f64, sigma in 0.0001..0.1_f64, j in -50i64..50) {
            let (pu, pm, pd) = tree(a, sigma).probabilities(j);
            prop_assert!((pu + pm + pd - 1.0).abs() < 1e-12);
        }
    }
}
