//! Derivative-free minimization.
//!
//! Provides the scalar cost-function trait, end criteria and the
//! Nelder–Mead [`Simplex`] optimizer used for model calibration. Bounds are
//! expected to be enforced by the cost function itself (e.g. a penalty).

use fi_core::{errors::Result, Real};
use nalgebra::DVector;

/// Parameter vector type.
pub type Array = DVector<Real>;

// ── Cost function trait ───────────────────────────────────────────────────────

/// A scalar objective `f: Rⁿ → R` to be minimized.
pub trait CostFunction {
    /// Evaluate the objective at `x`.
    fn value(&self, x: &Array) -> Real;
}

impl<F> CostFunction for F
where
    F: Fn(&Array) -> Real,
{
    fn value(&self, x: &Array) -> Real {
        self(x)
    }
}

// ── End criteria ──────────────────────────────────────────────────────────────

/// Criteria to stop an optimization.
#[derive(Debug, Clone)]
pub struct EndCriteria {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Maximum number of consecutive iterations without improvement.
    pub max_stationary_state_iterations: usize,
    /// Stop when the best value drops below this.
    pub root_epsilon: Real,
    /// Improvement below this counts as stationary.
    pub function_epsilon: Real,
}

impl EndCriteria {
    /// Create new end criteria.
    pub fn new(
        max_iterations: usize,
        max_stationary_state_iterations: usize,
        root_epsilon: Real,
        function_epsilon: Real,
    ) -> Self {
        Self {
            max_iterations,
            max_stationary_state_iterations,
            root_epsilon,
            function_epsilon,
        }
    }
}

impl Default for EndCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_stationary_state_iterations: 100,
            root_epsilon: 1e-8,
            function_epsilon: 1e-8,
        }
    }
}

/// The reason an optimization terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EndCriteriaType {
    /// Maximum iterations reached.
    MaxIterations,
    /// Function value below root epsilon.
    RootEpsilon,
    /// Simplex values collapsed to within function epsilon.
    FunctionEpsilon,
    /// Maximum stationary-state iterations reached.
    StationaryPoint,
}

impl EndCriteriaType {
    /// `true` unless the iteration budget ran out.
    pub fn is_converged(self) -> bool {
        !matches!(self, Self::MaxIterations)
    }
}

/// Result of an optimization.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Best point found.
    pub x: Array,
    /// Objective value at `x`.
    pub value: Real,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Reason for termination.
    pub end_type: EndCriteriaType,
}

// ── Simplex (Nelder–Mead) ─────────────────────────────────────────────────────

/// Nelder–Mead simplex optimizer.
///
/// The initial simplex is `x0` plus `x0 + lambda·eᵢ` for each coordinate.
/// The optimizer never fails on non-convergence; it returns the best vertex
/// with [`EndCriteriaType::MaxIterations`].
#[derive(Debug, Clone, Copy)]
pub struct Simplex {
    lambda: Real,
}

impl Simplex {
    /// Create a new simplex optimizer with initial step `lambda`.
    pub fn new(lambda: Real) -> Self {
        Self { lambda }
    }

    /// Minimize `cost_fn` starting from `initial_values`.
    pub fn minimize<C: CostFunction + ?Sized>(
        &self,
        cost_fn: &C,
        initial_values: &Array,
        end_criteria: &EndCriteria,
    ) -> Result<OptimizationResult> {
        let n = initial_values.len();
        fi_core::ensure!(n > 0, "cannot minimize over an empty parameter vector");
        fi_core::ensure!(self.lambda > 0.0, "simplex step must be positive, got {}", self.lambda);
        let np1 = n + 1;

        let mut vertices: Vec<Array> = Vec::with_capacity(np1);
        vertices.push(initial_values.clone());
        for i in 0..n {
            let mut v = initial_values.clone();
            v[i] += self.lambda;
            vertices.push(v);
        }

        let mut values: Vec<Real> = vertices.iter().map(|v| cost_fn.value(v)).collect();

        let mut iterations = 0;
        let mut stationary_count = 0;
        let mut prev_best = Real::MAX;

        loop {
            let (mut ilo, mut ihi, mut inhi) = (0usize, 0usize, 0usize);
            for i in 0..np1 {
                if values[i] < values[ilo] {
                    ilo = i;
                }
            }
            for i in 0..np1 {
                if values[i] > values[ihi] {
                    ihi = i;
                }
            }
            if ihi == 0 {
                inhi = 1;
            }
            for i in 0..np1 {
                if i != ihi && values[i] > values[inhi] {
                    inhi = i;
                }
            }

            let finish = |end_type: EndCriteriaType,
                          vertices: &[Array],
                          values: &[Real],
                          iterations: usize|
             -> Result<OptimizationResult> {
                Ok(OptimizationResult {
                    x: vertices[ilo].clone(),
                    value: values[ilo],
                    iterations,
                    end_type,
                })
            };

            iterations += 1;
            if values[ilo] < end_criteria.root_epsilon {
                return finish(EndCriteriaType::RootEpsilon, &vertices, &values, iterations);
            }
            if (values[ihi] - values[ilo]).abs() < end_criteria.function_epsilon {
                return finish(EndCriteriaType::FunctionEpsilon, &vertices, &values, iterations);
            }
            if (prev_best - values[ilo]).abs() < end_criteria.function_epsilon {
                stationary_count += 1;
                if stationary_count >= end_criteria.max_stationary_state_iterations {
                    return finish(EndCriteriaType::StationaryPoint, &vertices, &values, iterations);
                }
            } else {
                stationary_count = 0;
            }
            prev_best = values[ilo];

            if iterations >= end_criteria.max_iterations {
                return finish(EndCriteriaType::MaxIterations, &vertices, &values, iterations);
            }

            // Centroid of all but the worst vertex
            let mut centroid = Array::zeros(n);
            for (i, v) in vertices.iter().enumerate() {
                if i != ihi {
                    centroid += v;
                }
            }
            centroid /= n as Real;

            let reflected = &centroid * 2.0 - &vertices[ihi];
            let fr = cost_fn.value(&reflected);

            if fr < values[ilo] {
                let expanded = &reflected * 2.0 - &centroid;
                let fe = cost_fn.value(&expanded);
                if fe < fr {
                    vertices[ihi] = expanded;
                    values[ihi] = fe;
                } else {
                    vertices[ihi] = reflected;
                    values[ihi] = fr;
                }
            } else if fr < values[inhi] {
                vertices[ihi] = reflected;
                values[ihi] = fr;
            } else {
                let contracted = if fr < values[ihi] {
                    (&centroid + &reflected) / 2.0
                } else {
                    (&centroid + &vertices[ihi]) / 2.0
                };
                let fc = cost_fn.value(&contracted);
                if fc < values[ihi].min(fr) {
                    vertices[ihi] = contracted;
                    values[ihi] = fc;
                } else {
                    // Shrink towards the best vertex
                    let best = vertices[ilo].clone();
                    for i in 0..np1 {
                        if i != ilo {
                            vertices[i] = (&best + &vertices[i]) / 2.0;
                            values[i] = cost_fn.value(&vertices[i]);
                        }
                    }
                }
            }
        }
    }
}
