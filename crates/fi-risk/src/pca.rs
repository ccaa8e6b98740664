//! Principal component analysis of rate changes.

use fi_core::{errors::Result, Real};
use fi_math::matrix_utilities::{sample_covariance, symmetric_eigen};
use nalgebra::{DMatrix, DVector};
use tracing::debug;

/// Eigen-decomposition of the covariance of a rate-change matrix.
#[derive(Debug, Clone)]
pub struct PcaResult {
    /// Eigenvalues, largest first.
    pub eigenvalues: DVector<Real>,
    /// Eigenvectors (factor loadings) as columns, matching `eigenvalues`.
    pub eigenvectors: DMatrix<Real>,
    /// The covariance matrix that was decomposed.
    pub covariance: DMatrix<Real>,
}

impl PcaResult {
    /// Number of factors.
    pub fn factors(&self) -> usize {
        self.eigenvalues.len()
    }

    /// Loadings of factor `i` across tenors.
    pub fn loadings(&self, i: usize) -> DVector<Real> {
        self.eigenvectors.column(i).into_owned()
    }

    /// Share of total variance carried by each factor.
    pub fn explained_variance_ratio(&self) -> Vec<Real> {
        let total: Real = self.eigenvalues.iter().sum();
        if total <= 0.0 {
            return vec![0.0; self.eigenvalues.len()];
        }
        self.eigenvalues.iter().map(|value| value / total).collect()
    }
}

/// PCA of `rate_changes` (rows are observation days, columns tenors) via
/// the covariance `XᵀX / (n − 1)`.
pub fn principal_components(rate_changes: &DMatrix<Real>) -> Result<PcaResult> {
    let covariance = sample_covariance(rate_changes)?;
    let eigen = symmetric_eigen(&covariance)?;
    debug!(
        observations = rate_changes.nrows(),
        tenors = rate_changes.ncols(),
        leading = eigen.eigenvalues.iter().next().copied().unwrap_or(0.0),
        "PCA computed"
    );
    Ok(PcaResult {
        eigenvalues: eigen.eigenvalues,
        eigenvectors: eigen.eigenvectors,
        covariance,
    })
}
