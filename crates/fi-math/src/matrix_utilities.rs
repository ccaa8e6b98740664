//! Covariance and symmetric eigen-decomposition over nalgebra.

use fi_core::{errors::Result, Real};
use nalgebra::{DMatrix, DVector};

/// Eigen-decomposition of a symmetric matrix.
#[derive(Debug, Clone)]
pub struct SymmetricEigen {
    /// Eigenvalues in descending order.
    pub eigenvalues: DVector<Real>,
    /// Eigenvectors as columns, in the same order as `eigenvalues`.
    pub eigenvectors: DMatrix<Real>,
}

/// Decompose a symmetric matrix, sorting eigenpairs by descending
/// eigenvalue.
pub fn symmetric_eigen(m: &DMatrix<Real>) -> Result<SymmetricEigen> {
    fi_core::validate!(
        m.nrows() == m.ncols(),
        "matrix must be square, got {}x{}",
        m.nrows(),
        m.ncols()
    );
    let eig = m.clone().symmetric_eigen();

    let mut order: Vec<usize> = (0..eig.eigenvalues.len()).collect();
    order.sort_by(|&i, &j| eig.eigenvalues[j].total_cmp(&eig.eigenvalues[i]));

    let n = m.nrows();
    let eigenvalues = DVector::from_iterator(n, order.iter().map(|&i| eig.eigenvalues[i]));
    let mut eigenvectors = DMatrix::zeros(n, n);
    for (col, &i) in order.iter().enumerate() {
        eigenvectors.set_column(col, &eig.eigenvectors.column(i));
    }
    Ok(SymmetricEigen {
        eigenvalues,
        eigenvectors,
    })
}

/// Sample covariance `XᵀX / (n − 1)` of the observation matrix `x`
/// (rows are observations, columns are variables).
///
/// Columns are used as given; callers pass already de-meaned changes when
/// a centred covariance is wanted.
pub fn sample_covariance(x: &DMatrix<Real>) -> Result<DMatrix<Real>> {
    fi_core::validate!(
        x.nrows() >= 2,
        "need at least 2 observations for a covariance, got {}",
        x.nrows()
    );
    let scale = 1.0 / (x.nrows() as Real - 1.0);
    Ok(x.transpose() * x * scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn eigen_of_diagonal() {
        let m = DMatrix::from_row_slice(3, 3, &[1.0, 0.0, 0.0, 0.0, 3.0, 0.0, 0.0, 0.0, 2.0]);
        let eig = symmetric_eigen(&m).unwrap();
        assert_abs_diff_eq!(eig.eigenvalues[0], 3.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eig.eigenvalues[1], 2.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eig.eigenvalues[2], 1.0, epsilon = 1e-12);
        assert_abs_diff_eq!(eig.eigenvectors[(1, 0)].abs(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn eigen_reconstructs_matrix() {
        let m = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 2.0]);
        let eig = symmetric_eigen(&m).unwrap();
        let d = DMatrix::from_diagonal(&eig.eigenvalues);
        let rebuilt = &eig.eigenvectors * d * eig.eigenvectors.transpose();
        for (a, b) in rebuilt.iter().zip(m.iter()) {
            assert_abs_diff_eq!(*a, *b, epsilon = 1e-12);
        }
    }

    #[test]
    fn non_square_rejected() {
        let m = DMatrix::<Real>::zeros(2, 3);
        assert!(symmetric_eigen(&m).is_err());
    }

    #[test]
    fn covariance_scaling() {
        let x = DMatrix::from_row_slice(3, 2, &[1.0, 0.0, -1.0, 0.0, 0.0, 2.0]);
        let c = sample_covariance(&x).unwrap();
        assert_abs_diff_eq!(c[(0, 0)], 1.0, epsilon = 1e-14);
        assert_abs_diff_eq!(c[(1, 1)], 2.0, epsilon = 1e-14);
        assert_abs_diff_eq!(c[(0, 1)], 0.0, epsilon = 1e-14);
        assert!(sample_covariance(&DMatrix::zeros(1, 2)).is_err());
    }
}
