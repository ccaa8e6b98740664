//! Sample statistics accumulator.

use fi_core::Real;

/// Incremental accumulator of mean and variance.
#[derive(Debug, Clone, Default)]
pub struct Statistics {
    count: usize,
    sum: Real,
    sum_sq: Real,
    min: Option<Real>,
    max: Option<Real>,
}

impl Statistics {
    /// Create an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a sample.
    pub fn add(&mut self, x: Real) {
        self.count += 1;
        self.sum += x;
        self.sum_sq += x * x;
        self.min = Some(self.min.map_or(x, |m| m.min(x)));
        self.max = Some(self.max.map_or(x, |m| m.max(x)));
    }

    /// Number of samples.
    pub fn samples(&self) -> usize {
        self.count
    }

    /// Sample mean, `None` when empty.
    pub fn mean(&self) -> Option<Real> {
        (self.count > 0).then(|| self.sum / self.count as Real)
    }

    /// Bessel-corrected variance, `None` for fewer than 2 samples.
    pub fn variance(&self) -> Option<Real> {
        if self.count < 2 {
            return None;
        }
        let n = self.count as Real;
        let m = self.sum / n;
        Some(((self.sum_sq / n - m * m) * n / (n - 1.0)).max(0.0))
    }

    /// Sample standard deviation.
    pub fn standard_deviation(&self) -> Option<Real> {
        self.variance().map(Real::sqrt)
    }

    /// Standard error of the mean, `σ/√n`.
    pub fn error_estimate(&self) -> Option<Real> {
        self.standard_deviation()
            .map(|s| s / (self.count as Real).sqrt())
    }

    /// Smallest sample.
    pub fn min(&self) -> Option<Real> {
        self.min
    }

    /// Largest sample.
    pub fn max(&self) -> Option<Real> {
        self.max
    }
}

impl Extend<Real> for Statistics {
    fn extend<I: IntoIterator<Item = Real>>(&mut self, iter: I) {
        for x in iter {
            self.add(x);
        }
    }
}

impl FromIterator<Real> for Statistics {
    fn from_iter<I: IntoIterator<Item = Real>>(iter: I) -> Self {
        let mut s = Self::new();
        s.extend(iter);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn mean_and_variance() {
        let s: Statistics = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0].into_iter().collect();
        assert_eq!(s.samples(), 8);
        assert_abs_diff_eq!(s.mean().unwrap(), 5.0, epsilon = 1e-14);
        assert_abs_diff_eq!(s.variance().unwrap(), 32.0 / 7.0, epsilon = 1e-12);
        assert_eq!(s.min(), Some(2.0));
        assert_eq!(s.max(), Some(9.0));
    }

    #[test]
    fn empty_and_single() {
        let mut s = Statistics::new();
        assert!(s.mean().is_none());
        s.add(1.0);
        assert_eq!(s.mean(), Some(1.0));
        assert!(s.variance().is_none());
        assert!(s.error_estimate().is_none());
    }
}
