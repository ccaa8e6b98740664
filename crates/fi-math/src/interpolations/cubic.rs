//! Natural cubic spline and the monotone-convex scheme built on it.
//!
//! The spline is stored in Hermite form: node slopes `k_i` are solved from
//! the tridiagonal C² system with natural end conditions `f''(x_0) =
//! f''(x_n) = 0`, then turned into per-segment polynomial coefficients.

use fi_core::{errors::Result, Real};

use super::{check_nodes, locate, Interpolator};

/// Solve a tridiagonal system by the Thomas algorithm.
///
/// `lower[0]` and `upper[n-1]` are ignored.
fn solve_tridiagonal(lower: &[Real], diag: &[Real], upper: &[Real], rhs: &[Real]) -> Vec<Real> {
    let n = diag.len();
    let mut c_star = vec![0.0; n];
    let mut d_star = vec![0.0; n];

    c_star[0] = upper[0] / diag[0];
    d_star[0] = rhs[0] / diag[0];
    for i in 1..n {
        let m = diag[i] - lower[i] * c_star[i - 1];
        c_star[i] = if i < n - 1 { upper[i] / m } else { 0.0 };
        d_star[i] = (rhs[i] - lower[i] * d_star[i - 1]) / m;
    }

    let mut x = vec![0.0; n];
    x[n - 1] = d_star[n - 1];
    for i in (0..n - 1).rev() {
        x[i] = d_star[i] - c_star[i] * x[i + 1];
    }
    x
}

/// Node slopes of the natural cubic spline.
fn natural_slopes(xs: &[Real], ys: &[Real]) -> Vec<Real> {
    let n = xs.len();
    let h: Vec<Real> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let s: Vec<Real> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();

    let mut lower = vec![0.0; n];
    let mut diag = vec![0.0; n];
    let mut upper = vec![0.0; n];
    let mut rhs = vec![0.0; n];

    diag[0] = 2.0 / h[0];
    upper[0] = 1.0 / h[0];
    rhs[0] = 3.0 * s[0] / h[0];
    for i in 1..n - 1 {
        lower[i] = 1.0 / h[i - 1];
        diag[i] = 2.0 * (1.0 / h[i - 1] + 1.0 / h[i]);
        upper[i] = 1.0 / h[i];
        rhs[i] = 3.0 * (s[i - 1] / h[i - 1] + s[i] / h[i]);
    }
    lower[n - 1] = 1.0 / h[n - 2];
    diag[n - 1] = 2.0 / h[n - 2];
    rhs[n - 1] = 3.0 * s[n - 2] / h[n - 2];

    solve_tridiagonal(&lower, &diag, &upper, &rhs)
}

// ── Natural cubic spline ─────────────────────────────────────────────────────

/// Natural cubic spline through all nodes.
///
/// On `[x_i, x_{i+1}]`: `f(x) = y_i + dx*(a_i + dx*(b_i + dx*c_i))` with
/// `dx = x - x_i`. Smooth, but may overshoot between sparse nodes.
#[derive(Debug, Clone)]
pub struct CubicSplineInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
    a: Vec<Real>,
    b: Vec<Real>,
    c: Vec<Real>,
}

impl CubicSplineInterpolation {
    /// Build a natural cubic spline.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        let ts = natural_slopes(xs, ys);

        let n = xs.len();
        let mut a = Vec::with_capacity(n - 1);
        let mut b = Vec::with_capacity(n - 1);
        let mut c = Vec::with_capacity(n - 1);
        for i in 0..n - 1 {
            let dx = xs[i + 1] - xs[i];
            let s = (ys[i + 1] - ys[i]) / dx;
            a.push(ts[i]);
            b.push((3.0 * s - ts[i + 1] - 2.0 * ts[i]) / dx);
            c.push((ts[i + 1] + ts[i] - 2.0 * s) / (dx * dx));
        }

        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
            a,
            b,
            c,
        })
    }
}

impl Interpolator for CubicSplineInterpolation {
    fn interpolate(&self, x: Real) -> Real {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        let i = locate(&self.xs, x);
        let dx = x - self.xs[i];
        self.ys[i] + dx * (self.a[i] + dx * (self.b[i] + dx * self.c[i]))
    }

    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }
}

// ── Monotone-convex ──────────────────────────────────────────────────────────

/// Monotone-convex interpolation.
///
/// Evaluates through the natural cubic spline; the Hagan–West forward
/// construction is not implemented.
#[derive(Debug, Clone)]
pub struct MonotoneConvexInterpolation {
    spline: CubicSplineInterpolation,
}

impl MonotoneConvexInterpolation {
    /// Build over `(xs, ys)`.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        Ok(Self {
            spline: CubicSplineInterpolation::new(xs, ys)?,
        })
    }
}

impl Interpolator for MonotoneConvexInterpolation {
    fn interpolate(&self, x: Real) -> Real {
        self.spline.interpolate(x)
    }

    fn x_min(&self) -> Real {
        self.spline.x_min()
    }

    fn x_max(&self) -> Real {
        self.spline.x_max()
    }
}
