//! 1D interpolation over `(x, y)` nodes.
//!
//! Every scheme clamps: evaluating outside `[x_min, x_max]` returns the
//! first or last node value.

use std::fmt;
use std::str::FromStr;

use fi_core::{errors::Result, Error, Real};
use serde::{Deserialize, Serialize};

mod cubic;

pub use cubic::{CubicSplineInterpolation, MonotoneConvexInterpolation};

/// A 1D interpolation function `f: R → R` defined by a set of known points.
pub trait Interpolator: fmt::Debug + Send + Sync {
    /// Evaluate the interpolation at `x`, clamping outside the node range.
    fn interpolate(&self, x: Real) -> Real;

    /// Lower bound of the node range.
    fn x_min(&self) -> Real;

    /// Upper bound of the node range.
    fn x_max(&self) -> Real;

    /// `true` if `x` lies within the node range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Check the common node preconditions shared by every scheme.
pub(crate) fn check_nodes(xs: &[Real], ys: &[Real]) -> Result<()> {
    fi_core::validate!(
        xs.len() == ys.len(),
        "xs and ys must have the same length ({} vs {})",
        xs.len(),
        ys.len()
    );
    fi_core::validate!(
        xs.len() >= 2,
        "need at least 2 points for interpolation, got {}",
        xs.len()
    );
    fi_core::validate!(
        xs.windows(2).all(|w| w[1] > w[0]),
        "interpolation abscissas must be strictly increasing"
    );
    Ok(())
}

/// Index `i` of the segment `[xs[i], xs[i+1]]` containing `x`.
///
/// Callers have already clamped `x` into `[xs[0], xs[n-1]]`.
pub(crate) fn locate(xs: &[Real], x: Real) -> usize {
    let n = xs.len();
    if x >= xs[n - 1] {
        return n - 2;
    }
    let mut lo = 0;
    let mut hi = n - 1;
    while hi - lo > 1 {
        let mid = (lo + hi) / 2;
        if xs[mid] <= x {
            lo = mid;
        } else {
            hi = mid;
        }
    }
    lo
}

// ── Linear ────────────────────────────────────────────────────────────────────

/// Linear interpolation.
///
/// `f(x) = y[i] + (y[i+1] - y[i]) * (x - x[i]) / (x[i+1] - x[i])`
#[derive(Debug, Clone)]
pub struct LinearInterpolation {
    xs: Vec<Real>,
    ys: Vec<Real>,
}

impl LinearInterpolation {
    /// Construct a linear interpolation from sorted `xs` and matching `ys`.
    ///
    /// # Errors
    /// [`Error::Validation`] if the slices differ in length, hold fewer
    /// than 2 points or `xs` is not strictly increasing.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        Ok(Self {
            xs: xs.to_vec(),
            ys: ys.to_vec(),
        })
    }
}

impl Interpolator for LinearInterpolation {
    fn interpolate(&self, x: Real) -> Real {
        let n = self.xs.len();
        if x <= self.xs[0] {
            return self.ys[0];
        }
        if x >= self.xs[n - 1] {
            return self.ys[n - 1];
        }
        let i = locate(&self.xs, x);
        let dx = self.xs[i + 1] - self.xs[i];
        self.ys[i] + (x - self.xs[i]) * (self.ys[i + 1] - self.ys[i]) / dx
    }

    fn x_min(&self) -> Real {
        self.xs[0]
    }

    fn x_max(&self) -> Real {
        self.xs[self.xs.len() - 1]
    }
}

// ── Log-linear ────────────────────────────────────────────────────────────────

/// Log-linear interpolation.
///
/// Interpolates `ln(y)` linearly and exponentiates the result, which keeps
/// discount factors positive and exponentially decaying between nodes.
#[derive(Debug, Clone)]
pub struct LogLinearInterpolation {
    inner: LinearInterpolation,
}

impl LogLinearInterpolation {
    /// Construct a log-linear interpolation. All `ys` must be strictly
    /// positive.
    pub fn new(xs: &[Real], ys: &[Real]) -> Result<Self> {
        check_nodes(xs, ys)?;
        fi_core::validate!(
            ys.iter().all(|&y| y > 0.0),
            "all y values must be positive for log-linear interpolation"
        );
        let log_ys: Vec<Real> = ys.iter().map(|&y| y.ln()).collect();
        Ok(Self {
            inner: LinearInterpolation::new(xs, &log_ys)?,
        })
    }
}

impl Interpolator for LogLinearInterpolation {
    fn interpolate(&self, x: Real) -> Real {
        self.inner.interpolate(x).exp()
    }

    fn x_min(&self) -> Real {
        self.inner.x_min()
    }

    fn x_max(&self) -> Real {
        self.inner.x_max()
    }
}

// ── Method selector ──────────────────────────────────────────────────────────

/// Interpolation scheme selector used by curve construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum InterpolationMethod {
    /// Piecewise linear on raw values.
    Linear,
    /// Linear on `ln(y)`.
    #[default]
    LogLinear,
    /// Natural cubic spline.
    CubicSpline,
    /// Monotone-convex (currently the natural cubic spline).
    MonotoneConvex,
}

impl InterpolationMethod {
    /// Build an interpolator of this kind over `(xs, ys)`.
    pub fn build(self, xs: &[Real], ys: &[Real]) -> Result<Box<dyn Interpolator>> {
        Ok(match self {
            Self::Linear => Box::new(LinearInterpolation::new(xs, ys)?),
            Self::LogLinear => Box::new(LogLinearInterpolation::new(xs, ys)?),
            Self::CubicSpline => Box::new(CubicSplineInterpolation::new(xs, ys)?),
            Self::MonotoneConvex => Box::new(MonotoneConvexInterpolation::new(xs, ys)?),
        })
    }
}

impl fmt::Display for InterpolationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Linear => "Linear",
            Self::LogLinear => "LogLinear",
            Self::CubicSpline => "CubicSpline",
            Self::MonotoneConvex => "MonotoneConvex",
        };
        f.write_str(s)
    }
}

impl FromStr for InterpolationMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.as_str() {
            "linear" => Ok(Self::Linear),
            "loglinear" => Ok(Self::LogLinear),
            "cubic" | "cubicspline" => Ok(Self::CubicSpline),
            "monotoneconvex" => Ok(Self::MonotoneConvex),
            _ => Err(Error::Validation(format!(
                "unknown interpolation method: {s}"
            ))),
        }
    }
}
