//! One-dimensional root finding.

use fi_core::{errors::Result, Error, Real};

const MAX_ITERATIONS: usize = 100;

/// Brent's method for a root of `f` in `[x_min, x_max]`.
///
/// Falls back to bisection when interpolation stalls; `f(x_min)` and
/// `f(x_max)` must bracket the root.
///
/// # Errors
/// [`Error::Precondition`] if the endpoints do not bracket a root,
/// [`Error::Runtime`] if the iteration budget runs out.
pub fn brent<F>(f: F, x_min: Real, x_max: Real, accuracy: Real) -> Result<Real>
where
    F: Fn(Real) -> Real,
{
    fi_core::ensure!(accuracy > 0.0, "solver accuracy must be positive, got {accuracy}");
    let (mut a, mut b) = (x_min, x_max);
    let (mut fa, mut fb) = (f(a), f(b));
    fi_core::ensure!(
        fa * fb <= 0.0,
        "root not bracketed: f({a}) = {fa}, f({b}) = {fb}"
    );
    if fa == 0.0 {
        return Ok(a);
    }
    if fb == 0.0 {
        return Ok(b);
    }

    let (mut c, mut fc) = (b, fb);
    let mut d = b - a;
    let mut e = d;

    for _ in 0..MAX_ITERATIONS {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * Real::EPSILON * b.abs() + 0.5 * accuracy;
        let xm = 0.5 * (c - b);
        if xm.abs() <= tol || fb == 0.0 {
            return Ok(b);
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            let s = fb / fa;
            let (p, q) = if a == c {
                (2.0 * xm * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * xm * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            let (p, q) = if p > 0.0 { (p, -q) } else { (-p, q) };
            if 2.0 * p < (3.0 * xm * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = xm;
                e = d;
            }
        } else {
            d = xm;
            e = d;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(xm) };
        fb = f(b);
    }
    Err(Error::Runtime(format!(
        "Brent solver did not converge in {MAX_ITERATIONS} iterations"
    )))
}
