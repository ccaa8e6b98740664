use approx::assert_abs_diff_eq;
use fi_math::interpolations::{InterpolationMethod, LinearInterpolation, LogLinearInterpolation};
use fi_math::Interpolator;
use proptest::prelude::*;

const METHODS: [InterpolationMethod; 4] = [
    InterpolationMethod::Linear,
    InterpolationMethod::LogLinear,
    InterpolationMethod::CubicSpline,
    InterpolationMethod::MonotoneConvex,
];

#[test]
fn every_method_hits_discount_factor_nodes() {
    let ts = [0.0, 0.25, 0.5, 1.0, 2.0, 5.0, 10.0];
    let dfs: Vec<f64> = ts.iter().map(|t| (-0.04_f64 * t).exp()).collect();
    for method in METHODS {
        let interp = method.build(&ts, &dfs).unwrap();
        for (&t, &d) in ts.iter().zip(&dfs) {
            assert_abs_diff_eq!(interp.interpolate(t), d, epsilon = 1e-12);
        }
        assert_abs_diff_eq!(interp.interpolate(-1.0), 1.0, epsilon = 1e-15);
        assert_abs_diff_eq!(interp.interpolate(30.0), dfs[dfs.len() - 1], epsilon = 1e-15);
    }
}

#[test]
fn log_linear_reproduces_constant_zero_rate() {
    let r = 0.05_f64;
    let interp = LogLinearInterpolation::new(&[0.0, 50.0], &[1.0, (-r * 50.0).exp()]).unwrap();
    for t in [0.1, 1.0, 7.3, 49.0] {
        assert_abs_diff_eq!(interp.interpolate(t), (-r * t).exp(), epsilon = 1e-14);
    }
}

fn sorted_nodes() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.01f64..5.0, 0.1f64..10.0), 2..12).prop_map(|steps| {
        let mut x = 0.0;
        let mut xs = Vec::with_capacity(steps.len());
        let mut ys = Vec::with_capacity(steps.len());
        for (dx, y) in steps {
            x += dx;
            xs.push(x);
            ys.push(y);
        }
        (xs, ys)
    })
}

proptest! {
    #[test]
    fn linear_stays_within_bracketing_values((xs, ys) in sorted_nodes(), frac in 0.0f64..1.0) {
        let interp = LinearInterpolation::new(&xs, &ys).unwrap();
        let x = xs[0] + frac * (xs[xs.len() - 1] - xs[0]);
        let v = interp.interpolate(x);
        let lo = ys.iter().cloned().fold(f64::INFINITY, f64::min);
        let hi = ys.iter().cloned().fold(f64::NEG_INFINITY, f64::max);
        prop_assert!(v >= lo - 1e-12 && v <= hi + 1e-12);
    }

    #[test]
    fn all_methods_reproduce_nodes((xs, ys) in sorted_nodes()) {
        for method in METHODS {
            let interp = method.build(&xs, &ys).unwrap();
            for (&x, &y) in xs.iter().zip(&ys) {
                prop_assert!((interp.interpolate(x) - y).abs() < 1e-8 * y.abs().max(1.0));
            }
        }
    }

    #[test]
    fn clamping_outside_range((xs, ys) in sorted_nodes(), off in 0.001f64..100.0) {
        for method in METHODS {
            let interp = method.build(&xs, &ys).unwrap();
            let (first, last) = (ys[0], ys[ys.len() - 1]);
            prop_assert!((interp.interpolate(xs[0] - off) - first).abs() <= 1e-12 * first);
            prop_assert!((interp.interpolate(xs[xs.len() - 1] + off) - last).abs() <= 1e-12 * last);
        }
    }
}
