//! Reconstruction filter kernels.
//!
//! Every kernel is a pure function on `|x|` with support `[-1, 1]` and unit
//! integral; the per-filter default radius maps kernel space onto source
//! pixels (a Lanczos radius of 3 spreads the unit support over three source
//! pixels per side).

use std::f64::consts::PI;

/// Reconstruction filter selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Filter {
    /// Area average.
    Box,
    /// Tent / bilinear.
    Linear,
    /// Cardinal cubic with `a = -2`.
    Bicubic,
    /// Custom 6th-degree polynomial kernel.
    Mine,
    /// Three-lobe windowed sinc compressed into unit support.
    #[default]
    Lanczos,
    /// Cubic B-spline.
    BSpline,
}

impl Filter {
    /// Default support radius in source pixels. A radius argument of zero
    /// selects this value.
    pub fn default_radius(self) -> f64 {
        match self {
            Filter::Box => 0.5,
            Filter::Linear => 1.0,
            Filter::Bicubic => 2.0,
            Filter::Mine => 2.0,
            Filter::Lanczos => 3.0,
            Filter::BSpline => 2.0,
        }
    }

    /// Evaluates the kernel at `x` in kernel space.
    #[inline]
    pub(crate) fn eval(self, x: f64) -> f64 {
        match self {
            Filter::Box => box_kernel(x),
            Filter::Linear => linear(x),
            Filter::Bicubic => bicubic(x),
            Filter::Mine => mine(x),
            Filter::Lanczos => lanczos(x),
            Filter::BSpline => bspline(x),
        }
    }
}

#[inline]
fn box_kernel(x: f64) -> f64 {
    if x.abs() <= 1.0 { 0.5 } else { 0.0 }
}

#[inline]
fn linear(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 { 1.0 - x } else { 0.0 }
}

#[inline]
fn bspline(x: f64) -> f64 {
    let x = x.abs();
    if x < 0.5 {
        8.0 * x * x * (x - 1.0) + 4.0 / 3.0
    } else if x < 1.0 {
        let t = 1.0 - x;
        (8.0 / 3.0) * t * t * t
    } else {
        0.0
    }
}

/// Cardinal cubic remapped onto unit support.
#[inline]
fn bicubic(x: f64) -> f64 {
    const A: f64 = -2.0;
    let x = x.abs();
    if x < 0.5 {
        4.0 * (A + 8.0) * x * x * x - 2.0 * (A + 12.0) * x * x + 2.0
    } else if x < 1.0 {
        2.0 * A * (2.0 * x * x * x - 5.0 * x * x + 4.0 * x - 1.0)
    } else {
        0.0
    }
}

const MINE_BETA: f64 = 0.52;
const MINE_ALPHA: f64 = 105.0 / (16.0 - 112.0 * MINE_BETA * MINE_BETA);
const MINE_AA: f64 = MINE_ALPHA / 7.0;
const MINE_BB: f64 = -MINE_ALPHA * (2.0 + MINE_BETA * MINE_BETA) / 5.0;
const MINE_CC: f64 = MINE_ALPHA * (1.0 + 2.0 * MINE_BETA * MINE_BETA) / 3.0;
const MINE_DD: f64 = -MINE_ALPHA * MINE_BETA * MINE_BETA;

/// 6th-degree polynomial kernel; vanishes with its derivative at the
/// support edge.
#[inline]
fn mine(x: f64) -> f64 {
    let x = x.abs();
    if x < 1.0 {
        let x2 = x * x;
        ((7.0 * MINE_AA * x2 + 5.0 * MINE_BB) * x2 + 3.0 * MINE_CC) * x2 + MINE_DD
    } else {
        0.0
    }
}

/// Three-lobe Lanczos on unit support: `sin(3y)·sin(y)/y²` with `y = π|x|`.
#[inline]
fn lanczos(x: f64) -> f64 {
    let x = x.abs();
    if x >= 1.0 {
        return 0.0;
    }
    let y = PI * x;
    if y < 1e-8 {
        3.0
    } else {
        ((3.0 * y).sin() * y.sin()) / (y * y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [Filter; 6] = [
        Filter::Box,
        Filter::Linear,
        Filter::Bicubic,
        Filter::Mine,
        Filter::Lanczos,
        Filter::BSpline,
    ];

    /// Plain trapezoid integration over the support.
    fn integral(filter: Filter) -> f64 {
        let steps = 20_000;
        let h = 2.0 / steps as f64;
        let mut sum = 0.5 * (filter.eval(-1.0) + filter.eval(1.0));
        for i in 1..steps {
            sum += filter.eval(-1.0 + i as f64 * h);
        }
        sum * h
    }

    #[test]
    fn kernels_have_unit_integral() {
        for filter in ALL {
            let integral = integral(filter);
            assert!(
                (integral - 1.0).abs() < 0.02,
                "{filter:?} integrates to {integral}"
            );
        }
    }

    #[test]
    fn kernels_are_symmetric() {
        for filter in ALL {
            for i in 0..100 {
                let x = i as f64 / 100.0;
                assert_eq!(filter.eval(x), filter.eval(-x), "{filter:?} at {x}");
            }
        }
    }

    #[test]
    fn kernels_vanish_outside_support() {
        for filter in ALL {
            assert_eq!(filter.eval(1.001), 0.0, "{filter:?}");
            assert_eq!(filter.eval(-5.0), 0.0, "{filter:?}");
        }
    }

    #[test]
    fn center_values() {
        assert_eq!(Filter::Box.eval(0.0), 0.5);
        assert_eq!(Filter::Linear.eval(0.0), 1.0);
        assert_eq!(Filter::Bicubic.eval(0.0), 2.0);
        assert_eq!(Filter::Lanczos.eval(0.0), 3.0);
        assert!((Filter::BSpline.eval(0.0) - 4.0 / 3.0).abs() < 1e-12);
        // -alpha * beta^2 with beta = 0.52
        assert!((Filter::Mine.eval(0.0) - 1.9876).abs() < 1e-3);
    }

    #[test]
    fn smooth_kernels_vanish_at_support_edge() {
        for filter in [Filter::Linear, Filter::Bicubic, Filter::Mine, Filter::BSpline] {
            assert!(filter.eval(0.999_999).abs() < 1e-4, "{filter:?}");
        }
    }

    #[test]
    fn piecewise_kernels_are_continuous_at_half() {
        for filter in [Filter::Bicubic, Filter::BSpline] {
            let below = filter.eval(0.5 - 1e-9);
            let above = filter.eval(0.5 + 1e-9);
            assert!((below - above).abs() < 1e-6, "{filter:?}");
        }
    }

    #[test]
    fn default_radii() {
        let radii: Vec<f64> = ALL.iter().map(|f| f.default_radius()).collect();
        assert_eq!(radii, vec![0.5, 1.0, 2.0, 2.0, 3.0, 2.0]);
    }
}
