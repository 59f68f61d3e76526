//! Contributor weight tables.
//!
//! For each output pixel along one axis the builder integrates the filter
//! kernel over every overlapped source pixel interval and quantizes the
//! result into integer weights that sum exactly to the precision unit.
//! Kernel mass falling outside the source is folded back onto the nearest
//! edge pixel (clamp-to-edge), and any quantization residue is absorbed by
//! the middle weight, so unity gain holds for every table row.

use super::filters::Filter;

/// Quadrature weight count for the sub-pixel kernel integration.
const QUADRATURE_POINTS: f64 = 18.0;

/// Integer filter weights for one output pixel along one axis.
pub(crate) struct Contributor {
    /// First contributing source index.
    pub min: usize,
    /// One weight per contributing source pixel; sums to the precision unit.
    pub weights: Box<[i32]>,
}

impl Contributor {
    /// Count of contributing source pixels minus one.
    #[inline]
    pub fn high(&self) -> usize {
        self.weights.len() - 1
    }
}

/// Builds the contributor table for one axis.
///
/// `source_start` and `source_float_width` place the resampled span inside
/// the source in pixel coordinates; a non-positive width falls back to the
/// full `source_size`. Source pixel `j` occupies `[j - 1/2, j + 1/2]` with
/// its center at the integer coordinate.
pub(crate) fn build_contributors(
    filter: Filter,
    radius: f64,
    source_size: usize,
    target_size: usize,
    source_start: f64,
    source_float_width: f64,
    precision: i32,
) -> Vec<Contributor> {
    debug_assert!(source_size > 0 && target_size > 0);
    debug_assert!(radius > 0.0);

    let source_float_width = if source_float_width <= 0.0 {
        source_size as f64
    } else {
        source_float_width
    };
    let scale = source_float_width / target_size as f64;
    let last = source_size as i64 - 1;

    // Unit scale with an integral origin is a pure translation; a fractional
    // origin still needs the general path for the sub-pixel shift.
    if scale == 1.0 && source_start.fract() == 0.0 {
        let start = source_start as i64;
        return (0..target_size)
            .map(|x| Contributor {
                min: (x as i64 + start).clamp(0, last) as usize,
                weights: Box::from([precision]),
            })
            .collect();
    }

    // Downsampling widens the kernel footprint; `delta` maps source-pixel
    // distance into the kernel's unit support.
    let rr = if scale > 1.0 { radius * scale } else { radius };
    let delta = 1.0 / rr;

    let mut table = Vec::with_capacity(target_size);
    for x in 0..target_size {
        let x_center = (x as f64 + 0.5) * scale;
        let center = x_center + source_start - 0.5;
        let true_min = (x_center - rr + source_start - 1.0).ceil() as i64;
        let true_max = (x_center + rr + source_start).floor() as i64;

        let min = true_min.clamp(0, last);
        let mx = true_max.clamp(0, last);
        if mx < min {
            // Unreachable for a support of half a pixel or more; fall back
            // to a pass-through weight rather than corrupt output.
            debug_assert!(false, "contributor range collapsed at output {x}");
            table.push(Contributor {
                min: min.min(mx) as usize,
                weights: Box::from([precision]),
            });
            continue;
        }

        let mut weights = vec![0i32; (mx - min) as usize + 1];
        for j in true_min..=true_max {
            let x1 = ((j as f64 - 0.5 - center) * delta).max(-1.0);
            let x2 = ((j as f64 + 0.5 - center) * delta).min(1.0);
            if x2 <= x1 {
                continue;
            }
            let dw = integrate(filter, x1, x2);
            let idx = (j.clamp(min, mx) - min) as usize;
            weights[idx] += (precision as f64 * dw).round() as i32;
        }

        // Exact-sum correction: the table must sum to `precision` for
        // unity gain; the residue lands on the middle weight.
        let sum: i32 = weights.iter().sum();
        let mid = (weights.len() - 1) / 2;
        weights[mid] += precision - sum;

        table.push(Contributor {
            min: min as usize,
            weights: weights.into_boxed_slice(),
        });
    }
    table
}

/// Weighted midpoint+trapezoid rule over one sub-pixel interval,
/// `(x2-x1)·(f(x1) + f(x2) + (N-2)·f(mid))/N`.
#[inline]
fn integrate(filter: Filter, x1: f64, x2: f64) -> f64 {
    let mid = 0.5 * (x1 + x2);
    (x2 - x1) * (filter.eval(x1) + filter.eval(x2) + (QUADRATURE_POINTS - 2.0) * filter.eval(mid))
        / QUADRATURE_POINTS
}

#[cfg(test)]
mod tests {
    use super::super::row::{PRECISION_HIGH, PRECISION_LOW};
    use super::*;

    const ALL: [Filter; 6] = [
        Filter::Box,
        Filter::Linear,
        Filter::Bicubic,
        Filter::Mine,
        Filter::Lanczos,
        Filter::BSpline,
    ];

    fn build(
        filter: Filter,
        source_size: usize,
        target_size: usize,
        start: f64,
        width: f64,
        precision: i32,
    ) -> Vec<Contributor> {
        build_contributors(
            filter,
            filter.default_radius(),
            source_size,
            target_size,
            start,
            width,
            precision,
        )
    }

    #[test]
    fn every_contributor_sums_to_precision() {
        let cases: &[(usize, usize, f64, f64)] = &[
            (100, 100, 0.0, 100.0), // identity
            (100, 37, 0.0, 100.0),  // downsample
            (16, 400, 0.0, 16.0),   // upsample
            (100, 64, 13.7, 41.3),  // fractional zoom window
            (100, 64, -8.5, 120.0), // overhanging window
            (900, 600, 0.25, 899.5),
            (2, 4, 0.0, 2.0),
            (1, 7, 0.0, 1.0), // single-column source
        ];

        for filter in ALL {
            for precision in [PRECISION_LOW, PRECISION_HIGH] {
                for &(source, target, start, width) in cases {
                    for c in build(filter, source, target, start, width, precision) {
                        let sum: i32 = c.weights.iter().sum();
                        assert_eq!(
                            sum, precision,
                            "{filter:?} {source}->{target} start {start} width {width}"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn contributors_stay_inside_source() {
        for filter in ALL {
            for &(source, target, start, width) in &[
                (50usize, 20usize, -10.0, 80.0),
                (50, 500, 40.0, 30.0),
                (3, 9, 0.0, 3.0),
            ] {
                for c in build(filter, source, target, start, width, PRECISION_HIGH) {
                    assert!(c.min + c.high() <= source - 1, "{filter:?}");
                }
            }
        }
    }

    #[test]
    fn unit_scale_integral_origin_is_identity() {
        for filter in ALL {
            let table = build(filter, 64, 64, 0.0, 64.0, PRECISION_HIGH);
            for (x, c) in table.iter().enumerate() {
                assert_eq!(c.min, x);
                assert_eq!(&*c.weights, &[PRECISION_HIGH]);
            }
        }
    }

    #[test]
    fn unit_scale_translated_origin_is_shifted_identity() {
        let table = build(Filter::Lanczos, 64, 16, 12.0, 16.0, PRECISION_HIGH);
        for (x, c) in table.iter().enumerate() {
            assert_eq!(c.min, x + 12);
            assert_eq!(&*c.weights, &[PRECISION_HIGH]);
        }
    }

    #[test]
    fn unit_scale_fractional_origin_resamples() {
        let table = build(Filter::Linear, 64, 16, 12.5, 16.0, PRECISION_HIGH);
        assert!(table.iter().any(|c| c.weights.len() > 1));
        for c in &table {
            let sum: i32 = c.weights.iter().sum();
            assert_eq!(sum, PRECISION_HIGH);
        }
    }

    #[test]
    fn downsampling_widens_footprint() {
        let table = build(Filter::Lanczos, 300, 30, 0.0, 300.0, PRECISION_HIGH);
        // 10x downsample with radius 3 covers roughly 60 source pixels.
        let c = &table[15];
        assert!(c.weights.len() > 40, "only {} weights", c.weights.len());
    }

    #[test]
    fn edge_mass_folds_onto_border_pixels() {
        // A window hanging past the left edge must still produce in-range,
        // unity-gain contributors with the leading weight dominant.
        let table = build(Filter::Linear, 100, 10, -20.0, 50.0, PRECISION_HIGH);
        let first = &table[0];
        assert_eq!(first.min, 0);
        let sum: i32 = first.weights.iter().sum();
        assert_eq!(sum, PRECISION_HIGH);
        assert_eq!(first.weights[0], PRECISION_HIGH);
    }

    #[test]
    fn box_downsample_averages_pairs() {
        let table = build(Filter::Box, 4, 2, 0.0, 4.0, PRECISION_HIGH);
        assert_eq!(table[0].min, 0);
        assert_eq!(table[0].weights[0], PRECISION_HIGH / 2);
        assert_eq!(table[0].weights[1], PRECISION_HIGH / 2);
        let sum: i32 = table[1].weights.iter().sum();
        assert_eq!(sum, PRECISION_HIGH);
    }
}
