//! Two-pass fixed-point row processing.
//!
//! The vertical pass collapses the filter footprint of one target row into a
//! cache of per-column accumulators; the horizontal pass folds the cache into
//! final pixels. Alpha behavior is a zero-sized policy type chosen once per
//! call, so the inner loops monomorphize with no per-pixel dispatch.

use crate::image::{Bgra8, Image};

use super::contributors::Contributor;

/// Fixed-point weight unit for Independent and Ignore (11 bits).
pub(crate) const PRECISION_HIGH: i32 = 0x800;
/// Fixed-point weight unit for PreMultiply (8 bits).
///
/// The alpha multiplication already spends ~8 bits of headroom, so the
/// smaller unit keeps the accumulators inside 32 bits.
pub(crate) const PRECISION_LOW: i32 = 0x100;

/// Extra pre-division of pre-multiplied channels so the second weight
/// multiplication cannot overflow.
const PREMULT_SHIFT: i32 = 2;

/// Wide per-column accumulator.
#[derive(Clone, Copy, Debug, Default)]
pub(crate) struct Accum {
    b: i32,
    g: i32,
    r: i32,
    a: i32,
}

/// Per-mode accumulation rules.
///
/// `combine`/`init_total` overwrite their cell, `increase`/`increase_total`
/// add into it, `clamp` folds the fixed-point total back to 8 bits. Weights
/// are in units of `PRECISION`; two weight multiplications put the total at
/// `PRECISION² · 255 < 2³¹`.
pub(crate) trait AlphaPolicy {
    const PRECISION: i32;

    fn combine(w: i32, px: Bgra8, cell: &mut Accum);
    fn increase(w: i32, px: Bgra8, cell: &mut Accum);
    fn init_total(w: i32, cell: Accum, total: &mut Accum);
    fn increase_total(w: i32, cell: Accum, total: &mut Accum);
    fn clamp(total: Accum) -> Bgra8;
}

/// All four channels filtered identically.
pub(crate) struct Independent;

/// Color channels weighted by alpha during accumulation; transparent
/// sources contribute nothing.
pub(crate) struct PreMultiply;

/// Alpha is not filtered; output is opaque.
pub(crate) struct Ignore;

/// `min(255, (max(v, 0) + 0x1FFFFF) >> 22)` — divides out both weight
/// passes with half-unit rounding and saturates quantization overshoot.
#[inline]
fn clamp22(v: i32) -> u8 {
    ((v.max(0) + 0x1F_FFFF) >> 22).min(255) as u8
}

impl AlphaPolicy for Independent {
    const PRECISION: i32 = PRECISION_HIGH;

    #[inline]
    fn combine(w: i32, px: Bgra8, cell: &mut Accum) {
        cell.b = w * px.b as i32;
        cell.g = w * px.g as i32;
        cell.r = w * px.r as i32;
        cell.a = w * px.a as i32;
    }

    #[inline]
    fn increase(w: i32, px: Bgra8, cell: &mut Accum) {
        cell.b += w * px.b as i32;
        cell.g += w * px.g as i32;
        cell.r += w * px.r as i32;
        cell.a += w * px.a as i32;
    }

    #[inline]
    fn init_total(w: i32, cell: Accum, total: &mut Accum) {
        total.b = w * cell.b;
        total.g = w * cell.g;
        total.r = w * cell.r;
        total.a = w * cell.a;
    }

    #[inline]
    fn increase_total(w: i32, cell: Accum, total: &mut Accum) {
        total.b += w * cell.b;
        total.g += w * cell.g;
        total.r += w * cell.r;
        total.a += w * cell.a;
    }

    #[inline]
    fn clamp(total: Accum) -> Bgra8 {
        Bgra8 {
            b: clamp22(total.b),
            g: clamp22(total.g),
            r: clamp22(total.r),
            a: clamp22(total.a),
        }
    }
}

impl AlphaPolicy for Ignore {
    const PRECISION: i32 = PRECISION_HIGH;

    #[inline]
    fn combine(w: i32, px: Bgra8, cell: &mut Accum) {
        cell.b = w * px.b as i32;
        cell.g = w * px.g as i32;
        cell.r = w * px.r as i32;
    }

    #[inline]
    fn increase(w: i32, px: Bgra8, cell: &mut Accum) {
        cell.b += w * px.b as i32;
        cell.g += w * px.g as i32;
        cell.r += w * px.r as i32;
    }

    #[inline]
    fn init_total(w: i32, cell: Accum, total: &mut Accum) {
        total.b = w * cell.b;
        total.g = w * cell.g;
        total.r = w * cell.r;
    }

    #[inline]
    fn increase_total(w: i32, cell: Accum, total: &mut Accum) {
        total.b += w * cell.b;
        total.g += w * cell.g;
        total.r += w * cell.r;
    }

    #[inline]
    fn clamp(total: Accum) -> Bgra8 {
        Bgra8 {
            b: clamp22(total.b),
            g: clamp22(total.g),
            r: clamp22(total.r),
            a: 255,
        }
    }
}

impl AlphaPolicy for PreMultiply {
    const PRECISION: i32 = PRECISION_LOW;

    #[inline]
    fn combine(w: i32, px: Bgra8, cell: &mut Accum) {
        if px.a == 0 {
            *cell = Accum::default();
        } else {
            let alpha = w * px.a as i32;
            cell.b = px.b as i32 * alpha / (1 << PREMULT_SHIFT);
            cell.g = px.g as i32 * alpha / (1 << PREMULT_SHIFT);
            cell.r = px.r as i32 * alpha / (1 << PREMULT_SHIFT);
            cell.a = alpha;
        }
    }

    #[inline]
    fn increase(w: i32, px: Bgra8, cell: &mut Accum) {
        if px.a != 0 {
            let alpha = w * px.a as i32;
            cell.b += px.b as i32 * alpha / (1 << PREMULT_SHIFT);
            cell.g += px.g as i32 * alpha / (1 << PREMULT_SHIFT);
            cell.r += px.r as i32 * alpha / (1 << PREMULT_SHIFT);
            cell.a += alpha;
        }
    }

    #[inline]
    fn init_total(w: i32, cell: Accum, total: &mut Accum) {
        if cell.a == 0 {
            *total = Accum::default();
        } else {
            total.b = w * cell.b;
            total.g = w * cell.g;
            total.r = w * cell.r;
            total.a = w * cell.a;
        }
    }

    #[inline]
    fn increase_total(w: i32, cell: Accum, total: &mut Accum) {
        if cell.a != 0 {
            total.b += w * cell.b;
            total.g += w * cell.g;
            total.r += w * cell.r;
            total.a += w * cell.a;
        }
    }

    #[inline]
    fn clamp(total: Accum) -> Bgra8 {
        // total.a carries precision² = 16 bits; the color channels carry an
        // extra alpha factor on top of the pre-division, so dividing by the
        // resolved alpha leaves 14 bits.
        if total.a <= 0 {
            return Bgra8::TRANSPARENT;
        }
        let a = ((total.a + 0x7FFF) >> 16).min(255);
        if a == 0 {
            return Bgra8::TRANSPARENT;
        }
        let channel = |v: i32| (((v / a).max(0) + 0x1FFF) >> 14).min(255) as u8;
        Bgra8 {
            b: channel(total.b),
            g: channel(total.g),
            r: channel(total.r),
            a: a as u8,
        }
    }
}

/// Produces one target row for columns `xmin..=xmax`.
///
/// After the vertical pass `cache[k]` holds the policy-weighted sum
/// `Σⱼ wⱼ · pixel(xmin_src + k, y_min + j)`; the horizontal pass only ever
/// seeks forward through the cache, which covers exactly the band's source
/// column span.
pub(crate) fn process_row<P: AlphaPolicy>(
    src: &Image,
    y_contrib: &Contributor,
    x_contribs: &[Contributor],
    xmin: usize,
    xmax: usize,
    xmin_src: usize,
    cache: &mut [Accum],
    out: &mut [Bgra8],
) {
    debug_assert_eq!(out.len(), xmax - xmin + 1);

    for (j, &w) in y_contrib.weights.iter().enumerate() {
        let row = src.row(y_contrib.min + j);
        let cols = &row[xmin_src..xmin_src + cache.len()];
        if j == 0 {
            for (cell, &px) in cache.iter_mut().zip(cols) {
                P::combine(w, px, cell);
            }
        } else {
            for (cell, &px) in cache.iter_mut().zip(cols) {
                P::increase(w, px, cell);
            }
        }
    }

    for (x, out_px) in (xmin..=xmax).zip(out.iter_mut()) {
        let c = &x_contribs[x];
        let cells = &cache[c.min - xmin_src..];
        let mut total = Accum::default();
        P::init_total(c.weights[0], cells[0], &mut total);
        for (k, &w) in c.weights.iter().enumerate().skip(1) {
            P::increase_total(w, cells[k], &mut total);
        }
        *out_px = P::clamp(total);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamp22_rounds_and_saturates() {
        // An exact fixed-point pixel survives unchanged.
        for v in [0, 1, 127, 255] {
            assert_eq!(clamp22(v << 22), v as u8);
        }
        assert_eq!(clamp22(-5), 0);
        assert_eq!(clamp22(300 << 22), 255);
        // Half-unit rounding: just below the next integer stays put.
        assert_eq!(clamp22((10 << 22) + 0x20_0000), 10);
        assert_eq!(clamp22((10 << 22) + 0x20_0001), 11);
    }

    #[test]
    fn independent_identity_roundtrip() {
        let px = Bgra8::new(13, 200, 77, 128);
        let mut cell = Accum::default();
        Independent::combine(PRECISION_HIGH, px, &mut cell);
        let mut total = Accum::default();
        Independent::init_total(PRECISION_HIGH, cell, &mut total);
        assert_eq!(Independent::clamp(total), px);
    }

    #[test]
    fn premultiply_identity_roundtrip() {
        for a in [1u8, 3, 127, 200, 255] {
            let px = Bgra8::new(13, 200, 77, a);
            let mut cell = Accum::default();
            PreMultiply::combine(PRECISION_LOW, px, &mut cell);
            let mut total = Accum::default();
            PreMultiply::init_total(PRECISION_LOW, cell, &mut total);
            assert_eq!(PreMultiply::clamp(total), px, "alpha {a}");
        }
    }

    #[test]
    fn premultiply_zero_alpha_yields_zero_pixel() {
        let px = Bgra8::new(250, 250, 250, 0);
        let mut cell = Accum {
            b: 99,
            g: 99,
            r: 99,
            a: 99,
        };
        PreMultiply::combine(PRECISION_LOW, px, &mut cell);
        let mut total = Accum::default();
        PreMultiply::init_total(PRECISION_LOW, cell, &mut total);
        assert_eq!(PreMultiply::clamp(total), Bgra8::TRANSPARENT);
    }

    #[test]
    fn ignore_writes_opaque_alpha() {
        let px = Bgra8::new(50, 60, 70, 3);
        let mut cell = Accum::default();
        Ignore::combine(PRECISION_HIGH, px, &mut cell);
        let mut total = Accum::default();
        Ignore::init_total(PRECISION_HIGH, cell, &mut total);
        let out = Ignore::clamp(total);
        assert_eq!((out.b, out.g, out.r, out.a), (50, 60, 70, 255));
    }
}
