//! Image comparison helpers for tests.

use rayon::prelude::*;

use crate::image::Image;

/// Maximum per-channel absolute difference between two images.
///
/// # Panics
/// Panics if images have different dimensions.
pub(crate) fn max_channel_diff(img1: &Image, img2: &Image) -> u8 {
    assert_eq!(img1.desc().width, img2.desc().width, "width mismatch");
    assert_eq!(img1.desc().height, img2.desc().height, "height mismatch");

    (0..img1.desc().height)
        .into_par_iter()
        .map(|y| {
            img1.row(y)
                .iter()
                .zip(img2.row(y))
                .map(|(a, b)| {
                    let channels = [
                        a.b.abs_diff(b.b),
                        a.g.abs_diff(b.g),
                        a.r.abs_diff(b.r),
                        a.a.abs_diff(b.a),
                    ];
                    channels.into_iter().max().unwrap()
                })
                .max()
                .unwrap_or(0)
        })
        .reduce(|| 0, u8::max)
}

/// True if both images have identical pixel content (stride padding is
/// ignored).
pub(crate) fn pixels_equal(img1: &Image, img2: &Image) -> bool {
    if img1.desc().width != img2.desc().width || img1.desc().height != img2.desc().height {
        return false;
    }
    (0..img1.desc().height)
        .into_par_iter()
        .all(|y| img1.row(y) == img2.row(y))
}

/// FNV-1a content checksum over the pixel words, row by row.
pub(crate) fn checksum(img: &Image) -> u64 {
    let mut hash = 0xcbf2_9ce4_8422_2325u64;
    for y in 0..img.desc().height {
        // Rows are 4-byte aligned: the buffer is 8-aligned and the stride is
        // a multiple of 4.
        let words: &[u32] = bytemuck::cast_slice(img.row(y));
        for &word in words {
            hash ^= word as u64;
            hash = hash.wrapping_mul(0x1_0000_01b3);
        }
    }
    hash
}
