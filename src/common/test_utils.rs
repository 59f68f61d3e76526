//! Synthesized deterministic test images.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::image::{Bgra8, Image, ImageDesc};

pub(crate) fn solid(width: usize, height: usize, px: Bgra8) -> Image {
    let mut img = Image::new_black(ImageDesc::new(width, height));
    for y in 0..height {
        img.row_mut(y).fill(px);
    }
    img
}

/// Checkerboard with `cell`-sized squares, `a` in the top-left corner.
pub(crate) fn checkerboard(width: usize, height: usize, cell: usize, a: Bgra8, b: Bgra8) -> Image {
    let mut img = Image::new_black(ImageDesc::new(width, height));
    for y in 0..height {
        for (x, px) in img.row_mut(y).iter_mut().enumerate() {
            *px = if (x / cell + y / cell) % 2 == 0 { a } else { b };
        }
    }
    img
}

/// Opaque horizontal/vertical color ramps.
pub(crate) fn gradient(width: usize, height: usize) -> Image {
    let mut img = Image::new_black(ImageDesc::new(width, height));
    for y in 0..height {
        for (x, px) in img.row_mut(y).iter_mut().enumerate() {
            *px = Bgra8 {
                b: (x * 255 / width.max(1)) as u8,
                g: ((x + y) % 256) as u8,
                r: (y * 255 / height.max(1)) as u8,
                a: 255,
            };
        }
    }
    img
}

/// Seeded uniform noise over all four channels.
pub(crate) fn noise(width: usize, height: usize, seed: u64) -> Image {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut img = Image::new_black(ImageDesc::new(width, height));
    for y in 0..height {
        for px in img.row_mut(y) {
            *px = Bgra8 {
                b: rng.random(),
                g: rng.random(),
                r: rng.random(),
                a: rng.random(),
            };
        }
    }
    img
}

/// Opaque concentric rings on a dark background; a high-frequency target
/// for filter comparisons.
pub(crate) fn circles(size: usize) -> Image {
    const RING_COLORS: [Bgra8; 4] = [
        Bgra8::new(235, 235, 235, 255),
        Bgra8::new(30, 30, 30, 255),
        Bgra8::new(40, 170, 220, 255),
        Bgra8::new(200, 90, 30, 255),
    ];

    let mut img = Image::new_black(ImageDesc::new(size, size));
    let center = size as f64 / 2.0;
    for y in 0..size {
        for (x, px) in img.row_mut(y).iter_mut().enumerate() {
            let dx = x as f64 + 0.5 - center;
            let dy = y as f64 + 0.5 - center;
            let dist = (dx * dx + dy * dy).sqrt();
            *px = RING_COLORS[(dist / 12.0) as usize % RING_COLORS.len()];
        }
    }
    img
}
