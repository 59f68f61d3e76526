//! Headless zoom-pan animation over a synthesized still image.
//!
//! Renders a fixed number of frames along a smooth zoom trajectory into a
//! ring-pattern source, writes every 60th frame as a PNG under
//! `demo_output/`, and prints the achieved frame rate.

use std::time::Instant;

use loupe::prelude::*;

const FRAMES: usize = 240;
const SRC_SIZE: usize = 900;
const OUT_W: usize = 640;
const OUT_H: usize = 400;

/// Concentric rings over a diagonal ramp; plenty of high-frequency content
/// for the filters to chew on.
fn test_pattern(size: usize) -> Image {
    let mut img = Image::new_black(ImageDesc::new(size, size));
    let center = size as f64 / 2.0;
    for y in 0..size {
        for (x, px) in img.row_mut(y).iter_mut().enumerate() {
            let dx = x as f64 + 0.5 - center;
            let dy = y as f64 + 0.5 - center;
            let ring = ((dx * dx + dy * dy).sqrt() / 14.0) as usize % 2;
            let ramp = ((x + y) * 255 / (2 * size)) as u8;
            *px = if ring == 0 {
                Bgra8::new(235, 235 - ramp / 2, 235, 255)
            } else {
                Bgra8::new(ramp / 3, 40, 170, 255)
            };
        }
    }
    img
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

/// Interpolates from the full source to a small off-center window.
fn frame_rect(t: f64) -> SourceRect {
    let full = SourceRect::full(SRC_SIZE, SRC_SIZE);
    let target = SourceRect::new(512.25, 300.5, 592.25, 350.5);
    SourceRect::new(
        full.left + (target.left - full.left) * t,
        full.top + (target.top - full.top) * t,
        full.right + (target.right - full.right) * t,
        full.bottom + (target.bottom - full.bottom) * t,
    )
}

fn main() {
    std::fs::create_dir_all("demo_output").expect("create demo_output directory");

    let src = test_pattern(SRC_SIZE);
    let mut dst = Image::new_black(ImageDesc::new(OUT_W, OUT_H));
    let op = Resample::new().filter(Filter::Lanczos).alpha(AlphaMode::Ignore);

    println!(
        "zooming {} -> {}x{}, {} frames, {} workers",
        src.desc(),
        OUT_W,
        OUT_H,
        FRAMES,
        default_pool().threads()
    );

    let start = Instant::now();
    for i in 0..FRAMES {
        let t = smoothstep(i as f64 / (FRAMES - 1) as f64);
        op.zoom_parallel(&src, &mut dst, frame_rect(t), OUT_W, OUT_H, None)
            .expect("resample frame");

        if i % 60 == 0 || i == FRAMES - 1 {
            let path = format!("demo_output/frame_{i:03}.png");
            save_png(&dst, &path).expect("write frame");
            println!("  wrote {path}");
        }
    }
    let elapsed = start.elapsed();

    println!(
        "{FRAMES} frames in {:.2}s ({:.1} fps)",
        elapsed.as_secs_f64(),
        FRAMES as f64 / elapsed.as_secs_f64()
    );
}
