//! High-quality zoom resampling for 32-bit BGRA images.
//!
//! `loupe` maps a floating-point sub-rectangle of a source image onto a
//! fixed-size target through separable reconstruction filters (Box, Linear,
//! Bicubic, Mine, Lanczos, B-spline) with integer fixed-point accumulation,
//! three alpha-channel policies, and an optional band-parallel driver — the
//! building block for smooth non-integer zoom-pan animation over a still
//! image.
//!
//! # Quick start
//!
//! ```rust,ignore
//! use loupe::prelude::*;
//!
//! let src = load_png("photo.png")?;
//! let mut dst = Image::new_black(ImageDesc::new(1280, 720));
//!
//! Resample::new()
//!     .filter(Filter::Lanczos)
//!     .alpha(AlphaMode::Ignore)
//!     .zoom(&src, &mut dst, SourceRect::new(120.0, 40.5, 840.25, 445.0), 1280, 720)?;
//! ```

mod common;
mod image;
mod resample;

pub mod prelude;

pub use prelude::*;
