//! Error types for the resampler.

use std::path::PathBuf;

use thiserror::Error;

use crate::image::SourceRect;

/// Errors that can occur while preparing or running a resample.
#[derive(Debug, Error)]
pub enum Error {
    #[error("target size {width}x{height} is empty")]
    EmptyTarget { width: usize, height: usize },

    #[error("source image {width}x{height} is empty")]
    EmptySource { width: usize, height: usize },

    #[error("source rectangle {rect} is empty")]
    EmptyRect { rect: SourceRect },

    #[error("source rectangle {rect} lies outside the {width}x{height} source")]
    RectOutsideSource {
        rect: SourceRect,
        width: usize,
        height: usize,
    },

    #[error("pixel data length {actual} does not match descriptor size {expected}")]
    BufferSize { expected: usize, actual: usize },

    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),

    #[error("failed to read image '{path}': {source}")]
    ImageRead {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("failed to write image '{path}': {source}")]
    ImageWrite {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

pub type Result<T> = std::result::Result<T, Error>;
