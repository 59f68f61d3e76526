//! Prelude module for convenient imports.
//!
//! ```rust,ignore
//! use loupe::prelude::*;
//! ```

// Error handling
pub use crate::common::{Error, Result};

// Image types and IO
pub use crate::image::{Bgra8, Image, ImageDesc, SourceRect, load_png, save_png};

// Resampling
pub use crate::resample::{AlphaMode, Filter, Resample, ThreadPool, default_pool};
