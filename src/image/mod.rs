//! BGRA pixel buffers.
//!
//! [`Image`] owns 32-bit BGRA pixels in **top-down** row order with a 4-byte
//! aligned row stride. The resampler reads and writes buffers only through
//! the row accessors; callers are responsible for presenting top-down data.

mod io;
mod rect;

#[cfg(test)]
mod tests;

use aligned_vec::AVec;
use bytemuck::{Pod, Zeroable};

pub use io::{load_png, save_png};
pub use rect::SourceRect;

use crate::common::{Error, Result};

/// 8-byte alignment so the whole buffer can be viewed as `u32` words.
const ALIGNMENT: usize = 8;

/// Bytes per BGRA pixel.
pub(crate) const BYTES_PER_PIXEL: usize = 4;

/// A 32-bit BGRA pixel: byte order `{b, g, r, a}` within a little-endian word.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Pod, Zeroable)]
pub struct Bgra8 {
    pub b: u8,
    pub g: u8,
    pub r: u8,
    pub a: u8,
}

impl Bgra8 {
    /// The fully transparent zero pixel.
    pub const TRANSPARENT: Bgra8 = Bgra8 {
        b: 0,
        g: 0,
        r: 0,
        a: 0,
    };

    pub const fn new(b: u8, g: u8, r: u8, a: u8) -> Bgra8 {
        Bgra8 { b, g, r, a }
    }
}

#[derive(Clone, Copy, Eq, PartialEq, Debug, Hash)]
pub struct ImageDesc {
    pub width: usize,
    pub height: usize,
    pub stride: usize,
}

impl ImageDesc {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            stride: align_stride(width * BYTES_PER_PIXEL),
        }
    }

    /// Returns the number of bytes per row without padding.
    pub fn row_bytes(&self) -> usize {
        self.width * BYTES_PER_PIXEL
    }

    pub fn size_in_bytes(&self) -> usize {
        self.height * self.stride
    }
}

impl std::fmt::Display for ImageDesc {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{} BGRA8", self.width, self.height)
    }
}

/// Aligns a row size to a 4-byte boundary.
pub(crate) fn align_stride(n: usize) -> usize {
    (n + 3) & !3
}

/// A BGRA image with pixel data stored in 8-byte aligned memory.
///
/// Rows run top-down; the 8-byte alignment allows zero-copy casting of the
/// whole buffer to `u32` words.
#[derive(Clone, Debug)]
pub struct Image {
    desc: ImageDesc,
    bytes: AVec<u8>,
}

impl Image {
    /// Returns the image descriptor.
    pub fn desc(&self) -> &ImageDesc {
        &self.desc
    }

    /// Returns the image bytes as a slice.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the image bytes as a mutable slice.
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    pub fn new_black(desc: ImageDesc) -> Image {
        let mut bytes = AVec::with_capacity(ALIGNMENT, desc.size_in_bytes());
        bytes.resize(desc.size_in_bytes(), 0);

        Image { desc, bytes }
    }

    pub fn new_with_data(desc: ImageDesc, bytes: Vec<u8>) -> Result<Image> {
        if bytes.len() != desc.size_in_bytes() {
            return Err(Error::BufferSize {
                expected: desc.size_in_bytes(),
                actual: bytes.len(),
            });
        }

        Ok(Image {
            desc,
            bytes: AVec::from_slice(ALIGNMENT, &bytes),
        })
    }

    /// Pixels of row `y`, ignoring stride padding.
    #[inline]
    pub fn row(&self, y: usize) -> &[Bgra8] {
        let start = y * self.desc.stride;
        bytemuck::cast_slice(&self.bytes[start..start + self.desc.row_bytes()])
    }

    /// Mutable pixels of row `y`, ignoring stride padding.
    #[inline]
    pub fn row_mut(&mut self, y: usize) -> &mut [Bgra8] {
        let start = y * self.desc.stride;
        let row_bytes = self.desc.row_bytes();
        bytemuck::cast_slice_mut(&mut self.bytes[start..start + row_bytes])
    }

    #[inline]
    pub fn pixel(&self, x: usize, y: usize) -> Bgra8 {
        self.row(y)[x]
    }

    #[inline]
    pub fn set_pixel(&mut self, x: usize, y: usize, px: Bgra8) {
        self.row_mut(y)[x] = px;
    }
}
