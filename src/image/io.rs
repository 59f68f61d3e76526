//! PNG reading and writing.
//!
//! Files carry RGBA byte order; the conversion to and from the crate's BGRA
//! order happens here at the boundary.

use std::path::Path;

use image as image_lib;

use super::{Bgra8, Image, ImageDesc};
use crate::common::{Error, Result};

/// Loads a PNG file into a BGRA image.
pub fn load_png<P: AsRef<Path>>(path: P) -> Result<Image> {
    let path = path.as_ref();
    let decoded = image_lib::open(path).map_err(|source| Error::ImageRead {
        path: path.to_path_buf(),
        source,
    })?;

    let rgba = decoded.to_rgba8();
    let desc = ImageDesc::new(rgba.width() as usize, rgba.height() as usize);
    let mut out = Image::new_black(desc);

    let data = rgba.as_raw();
    for y in 0..desc.height {
        let src_row = &data[y * desc.width * 4..(y + 1) * desc.width * 4];
        for (px, rgba) in out.row_mut(y).iter_mut().zip(src_row.chunks_exact(4)) {
            *px = Bgra8 {
                b: rgba[2],
                g: rgba[1],
                r: rgba[0],
                a: rgba[3],
            };
        }
    }

    Ok(out)
}

/// Saves a BGRA image as a PNG file.
pub fn save_png<P: AsRef<Path>>(image: &Image, path: P) -> Result<()> {
    let path = path.as_ref();
    let desc = *image.desc();

    let mut rgba = vec![0u8; desc.width * desc.height * 4];
    for y in 0..desc.height {
        let dst_row = &mut rgba[y * desc.width * 4..(y + 1) * desc.width * 4];
        for (chunk, px) in dst_row.chunks_exact_mut(4).zip(image.row(y)) {
            chunk.copy_from_slice(&[px.r, px.g, px.b, px.a]);
        }
    }

    image_lib::save_buffer_with_format(
        path,
        &rgba,
        desc.width as u32,
        desc.height as u32,
        image_lib::ExtendedColorType::Rgba8,
        image_lib::ImageFormat::Png,
    )
    .map_err(|source| Error::ImageWrite {
        path: path.to_path_buf(),
        source,
    })
}
