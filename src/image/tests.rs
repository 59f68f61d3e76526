use super::*;

// =============================================================================
// ImageDesc tests
// =============================================================================

#[test]
fn stride_is_four_times_width() {
    let desc = ImageDesc::new(895, 551);
    assert_eq!(desc.stride, 895 * 4);
    assert_eq!(desc.stride % 4, 0);
    assert_eq!(desc.row_bytes(), desc.stride);
}

#[test]
fn size_calculation() {
    let desc = ImageDesc::new(100, 50);
    assert_eq!(desc.size_in_bytes(), desc.stride * 50);
}

#[test]
fn display_formats_dimensions() {
    assert_eq!(ImageDesc::new(640, 480).to_string(), "640x480 BGRA8");
}

// =============================================================================
// Pixel layout tests
// =============================================================================

#[test]
fn bgra_byte_order_in_word() {
    // {b, g, r, a} must land in a little-endian u32 as 0xAARRGGBB.
    let px = Bgra8::new(0x11, 0x22, 0x33, 0x44);
    let word: u32 = bytemuck::cast(px);
    assert_eq!(word, u32::from_le_bytes([0x11, 0x22, 0x33, 0x44]));
}

#[test]
fn row_roundtrip() {
    let desc = ImageDesc::new(3, 2);
    let mut img = Image::new_black(desc);
    img.set_pixel(2, 1, Bgra8::new(10, 20, 30, 255));

    assert_eq!(img.pixel(2, 1), Bgra8::new(10, 20, 30, 255));
    assert_eq!(img.pixel(0, 0), Bgra8::TRANSPARENT);
    assert_eq!(img.row(1).len(), 3);
}

#[test]
fn new_black_is_zeroed() {
    let img = Image::new_black(ImageDesc::new(10, 10));
    assert!(img.bytes().iter().all(|&b| b == 0));
    assert_eq!(img.bytes().len(), img.desc().size_in_bytes());
}

#[test]
fn new_with_data_preserves_bytes() {
    let desc = ImageDesc::new(2, 1);
    let data = vec![1, 2, 3, 4, 5, 6, 7, 8];
    let img = Image::new_with_data(desc, data.clone()).unwrap();

    assert_eq!(img.bytes(), &data[..]);
    assert_eq!(img.pixel(1, 0), Bgra8::new(5, 6, 7, 8));
}

#[test]
fn new_with_data_size_mismatch_returns_error() {
    let desc = ImageDesc::new(2, 2);
    let result = Image::new_with_data(desc, vec![0u8; 3]);
    assert!(matches!(result, Err(crate::common::Error::BufferSize { .. })));
}

#[test]
fn image_bytes_are_8_byte_aligned() {
    let img = Image::new_black(ImageDesc::new(100, 100));
    assert_eq!(img.bytes().as_ptr() as usize % 8, 0);
}

// =============================================================================
// PNG round trip
// =============================================================================

#[test]
fn png_save_and_reload() {
    let dir = std::env::temp_dir().join("loupe_io_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("roundtrip.png");

    let mut img = Image::new_black(ImageDesc::new(7, 5));
    for y in 0..5 {
        for x in 0..7 {
            img.set_pixel(
                x,
                y,
                Bgra8::new((x * 31) as u8, (y * 47) as u8, (x + y) as u8, 255),
            );
        }
    }

    save_png(&img, &path).unwrap();
    let reloaded = load_png(&path).unwrap();

    assert_eq!(img.desc(), reloaded.desc());
    assert_eq!(img.bytes(), reloaded.bytes());
}

#[test]
fn load_missing_file_returns_error() {
    let result = load_png("/nonexistent/does_not_exist.png");
    assert!(matches!(result, Err(crate::common::Error::ImageRead { .. })));
}
