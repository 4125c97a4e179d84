//! Single-channel luminance conversion.
//!
//! Colour images are reduced with the ITU-R 601-2 luma transform
//! `L = R * 299/1000 + G * 587/1000 + B * 114/1000`, evaluated in 16-bit fixed
//! point with rounding. Images that are already single-channel keep their
//! intensities; alpha channels are discarded.

use image::{DynamicImage, GrayImage, Luma, RgbImage};

/// Fixed-point ITU-R 601-2 luma of one RGB pixel.
///
/// The weights sum to 65536, so white maps to 255 and any gray level maps to
/// itself.
#[inline]
pub fn itu601_luma(r: u8, g: u8, b: u8) -> u8 {
    ((r as u32 * 19595 + g as u32 * 38470 + b as u32 * 7471 + 0x8000) >> 16) as u8
}

/// Converts any decoded image into an 8-bit grayscale image.
pub fn to_grayscale(img: DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma8(gray) => gray,
        // Already single-channel: drop alpha and/or narrow to 8 bits.
        DynamicImage::ImageLumaA8(_)
        | DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_) => img.to_luma8(),
        other => rgb_to_luma(&other.to_rgb8()),
    }
}

fn rgb_to_luma(rgb: &RgbImage) -> GrayImage {
    let (width, height) = rgb.dimensions();
    GrayImage::from_fn(width, height, |x, y| {
        let [r, g, b] = rgb.get_pixel(x, y).0;
        Luma([itu601_luma(r, g, b)])
    })
}
