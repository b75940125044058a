// ABOUTME: Test helper utilities for building encoded image fixtures in memory
// ABOUTME: Provides PNG/JPEG byte buffers for exercising the conversion pipeline

#[cfg(test)]
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
#[cfg(test)]
use std::io::Cursor;

#[cfg(test)]
pub fn encode(image: DynamicImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Vec::new();
    image
        .write_to(&mut Cursor::new(&mut buffer), format)
        .expect("fixture should encode");
    buffer
}

#[cfg(test)]
pub fn solid_rgb_png(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Png)
}

#[cfg(test)]
pub fn solid_rgba_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    let image = RgbaImage::from_pixel(width, height, Rgba(color));
    encode(DynamicImage::ImageRgba8(image), ImageFormat::Png)
}

#[cfg(test)]
pub fn solid_rgb_jpeg(width: u32, height: u32, color: [u8; 3]) -> Vec<u8> {
    let image = RgbImage::from_pixel(width, height, Rgb(color));
    encode(DynamicImage::ImageRgb8(image), ImageFormat::Jpeg)
}

/// Transparent canvas with an opaque square in the middle third.
#[cfg(test)]
pub fn logo_rgba(width: u32, height: u32) -> RgbaImage {
    RgbaImage::from_fn(width, height, |x, y| {
        let inside = x >= width / 3 && x < 2 * width / 3 && y >= height / 3 && y < 2 * height / 3;
        if inside {
            Rgba([20, 120, 220, 255])
        } else {
            Rgba([0, 0, 0, 0])
        }
    })
}

#[cfg(test)]
pub fn logo_png(width: u32, height: u32) -> Vec<u8> {
    encode(DynamicImage::ImageRgba8(logo_rgba(width, height)), ImageFormat::Png)
}
