// ABOUTME: Soft white outline for transparent artwork so icons stay legible on dark tabs
// ABOUTME: Composites one-pixel shifted alpha masks behind the original image

use crate::constants::glow::{LAYER_OPACITY, OFFSETS, OPAQUE_ALPHA_THRESHOLD};
use image::{Rgba, RgbaImage};

/// Straight-alpha RGBA in 0.0..=1.0
type Px = [f32; 4];

const TRANSPARENT: Px = [0.0, 0.0, 0.0, 0.0];

/// Lowest alpha value across all pixels.
pub fn min_alpha(image: &RgbaImage) -> u8 {
    image.pixels().map(|p| p[3]).min().unwrap_or(u8::MAX)
}

/// Effectively opaque images are left alone.
pub fn needs_glow(image: &RgbaImage) -> bool {
    min_alpha(image) < OPAQUE_ALPHA_THRESHOLD
}

/// Add a translucent white halo around the alpha edges of `image`.
///
/// The four shifted layers are accumulated onto a transparent canvas first,
/// then the original is composited on top. Opaque inputs come back unchanged.
pub fn apply_glow(image: RgbaImage) -> RgbaImage {
    if !needs_glow(&image) {
        log::debug!("Skipping glow: image is opaque");
        return image;
    }

    let (width, height) = image.dimensions();
    let mut canvas = vec![TRANSPARENT; (width as usize) * (height as usize)];

    for &(dx, dy) in OFFSETS.iter() {
        for y in 0..height {
            for x in 0..width {
                let src_x = x as i64 - dx;
                let src_y = y as i64 - dy;
                if src_x < 0 || src_y < 0 || src_x >= width as i64 || src_y >= height as i64 {
                    continue;
                }
                let mask = image.get_pixel(src_x as u32, src_y as u32)[3] as f32 / 255.0;
                if mask == 0.0 {
                    continue;
                }
                let idx = (y * width + x) as usize;
                canvas[idx] = over([1.0, 1.0, 1.0, mask * LAYER_OPACITY], canvas[idx]);
            }
        }
    }

    RgbaImage::from_fn(width, height, |x, y| {
        let idx = (y * width + x) as usize;
        to_rgba8(over(to_px(image.get_pixel(x, y)), canvas[idx]))
    })
}

/// Porter-Duff "over" with straight (non-premultiplied) alpha.
fn over(src: Px, dst: Px) -> Px {
    let src_a = src[3];
    let dst_a = dst[3] * (1.0 - src_a);
    let out_a = src_a + dst_a;
    if out_a <= 0.0 {
        return TRANSPARENT;
    }
    [
        (src[0] * src_a + dst[0] * dst_a) / out_a,
        (src[1] * src_a + dst[1] * dst_a) / out_a,
        (src[2] * src_a + dst[2] * dst_a) / out_a,
        out_a,
    ]
}

fn to_px(pixel: &Rgba<u8>) -> Px {
    [
        pixel[0] as f32 / 255.0,
        pixel[1] as f32 / 255.0,
        pixel[2] as f32 / 255.0,
        pixel[3] as f32 / 255.0,
    ]
}

fn to_rgba8(px: Px) -> Rgba<u8> {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([channel(px[0]), channel(px[1]), channel(px[2]), channel(px[3])])
}
