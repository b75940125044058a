// ABOUTME: Built-in pixel-art sprite served as the site's own /favicon.ico
// ABOUTME: Rasterizes the sprite and encodes it through the core ICO encoder at startup

use icoconv_core::{encode_ico, ConversionError};
use image::imageops::{self, FilterType};
use image::{Rgba, RgbaImage};

/// Edge length of the served icon; the sprite is scaled up with nearest neighbour.
pub const SERVED_EDGE: u32 = 32;

const SPRITE: [&str; 16] = [
    "..bbbbbbbbbbbb..",
    ".bbbbbbbbbbbbbb.",
    "bbwwwwwwwwwwwwbb",
    "bbwwwwwwwwsswwbb",
    "bbwwwwwwwsssswbb",
    "bbwwwwwwwsssswbb",
    "bbwwwwwwwwsswwbb",
    "bbwwwwwgwwwwwwbb",
    "bbwwwwgggwwwwwbb",
    "bbwwwgggggwwgwbb",
    "bbwwgggggggggwbb",
    "bbwgggggggggggbb",
    "bbggggggggggggbb",
    "bbwwwwwwwwwwwwbb",
    ".bbbbbbbbbbbbbb.",
    "..bbbbbbbbbbbb..",
];

fn palette(key: u8) -> Rgba<u8> {
    match key {
        b'b' => Rgba([30, 64, 175, 255]),
        b'w' => Rgba([255, 255, 255, 255]),
        b's' => Rgba([245, 158, 11, 255]),
        b'g' => Rgba([22, 163, 74, 255]),
        _ => Rgba([0, 0, 0, 0]),
    }
}

pub fn sprite() -> RgbaImage {
    RgbaImage::from_fn(16, 16, |x, y| {
        let key = SPRITE[y as usize].as_bytes()[x as usize];
        palette(key)
    })
}

/// Encode the sprite as a single-frame icon of `SERVED_EDGE` pixels.
pub fn build() -> Result<Vec<u8>, ConversionError> {
    let scaled = imageops::resize(&sprite(), SERVED_EDGE, SERVED_EDGE, FilterType::Nearest);
    encode_ico(&scaled)
}
