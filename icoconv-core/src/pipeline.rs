// ABOUTME: Image to icon conversion pipeline: decode, clamp, normalize, glow, resize, encode
// ABOUTME: Turns one uploaded image into one square single-frame .ico buffer

use crate::constants::{clamp, limits};
use crate::error::ConversionError;
use crate::glow::apply_glow;
use crate::icon::encode_ico;
use image::{
    imageops::FilterType, DynamicImage, ImageFormat, ImageReader, Rgba, Rgba32FImage, RgbaImage,
};
use std::fmt;
use std::io::Cursor;
use std::panic::{self, AssertUnwindSafe};
use std::str::FromStr;
use typed_builder::TypedBuilder;

/// Edge length of the square icon to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetEdge(u32);

impl TargetEdge {
    pub fn new(edge: u32) -> Result<Self, ConversionError> {
        if (limits::MIN_EDGE..=limits::MAX_EDGE).contains(&edge) {
            Ok(Self(edge))
        } else {
            Err(ConversionError::InvalidSize(format!(
                "{} is outside {}..={}",
                edge,
                limits::MIN_EDGE,
                limits::MAX_EDGE
            )))
        }
    }

    /// Parse a form value. Blank input falls back to the default edge.
    pub fn parse(input: &str) -> Result<Self, ConversionError> {
        let trimmed = input.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let edge = trimmed
            .parse::<u32>()
            .map_err(|_| ConversionError::InvalidSize(format!("'{}' is not a number", trimmed)))?;
        Self::new(edge)
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl Default for TargetEdge {
    fn default() -> Self {
        Self(limits::DEFAULT_EDGE)
    }
}

impl FromStr for TargetEdge {
    type Err = ConversionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for TargetEdge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.0, self.0)
    }
}

#[derive(Debug, Clone, TypedBuilder)]
pub struct ConversionOptions {
    /// Shrink sources above 2500px into a 512px box before anything else
    #[builder(default = true)]
    pub clamp_oversized: bool,

    /// Add a white halo behind transparent edges
    #[builder(default = true)]
    pub glow: bool,

    #[builder(default = FilterType::Lanczos3)]
    pub filter: FilterType,
}

impl Default for ConversionOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

#[derive(Debug, Clone, Default)]
pub struct IconConverter {
    options: ConversionOptions,
}

impl IconConverter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_options(options: ConversionOptions) -> Self {
        Self { options }
    }

    /// Convert an uploaded image into a single-frame icon of `edge` x `edge`.
    pub fn convert(&self, data: &[u8], edge: TargetEdge) -> Result<Vec<u8>, ConversionError> {
        if data.is_empty() {
            return Err(ConversionError::EmptyInput);
        }

        let img = decode(data)?;

        // Anything past a successful decode is an internal failure
        panic::catch_unwind(AssertUnwindSafe(|| self.process(img, edge)))
            .unwrap_or_else(|payload| {
                let message = panic_message(payload.as_ref());
                log::error!("Icon processing panicked: {}", message);
                Err(ConversionError::ProcessingFailed(message))
            })
    }

    /// Clamp, normalize and glow a decoded source, leaving it ready for the final resize.
    pub fn prepare(&self, img: DynamicImage) -> RgbaImage {
        let img = if self.options.clamp_oversized {
            clamp_dimensions(img, self.options.filter)
        } else {
            img
        };

        let rgba = normalize(img);
        if self.options.glow {
            apply_glow(rgba)
        } else {
            rgba
        }
    }

    fn process(&self, img: DynamicImage, edge: TargetEdge) -> Result<Vec<u8>, ConversionError> {
        let rgba = self.prepare(img);
        let resized = resize_square(&rgba, edge, self.options.filter);
        encode_ico(&resized)
    }
}

/// Convert with the default (hardened) options.
pub fn convert(data: &[u8], edge: TargetEdge) -> Result<Vec<u8>, ConversionError> {
    IconConverter::new().convert(data, edge)
}

/// Decode with format sniffing.
pub fn decode(data: &[u8]) -> Result<DynamicImage, ConversionError> {
    let reader = ImageReader::new(Cursor::new(data))
        .with_guessed_format()
        .map_err(|e| ConversionError::InvalidImage(e.to_string()))?;

    let format = reader.format();
    let img = reader
        .decode()
        .map_err(|e| ConversionError::InvalidImage(e.to_string()))?;

    log::debug!(
        "Decoded {} image {}x{} ({:?})",
        format.map(format_name).unwrap_or("unknown"),
        img.width(),
        img.height(),
        img.color()
    );
    Ok(img)
}

/// Shrink sources with an edge above 2500px to fit in 512x512, keeping aspect ratio.
pub fn clamp_dimensions(img: DynamicImage, filter: FilterType) -> DynamicImage {
    let (width, height) = (img.width(), img.height());
    if width <= clamp::MAX_SOURCE_DIMENSION && height <= clamp::MAX_SOURCE_DIMENSION {
        return img;
    }

    let clamped = img.resize(clamp::CLAMP_BOX, clamp::CLAMP_BOX, filter);
    log::info!(
        "Clamped oversized source {}x{} -> {}x{}",
        width,
        height,
        clamped.width(),
        clamped.height()
    );
    clamped
}

/// Promote to RGBA. Sources without alpha become fully opaque.
pub fn normalize(img: DynamicImage) -> RgbaImage {
    match img {
        DynamicImage::ImageRgba8(rgba) => rgba,
        other => {
            log::debug!("Normalizing {:?} to RGBA8", other.color());
            other.into_rgba8()
        }
    }
}

/// Resample to `edge` x `edge` in premultiplied alpha.
///
/// Colour under fully transparent pixels never reaches visible ones.
pub fn resize_square(img: &RgbaImage, edge: TargetEdge, filter: FilterType) -> RgbaImage {
    let premultiplied = Rgba32FImage::from_fn(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(|c| f32::from(c) / 255.0);
        Rgba([r * a, g * a, b * a, a])
    });

    let resized = image::imageops::resize(&premultiplied, edge.get(), edge.get(), filter);
    RgbaImage::from_fn(edge.get(), edge.get(), |x, y| {
        unpremultiply(resized.get_pixel(x, y))
    })
}

fn unpremultiply(pixel: &Rgba<f32>) -> Rgba<u8> {
    let alpha = pixel[3].clamp(0.0, 1.0);
    if alpha <= 0.0 {
        return Rgba([0, 0, 0, 0]);
    }
    let to_byte = |value: f32| (value.clamp(0.0, 1.0) * 255.0).round() as u8;
    Rgba([
        to_byte(pixel[0] / alpha),
        to_byte(pixel[1] / alpha),
        to_byte(pixel[2] / alpha),
        to_byte(alpha),
    ])
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "unknown panic".to_string()
    }
}

pub fn format_name(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Png => "PNG",
        ImageFormat::Jpeg => "JPEG",
        ImageFormat::Gif => "GIF",
        ImageFormat::WebP => "WebP",
        ImageFormat::Tiff => "TIFF",
        ImageFormat::Bmp => "BMP",
        ImageFormat::Tga => "TGA",
        ImageFormat::Ico => "ICO",
        ImageFormat::Avif => "AVIF",
        _ => "other",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::icon::read_frame;
    use crate::test_helpers::*;
    use image::{GenericImageView, Rgba};

    #[test]
    fn test_target_edge_bounds() {
        assert_eq!(TargetEdge::new(1).unwrap().get(), 1);
        assert_eq!(TargetEdge::new(256).unwrap().get(), 256);
        assert!(matches!(
            TargetEdge::new(0),
            Err(ConversionError::InvalidSize(_))
        ));
        assert!(matches!(
            TargetEdge::new(257),
            Err(ConversionError::InvalidSize(_))
        ));
    }

    #[test]
    fn test_target_edge_parse() {
        assert_eq!(TargetEdge::parse("48").unwrap().get(), 48);
        assert_eq!(TargetEdge::parse(" 16 ").unwrap().get(), 16);
        assert_eq!(TargetEdge::parse("").unwrap(), TargetEdge::default());
        assert_eq!(TargetEdge::default().get(), 32);
        assert!(TargetEdge::parse("large").is_err());
        assert!(TargetEdge::parse("-16").is_err());
        assert_eq!("64".parse::<TargetEdge>().unwrap().to_string(), "64x64");
    }

    #[test]
    fn test_options_default() {
        let options = ConversionOptions::default();
        assert!(options.clamp_oversized);
        assert!(options.glow);
        assert_eq!(options.filter, FilterType::Lanczos3);

        let plain = ConversionOptions::builder().glow(false).build();
        assert!(!plain.glow);
        assert!(plain.clamp_oversized);
    }

    #[test]
    fn test_output_has_requested_dimensions() {
        let data = solid_rgb_png(64, 40, [10, 200, 30]);
        for edge in [1, 16, 32, 48, 128, 256] {
            let ico = convert(&data, TargetEdge::new(edge).unwrap()).unwrap();
            let frame = read_frame(&ico).unwrap();
            assert_eq!(frame.frame_count, 1);
            assert_eq!((frame.width, frame.height), (edge, edge), "edge {}", edge);
        }
    }

    #[test]
    fn test_red_square_to_16px() {
        let data = solid_rgb_png(100, 100, [255, 0, 0]);
        let frame = read_frame(&convert(&data, TargetEdge::new(16).unwrap()).unwrap()).unwrap();

        assert_eq!((frame.width, frame.height), (16, 16));
        for pixel in frame.rgba.pixels() {
            assert_eq!(pixel[3], 255);
            assert!(pixel[0] >= 250, "red channel {}", pixel[0]);
            assert!(pixel[1] <= 5 && pixel[2] <= 5);
        }
    }

    #[test]
    fn test_transparency_is_preserved() {
        let data = logo_png(96, 96);
        let frame = read_frame(&convert(&data, TargetEdge::new(32).unwrap()).unwrap()).unwrap();

        // Corners are far from the opaque square and its halo
        assert_eq!(frame.rgba.get_pixel(0, 0)[3], 0);
        assert_eq!(frame.rgba.get_pixel(31, 31)[3], 0);
        // Centre stays opaque
        assert_eq!(frame.rgba.get_pixel(16, 16)[3], 255);
    }

    #[test]
    fn test_opaque_sources_stay_opaque() {
        let png = solid_rgb_png(50, 30, [1, 2, 3]);
        let jpeg = solid_rgb_jpeg(50, 30, [90, 90, 90]);
        for data in [png, jpeg] {
            let frame = read_frame(&convert(&data, TargetEdge::new(24).unwrap()).unwrap()).unwrap();
            assert!(frame.rgba.pixels().all(|p| p[3] == 255));
        }
    }

    #[test]
    fn test_empty_input_rejected() {
        assert_eq!(
            convert(b"", TargetEdge::default()),
            Err(ConversionError::EmptyInput)
        );
    }

    #[test]
    fn test_corrupt_input_rejected() {
        assert!(matches!(
            convert(b"not an image", TargetEdge::default()),
            Err(ConversionError::InvalidImage(_))
        ));

        // Valid signature, truncated stream
        let mut truncated = solid_rgb_png(20, 20, [0, 0, 0]);
        truncated.truncate(30);
        assert!(matches!(
            convert(&truncated, TargetEdge::default()),
            Err(ConversionError::InvalidImage(_))
        ));
    }

    #[test]
    fn test_clamp_dimensions() {
        let wide = DynamicImage::new_rgba8(2600, 260);
        let clamped = clamp_dimensions(wide, FilterType::Triangle);
        assert_eq!(clamped.dimensions(), (512, 51));

        let small = DynamicImage::new_rgba8(2500, 100);
        assert_eq!(
            clamp_dimensions(small, FilterType::Triangle).dimensions(),
            (2500, 100)
        );
    }

    #[test]
    fn test_oversized_source_still_hits_target() {
        let data = solid_rgba_png(2600, 300, [0, 0, 255, 255]);
        let frame = read_frame(&convert(&data, TargetEdge::new(48).unwrap()).unwrap()).unwrap();
        assert_eq!((frame.width, frame.height), (48, 48));
    }

    fn fast_converter(clamp_oversized: bool, glow: bool) -> IconConverter {
        IconConverter::with_options(
            ConversionOptions::builder()
                .clamp_oversized(clamp_oversized)
                .glow(glow)
                .filter(FilterType::Triangle)
                .build(),
        )
    }

    #[test]
    fn test_prepare_clamps_huge_transparent_logo() {
        let source = DynamicImage::ImageRgba8(logo_rgba(4000, 4000));
        let prepared = fast_converter(true, true).prepare(source);

        assert!(prepared.width() <= 512 && prepared.height() <= 512);
        assert_eq!(prepared.dimensions(), (512, 512));
        // Transparency survives the clamp
        assert_eq!(prepared.get_pixel(0, 0)[3], 0);
        assert_eq!(prepared.get_pixel(256, 256)[3], 255);
    }

    #[test]
    fn test_prepare_without_clamp_keeps_dimensions() {
        let source = DynamicImage::ImageRgba8(logo_rgba(4000, 4000));
        let prepared = fast_converter(false, false).prepare(source);
        assert_eq!(prepared.dimensions(), (4000, 4000));
    }

    #[test]
    fn test_huge_transparent_logo_converts() {
        let data = logo_png(4000, 4000);
        let ico = fast_converter(true, true)
            .convert(&data, TargetEdge::new(48).unwrap())
            .unwrap();
        let frame = read_frame(&ico).unwrap();

        assert_eq!((frame.width, frame.height), (48, 48));
        assert_eq!(frame.rgba.get_pixel(0, 0)[3], 0);
        assert_eq!(frame.rgba.get_pixel(24, 24)[3], 255);
    }

    #[test]
    fn test_resize_keeps_edge_hue_next_to_transparency() {
        let half_red = RgbaImage::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgba([255, 0, 0, 255])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let resized = resize_square(&half_red, TargetEdge::new(16).unwrap(), FilterType::Lanczos3);

        let visible: Vec<_> = resized.pixels().filter(|p| p[3] > 0).collect();
        assert!(!visible.is_empty());
        for pixel in visible {
            assert!(pixel[0] >= 250, "edge darkened to {:?}", pixel);
            assert_eq!((pixel[1], pixel[2]), (0, 0));
        }
        assert!(resized.get_pixel(15, 8)[3] == 0);
        assert!(resized.get_pixel(0, 8)[3] == 255);
    }

    #[test]
    fn test_resize_keeps_white_halo_white() {
        let halo = RgbaImage::from_fn(64, 64, |x, _| {
            if x < 32 {
                Rgba([255, 255, 255, 115])
            } else {
                Rgba([0, 0, 0, 0])
            }
        });
        let resized = resize_square(&halo, TargetEdge::new(16).unwrap(), FilterType::Lanczos3);
        for pixel in resized.pixels().filter(|p| p[3] > 0) {
            assert!(pixel[0] >= 250 && pixel[1] >= 250 && pixel[2] >= 250, "{:?}", pixel);
        }
    }

    #[test]
    fn test_normalize_adds_opaque_alpha() {
        let rgb = DynamicImage::ImageRgb8(image::RgbImage::from_pixel(3, 3, image::Rgb([7, 8, 9])));
        let rgba = normalize(rgb);
        assert!(rgba.pixels().all(|p| *p == Rgba([7, 8, 9, 255])));

        let luma_alpha = DynamicImage::ImageLumaA8(image::GrayAlphaImage::from_pixel(
            2,
            2,
            image::LumaA([100, 40]),
        ));
        assert_eq!(normalize(luma_alpha).get_pixel(0, 0), &Rgba([100, 100, 100, 40]));
    }

    #[test]
    fn test_glow_toggle() {
        let data = logo_png(32, 32);
        let edge = TargetEdge::new(32).unwrap();

        let plain = IconConverter::with_options(ConversionOptions::builder().glow(false).build());
        let glowing = IconConverter::new();

        let plain_frame = read_frame(&plain.convert(&data, edge).unwrap()).unwrap();
        let glow_frame = read_frame(&glowing.convert(&data, edge).unwrap()).unwrap();

        // Pixel just outside the opaque square picks up the halo only with glow on
        let halo_y = 32 / 3 - 1;
        assert!(glow_frame.rgba.get_pixel(16, halo_y)[3] > plain_frame.rgba.get_pixel(16, halo_y)[3]);
    }

    #[test]
    fn test_format_name_mapping() {
        assert_eq!(format_name(ImageFormat::Png), "PNG");
        assert_eq!(format_name(ImageFormat::Jpeg), "JPEG");
        assert_eq!(format_name(ImageFormat::WebP), "WebP");
    }
}
