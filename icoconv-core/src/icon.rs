// ABOUTME: Icon container encoding and inspection for single-frame favicons
// ABOUTME: Wraps RGBA frames into .ico files and reads frames back for verification

use crate::constants::limits;
use crate::error::ConversionError;
use image::RgbaImage;
use std::io::Cursor;

/// First frame of an icon container, decoded to RGBA.
#[derive(Debug, Clone)]
pub struct IconFrame {
    pub width: u32,
    pub height: u32,
    pub frame_count: usize,
    pub rgba: RgbaImage,
}

/// Serialize one RGBA frame into an icon container.
pub fn encode_ico(frame: &RgbaImage) -> Result<Vec<u8>, ConversionError> {
    let (width, height) = frame.dimensions();
    let edge_range = limits::MIN_EDGE..=limits::MAX_EDGE;
    if !edge_range.contains(&width) || !edge_range.contains(&height) {
        return Err(ConversionError::InvalidSize(format!(
            "{}x{} frame does not fit in an icon container",
            width, height
        )));
    }

    let icon_image = ico::IconImage::from_rgba_data(width, height, frame.as_raw().clone());
    let entry = ico::IconDirEntry::encode(&icon_image).map_err(|e| {
        ConversionError::ProcessingFailed(format!("Failed to encode {}x{} icon: {}", width, height, e))
    })?;

    let mut icon_dir = ico::IconDir::new(ico::ResourceType::Icon);
    icon_dir.add_entry(entry);

    let mut buffer = Vec::new();
    icon_dir
        .write(&mut buffer)
        .map_err(|e| ConversionError::ProcessingFailed(format!("Failed to write ICO: {}", e)))?;

    log::debug!("Encoded {}x{} icon ({} bytes)", width, height, buffer.len());
    Ok(buffer)
}

/// Decode the first frame of an icon container.
pub fn read_frame(data: &[u8]) -> Result<IconFrame, ConversionError> {
    let icon_dir = ico::IconDir::read(Cursor::new(data))
        .map_err(|e| ConversionError::InvalidImage(format!("Failed to read ICO: {}", e)))?;

    let entry = icon_dir
        .entries()
        .first()
        .ok_or_else(|| ConversionError::InvalidImage("ICO contains no frames".to_string()))?;

    let image = entry
        .decode()
        .map_err(|e| ConversionError::InvalidImage(format!("Failed to decode ICO frame: {}", e)))?;

    let rgba = RgbaImage::from_raw(image.width(), image.height(), image.rgba_data().to_vec())
        .ok_or_else(|| ConversionError::InvalidImage("ICO frame has a short pixel buffer".to_string()))?;

    Ok(IconFrame {
        width: image.width(),
        height: image.height(),
        frame_count: icon_dir.entries().len(),
        rgba,
    })
}
