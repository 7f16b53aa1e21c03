//! Frame export ("Download")
//!
//! Captures the rendered garment (before the overlay is drawn) and writes
//! it as a PNG. The GL read-back is bottom-up, so rows are flipped first.

use image::{ImageFormat, RgbaImage};
use std::fmt;
use std::io::Cursor;
use std::path::Path;

/// Suggested file name in the save dialog
pub const DEFAULT_FILE_NAME: &str = "decal-studio.png";

#[derive(Debug, Clone, PartialEq)]
pub enum ExportError {
    /// Pixel buffer doesn't match the stated size
    BadDimensions { width: u32, height: u32, len: usize },
    /// PNG encoding failed
    Encode(String),
    /// Writing the file failed
    Io(String),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::BadDimensions { width, height, len } => {
                write!(f, "frame is {} bytes, expected {}x{} RGBA", len, width, height)
            }
            ExportError::Encode(msg) => write!(f, "PNG encoding failed: {}", msg),
            ExportError::Io(msg) => write!(f, "I/O error: {}", msg),
        }
    }
}

impl std::error::Error for ExportError {}

impl From<std::io::Error> for ExportError {
    fn from(e: std::io::Error) -> Self {
        ExportError::Io(e.to_string())
    }
}

impl From<image::ImageError> for ExportError {
    fn from(e: image::ImageError) -> Self {
        ExportError::Encode(e.to_string())
    }
}

/// Reverse row order of a tightly packed RGBA buffer
pub fn flip_rows(rgba: &[u8], width: u32) -> Vec<u8> {
    let stride = width as usize * 4;
    if stride == 0 {
        return Vec::new();
    }
    rgba.chunks_exact(stride).rev().flatten().copied().collect()
}

/// Encode a bottom-up RGBA frame as PNG bytes
pub fn frame_to_png(rgba: &[u8], width: u32, height: u32) -> Result<Vec<u8>, ExportError> {
    let expected = width as usize * height as usize * 4;
    if width == 0 || height == 0 || rgba.len() != expected {
        return Err(ExportError::BadDimensions { width, height, len: rgba.len() });
    }
    let img = RgbaImage::from_raw(width, height, flip_rows(rgba, width))
        .ok_or(ExportError::BadDimensions { width, height, len: rgba.len() })?;
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Read back the current frame buffer as PNG
pub fn capture_png() -> Result<Vec<u8>, ExportError> {
    let frame = macroquad::texture::get_screen_data();
    frame_to_png(&frame.bytes, frame.width as u32, frame.height as u32)
}

pub fn save_png(path: &Path, png: &[u8]) -> Result<(), ExportError> {
    std::fs::write(path, png)?;
    Ok(())
}

/// Ask where to save, then write. Ok(None) when the dialog was dismissed.
#[cfg(not(target_arch = "wasm32"))]
pub fn save_with_dialog(png: &[u8]) -> Result<Option<std::path::PathBuf>, ExportError> {
    let dialog = rfd::FileDialog::new()
        .add_filter("PNG Image", &["png"])
        .set_file_name(DEFAULT_FILE_NAME);
    match dialog.save_file() {
        Some(path) => {
            save_png(&path, png)?;
            Ok(Some(path))
        }
        None => Ok(None),
    }
}
