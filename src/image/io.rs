//! I/O helpers for frames, gray maps and JSON.
//!
//! - `load_rgba_frame`: read a PNG/JPEG into an owned RGBA [`FrameBuffer`].
//! - `save_gray_png`: write a [`GrayImage`] (e.g. an edge map) to a PNG.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::{FrameBuffer, GrayImage};
use image::{ImageBuffer, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert it to a packed RGBA frame.
pub fn load_rgba_frame(path: &Path) -> Result<FrameBuffer, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_rgba8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    FrameBuffer::new(width, height, img.into_raw())
        .map_err(|e| format!("Invalid frame {}: {e}", path.display()))
}

/// Save an 8-bit gray buffer to a PNG.
pub fn save_gray_png(buffer: &GrayImage, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let image: ImageBuffer<Luma<u8>, Vec<u8>> = ImageBuffer::from_raw(
        buffer.width() as u32,
        buffer.height() as u32,
        buffer.data().to_vec(),
    )
    .ok_or_else(|| "Failed to create image buffer".to_string())?;
    image
        .save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Serialize a value as pretty JSON to `path`, creating parent directories.
pub fn write_json_file<T: Serialize>(path: &Path, value: &T) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| format!("Failed to serialize JSON for {}: {e}", path.display()))?;
    fs::write(path, json).map_err(|e| format!("Failed to write JSON {}: {e}", path.display()))
}

fn ensure_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .map_err(|e| format!("Failed to create {}: {e}", parent.display()))?;
        }
    }
    Ok(())
}
