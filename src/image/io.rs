//! I/O helpers for grayscale images, block maps and JSON.
//!
//! - `load_grayscale_image`: read a PNG/JPEG/PGM/TIFF into an owned 8-bit buffer.
//! - `save_binary_image`: write a 0/1 ridge image with ridges drawn black.
//! - `save_block_map`: write a block map upscaled to pixels, values stretched to 0..255.
//! - `write_json_file`: pretty-print a serializable value to disk.
use super::ImageBufU8;
use crate::maps::BlockMap;
use image::{GrayImage, Luma};
use serde::Serialize;
use std::fs;
use std::path::Path;

/// Load an image from disk and convert to 8-bit grayscale.
pub fn load_grayscale_image(path: &Path) -> Result<ImageBufU8, String> {
    let img = image::open(path)
        .map_err(|e| format!("Failed to open {}: {e}", path.display()))?
        .into_luma8();
    let width = img.width() as usize;
    let height = img.height() as usize;
    ImageBufU8::from_raw(width, height, img.into_raw())
        .ok_or_else(|| format!("Unexpected buffer size for {}", path.display()))
}

/// Save a binarized image (ridge = 1) as black ridges on white.
pub fn save_binary_image(buffer: &ImageBufU8, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let mut out = GrayImage::new(buffer.w as u32, buffer.h as u32);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let v = if buffer.get(x as usize, y as usize) != 0 {
            0
        } else {
            255
        };
        *px = Luma([v]);
    }
    out.save(path)
        .map_err(|e| format!("Failed to save {}: {e}", path.display()))
}

/// Save a block map with each block drawn as `block_size × block_size`
/// pixels. Values are stretched so the map's maximum is white; negative
/// (invalid) entries are black.
pub fn save_block_map(map: &BlockMap, block_size: usize, path: &Path) -> Result<(), String> {
    ensure_parent_dir(path)?;
    let bs = block_size.max(1);
    let max = map.data.iter().copied().max().unwrap_or(0).max(1) as f32;
    let mut out = GrayImage::new((map.w * bs) as u32, (map.h * bs) as u32);
    for (x, y, px) in out.enumerate_pixels_mut() {
        let v = map.get(x as usize / bs, y as usize / bs).max(0) as f32;
        *px = Luma([(v / max * 255.0).round().clamp(0.0, 255.0) as u8]);
    }
    out.save(path)
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
