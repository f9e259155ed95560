// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster I/O — decode common formats (JPEG, PNG, TIFF, BMP) into single-channel
// 8-bit grayscale and encode results back to PNG.

use std::path::Path;

use filterlab_core::error::{FilterLabError, Result};
use image::{DynamicImage, GrayImage, ImageFormat};
use tracing::{debug, info, instrument};

/// Load an image from disk as 8-bit grayscale. Colour input is down-converted
/// with the usual luma weights.
#[instrument(skip_all, fields(path = %path.as_ref().display()))]
pub fn open_grayscale(path: impl AsRef<Path>) -> Result<GrayImage> {
    let path = path.as_ref();
    let img = image::open(path).map_err(|err| map_image_error(err, path))?;
    let gray = img.into_luma8();
    info!(width = gray.width(), height = gray.height(), "Image loaded");
    Ok(gray)
}

/// Decode raw encoded bytes (JPEG, PNG, etc.) as grayscale.
#[instrument(skip(data), fields(data_len = data.len()))]
pub fn decode_grayscale(data: &[u8]) -> Result<GrayImage> {
    let img = image::load_from_memory(data).map_err(|err| {
        FilterLabError::ImageError(format!("failed to decode image: {}", err))
    })?;
    let gray = img.into_luma8();
    debug!(width = gray.width(), height = gray.height(), "Image decoded from bytes");
    Ok(gray)
}

/// Encode a grayscale raster as PNG bytes.
pub fn encode_png(image: &GrayImage) -> Result<Vec<u8>> {
    let mut buffer = Vec::new();
    let mut cursor = std::io::Cursor::new(&mut buffer);
    image.write_to(&mut cursor, ImageFormat::Png).map_err(|err| {
        FilterLabError::ImageError(format!("PNG encoding failed: {}", err))
    })?;
    Ok(buffer)
}

/// Write a grayscale raster to `path` as PNG, creating parent directories.
pub fn save_png(image: &GrayImage, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    image
        .save_with_format(path, ImageFormat::Png)
        .map_err(|err| map_image_error(err, path))?;
    debug!(path = %path.display(), "Raster written");
    Ok(())
}

/// Expand a grayscale raster to interleaved RGB8 samples.
pub fn to_rgb_bytes(image: &GrayImage) -> Vec<u8> {
    DynamicImage::ImageLuma8(image.clone()).into_rgb8().into_raw()
}

/// Missing/unreadable files surface as I/O errors; anything else is a codec
/// problem.
fn map_image_error(err: image::ImageError, path: &Path) -> FilterLabError {
    match err {
        image::ImageError::IoError(io) => FilterLabError::Io(io),
        other => FilterLabError::ImageError(format!("{}: {}", path.display(), other)),
    }
}
