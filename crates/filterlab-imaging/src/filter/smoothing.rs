// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Neighbourhood smoothing filters: mean (box), median and mode.

use filterlab_core::error::Result;
use image::{GrayImage, ImageBuffer, Luma};
use imageproc::filter;
use tracing::{debug, instrument};

use super::kernel_radius;

/// Replace each pixel with the arithmetic mean of its k×k neighbourhood,
/// rounded to nearest.
///
/// Pixels beyond the border are treated as copies of the nearest edge pixel.
/// Row sums and column sums are kept exact and divided once at the end;
/// `imageproc::filter::box_filter` truncates after each pass and drifts low.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn mean_filter(image: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    let radius = kernel_radius(kernel_size)? as i64;
    if is_empty(image) {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    let (w, h) = (width as i64, height as i64);
    let clamp = |i: i64, len: i64| i.clamp(0, len - 1) as u32;

    // Horizontal window sums, one per pixel. At most 15 * 255 per entry.
    let row_sums = ImageBuffer::<Luma<u32>, Vec<u32>>::from_fn(width, height, |x, y| {
        let sum = (-radius..=radius)
            .map(|dx| image.get_pixel(clamp(x as i64 + dx, w), y).0[0] as u32)
            .sum::<u32>();
        Luma([sum])
    });

    let area = kernel_size * kernel_size;
    let output = GrayImage::from_fn(width, height, |x, y| {
        let sum = (-radius..=radius)
            .map(|dy| row_sums.get_pixel(x, clamp(y as i64 + dy, h)).0[0])
            .sum::<u32>();
        Luma([((sum + area / 2) / area).min(u8::MAX as u32) as u8])
    });

    debug!(kernel_size, "Mean filter complete");
    Ok(output)
}

/// Replace each pixel with the median of its k×k neighbourhood.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn median_filter(image: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    let radius = kernel_radius(kernel_size)?;
    if is_empty(image) {
        return Ok(image.clone());
    }
    Ok(filter::median_filter(image, radius, radius))
}

/// Replace each pixel with the most frequent value in its k×k neighbourhood.
///
/// Ties go to the smallest intensity. The border is handled by symmetric
/// reflection (`c b a | a b c`), so the edge row/column is counted twice near
/// the boundary.
///
/// Cost is O(k²) per pixel: a 256-bin histogram is filled from the
/// neighbourhood, scanned for the winner, then cleared again by walking the
/// same samples.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn mode_filter(image: &GrayImage, kernel_size: u32) -> Result<GrayImage> {
    let radius = kernel_radius(kernel_size)? as i64;
    if is_empty(image) {
        return Ok(image.clone());
    }

    let (width, height) = image.dimensions();
    let (w, h) = (width as i64, height as i64);
    let mut histogram = [0u32; 256];
    let mut window: Vec<u8> = Vec::with_capacity(kernel_size as usize * kernel_size as usize);

    let output = GrayImage::from_fn(width, height, |x, y| {
        window.clear();
        for dy in -radius..=radius {
            let sy = reflect(y as i64 + dy, h);
            for dx in -radius..=radius {
                let sx = reflect(x as i64 + dx, w);
                let value = image.get_pixel(sx, sy).0[0];
                histogram[value as usize] += 1;
                window.push(value);
            }
        }

        let mut best_value = u8::MAX;
        let mut best_count = 0u32;
        for &value in &window {
            let count = histogram[value as usize];
            if count > best_count || (count == best_count && value < best_value) {
                best_count = count;
                best_value = value;
            }
        }
        for &value in &window {
            histogram[value as usize] = 0;
        }

        Luma([best_value])
    });

    debug!(kernel_size, "Mode filter complete");
    Ok(output)
}

/// Symmetric reflection of an out-of-range index into `0..len`.
fn reflect(index: i64, len: i64) -> u32 {
    if len == 1 {
        return 0;
    }
    let period = 2 * len;
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - 1 - i;
    }
    i as u32
}

fn is_empty(image: &GrayImage) -> bool {
    image.width() == 0 || image.height() == 0
}
