// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Second- and first-derivative operators: Laplacian sharpening and Sobel edge
// magnitude. Responses are computed at 16-bit signed precision and saturated
// back to 8 bits, so no intermediate value wraps around.

use image::{GrayImage, ImageBuffer, Luma};
use tracing::{debug, instrument};

/// Signed 16-bit response image.
pub type ResponseImage = ImageBuffer<Luma<i16>, Vec<i16>>;

/// 4-neighbour Laplacian.
pub const LAPLACIAN_KERNEL: [[i16; 3]; 3] = [[0, 1, 0], [1, -4, 1], [0, 1, 0]];

/// Horizontal derivative (responds to vertical edges).
pub const SOBEL_X_KERNEL: [[i16; 3]; 3] = [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]];

/// Vertical derivative (responds to horizontal edges).
pub const SOBEL_Y_KERNEL: [[i16; 3]; 3] = [[-1, -2, -1], [0, 0, 0], [1, 2, 1]];

/// Sharpen by subtracting the absolute Laplacian from the input.
///
/// `out = saturating_sub(input, min(|∇²input|, 255))`
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn laplacian_sharpen(image: &GrayImage) -> GrayImage {
    let laplacian = correlate3x3(image, &LAPLACIAN_KERNEL);
    let output = GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let magnitude = abs_saturate(laplacian.get_pixel(x, y).0[0]);
        Luma([image.get_pixel(x, y).0[0].saturating_sub(magnitude)])
    });
    debug!("Laplacian sharpening complete");
    output
}

/// Edge magnitude approximated as `0.5·|Gx| + 0.5·|Gy|`, each term saturated
/// to 8 bits before blending. Halves are rounded to even.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn sobel_edges(image: &GrayImage) -> GrayImage {
    let gx = correlate3x3(image, &SOBEL_X_KERNEL);
    let gy = correlate3x3(image, &SOBEL_Y_KERNEL);
    let output = GrayImage::from_fn(image.width(), image.height(), |x, y| {
        let ax = abs_saturate(gx.get_pixel(x, y).0[0]) as f32;
        let ay = abs_saturate(gy.get_pixel(x, y).0[0]) as f32;
        let blended = (0.5 * ax + 0.5 * ay).round_ties_even();
        Luma([blended.clamp(0.0, 255.0) as u8])
    });
    debug!("Sobel edge detection complete");
    output
}

/// Correlate `image` with a 3×3 kernel into a signed 16-bit response.
///
/// Borders mirror without repeating the edge sample (`b a | a b` becomes
/// `c b | a b c`), matching the usual "reflect 101" convention.
/// `imageproc::filter::filter3x3` clamps at the border instead, so it is not
/// used here.
pub fn correlate3x3(image: &GrayImage, kernel: &[[i16; 3]; 3]) -> ResponseImage {
    let (width, height) = image.dimensions();
    ImageBuffer::from_fn(width, height, |x, y| {
        let mut acc: i32 = 0;
        for (ky, row) in kernel.iter().enumerate() {
            let sy = reflect101(y as i64 + ky as i64 - 1, height as i64);
            for (kx, &weight) in row.iter().enumerate() {
                if weight == 0 {
                    continue;
                }
                let sx = reflect101(x as i64 + kx as i64 - 1, width as i64);
                acc += weight as i32 * image.get_pixel(sx, sy).0[0] as i32;
            }
        }
        Luma([acc.clamp(i16::MIN as i32, i16::MAX as i32) as i16])
    })
}

/// `|v|` clamped into `u8`.
fn abs_saturate(value: i16) -> u8 {
    value.unsigned_abs().min(u8::MAX as u16) as u8
}

fn reflect101(index: i64, len: i64) -> u32 {
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut i = index.rem_euclid(period);
    if i >= len {
        i = period - i;
    }
    i as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checkerboard(size: u32) -> GrayImage {
        GrayImage::from_fn(size, size, |x, y| {
            Luma([if (x + y) % 2 == 0 { 255 } else { 0 }])
        })
    }

    #[test]
    fn sobel_of_uniform_image_is_zero() {
        let image = GrayImage::from_pixel(100, 100, Luma([128u8]));
        assert!(sobel_edges(&image).pixels().all(|p| p.0[0] == 0));
    }

    #[test]
    fn laplacian_of_uniform_image_is_identity() {
        let image = GrayImage::from_pixel(20, 20, Luma([200u8]));
        assert_eq!(laplacian_sharpen(&image), image);
    }

    #[test]
    fn extreme_input_saturates_instead_of_wrapping() {
        let image = checkerboard(16);

        // Laplacian on a checkerboard reaches ±1020; the result must clamp.
        let laplacian = correlate3x3(&image, &LAPLACIAN_KERNEL);
        assert_eq!(laplacian.get_pixel(5, 5).0[0].unsigned_abs(), 1020);

        let sharpened = laplacian_sharpen(&image);
        assert!(sharpened.pixels().all(|p| p.0[0] == 0));

        let edges = sobel_edges(&image);
        assert_eq!(edges.dimensions(), image.dimensions());
    }

    #[test]
    fn vertical_step_edge_responds_in_x_only() {
        // Left half 0, right half 200.
        let image = GrayImage::from_fn(10, 10, |x, _| Luma([if x < 5 { 0 } else { 200 }]));
        let gx = correlate3x3(&image, &SOBEL_X_KERNEL);
        let gy = correlate3x3(&image, &SOBEL_Y_KERNEL);
        assert_eq!(gx.get_pixel(4, 5).0[0], 800);
        assert_eq!(gy.get_pixel(4, 5).0[0], 0);

        // |Gx| saturates to 255, |Gy| = 0 → 127.5 rounds to even 128.
        let edges = sobel_edges(&image);
        assert_eq!(edges.get_pixel(4, 5).0[0], 128);
        assert_eq!(edges.get_pixel(1, 5).0[0], 0);
    }

    #[test]
    fn sharpening_darkens_next_to_bright_pixel() {
        let mut image = GrayImage::from_pixel(5, 5, Luma([100u8]));
        image.put_pixel(2, 2, Luma([140]));
        let out = laplacian_sharpen(&image);
        // Neighbour Laplacian = 140 - 100 = 40 → 100 - 40.
        assert_eq!(out.get_pixel(2, 1).0[0], 60);
        // Centre Laplacian = -160 → 140 - 140 saturates at 0.
        assert_eq!(out.get_pixel(2, 2).0[0], 0);
    }

    #[test]
    fn reflect101_skips_edge_sample() {
        assert_eq!(reflect101(-1, 5), 1);
        assert_eq!(reflect101(5, 5), 3);
        assert_eq!(reflect101(0, 5), 0);
        assert_eq!(reflect101(-1, 2), 1);
        assert_eq!(reflect101(2, 2), 0);
        assert_eq!(reflect101(-1, 1), 0);
    }
}
