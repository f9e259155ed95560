// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Two-panel composition used for before/after comparisons.

use image::{GrayImage, Luma, imageops};

/// Background for gutters and padding.
const BACKGROUND: Luma<u8> = Luma([255]);

/// Place `left` and `right` next to each other, separated by `gutter` white
/// columns. The shorter panel is top-aligned and padded with white.
pub fn side_by_side(left: &GrayImage, right: &GrayImage, gutter: u32) -> GrayImage {
    let width = left.width() + gutter + right.width();
    let height = left.height().max(right.height());
    let mut canvas = GrayImage::from_pixel(width, height, BACKGROUND);
    imageops::replace(&mut canvas, left, 0, 0);
    imageops::replace(&mut canvas, right, (left.width() + gutter) as i64, 0);
    canvas
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn panels_are_placed_with_gutter() {
        let left = GrayImage::from_pixel(3, 2, Luma([10u8]));
        let right = GrayImage::from_pixel(4, 5, Luma([20u8]));
        let out = side_by_side(&left, &right, 2);

        assert_eq!(out.dimensions(), (9, 5));
        assert_eq!(out.get_pixel(0, 0).0[0], 10);
        assert_eq!(out.get_pixel(3, 0).0[0], 255);
        assert_eq!(out.get_pixel(5, 4).0[0], 20);
        // Below the shorter left panel.
        assert_eq!(out.get_pixel(1, 4).0[0], 255);
    }
}
