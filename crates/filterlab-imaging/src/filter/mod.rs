// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Filter module — neighbourhood smoothing, sharpening/edge operators and
// synthetic noise. Every function borrows its input and returns a new raster
// of identical dimensions.

pub mod edges;
pub mod noise;
pub mod smoothing;

use filterlab_core::error::{FilterLabError, Result};
use filterlab_core::types::{FilterMethod, KernelSize};
use image::GrayImage;
use tracing::{debug, instrument};

pub use edges::{laplacian_sharpen, sobel_edges};
pub use noise::{add_noise, gaussian_noise, salt_and_pepper_noise};
pub use smoothing::{mean_filter, median_filter, mode_filter};

/// Run one of the five spatial filters on `image`.
///
/// `kernel_size` is only consulted by the neighbourhood filters.
#[instrument(skip(image), fields(width = image.width(), height = image.height()))]
pub fn apply_method(
    image: &GrayImage,
    method: FilterMethod,
    kernel_size: KernelSize,
) -> Result<GrayImage> {
    let output = match method {
        FilterMethod::Mean => mean_filter(image, kernel_size.get())?,
        FilterMethod::Median => median_filter(image, kernel_size.get())?,
        FilterMethod::Mode => mode_filter(image, kernel_size.get())?,
        FilterMethod::LaplacianSharpen => laplacian_sharpen(image),
        FilterMethod::SobelEdge => sobel_edges(image),
    };
    debug!(method = method.label(), "Filter complete");
    Ok(output)
}

/// Check a neighbourhood size and return its radius.
///
/// Pipeline functions accept any odd positive size; the tighter 3..=15 range
/// is enforced by [`KernelSize`] at the request level.
pub(crate) fn kernel_radius(kernel_size: u32) -> Result<u32> {
    if kernel_size == 0 || kernel_size % 2 == 0 {
        return Err(FilterLabError::InvalidParameter(format!(
            "kernel size must be odd and at least 1, got {kernel_size}"
        )));
    }
    Ok(kernel_size / 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn kernel_radius_rejects_even_and_zero() {
        assert!(kernel_radius(0).is_err());
        assert!(kernel_radius(4).is_err());
        assert_eq!(kernel_radius(1).unwrap(), 0);
        assert_eq!(kernel_radius(15).unwrap(), 7);
    }

    #[test]
    fn every_method_preserves_dimensions() {
        let image = GrayImage::from_fn(23, 17, |x, y| Luma([((x * 11 + y * 7) % 256) as u8]));
        for method in FilterMethod::ALL {
            for k in (3..=15).step_by(2) {
                let size = KernelSize::new(k).unwrap();
                let out = apply_method(&image, method, size).unwrap();
                assert_eq!(out.dimensions(), image.dimensions(), "{method} k={k}");
            }
        }
    }

    #[test]
    fn uniform_gray_scenario() {
        let image = GrayImage::from_pixel(100, 100, Luma([128u8]));
        let mean = apply_method(&image, FilterMethod::Mean, KernelSize::new(3).unwrap()).unwrap();
        assert!(mean.pixels().all(|p| p.0[0] == 128));

        let edges = apply_method(&mean, FilterMethod::SobelEdge, KernelSize::default()).unwrap();
        assert!(edges.pixels().all(|p| p.0[0] == 0));
    }
}
