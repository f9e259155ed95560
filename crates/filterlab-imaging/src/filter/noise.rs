// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Synthetic noise models. The random source is always supplied by the
// caller so results can be reproduced with a seeded generator.

use filterlab_core::error::{FilterLabError, Result};
use filterlab_core::types::{NoiseMode, NoiseParams};
use image::{GrayImage, Luma};
use rand::Rng;
use rand_distr::{Distribution, Normal};
use tracing::{debug, instrument};

/// Apply the requested noise model to a copy of `image`.
#[instrument(skip(image, rng), fields(width = image.width(), height = image.height()))]
pub fn add_noise<R: Rng + ?Sized>(
    image: &GrayImage,
    mode: NoiseMode,
    params: &NoiseParams,
    rng: &mut R,
) -> Result<GrayImage> {
    params.validate()?;
    let noisy = match mode {
        NoiseMode::Gaussian => gaussian_noise(image, params.gaussian_variance, rng)?,
        NoiseMode::SaltAndPepper => {
            salt_and_pepper_noise(image, params.salt_pepper_amount, params.salt_vs_pepper, rng)
        }
    };
    debug!(%mode, "Noise applied");
    Ok(noisy)
}

/// Additive zero-mean Gaussian noise.
///
/// `variance` is expressed on the [0, 1] intensity scale, so a variance of
/// 0.01 gives a standard deviation of 25.5 grey levels. Results are clamped
/// to [0, 255] and truncated.
pub fn gaussian_noise<R: Rng + ?Sized>(
    image: &GrayImage,
    variance: f64,
    rng: &mut R,
) -> Result<GrayImage> {
    let sigma = variance.max(0.0).sqrt() * 255.0;
    let normal = Normal::new(0.0, sigma).map_err(|err| {
        FilterLabError::InvalidParameter(format!("gaussian variance {variance}: {err}"))
    })?;
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        let value = pixel.0[0] as f64 + normal.sample(rng);
        *pixel = Luma([value.clamp(0.0, 255.0) as u8]);
    }
    Ok(output)
}

/// Replace a fraction `amount` of samples with white (probability
/// `salt_vs_pepper`) or black.
pub fn salt_and_pepper_noise<R: Rng + ?Sized>(
    image: &GrayImage,
    amount: f64,
    salt_vs_pepper: f64,
    rng: &mut R,
) -> GrayImage {
    let amount = amount.clamp(0.0, 1.0);
    let salt_vs_pepper = salt_vs_pepper.clamp(0.0, 1.0);
    let mut output = image.clone();
    for pixel in output.pixels_mut() {
        if rng.random_bool(amount) {
            let value = if rng.random_bool(salt_vs_pepper) { u8::MAX } else { 0 };
            *pixel = Luma([value]);
        }
    }
    output
}
