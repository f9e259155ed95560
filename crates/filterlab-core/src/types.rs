// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for FilterLab.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FilterLabError, Result};

/// Edge length of a square filter neighbourhood. Always odd, within
/// [`KernelSize::MIN`, `KernelSize::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub struct KernelSize(u32);

impl KernelSize {
    pub const MIN: u32 = 3;
    pub const MAX: u32 = 15;

    /// Validate an explicit kernel size.
    pub fn new(size: u32) -> Result<Self> {
        if !(Self::MIN..=Self::MAX).contains(&size) {
            return Err(FilterLabError::InvalidParameter(format!(
                "kernel size {size} outside {}..={}",
                Self::MIN,
                Self::MAX
            )));
        }
        if size % 2 == 0 {
            return Err(FilterLabError::InvalidParameter(format!(
                "kernel size {size} must be odd"
            )));
        }
        Ok(Self(size))
    }

    /// Normalise a continuous slider position: round, bump even values to the
    /// next odd one, then validate.
    pub fn from_slider(value: f64) -> Result<Self> {
        if !value.is_finite() || value < 0.0 {
            return Err(FilterLabError::InvalidParameter(format!(
                "slider value {value} is not a valid kernel size"
            )));
        }
        let mut size = value.round() as u32;
        if size % 2 == 0 {
            size += 1;
        }
        Self::new(size)
    }

    /// Edge length in pixels.
    pub fn get(self) -> u32 {
        self.0
    }

    /// Neighbourhood radius, `(k - 1) / 2`.
    pub fn radius(self) -> u32 {
        self.0 / 2
    }
}

impl Default for KernelSize {
    fn default() -> Self {
        Self(Self::MIN)
    }
}

impl TryFrom<u32> for KernelSize {
    type Error = FilterLabError;

    fn try_from(value: u32) -> Result<Self> {
        Self::new(value)
    }
}

impl From<KernelSize> for u32 {
    fn from(size: KernelSize) -> Self {
        size.0
    }
}

impl fmt::Display for KernelSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{0}x{0}", self.0)
    }
}

/// The five spatial filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FilterMethod {
    Mean,
    Median,
    Mode,
    LaplacianSharpen,
    SobelEdge,
}

impl FilterMethod {
    pub const ALL: [FilterMethod; 5] = [
        Self::Mean,
        Self::Median,
        Self::Mode,
        Self::LaplacianSharpen,
        Self::SobelEdge,
    ];

    /// Human-readable name, also used as the report entry label.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Mean => "Mean Filter",
            Self::Median => "Median Filter",
            Self::Mode => "Mode Filter",
            Self::LaplacianSharpen => "Laplacian Sharpening",
            Self::SobelEdge => "Sobel Edge Detection",
        }
    }

    /// Sharpening/edge methods accept optional median pre-smoothing.
    pub fn accepts_pre_smoothing(&self) -> bool {
        matches!(self, Self::LaplacianSharpen | Self::SobelEdge)
    }

    /// Descriptor used to explain this filter in reports.
    pub fn descriptor(&self) -> FilterDescriptor {
        match self {
            Self::LaplacianSharpen => FilterDescriptor::Fixed {
                name: self.label(),
                description: "Kernel: [[0, 1, 0], [1, -4, 1], [0, 1, 0]]\n(Subtracted from Original)",
            },
            Self::SobelEdge => FilterDescriptor::Fixed {
                name: self.label(),
                description: "Sobel X: [[-1, 0, 1], [-2, 0, 2], [-1, 0, 1]]\nSobel Y: [[-1,-2,-1], [0,0,0], [1,2,1]]",
            },
            Self::Mean => FilterDescriptor::Sized {
                name: self.label(),
                describe: describe_mean_kernel,
            },
            Self::Median => FilterDescriptor::Fixed {
                name: self.label(),
                description: "Non-linear: Takes median value in KxK neighborhood.",
            },
            Self::Mode => FilterDescriptor::Fixed {
                name: self.label(),
                description: "Non-linear: Takes most frequent value in KxK neighborhood.",
            },
        }
    }
}

fn describe_mean_kernel(size: KernelSize) -> String {
    let k = size.get();
    format!("Kernel: 1/{} * ones({k},{k})", k * k)
}

impl fmt::Display for FilterMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for FilterMethod {
    type Err = FilterLabError;

    /// Accepts the short selector (`mean`, `sobel`, ...) or the display label.
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_lowercase();
        match key.as_str() {
            "mean" | "mean filter" | "box" => Ok(Self::Mean),
            "median" | "median filter" => Ok(Self::Median),
            "mode" | "mode filter" => Ok(Self::Mode),
            "laplacian" | "laplacian sharpening" | "sharpen" => Ok(Self::LaplacianSharpen),
            "sobel" | "sobel edge detection" | "edges" => Ok(Self::SobelEdge),
            _ => Err(FilterLabError::InvalidParameter(format!(
                "unknown filter method '{s}' (expected mean, median, mode, laplacian or sobel)"
            ))),
        }
    }
}

/// Human-readable explanation of a filter, optionally depending on the
/// kernel size it was run with.
#[derive(Debug, Clone, Copy)]
pub enum FilterDescriptor {
    Fixed {
        name: &'static str,
        description: &'static str,
    },
    Sized {
        name: &'static str,
        describe: fn(KernelSize) -> String,
    },
}

impl FilterDescriptor {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Fixed { name, .. } | Self::Sized { name, .. } => name,
        }
    }

    /// Render the description for the given kernel size.
    pub fn describe(&self, size: KernelSize) -> String {
        match self {
            Self::Fixed { description, .. } => (*description).to_string(),
            Self::Sized { describe, .. } => describe(size),
        }
    }
}

/// A single filter invocation as collected from the parameter surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterRequest {
    pub method: FilterMethod,
    pub kernel_size: KernelSize,
    pub smooth_before_sharpen: bool,
}

impl FilterRequest {
    pub fn new(method: FilterMethod, kernel_size: KernelSize) -> Self {
        Self {
            method,
            kernel_size,
            smooth_before_sharpen: false,
        }
    }

    /// Request median pre-smoothing (only honoured by sharpening/edge methods).
    pub fn with_pre_smoothing(mut self, enabled: bool) -> Self {
        self.smooth_before_sharpen = enabled;
        self
    }

    /// Whether the pre-smoothing step actually runs for this request.
    pub fn pre_smooths(&self) -> bool {
        self.smooth_before_sharpen && self.method.accepts_pre_smoothing()
    }

    /// Entry label, prefixed when the input was smoothed first.
    pub fn label(&self) -> String {
        if self.pre_smooths() {
            format!("{SMOOTHED_PREFIX}{}", self.method.label())
        } else {
            self.method.label().to_string()
        }
    }
}

/// Prefix marking entries whose input was median-smoothed first.
pub const SMOOTHED_PREFIX: &str = "Smoothed then ";

/// Label of the pristine original entry.
pub const ORIGINAL_LABEL: &str = "Original";

/// Synthetic noise models.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NoiseMode {
    Gaussian,
    SaltAndPepper,
}

impl NoiseMode {
    /// Entry label recorded when this noise becomes the working base.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Gaussian => "Base: Gaussian Noise",
            Self::SaltAndPepper => "Base: Salt & Pepper Noise",
        }
    }

    /// Report description of the noise model.
    pub fn describe(&self, params: &NoiseParams) -> String {
        match self {
            Self::Gaussian => format!(
                "Additive Gaussian noise, variance {}",
                params.gaussian_variance
            ),
            Self::SaltAndPepper => format!(
                "Impulse noise, density {} ({:.0}% salt / {:.0}% pepper)",
                params.salt_pepper_amount,
                params.salt_vs_pepper * 100.0,
                (1.0 - params.salt_vs_pepper) * 100.0
            ),
        }
    }
}

impl fmt::Display for NoiseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Gaussian => f.write_str("gaussian"),
            Self::SaltAndPepper => f.write_str("s&p"),
        }
    }
}

impl FromStr for NoiseMode {
    type Err = FilterLabError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "gaussian" | "gauss" => Ok(Self::Gaussian),
            "s&p" | "salt-and-pepper" | "salt_and_pepper" | "saltandpepper" | "impulse" => {
                Ok(Self::SaltAndPepper)
            }
            _ => Err(FilterLabError::InvalidParameter(format!(
                "unknown noise mode '{s}' (expected gaussian or salt-and-pepper)"
            ))),
        }
    }
}

/// Strength of the synthetic noise models.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NoiseParams {
    /// Variance on the [0, 1] intensity scale.
    pub gaussian_variance: f64,
    /// Fraction of samples replaced.
    pub salt_pepper_amount: f64,
    /// Share of replaced samples set to white.
    pub salt_vs_pepper: f64,
}

impl Default for NoiseParams {
    fn default() -> Self {
        Self {
            gaussian_variance: 0.01,
            salt_pepper_amount: 0.05,
            salt_vs_pepper: 0.5,
        }
    }
}

impl NoiseParams {
    pub fn validate(&self) -> Result<()> {
        if !self.gaussian_variance.is_finite() || self.gaussian_variance < 0.0 {
            return Err(FilterLabError::InvalidParameter(format!(
                "gaussian variance must be non-negative, got {}",
                self.gaussian_variance
            )));
        }
        for (name, value) in [
            ("salt-and-pepper amount", self.salt_pepper_amount),
            ("salt vs pepper ratio", self.salt_vs_pepper),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(FilterLabError::InvalidParameter(format!(
                    "{name} must lie in [0, 1], got {value}"
                )));
            }
        }
        Ok(())
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A3,
    A5,
    Letter,
    Legal,
    Custom { width_mm: u32, height_mm: u32 },
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A3 => (297, 420),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
            Self::Legal => (216, 356),
            Self::Custom {
                width_mm,
                height_mm,
            } => (*width_mm, *height_mm),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kernel_size_accepts_odd_values_in_range() {
        for k in (3..=15).step_by(2) {
            assert_eq!(KernelSize::new(k).unwrap().get(), k);
        }
    }

    #[test]
    fn kernel_size_rejects_even_and_out_of_range() {
        for k in [0, 1, 2, 4, 14, 16, 17] {
            assert!(
                matches!(KernelSize::new(k), Err(FilterLabError::InvalidParameter(_))),
                "{k} should be rejected"
            );
        }
    }

    #[test]
    fn slider_positions_round_up_to_odd() {
        assert_eq!(KernelSize::from_slider(3.2).unwrap().get(), 3);
        assert_eq!(KernelSize::from_slider(3.6).unwrap().get(), 5);
        assert_eq!(KernelSize::from_slider(8.0).unwrap().get(), 9);
        assert_eq!(KernelSize::from_slider(14.7).unwrap().get(), 15);
        assert!(KernelSize::from_slider(15.6).is_err());
        assert!(KernelSize::from_slider(f64::NAN).is_err());
    }

    #[test]
    fn kernel_size_radius_and_display() {
        let k = KernelSize::new(7).unwrap();
        assert_eq!(k.radius(), 3);
        assert_eq!(k.to_string(), "7x7");
    }

    #[test]
    fn method_selectors_parse() {
        assert_eq!("mean".parse::<FilterMethod>().unwrap(), FilterMethod::Mean);
        assert_eq!(
            "Sobel Edge Detection".parse::<FilterMethod>().unwrap(),
            FilterMethod::SobelEdge
        );
        assert_eq!(
            " LAPLACIAN ".parse::<FilterMethod>().unwrap(),
            FilterMethod::LaplacianSharpen
        );
        assert!(matches!(
            "gaussian".parse::<FilterMethod>(),
            Err(FilterLabError::InvalidParameter(_))
        ));
    }

    #[test]
    fn noise_selectors_parse() {
        assert_eq!("gaussian".parse::<NoiseMode>().unwrap(), NoiseMode::Gaussian);
        assert_eq!("s&p".parse::<NoiseMode>().unwrap(), NoiseMode::SaltAndPepper);
        assert_eq!(
            "salt-and-pepper".parse::<NoiseMode>().unwrap(),
            NoiseMode::SaltAndPepper
        );
        assert!("None".parse::<NoiseMode>().is_err());
    }

    #[test]
    fn mean_descriptor_depends_on_kernel_size() {
        let descriptor = FilterMethod::Mean.descriptor();
        assert_eq!(descriptor.name(), "Mean Filter");
        assert_eq!(
            descriptor.describe(KernelSize::new(5).unwrap()),
            "Kernel: 1/25 * ones(5,5)"
        );
    }

    #[test]
    fn fixed_descriptors_ignore_kernel_size() {
        let descriptor = FilterMethod::Median.descriptor();
        assert_eq!(
            descriptor.describe(KernelSize::new(3).unwrap()),
            descriptor.describe(KernelSize::new(15).unwrap())
        );
    }

    #[test]
    fn smoothing_prefix_only_for_sharpening_methods() {
        let k = KernelSize::default();
        let sobel = FilterRequest::new(FilterMethod::SobelEdge, k).with_pre_smoothing(true);
        assert_eq!(sobel.label(), "Smoothed then Sobel Edge Detection");

        let mean = FilterRequest::new(FilterMethod::Mean, k).with_pre_smoothing(true);
        assert!(!mean.pre_smooths());
        assert_eq!(mean.label(), "Mean Filter");
    }

    #[test]
    fn noise_params_validation() {
        assert!(NoiseParams::default().validate().is_ok());
        let bad = NoiseParams {
            salt_pepper_amount: 1.5,
            ..NoiseParams::default()
        };
        assert!(bad.validate().is_err());
    }
}
