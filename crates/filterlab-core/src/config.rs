// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::{FilterLabError, Result};
use crate::types::{KernelSize, NoiseParams, PaperSize};

/// Persistent application settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Directory that receives `{image}_Filtering_Report.pdf`.
    pub output_dir: PathBuf,
    /// Where side-by-side comparison PNGs are written, if anywhere.
    pub comparison_dir: Option<PathBuf>,
    /// Page size of the exported report.
    pub paper_size: PaperSize,
    /// Kernel size used when a filter is requested without one.
    pub default_kernel_size: u32,
    /// Median kernel applied before sharpening/edge detection on request.
    pub pre_smooth_kernel_size: u32,
    /// Variance of Gaussian noise on the [0, 1] intensity scale.
    pub gaussian_variance: f64,
    /// Fraction of samples replaced by salt-and-pepper noise.
    pub salt_pepper_amount: f64,
    /// Share of replaced samples that become salt (white).
    pub salt_vs_pepper: f64,
    /// Fixed seed for the noise source. `None` seeds from the OS.
    pub noise_seed: Option<u64>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("results"),
            comparison_dir: None,
            paper_size: PaperSize::Letter,
            default_kernel_size: 3,
            pre_smooth_kernel_size: 5,
            gaussian_variance: 0.01,
            salt_pepper_amount: 0.05,
            salt_vs_pepper: 0.5,
            noise_seed: None,
        }
    }
}

impl AppConfig {
    /// Reject settings that would make later operations fail halfway through.
    pub fn validate(&self) -> Result<()> {
        KernelSize::new(self.default_kernel_size)?;
        if self.pre_smooth_kernel_size == 0 || self.pre_smooth_kernel_size % 2 == 0 {
            return Err(FilterLabError::InvalidParameter(format!(
                "pre-smoothing kernel must be odd and positive, got {}",
                self.pre_smooth_kernel_size
            )));
        }
        self.noise_params().validate()
    }

    /// Noise parameters derived from the configuration.
    pub fn noise_params(&self) -> NoiseParams {
        NoiseParams {
            gaussian_variance: self.gaussian_variance,
            salt_pepper_amount: self.salt_pepper_amount,
            salt_vs_pepper: self.salt_vs_pepper,
        }
    }

    /// Parse a JSON configuration document.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_classroom_settings() {
        let config = AppConfig::default();
        assert_eq!(config.output_dir, PathBuf::from("results"));
        assert_eq!(config.default_kernel_size, 3);
        assert_eq!(config.pre_smooth_kernel_size, 5);
        assert!((config.gaussian_variance - 0.01).abs() < f64::EPSILON);
        assert!((config.salt_pepper_amount - 0.05).abs() < f64::EPSILON);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config = AppConfig::from_json(r#"{ "noise_seed": 7, "paper_size": "A4" }"#).unwrap();
        assert_eq!(config.noise_seed, Some(7));
        assert_eq!(config.paper_size, PaperSize::A4);
        assert_eq!(config.default_kernel_size, 3);
    }

    #[test]
    fn even_default_kernel_is_rejected() {
        let err = AppConfig::from_json(r#"{ "default_kernel_size": 4 }"#).unwrap_err();
        assert!(matches!(err, FilterLabError::InvalidParameter(_)));
    }

    #[test]
    fn malformed_json_is_a_serialization_error() {
        let err = AppConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, FilterLabError::Serialization(_)));
    }
}
