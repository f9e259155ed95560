// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Command-line surface.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use filterlab_core::types::{FilterMethod, NoiseMode};

#[derive(Debug, Parser)]
#[command(name = "filterlab", version, about = "Grayscale spatial filtering workbench")]
pub struct Cli {
    /// JSON configuration file. Defaults to config.json in the data directory.
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Load an image, optionally add noise, apply filters in order, export the report.
    Run(RunArgs),
    /// Apply a single filter and write the result as PNG.
    Filter(FilterArgs),
    /// Add synthetic noise and write the result as PNG.
    Noise(NoiseArgs),
    /// Print the page count of a PDF report.
    Inspect {
        #[arg(value_name = "PDF")]
        path: PathBuf,
    },
    /// Print the effective configuration as JSON.
    Config {
        /// Also store it as the default configuration.
        #[arg(long)]
        save: bool,
    },
}

/// Kernel options shared by `run` and `filter`.
#[derive(Debug, Clone, Args)]
pub struct KernelArgs {
    /// Odd neighbourhood size in 3..=15. Defaults to the configured size.
    #[arg(short = 'k', long, value_name = "K")]
    pub kernel_size: Option<u32>,

    /// Median-smooth the input before sharpening or edge detection.
    #[arg(long)]
    pub smooth_before_sharpen: bool,
}

#[derive(Debug, Args)]
pub struct RunArgs {
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    /// Noise to inject before filtering (gaussian, salt-and-pepper).
    #[arg(long, value_name = "MODE")]
    pub noise: Option<NoiseMode>,

    /// Filter to apply; repeat for several (mean, median, mode, laplacian, sobel).
    #[arg(short, long = "filter", value_name = "METHOD")]
    pub filters: Vec<FilterMethod>,

    #[command(flatten)]
    pub kernel: KernelArgs,

    /// Report directory. Overrides the configured output_dir.
    #[arg(short, long, value_name = "DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write side-by-side comparison PNGs into this directory.
    #[arg(long, value_name = "DIR")]
    pub comparisons: Option<PathBuf>,

    /// Skip the PDF report.
    #[arg(long)]
    pub no_report: bool,
}

#[derive(Debug, Args)]
pub struct FilterArgs {
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[arg(short, long, value_name = "METHOD")]
    pub method: FilterMethod,

    #[command(flatten)]
    pub kernel: KernelArgs,

    #[arg(short, long, value_name = "PNG")]
    pub output: PathBuf,
}

#[derive(Debug, Args)]
pub struct NoiseArgs {
    #[arg(value_name = "IMAGE")]
    pub image: PathBuf,

    #[arg(long, value_name = "MODE")]
    pub mode: NoiseMode,

    #[arg(short, long, value_name = "PNG")]
    pub output: PathBuf,

    /// Seed for reproducible noise. Overrides the configured noise_seed.
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_collects_filters_in_order() {
        let cli = Cli::try_parse_from([
            "filterlab", "run", "lena.png", "--noise", "salt-and-pepper", "-f", "median", "-f",
            "sobel", "-k", "5", "--smooth-before-sharpen",
        ])
        .unwrap();

        let Command::Run(args) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(args.noise, Some(NoiseMode::SaltAndPepper));
        assert_eq!(args.filters, vec![FilterMethod::Median, FilterMethod::SobelEdge]);
        assert_eq!(args.kernel.kernel_size, Some(5));
        assert!(args.kernel.smooth_before_sharpen);
        assert!(!args.no_report);
    }

    #[test]
    fn config_flag_is_global() {
        let cli = Cli::try_parse_from(["filterlab", "inspect", "r.pdf", "--config", "c.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("c.json")));
    }

    #[test]
    fn unknown_method_is_rejected() {
        let err = Cli::try_parse_from(["filterlab", "filter", "a.png", "-m", "blur", "-o", "b.png"]);
        assert!(err.is_err());
    }

    #[test]
    fn noise_accepts_short_alias() {
        let cli = Cli::try_parse_from([
            "filterlab", "noise", "a.png", "--mode", "s&p", "-o", "b.png", "--seed", "3",
        ])
        .unwrap();
        let Command::Noise(args) = cli.command else {
            panic!("expected noise");
        };
        assert_eq!(args.mode, NoiseMode::SaltAndPepper);
        assert_eq!(args.seed, Some(3));
    }
}
