// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Subcommand implementations. Each one drives a `Session` and reports what it
// wrote on stdout; diagnostics go through tracing.

use std::path::{Path, PathBuf};

use filterlab_core::AppConfig;
use filterlab_core::error::Result;
use filterlab_core::types::{FilterRequest, KernelSize};
use filterlab_imaging::PdfReader;
use filterlab_imaging::raster::save_png;
use filterlab_session::{ComparisonWriter, NullPresenter, Presenter, Session};
use tracing::{info, warn};

use crate::cli::{FilterArgs, KernelArgs, NoiseArgs, RunArgs};
use crate::services::config_store;

/// Title used when the untouched original is presented.
const ORIGINAL_TITLE: &str = "Original Image";

/// Outcome of a `run`, mostly for tests.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub entries: usize,
    pub report: Option<PathBuf>,
    pub comparisons: Vec<PathBuf>,
}

/// Full session: load, optional noise, filters in order, report.
pub fn run(config: &AppConfig, args: &RunArgs) -> Result<RunSummary> {
    let kernel_size = resolve_kernel_size(config, &args.kernel)?;
    let mut session = Session::from_config(config);

    let comparison_dir = args.comparisons.clone().or_else(|| config.comparison_dir.clone());
    let mut writer = comparison_dir.map(ComparisonWriter::new);
    let mut null = NullPresenter;
    let presenter: &mut dyn Presenter = match writer.as_mut() {
        Some(writer) => writer,
        None => &mut null,
    };

    let original = session.load(&args.image)?.clone();
    presenter.present(ORIGINAL_TITLE, &original, &original)?;

    if let Some(mode) = args.noise {
        let noisy = session.inject_noise(mode)?;
        presenter.present(mode.label(), &original, noisy)?;
    }

    if args.filters.is_empty() && args.noise.is_none() {
        warn!("No noise or filters requested; nothing to report");
    }

    for &method in &args.filters {
        let request = FilterRequest::new(method, kernel_size)
            .with_pre_smoothing(args.kernel.smooth_before_sharpen);
        let label = request.label();
        let result = session.apply_filter(request)?;
        presenter.present(&label, &original, result)?;
        println!("{label}: done");
    }

    let report = if args.no_report {
        None
    } else {
        let dir = args.output_dir.as_deref().unwrap_or(config.output_dir.as_path());
        let path = session.export_report(dir)?;
        println!("Report saved to {}", path.display());
        Some(path)
    };

    Ok(RunSummary {
        entries: session.entries().len(),
        report,
        comparisons: writer.map(|w| w.written().to_vec()).unwrap_or_default(),
    })
}

/// One filter, straight to a PNG.
pub fn filter(config: &AppConfig, args: &FilterArgs) -> Result<()> {
    let kernel_size = resolve_kernel_size(config, &args.kernel)?;
    let request = FilterRequest::new(args.method, kernel_size)
        .with_pre_smoothing(args.kernel.smooth_before_sharpen);

    let mut session = Session::from_config(config);
    session.load(&args.image)?;
    let result = session.apply_filter(request)?;
    save_png(result, &args.output)?;
    println!("{} written to {}", request.label(), args.output.display());
    Ok(())
}

/// Noise only, straight to a PNG.
pub fn noise(config: &AppConfig, args: &NoiseArgs) -> Result<()> {
    let config = AppConfig {
        noise_seed: args.seed.or(config.noise_seed),
        ..config.clone()
    };
    let mut session = Session::from_config(&config);
    session.load(&args.image)?;
    let noisy = session.inject_noise(args.mode)?;
    save_png(noisy, &args.output)?;
    println!("{} written to {}", args.mode.label(), args.output.display());
    Ok(())
}

/// Print how many pages a report has.
pub fn inspect(path: &Path) -> Result<usize> {
    let reader = PdfReader::open(path)?;
    let pages = reader.page_count();
    info!(pages, "Report inspected");
    println!("{}: {pages} page(s)", path.display());
    Ok(pages)
}

/// Print the effective configuration, optionally storing it as the default.
pub fn show_config(config: &AppConfig, save_to: Option<&Path>) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(config)?);
    if let Some(data_dir) = save_to {
        let path = config_store::persist_config(data_dir, config)?;
        println!("Saved to {}", path.display());
    }
    Ok(())
}

fn resolve_kernel_size(config: &AppConfig, args: &KernelArgs) -> Result<KernelSize> {
    KernelSize::new(args.kernel_size.unwrap_or(config.default_kernel_size))
}

#[cfg(test)]
mod tests {
    use super::*;
    use filterlab_core::FilterLabError;
    use filterlab_core::types::{FilterMethod, NoiseMode};
    use image::{GrayImage, Luma};

    fn write_card(dir: &Path) -> PathBuf {
        let path = dir.join("card.png");
        GrayImage::from_fn(48, 32, |x, y| Luma([((x * 5 + y * 3) % 256) as u8]))
            .save(&path)
            .unwrap();
        path
    }

    fn kernel(k: Option<u32>) -> KernelArgs {
        KernelArgs {
            kernel_size: k,
            smooth_before_sharpen: false,
        }
    }

    fn seeded_config() -> AppConfig {
        AppConfig {
            noise_seed: Some(5),
            ..AppConfig::default()
        }
    }

    #[test]
    fn run_exports_report_and_comparisons() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            image: write_card(dir.path()),
            noise: Some(NoiseMode::Gaussian),
            filters: vec![FilterMethod::Mean, FilterMethod::Mode],
            kernel: kernel(Some(5)),
            output_dir: Some(dir.path().join("results")),
            comparisons: Some(dir.path().join("cmp")),
            no_report: false,
        };

        let summary = run(&seeded_config(), &args).unwrap();
        assert_eq!(summary.entries, 4);
        let report = summary.report.unwrap();
        assert_eq!(report, dir.path().join("results/card_Filtering_Report.pdf"));
        assert_eq!(inspect(&report).unwrap(), 4);
        // Original, noise, two filters.
        assert_eq!(summary.comparisons.len(), 4);
        assert!(dir.path().join("cmp/base_gaussian_noise.png").exists());
    }

    #[test]
    fn run_without_results_reports_no_results() {
        let dir = tempfile::tempdir().unwrap();
        let args = RunArgs {
            image: write_card(dir.path()),
            noise: None,
            filters: Vec::new(),
            kernel: kernel(None),
            output_dir: Some(dir.path().join("results")),
            comparisons: None,
            no_report: false,
        };
        let err = run(&seeded_config(), &args).unwrap_err();
        assert!(matches!(err, FilterLabError::NoResults));
    }

    #[test]
    fn even_kernel_is_rejected_before_loading() {
        let args = FilterArgs {
            image: PathBuf::from("/does/not/matter.png"),
            method: FilterMethod::Mean,
            kernel: kernel(Some(4)),
            output: PathBuf::from("/tmp/never.png"),
        };
        let err = filter(&AppConfig::default(), &args).unwrap_err();
        assert!(matches!(err, FilterLabError::InvalidParameter(_)));
    }

    #[test]
    fn filter_writes_png_of_same_size() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out/sobel.png");
        let args = FilterArgs {
            image: write_card(dir.path()),
            method: FilterMethod::SobelEdge,
            kernel: kernel(None),
            output: output.clone(),
        };
        filter(&AppConfig::default(), &args).unwrap();
        assert_eq!(image::open(&output).unwrap().into_luma8().dimensions(), (48, 32));
    }

    #[test]
    fn seeded_noise_is_reproducible() {
        let dir = tempfile::tempdir().unwrap();
        let image = write_card(dir.path());
        let mut outputs = Vec::new();
        for name in ["a.png", "b.png"] {
            let args = NoiseArgs {
                image: image.clone(),
                mode: NoiseMode::SaltAndPepper,
                output: dir.path().join(name),
                seed: Some(99),
            };
            noise(&AppConfig::default(), &args).unwrap();
            outputs.push(std::fs::read(dir.path().join(name)).unwrap());
        }
        assert_eq!(outputs[0], outputs[1]);
    }
}
