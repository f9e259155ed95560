// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Session — owns the loaded image, the working base and the result log.
//
// Every operation computes its output before touching session state, so a
// failed call leaves the session exactly as it was.

use std::borrow::Cow;
use std::path::{Path, PathBuf};

use chrono::Local;
use filterlab_core::config::AppConfig;
use filterlab_core::error::{FilterLabError, Result};
use filterlab_core::types::{FilterRequest, NoiseMode, NoiseParams, PaperSize};
use filterlab_imaging::filter::median_filter;
use filterlab_imaging::raster::open_grayscale;
use filterlab_imaging::{ReportWriter, add_noise, apply_method};
use image::GrayImage;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, instrument};

use crate::entries::{Entry, EntryKind, EntryLog};
use crate::report::{self, REPORT_TITLE};

/// Where the session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// Nothing loaded yet.
    Empty,
    /// Image loaded (or reset); only the Original entry exists.
    Loaded,
    /// The most recent operation injected noise.
    Noised,
    /// The most recent operation was a filter.
    Filtered,
}

/// Tunables the session needs from the application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSettings {
    pub noise: NoiseParams,
    /// Median kernel used by the optional pre-smoothing step.
    pub pre_smooth_kernel_size: u32,
    pub paper_size: PaperSize,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self::from_config(&AppConfig::default())
    }
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            noise: config.noise_params(),
            pre_smooth_kernel_size: config.pre_smooth_kernel_size,
            paper_size: config.paper_size,
        }
    }
}

#[derive(Debug, Clone)]
struct LoadedImage {
    name: String,
    original: GrayImage,
    working_base: GrayImage,
}

/// Interactive filtering session.
///
/// Generic over the random source so noise can be reproduced in tests.
pub struct Session<R = StdRng> {
    image: Option<LoadedImage>,
    entries: EntryLog,
    settings: SessionSettings,
    rng: R,
    last: SessionState,
}

impl Session<StdRng> {
    /// New session with a generator seeded from the operating system.
    pub fn new(settings: SessionSettings) -> Self {
        Self::with_rng(settings, StdRng::from_os_rng())
    }

    /// Build a session from the application config, honouring `noise_seed`.
    pub fn from_config(config: &AppConfig) -> Self {
        let rng = match config.noise_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self::with_rng(SessionSettings::from_config(config), rng)
    }
}

impl<R: Rng> Session<R> {
    pub fn with_rng(settings: SessionSettings, rng: R) -> Self {
        Self {
            image: None,
            entries: EntryLog::new(),
            settings,
            rng,
            last: SessionState::Empty,
        }
    }

    // -- Loading --------------------------------------------------------------

    /// Read an image file as grayscale and start a fresh session on it.
    ///
    /// The report name is the file stem. On failure the previous session is
    /// kept as is.
    #[instrument(skip(self, path), fields(path = %path.as_ref().display()))]
    pub fn load(&mut self, path: impl AsRef<Path>) -> Result<&GrayImage> {
        let path = path.as_ref();
        let raster = open_grayscale(path)?;
        let name = path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .filter(|stem| !stem.is_empty())
            .unwrap_or_else(|| "image".to_string());
        Ok(self.load_image(name, raster))
    }

    /// Start a fresh session on an already decoded raster.
    pub fn load_image(&mut self, name: impl Into<String>, raster: GrayImage) -> &GrayImage {
        let name = name.into();
        info!(name = %name, width = raster.width(), height = raster.height(), "Session loaded");
        self.entries.reset_to(raster.clone());
        self.last = SessionState::Loaded;
        let loaded = self.image.insert(LoadedImage {
            name,
            working_base: raster.clone(),
            original: raster,
        });
        &loaded.original
    }

    /// Drop every result and restore the working base to the original.
    pub fn reset(&mut self) -> Result<()> {
        let image = self.image.as_mut().ok_or(FilterLabError::NoImageLoaded)?;
        image.working_base = image.original.clone();
        self.entries.reset_to(image.original.clone());
        self.last = SessionState::Loaded;
        info!("Session reset");
        Ok(())
    }

    // -- Operations -----------------------------------------------------------

    /// Corrupt a copy of the original and make it the new working base.
    ///
    /// Noise is always computed from the original, so repeated calls do not
    /// stack.
    #[instrument(skip(self))]
    pub fn inject_noise(&mut self, mode: NoiseMode) -> Result<&GrayImage> {
        let image = self.image.as_mut().ok_or(FilterLabError::NoImageLoaded)?;
        let params = self.settings.noise;
        let noisy = add_noise(&image.original, mode, &params, &mut self.rng)?;

        image.working_base = noisy.clone();
        self.entries.insert(Entry {
            label: mode.label().to_string(),
            raster: noisy,
            kind: EntryKind::Noise { mode, params },
        });
        self.last = SessionState::Noised;
        info!(label = mode.label(), "Noise injected");
        Ok(&image.working_base)
    }

    /// Run a filter on the working base and record the result.
    #[instrument(skip(self), fields(method = request.method.label(), k = request.kernel_size.get()))]
    pub fn apply_filter(&mut self, request: FilterRequest) -> Result<&GrayImage> {
        let image = self.image.as_ref().ok_or(FilterLabError::NoImageLoaded)?;

        let pre_smooth = request
            .pre_smooths()
            .then_some(self.settings.pre_smooth_kernel_size);
        let input = match pre_smooth {
            Some(k) => {
                debug!(k, "Pre-smoothing with median filter");
                Cow::Owned(median_filter(&image.working_base, k)?)
            }
            None => Cow::Borrowed(&image.working_base),
        };
        let output = apply_method(&input, request.method, request.kernel_size)?;

        let label = request.label();
        info!(label = %label, "Filter applied");
        self.last = SessionState::Filtered;
        let entry = self.entries.insert(Entry {
            label,
            raster: output,
            kind: EntryKind::Filter {
                request,
                pre_smooth,
            },
        });
        Ok(&entry.raster)
    }

    // -- Report ---------------------------------------------------------------

    /// Render the report PDF in memory.
    pub fn render_report(&self) -> Result<Vec<u8>> {
        let image = self.image.as_ref().ok_or(FilterLabError::NoImageLoaded)?;
        let results = self.entries.results().count();
        if results == 0 {
            return Err(FilterLabError::NoResults);
        }

        let cover = report::build_cover(&image.name, Local::now(), results);
        let pages = report::build_pages(&image.original, &self.entries);
        let mut writer = ReportWriter::new(self.settings.paper_size);
        writer.set_title(format!("{REPORT_TITLE}: {}", image.name));
        writer.render(&cover, &pages)
    }

    /// Write `{output_dir}/{image_name}_Filtering_Report.pdf`, creating the
    /// directory if needed. Returns the path written.
    #[instrument(skip(self, output_dir), fields(dir = %output_dir.as_ref().display()))]
    pub fn export_report(&self, output_dir: impl AsRef<Path>) -> Result<PathBuf> {
        let bytes = self.render_report()?;
        let output_dir = output_dir.as_ref();
        std::fs::create_dir_all(output_dir)?;

        let path = output_dir.join(report::report_file_name(self.image_name().unwrap_or("image")));
        std::fs::write(&path, &bytes)?;
        info!(path = %path.display(), bytes = bytes.len(), "Report exported");
        Ok(path)
    }

    // -- Accessors ------------------------------------------------------------

    pub fn original(&self) -> Option<&GrayImage> {
        self.image.as_ref().map(|image| &image.original)
    }

    pub fn working_base(&self) -> Option<&GrayImage> {
        self.image.as_ref().map(|image| &image.working_base)
    }

    pub fn image_name(&self) -> Option<&str> {
        self.image.as_ref().map(|image| image.name.as_str())
    }

    pub fn entries(&self) -> &EntryLog {
        &self.entries
    }

    pub fn entry(&self, label: &str) -> Option<&Entry> {
        self.entries.get(label)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    pub fn state(&self) -> SessionState {
        self.last
    }
}
