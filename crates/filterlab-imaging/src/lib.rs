// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// filterlab-imaging — Image pipeline for FilterLab.
//
// Provides the grayscale spatial filters (mean, median, mode, Laplacian
// sharpening, Sobel edges), synthetic noise models, raster loading/encoding,
// and PDF report generation and inspection.

pub mod filter;
pub mod pdf;
pub mod raster;

// Re-export the primary entry points so callers can use `filterlab_imaging::apply_method` etc.
pub use filter::{add_noise, apply_method};
pub use pdf::reader::PdfReader;
pub use pdf::writer::{CoverPage, ReportPage, ReportWriter};
