// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for FilterLab.

use thiserror::Error;

/// Top-level error type for all FilterLab operations.
#[derive(Debug, Error)]
pub enum FilterLabError {
    // -- Session errors --
    #[error("no image loaded")]
    NoImageLoaded,

    #[error("no results to report: only the original image is recorded")]
    NoResults,

    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    // -- Document errors --
    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FilterLabError>;
