// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for the command-line front end.
//
// Every technical error is mapped to plain English with a clear next step.
// Severity decides how the driver prints it and which exit code it uses.

use crate::error::FilterLabError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must do something first (load an image, apply a filter).
    ActionRequired,
    /// The input itself is unusable; retrying the same thing won't help.
    Permanent,
    /// Environment hiccup (disk full, locked file) — trying again may work.
    Transient,
}

/// A human-readable error with a plain English message and a suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    /// Severity level.
    pub severity: Severity,
}

impl HumanError {
    /// Process exit code the driver reports for this error.
    pub fn exit_code(&self) -> i32 {
        match self.severity {
            Severity::ActionRequired => 2,
            Severity::Permanent => 3,
            Severity::Transient => 4,
        }
    }
}

/// Convert a `FilterLabError` into a `HumanError`.
pub fn humanize_error(err: &FilterLabError) -> HumanError {
    match err {
        // -- Session errors --
        FilterLabError::NoImageLoaded => HumanError {
            message: "No image loaded.".into(),
            suggestion: "Load an image first, then add noise or apply a filter.".into(),
            severity: Severity::ActionRequired,
        },

        FilterLabError::NoResults => HumanError {
            message: "No results to save.".into(),
            suggestion: "Apply at least one filter or add noise before exporting the report.".into(),
            severity: Severity::ActionRequired,
        },

        FilterLabError::InvalidParameter(detail) => HumanError {
            message: "That setting isn't accepted.".into(),
            suggestion: format!(
                "Kernel sizes must be odd numbers from 3 to 15; methods are mean, median, mode, laplacian or sobel. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        // -- Document errors --
        FilterLabError::ImageError(_) => HumanError {
            message: "Could not read the image file.".into(),
            suggestion: "The image may be damaged or in an unusual format. Try a JPEG, PNG, TIFF or BMP file.".into(),
            severity: Severity::Permanent,
        },

        FilterLabError::PdfError(_) => HumanError {
            message: "There's a problem with the PDF report.".into(),
            suggestion: "The file may be damaged. Try exporting the report again.".into(),
            severity: Severity::Permanent,
        },

        // -- Storage --
        FilterLabError::Io(io_err) => match io_err.kind() {
            std::io::ErrorKind::NotFound => HumanError {
                message: "The file couldn't be found.".into(),
                suggestion: "Check the path and try again.".into(),
                severity: Severity::ActionRequired,
            },
            std::io::ErrorKind::PermissionDenied => HumanError {
                message: "Permission denied.".into(),
                suggestion: "Check the file or directory permissions, or choose a different output directory.".into(),
                severity: Severity::ActionRequired,
            },
            _ => HumanError {
                message: "There was a problem reading or writing a file.".into(),
                suggestion: "Try again. If this keeps happening, the disk may be full.".into(),
                severity: Severity::Transient,
            },
        },

        FilterLabError::Serialization(_) => HumanError {
            message: "The configuration file couldn't be read.".into(),
            suggestion: "Check that it is valid JSON, or remove it to use the defaults.".into(),
            severity: Severity::Permanent,
        },
    }
}
