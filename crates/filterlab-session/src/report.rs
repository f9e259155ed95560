// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report assembly — turns an entry log into cover + comparison pages.

use chrono::{DateTime, Local};
use filterlab_imaging::{CoverPage, ReportPage};
use image::GrayImage;

use crate::entries::EntryLog;

/// Heading on the report cover.
pub const REPORT_TITLE: &str = "Spatial Filtering Analysis";

/// `{image_name}_Filtering_Report.pdf`
pub fn report_file_name(image_name: &str) -> String {
    format!("{image_name}_Filtering_Report.pdf")
}

pub fn build_cover(image_name: &str, generated_at: DateTime<Local>, results: usize) -> CoverPage {
    CoverPage {
        title: REPORT_TITLE.to_string(),
        image_name: image_name.to_string(),
        notes: vec![
            format!("Generated: {}", generated_at.format("%Y-%m-%d %H:%M:%S")),
            format!("Results analysed: {results}"),
        ],
    }
}

/// One page per non-Original entry, each paired with the pristine original.
pub fn build_pages<'a>(original: &'a GrayImage, log: &'a EntryLog) -> Vec<ReportPage<'a>> {
    log.results()
        .map(|entry| ReportPage {
            heading: format!("Analysis: {}", entry.label),
            original,
            processed: &entry.raster,
            description: entry.description(),
        })
        .collect()
}
