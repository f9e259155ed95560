// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Presentation of intermediate results. The session never calls a presenter
// itself; drivers hand each result over after the operation succeeds.

use std::path::PathBuf;

use filterlab_core::error::Result;
use filterlab_imaging::raster::{save_png, side_by_side};
use image::GrayImage;
use tracing::info;

/// White columns between the two panels of a comparison.
pub const COMPARISON_GUTTER: u32 = 8;

/// Something that can show an original/result pair to the user.
pub trait Presenter {
    fn present(&mut self, title: &str, original: &GrayImage, result: &GrayImage) -> Result<()>;
}

/// Discards everything. Used when no comparisons were requested.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullPresenter;

impl Presenter for NullPresenter {
    fn present(&mut self, _title: &str, _original: &GrayImage, _result: &GrayImage) -> Result<()> {
        Ok(())
    }
}

/// Writes `{dir}/{slug(title)}.png` with original left, result right.
#[derive(Debug, Clone)]
pub struct ComparisonWriter {
    dir: PathBuf,
    written: Vec<PathBuf>,
}

impl ComparisonWriter {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            written: Vec::new(),
        }
    }

    /// Files written so far, in order.
    pub fn written(&self) -> &[PathBuf] {
        &self.written
    }
}

impl Presenter for ComparisonWriter {
    fn present(&mut self, title: &str, original: &GrayImage, result: &GrayImage) -> Result<()> {
        let panel = side_by_side(original, result, COMPARISON_GUTTER);
        let path = self.dir.join(format!("{}.png", slug(title)));
        save_png(&panel, &path)?;
        info!(title, path = %path.display(), "Comparison written");
        self.written.push(path);
        Ok(())
    }
}

/// Lower-case ASCII alphanumerics joined by single underscores.
///
/// "Base: Salt & Pepper Noise" becomes "base_salt_pepper_noise".
pub fn slug(title: &str) -> String {
    let mut out = String::with_capacity(title.len());
    for word in title
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|w| !w.is_empty())
    {
        if !out.is_empty() {
            out.push('_');
        }
        out.push_str(&word.to_ascii_lowercase());
    }
    if out.is_empty() {
        out.push_str("result");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn slugs_are_filesystem_friendly() {
        assert_eq!(slug("Base: Salt & Pepper Noise"), "base_salt_pepper_noise");
        assert_eq!(
            slug("Smoothed then Sobel Edge Detection"),
            "smoothed_then_sobel_edge_detection"
        );
        assert_eq!(slug("  --  "), "result");
    }

    #[test]
    fn comparison_is_written_side_by_side() {
        let dir = tempfile::tempdir().unwrap();
        let mut writer = ComparisonWriter::new(dir.path().join("cmp"));
        let original = GrayImage::from_pixel(5, 4, Luma([0u8]));
        let result = GrayImage::from_pixel(5, 4, Luma([100u8]));

        writer.present("Mean Filter", &original, &result).unwrap();

        let path = dir.path().join("cmp/mean_filter.png");
        assert_eq!(writer.written(), &[path.clone()]);
        let panel = image::open(&path).unwrap().into_luma8();
        assert_eq!(panel.dimensions(), (5 + COMPARISON_GUTTER + 5, 4));
        assert_eq!(panel.get_pixel(0, 0).0[0], 0);
        assert_eq!(panel.get_pixel(5, 0).0[0], 255);
        assert_eq!(panel.get_pixel(5 + COMPARISON_GUTTER, 3).0[0], 100);
    }

    #[test]
    fn null_presenter_accepts_anything() {
        let image = GrayImage::new(1, 1);
        assert!(NullPresenter.present("x", &image, &image).is_ok());
    }
}
