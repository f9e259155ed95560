// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Report writer — lay out a filtering analysis as a multi-page PDF using
// `printpdf` 0.8.
//
// printpdf 0.8 uses a data-oriented API: documents are built by constructing
// `PdfPage` structs containing `Vec<Op>` operation lists, then serialised via
// `PdfDocument::save()`.

use std::path::Path;

use filterlab_core::PaperSize;
use filterlab_core::error::{FilterLabError, Result};
use image::GrayImage;
use printpdf::{
    BuiltinFont, Mm, Op, PdfDocument, PdfPage, PdfSaveOptions, PdfWarnMsg, Point, Pt, RawImage,
    RawImageData, RawImageFormat, TextItem, XObjectTransform,
};
use tracing::{debug, info, instrument, warn};

use crate::raster::io::to_rgb_bytes;

const MARGIN_MM: f32 = 15.0;
const PANEL_GAP_PT: f32 = 18.0;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_GLYPH_WIDTH: f32 = 0.50;

/// Title page content.
#[derive(Debug, Clone)]
pub struct CoverPage {
    /// Large heading, e.g. "Spatial Filtering Analysis".
    pub title: String,
    /// Identifier of the analysed image.
    pub image_name: String,
    /// Extra centred lines under the identifier (timestamp, parameters).
    pub notes: Vec<String>,
}

/// One analysis page: original and processed rasters side by side.
#[derive(Debug, Clone)]
pub struct ReportPage<'a> {
    pub heading: String,
    pub original: &'a GrayImage,
    pub processed: &'a GrayImage,
    /// Kernel/expression text shown under "Filter Expression:".
    pub description: Option<String>,
}

/// Renders cover and comparison pages into a PDF document.
pub struct ReportWriter {
    /// Paper size for page creation.
    paper_size: PaperSize,
    /// Title metadata embedded in the PDF /Info dictionary.
    title: Option<String>,
}

impl ReportWriter {
    /// Create a new writer targeting the given paper size.
    pub fn new(paper_size: PaperSize) -> Self {
        Self {
            paper_size,
            title: None,
        }
    }

    /// Create a new writer defaulting to US Letter.
    pub fn letter() -> Self {
        Self::new(PaperSize::Letter)
    }

    /// Set a title for the PDF metadata.
    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = Some(title.into());
    }

    /// Paper dimensions in printpdf's Mm units.
    fn page_dimensions(&self) -> (Mm, Mm) {
        let (w_mm, h_mm) = self.paper_size.dimensions_mm();
        (Mm(w_mm as f32), Mm(h_mm as f32))
    }

    // -- Rendering ------------------------------------------------------------

    /// Render the cover page followed by one page per entry in `pages`.
    #[instrument(skip_all, fields(pages = pages.len() + 1))]
    pub fn render(&self, cover: &CoverPage, pages: &[ReportPage<'_>]) -> Result<Vec<u8>> {
        let (page_w, page_h) = self.page_dimensions();
        if page_w.0 <= 2.0 * MARGIN_MM || page_h.0 <= 2.0 * MARGIN_MM {
            return Err(FilterLabError::PdfError(format!(
                "paper {:?} is too small for the report layout",
                self.paper_size
            )));
        }
        let title = self.title.as_deref().unwrap_or(&cover.title);

        info!(paper = ?self.paper_size, title, "Rendering report");

        let mut doc = PdfDocument::new(title);
        let mut pdf_pages = Vec::with_capacity(pages.len() + 1);
        pdf_pages.push(PdfPage::new(page_w, page_h, self.cover_ops(cover)));

        for page in pages {
            let ops = self.comparison_ops(&mut doc, page);
            pdf_pages.push(PdfPage::new(page_w, page_h, ops));
        }

        doc.with_pages(pdf_pages);

        let mut warnings: Vec<PdfWarnMsg> = Vec::new();
        let output = doc.save(&PdfSaveOptions::default(), &mut warnings);
        if !warnings.is_empty() {
            warn!(count = warnings.len(), "printpdf reported warnings while saving");
        }

        debug!(bytes = output.len(), "Report serialised");
        Ok(output)
    }

    /// Render the report and write it to `path`.
    pub fn write_to_file(
        &self,
        cover: &CoverPage,
        pages: &[ReportPage<'_>],
        path: impl AsRef<Path>,
    ) -> Result<()> {
        let bytes = self.render(cover, pages)?;
        std::fs::write(path.as_ref(), &bytes)?;
        info!("Wrote report PDF to {}", path.as_ref().display());
        Ok(())
    }

    // -- Page layout ----------------------------------------------------------

    fn cover_ops(&self, cover: &CoverPage) -> Vec<Op> {
        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;

        let mut ops = Vec::new();
        push_centered(
            &mut ops,
            &cover.title,
            page_w_pt,
            page_h_pt * 0.8,
            20.0,
            BuiltinFont::HelveticaBold,
        );
        push_centered(
            &mut ops,
            &format!("Image: {}", cover.image_name),
            page_w_pt,
            page_h_pt * 0.7,
            14.0,
            BuiltinFont::Helvetica,
        );
        for (idx, note) in cover.notes.iter().enumerate() {
            let y = page_h_pt * 0.7 - 24.0 - idx as f32 * 14.0;
            push_centered(&mut ops, note, page_w_pt, y, 11.0, BuiltinFont::Helvetica);
        }
        ops
    }

    fn comparison_ops(&self, doc: &mut PdfDocument, page: &ReportPage<'_>) -> Vec<Op> {
        let (page_w, page_h) = self.page_dimensions();
        let page_w_pt = page_w.into_pt().0;
        let page_h_pt = page_h.into_pt().0;
        let margin_pt = Mm(MARGIN_MM).into_pt().0;
        let usable_w_pt = page_w_pt - 2.0 * margin_pt;

        let mut ops = Vec::new();

        // Heading.
        let heading_y = page_h_pt - margin_pt - 16.0;
        push_centered(
            &mut ops,
            &page.heading,
            page_w_pt,
            heading_y,
            16.0,
            BuiltinFont::HelveticaBold,
        );

        // Two panels with captions above them.
        let panel_w = (usable_w_pt - PANEL_GAP_PT) / 2.0;
        let panel_h = page_h_pt * 0.45;
        let caption_y = heading_y - 36.0;
        let panel_top = caption_y - 10.0;
        let panel_bottom = panel_top - panel_h;

        for (idx, (caption, raster)) in [("Original", page.original), ("Processed", page.processed)]
            .into_iter()
            .enumerate()
        {
            let panel_x = margin_pt + idx as f32 * (panel_w + PANEL_GAP_PT);
            let caption_w = estimate_text_width(caption, 12.0);
            push_text(
                &mut ops,
                caption,
                panel_x + (panel_w - caption_w) / 2.0,
                caption_y,
                12.0,
                BuiltinFont::Helvetica,
            );
            if let Some(op) = place_image(doc, raster, panel_x, panel_bottom, panel_w, panel_h) {
                ops.push(op);
            }
        }

        // Filter expression block.
        if let Some(description) = &page.description {
            let font_size = 10.0;
            let line_height = 12.0;
            let mut y = panel_bottom - 30.0;
            push_text(
                &mut ops,
                "Filter Expression:",
                margin_pt,
                y,
                font_size,
                BuiltinFont::HelveticaBold,
            );
            let max_chars = (usable_w_pt / (AVG_GLYPH_WIDTH * font_size)) as usize;
            for line in wrap_text(description, max_chars.max(1)) {
                y -= line_height;
                if y < margin_pt {
                    warn!(heading = %page.heading, "Description truncated at page bottom");
                    break;
                }
                push_text(&mut ops, &line, margin_pt, y, font_size, BuiltinFont::Helvetica);
            }
        }

        ops
    }
}

// -- Drawing helpers ----------------------------------------------------------

/// Embed `raster` and return the op that draws it scaled to fit the given box
/// (bottom-left origin), centred, preserving aspect ratio. Empty rasters are
/// skipped.
fn place_image(
    doc: &mut PdfDocument,
    raster: &GrayImage,
    box_x: f32,
    box_y: f32,
    box_w: f32,
    box_h: f32,
) -> Option<Op> {
    let (width, height) = raster.dimensions();
    if width == 0 || height == 0 {
        return None;
    }

    let raw = RawImage {
        pixels: RawImageData::U8(to_rgb_bytes(raster)),
        width: width as usize,
        height: height as usize,
        data_format: RawImageFormat::RGB8,
        tag: Vec::new(),
    };
    let xobject_id = doc.add_image(&raw);

    // At 72 dpi one pixel is one point, so the scale maps pixels to points.
    let dpi: f32 = 72.0;
    let scale = (box_w / width as f32).min(box_h / height as f32);
    let rendered_w = width as f32 * scale;
    let rendered_h = height as f32 * scale;

    Some(Op::UseXobject {
        id: xobject_id,
        transform: XObjectTransform {
            translate_x: Some(Pt(box_x + (box_w - rendered_w) / 2.0)),
            translate_y: Some(Pt(box_y + (box_h - rendered_h) / 2.0)),
            scale_x: Some(scale),
            scale_y: Some(scale),
            dpi: Some(dpi),
            rotate: None,
        },
    })
}

fn push_text(ops: &mut Vec<Op>, text: &str, x_pt: f32, y_pt: f32, size: f32, font: BuiltinFont) {
    ops.push(Op::StartTextSection);
    ops.push(Op::SetTextCursor {
        pos: Point {
            x: Pt(x_pt),
            y: Pt(y_pt),
        },
    });
    ops.push(Op::SetFontSizeBuiltinFont {
        size: Pt(size),
        font,
    });
    ops.push(Op::WriteTextBuiltinFont {
        items: vec![TextItem::Text(text.to_string())],
        font,
    });
    ops.push(Op::EndTextSection);
}

fn push_centered(
    ops: &mut Vec<Op>,
    text: &str,
    page_w_pt: f32,
    y_pt: f32,
    size: f32,
    font: BuiltinFont,
) {
    let x = ((page_w_pt - estimate_text_width(text, size)) / 2.0).max(0.0);
    push_text(ops, text, x, y_pt, size, font);
}

fn estimate_text_width(text: &str, size: f32) -> f32 {
    text.chars().count() as f32 * AVG_GLYPH_WIDTH * size
}

// -- Text wrapping helper -----------------------------------------------------

/// Wrap a multi-line string so that no line exceeds `max_width` characters.
///
/// Splits on existing newlines first, then word-wraps each paragraph. Words
/// longer than `max_width` are force-broken.
fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut result = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::with_capacity(max_width);

        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_width {
                if !current.is_empty() {
                    result.push(std::mem::take(&mut current));
                }
                let rest = word.split_off(max_width);
                result.push(word.into_iter().collect());
                word = rest;
            }
            if word.is_empty() {
                continue;
            }

            let needed = if current.is_empty() { word.len() } else { word.len() + 1 };
            if current.chars().count() + needed > max_width {
                result.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.extend(word);
        }

        result.push(current);
    }

    result
}
