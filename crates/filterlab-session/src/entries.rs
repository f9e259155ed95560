// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ordered, label-unique log of session results.

use filterlab_core::types::{FilterRequest, NoiseMode, NoiseParams, ORIGINAL_LABEL};
use image::GrayImage;

/// How an entry was produced. Kept alongside the raster so the report can
/// describe each result with the parameters that actually made it.
#[derive(Debug, Clone, PartialEq)]
pub enum EntryKind {
    /// The pristine loaded image.
    Original,
    /// Synthetic noise applied to the original.
    Noise { mode: NoiseMode, params: NoiseParams },
    /// A spatial filter run on the working base.
    Filter {
        request: FilterRequest,
        /// Median kernel applied first, when pre-smoothing ran.
        pre_smooth: Option<u32>,
    },
}

/// One named result.
#[derive(Debug, Clone)]
pub struct Entry {
    pub label: String,
    pub raster: GrayImage,
    pub kind: EntryKind,
}

impl Entry {
    pub fn original(raster: GrayImage) -> Self {
        Self {
            label: ORIGINAL_LABEL.to_string(),
            raster,
            kind: EntryKind::Original,
        }
    }

    /// Text for the report's "Filter Expression" block.
    pub fn description(&self) -> Option<String> {
        match &self.kind {
            EntryKind::Original => None,
            EntryKind::Noise { mode, params } => Some(mode.describe(params)),
            EntryKind::Filter {
                request,
                pre_smooth,
            } => {
                let mut text = request.method.descriptor().describe(request.kernel_size);
                if let Some(k) = pre_smooth {
                    text.push_str(&format!("\n(Input median-smoothed with a {k}x{k} kernel first)"));
                }
                Some(text)
            }
        }
    }
}

/// Insertion-ordered entries with unique labels.
///
/// Re-inserting an existing label replaces the raster in place, so the entry
/// keeps its original position in the report.
#[derive(Debug, Clone, Default)]
pub struct EntryLog {
    entries: Vec<Entry>,
}

impl EntryLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop everything and start over from `{Original: original}`.
    pub fn reset_to(&mut self, original: GrayImage) {
        self.entries.clear();
        self.entries.push(Entry::original(original));
    }

    /// Insert or overwrite by label; returns the stored entry.
    pub fn insert(&mut self, entry: Entry) -> &Entry {
        let idx = match self.position(&entry.label) {
            Some(idx) => {
                self.entries[idx] = entry;
                idx
            }
            None => {
                self.entries.push(entry);
                self.entries.len() - 1
            }
        };
        &self.entries[idx]
    }

    pub fn get(&self, label: &str) -> Option<&Entry> {
        self.position(label).map(|idx| &self.entries[idx])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Labels in insertion order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|e| e.label.as_str())
    }

    /// Everything except the Original entry, in insertion order.
    pub fn results(&self) -> impl Iterator<Item = &Entry> {
        self.entries
            .iter()
            .filter(|e| e.kind != EntryKind::Original)
    }

    fn position(&self, label: &str) -> Option<usize> {
        self.entries.iter().position(|e| e.label == label)
    }
}
