// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// filterlab-session — The stateful half of FilterLab.
//
// A `Session` owns the loaded original, the working base that filters read
// from, and the ordered log of named results destined for the PDF report.
// Presentation is decoupled through the `Presenter` trait.

pub mod entries;
pub mod presenter;
pub mod report;
pub mod session;

pub use entries::{Entry, EntryKind, EntryLog};
pub use presenter::{ComparisonWriter, NullPresenter, Presenter};
pub use session::{Session, SessionSettings, SessionState};
