// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Raster module — grayscale loading/encoding and side-by-side composition.

pub mod compose;
pub mod io;

pub use compose::side_by_side;
pub use io::{decode_grayscale, encode_png, open_grayscale, save_png};
