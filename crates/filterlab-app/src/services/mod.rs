// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Service layer — bridges the command line to the filterlab backend crates.
//
// Each command is a plain function taking the resolved configuration and its
// arguments, returning a `Result` for `main` to humanise.

pub mod commands;
pub mod config_store;
pub mod data_dir;
