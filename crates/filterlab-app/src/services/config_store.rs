// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Configuration loading and persistence.

use std::path::{Path, PathBuf};

use filterlab_core::AppConfig;
use filterlab_core::error::Result;
use tracing::{debug, info, warn};

const CONFIG_FILE: &str = "config.json";

/// Resolve the effective configuration.
///
/// An explicit `--config` file must exist and parse. Otherwise the stored
/// `config.json` in `data_dir` is used when readable, falling back to defaults.
pub fn resolve(explicit: Option<&Path>, data_dir: &Path) -> Result<AppConfig> {
    if let Some(path) = explicit {
        let json = std::fs::read_to_string(path)?;
        let config = AppConfig::from_json(&json)?;
        info!(path = %path.display(), "Configuration loaded");
        return Ok(config);
    }

    match load_config(data_dir) {
        Some(config) => Ok(config),
        None => {
            debug!("Using default configuration");
            Ok(AppConfig::default())
        }
    }
}

/// Write `config` as the stored default. Returns the file written.
pub fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<PathBuf> {
    config.validate()?;
    std::fs::create_dir_all(data_dir)?;
    let path = config_path(data_dir);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    info!(path = %path.display(), "Configuration saved");
    Ok(path)
}

pub fn config_path(data_dir: &Path) -> PathBuf {
    data_dir.join(CONFIG_FILE)
}

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = config_path(data_dir);
    let json = std::fs::read_to_string(&path).ok()?;
    match AppConfig::from_json(&json) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(path = %path.display(), error = %e, "Ignoring unusable stored configuration");
            None
        }
    }
}
