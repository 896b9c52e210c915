// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Loading `config.json` from the data directory.

use std::path::Path;

use crashgate_core::error::Result;
use crashgate_core::CrashgateConfig;
use tracing::{debug, error};

pub const CONFIG_FILE: &str = "config.json";

/// Load the persisted config, then validate it.
///
/// A missing file means defaults. A file that exists but does not parse,
/// including one with unknown keys, is an error.
pub fn load_config(data_dir: &Path) -> Result<CrashgateConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let config = match std::fs::read_to_string(&path) {
        Ok(data) => serde_json::from_str::<CrashgateConfig>(&data).inspect_err(|e| {
            error!(path = %path.display(), error = %e, "config file malformed");
        })?,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            debug!(path = %path.display(), "no config file; using defaults");
            CrashgateConfig::default()
        }
        Err(e) => return Err(e.into()),
    };
    config.validate()?;
    Ok(config)
}
