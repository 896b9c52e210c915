// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-aware data directory resolution.

use std::path::PathBuf;

/// Return the application data directory, creating it if needed.
///
/// `override_dir` (from `--data-dir`) wins; otherwise the XDG data home.
pub fn data_dir(override_dir: Option<PathBuf>) -> std::io::Result<PathBuf> {
    let dir = override_dir.unwrap_or_else(|| dirs_fallback().join("crashgate"));
    std::fs::create_dir_all(&dir)?;
    Ok(dir)
}

fn dirs_fallback() -> PathBuf {
    // Try XDG data dir, then fallback to home
    if let Ok(xdg) = std::env::var("XDG_DATA_HOME") {
        return PathBuf::from(xdg);
    }
    if let Ok(home) = std::env::var("HOME") {
        return PathBuf::from(home).join(".local").join("share");
    }
    // Last resort
    PathBuf::from("/tmp")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_is_created() {
        let root = tempfile::tempdir().expect("tempdir");
        let wanted = root.path().join("a").join("b");
        let dir = data_dir(Some(wanted.clone())).expect("data_dir");
        assert_eq!(dir, wanted);
        assert!(dir.is_dir());
    }
}
