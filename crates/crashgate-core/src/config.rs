// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use serde::{Deserialize, Serialize};

use crate::error::{CrashgateError, Result};
use crate::UserUploadPreference;

/// Operator switches that sit above the user's preference.
///
/// Both default to off. `disable_upload` wins over everything; `force_upload`
/// skips the preference check but still needs a connection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct UploadOverrides {
    /// Refuse every upload (e.g. `--disable-crash-dump-upload`).
    pub disable_upload: bool,
    /// Upload whenever connected, ignoring the user preference
    /// (e.g. `--force-crash-dump-upload`, test rigs only).
    pub force_upload: bool,
}

/// Persistent application settings.
///
/// Unknown keys are rejected: a misspelled switch must not silently fall
/// back to its default.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CrashgateConfig {
    /// Preference assumed when nothing has been stored yet.
    pub default_preference: UserUploadPreference,
    /// Operator override switches.
    pub overrides: UploadOverrides,
    /// File name of the desktop preference store, relative to the data dir.
    pub preferences_file: String,
}

impl Default for CrashgateConfig {
    fn default() -> Self {
        Self {
            default_preference: UserUploadPreference::Never,
            overrides: UploadOverrides::default(),
            preferences_file: "preferences.json".into(),
        }
    }
}

impl CrashgateConfig {
    /// Reject settings that contradict each other.
    pub fn validate(&self) -> Result<()> {
        if self.overrides.disable_upload && self.overrides.force_upload {
            return Err(CrashgateError::Config(
                "disable_upload and force_upload are both set".into(),
            ));
        }
        if self.preferences_file.trim().is_empty() {
            return Err(CrashgateError::Config("preferences_file is empty".into()));
        }
        Ok(())
    }
}
