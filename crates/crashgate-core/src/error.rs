// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Crashgate.

use thiserror::Error;

/// Top-level error type for all Crashgate operations.
///
/// The upload policy itself is total and never produces one of these; they
/// come from the layers that gather its inputs.
#[derive(Debug, Error)]
pub enum CrashgateError {
    // -- Preferences --
    #[error("unknown upload preference value: {0:?}")]
    UnknownPreference(String),

    #[error("invalid configuration: {0}")]
    Config(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, CrashgateError>;
