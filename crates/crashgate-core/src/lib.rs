// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crashgate — Core types and error definitions shared across all crates.

pub mod config;
pub mod error;
pub mod labels;
pub mod types;

pub use config::{CrashgateConfig, UploadOverrides};
pub use error::CrashgateError;
pub use types::*;
