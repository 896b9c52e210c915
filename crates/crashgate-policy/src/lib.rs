// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crashgate Policy — the pure upload-permission rules, typed access to the
// stored upload preference, and the manager that wires both to a platform
// bridge.

pub mod manager;
pub mod network;
pub mod policy;
pub mod preferences;

pub use manager::PrivacyPreferencesManager;
pub use network::FixedNetwork;
pub use policy::{evaluate, is_upload_permitted};
pub use preferences::{PreferenceStore, PREF_CRASH_DUMP_UPLOAD, PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR};
