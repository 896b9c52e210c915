// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Crashgate — Native platform bridge abstractions.
//
// The upload policy needs three network facts and a couple of stored
// settings. This crate defines the traits that supply them and dispatches
// to the Android (JNI) implementation or to the desktop stub.

pub mod file_prefs;
pub mod traits;

#[cfg(target_os = "android")]
pub mod android;

#[cfg(not(target_os = "android"))]
pub mod stub;

pub use file_prefs::FilePreferences;
pub use traits::{NativeNetwork, NativePreferences, PlatformBridge, PrefValue};

/// Returns the bridge implementation for the target operating system.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    #[cfg(target_os = "android")]
    {
        // Android: ConnectivityManager and SharedPreferences via `jni-rs`.
        Box::new(android::AndroidBridge::new())
    }
    #[cfg(not(target_os = "android"))]
    {
        // DESKTOP/CI: no radio to ask; every call reports PlatformUnavailable.
        Box::new(stub::StubBridge)
    }
}
