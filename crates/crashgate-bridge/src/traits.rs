// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait definitions for the facts the upload policy reads.

use std::sync::Arc;

use crashgate_core::ConnectivityState;
use crashgate_core::error::Result;

/// Unified bridge grouping every native capability Crashgate needs.
pub trait PlatformBridge: NativeNetwork + NativePreferences + Send + Sync {
    /// Human-readable platform name (e.g. "Android", "Desktop (stub)").
    fn platform_name(&self) -> &str;
}

/// Network capability and live connectivity.
///
/// Every call reads current state; implementations must not cache answers
/// for the connectivity methods.
pub trait NativeNetwork {
    /// The device hardware supports cellular data, connected or not.
    fn is_mobile_network_capable(&self) -> Result<bool>;

    /// Some network connection currently exists.
    fn is_network_available(&self) -> Result<bool>;

    /// The active connection is Wi-Fi or Ethernet rather than cellular.
    fn is_wifi_or_ethernet_network(&self) -> Result<bool>;

    /// Both connectivity facts. Implementations that can read them from a
    /// single snapshot of the active network should override this.
    fn connectivity(&self) -> Result<ConnectivityState> {
        Ok(ConnectivityState::new(
            self.is_network_available()?,
            self.is_wifi_or_ethernet_network()?,
        ))
    }
}

/// A value written through [`NativePreferences::put_entries`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrefValue<'a> {
    String(&'a str),
    Bool(bool),
}

/// Key/value settings storage (SharedPreferences on Android).
pub trait NativePreferences {
    /// Read a string setting. `Ok(None)` when the key was never written.
    fn get_string(&self, key: &str) -> Result<Option<String>>;

    fn put_string(&self, key: &str, value: &str) -> Result<()>;

    /// Read a boolean setting. `Ok(None)` when the key was never written.
    fn get_bool(&self, key: &str) -> Result<Option<bool>>;

    fn put_bool(&self, key: &str, value: bool) -> Result<()>;

    /// Write several keys as one commit: either all land or none do.
    ///
    /// The default writes them one at a time and is only suitable for
    /// backends where a single put cannot fail part way.
    fn put_entries(&self, entries: &[(&str, PrefValue<'_>)]) -> Result<()> {
        for (key, value) in entries {
            match value {
                PrefValue::String(s) => self.put_string(key, s)?,
                PrefValue::Bool(b) => self.put_bool(key, *b)?,
            }
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Forwarding impls so one bridge can serve as both network and preferences
// ---------------------------------------------------------------------------

macro_rules! forward_bridge_traits {
    ($($ptr:ty),*) => {$(
        impl<T: NativeNetwork + ?Sized> NativeNetwork for $ptr {
            fn is_mobile_network_capable(&self) -> Result<bool> {
                (**self).is_mobile_network_capable()
            }

            fn is_network_available(&self) -> Result<bool> {
                (**self).is_network_available()
            }

            fn is_wifi_or_ethernet_network(&self) -> Result<bool> {
                (**self).is_wifi_or_ethernet_network()
            }

            fn connectivity(&self) -> Result<ConnectivityState> {
                (**self).connectivity()
            }
        }

        impl<T: NativePreferences + ?Sized> NativePreferences for $ptr {
            fn get_string(&self, key: &str) -> Result<Option<String>> {
                (**self).get_string(key)
            }

            fn put_string(&self, key: &str, value: &str) -> Result<()> {
                (**self).put_string(key, value)
            }

            fn get_bool(&self, key: &str) -> Result<Option<bool>> {
                (**self).get_bool(key)
            }

            fn put_bool(&self, key: &str, value: bool) -> Result<()> {
                (**self).put_bool(key, value)
            }

            fn put_entries(&self, entries: &[(&str, PrefValue<'_>)]) -> Result<()> {
                (**self).put_entries(entries)
            }
        }
    )*};
}

forward_bridge_traits!(&T, Box<T>, Arc<T>);
