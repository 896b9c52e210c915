// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub bridge for desktop/CI builds where the Android connectivity and
// settings APIs are unavailable.
//
// Every trait method returns `PlatformUnavailable`. Desktop callers that
// need persisted settings use `FilePreferences` instead.

use crashgate_core::error::{CrashgateError, Result};

use crate::traits::*;

/// No-op bridge returned on non-Android platforms.
pub struct StubBridge;

impl PlatformBridge for StubBridge {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }
}

impl NativeNetwork for StubBridge {
    fn is_mobile_network_capable(&self) -> Result<bool> {
        tracing::warn!("NativeNetwork::is_mobile_network_capable called on stub bridge");
        Err(CrashgateError::PlatformUnavailable)
    }

    fn is_network_available(&self) -> Result<bool> {
        tracing::warn!("NativeNetwork::is_network_available called on stub bridge");
        Err(CrashgateError::PlatformUnavailable)
    }

    fn is_wifi_or_ethernet_network(&self) -> Result<bool> {
        tracing::warn!("NativeNetwork::is_wifi_or_ethernet_network called on stub bridge");
        Err(CrashgateError::PlatformUnavailable)
    }
}

impl NativePreferences for StubBridge {
    fn get_string(&self, _key: &str) -> Result<Option<String>> {
        tracing::warn!("NativePreferences::get_string called on stub bridge");
        Err(CrashgateError::PlatformUnavailable)
    }

    fn put_string(&self, _key: &str, _value: &str) -> Result<()> {
        tracing::warn!("NativePreferences::put_string called on stub bridge");
        Err(CrashgateError::PlatformUnavailable)
    }

    fn get_bool(&self, _key: &str) -> Result<Option<bool>> {
        Err(CrashgateError::PlatformUnavailable)
    }

    fn put_bool(&self, _key: &str, _value: bool) -> Result<()> {
        Err(CrashgateError::PlatformUnavailable)
    }
}
