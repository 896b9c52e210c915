// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for crash dump upload consent.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::CrashgateError;

/// The user's crash dump upload choice, as stored in settings.
///
/// Only explicit user action changes this value. The serialized form is the
/// exact string persisted under the preference key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UserUploadPreference {
    /// Upload over any connection, cellular included.
    #[serde(rename = "crash_dump_always_upload")]
    Always,
    /// Upload only over Wi-Fi or Ethernet.
    #[serde(rename = "crash_dump_only_with_wifi")]
    WifiOnly,
    /// Never upload.
    #[serde(rename = "crash_dump_never_upload")]
    Never,
}

impl UserUploadPreference {
    /// Every preference, in settings-menu order.
    pub const ALL: [Self; 3] = [Self::Always, Self::WifiOnly, Self::Never];

    /// The string persisted under the preference key.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Always => "crash_dump_always_upload",
            Self::WifiOnly => "crash_dump_only_with_wifi",
            Self::Never => "crash_dump_never_upload",
        }
    }

    /// Projection onto the legacy on/off consent flag.
    ///
    /// Devices without a cellular radio only ever had the boolean, so any
    /// choice other than `Never` reads as consent there.
    pub fn allows_upload_without_cellular(&self) -> bool {
        !matches!(self, Self::Never)
    }
}

impl FromStr for UserUploadPreference {
    type Err = CrashgateError;

    /// Exact match against the three persisted values. No trimming or case
    /// folding: anything else was not written by us.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|p| p.as_str() == s)
            .ok_or_else(|| CrashgateError::UnknownPreference(s.to_owned()))
    }
}

impl fmt::Display for UserUploadPreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Hardware network capability of the device. Fixed for the device's life.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NetworkCapability {
    /// The device has a cellular data radio.
    pub mobile_network_capable: bool,
}

impl NetworkCapability {
    pub const CELLULAR: Self = Self {
        mobile_network_capable: true,
    };
    pub const WIFI_ONLY: Self = Self {
        mobile_network_capable: false,
    };
}

/// Point-in-time connectivity observation. Callers read it fresh for every
/// decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConnectivityState {
    /// Some network connection currently exists.
    pub is_connected: bool,
    /// The active connection is Wi-Fi or Ethernet (unmetered) rather than
    /// cellular. Meaningless when `is_connected` is false.
    pub is_wifi_or_ethernet: bool,
}

impl ConnectivityState {
    pub const DISCONNECTED: Self = Self {
        is_connected: false,
        is_wifi_or_ethernet: false,
    };

    pub fn new(is_connected: bool, is_wifi_or_ethernet: bool) -> Self {
        Self {
            is_connected,
            is_wifi_or_ethernet,
        }
    }

    /// Connected over Wi-Fi or Ethernet.
    pub fn unmetered() -> Self {
        Self::new(true, true)
    }

    /// Connected over cellular.
    pub fn cellular() -> Self {
        Self::new(true, false)
    }
}

/// Why an upload was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DenialReason {
    /// The stored preference is `Never`.
    UserOptedOut,
    /// No network connection exists.
    NoConnectivity,
    /// Preference is `WifiOnly` and the active connection is cellular.
    RequiresUnmeteredNetwork,
    /// An operator switch disabled uploading outright.
    DisabledBySwitch,
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            Self::UserOptedOut => "user opted out of crash uploads",
            Self::NoConnectivity => "no network connection",
            Self::RequiresUnmeteredNetwork => "waiting for Wi-Fi or Ethernet",
            Self::DisabledBySwitch => "crash uploads disabled by switch",
        };
        f.write_str(text)
    }
}

/// Outcome of an upload permission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UploadDecision {
    Permitted,
    Denied(DenialReason),
}

impl UploadDecision {
    pub fn is_permitted(&self) -> bool {
        matches!(self, Self::Permitted)
    }

    /// The denial reason, if any.
    pub fn reason(&self) -> Option<DenialReason> {
        match self {
            Self::Permitted => None,
            Self::Denied(reason) => Some(*reason),
        }
    }
}

impl fmt::Display for UploadDecision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Permitted => f.write_str("upload permitted"),
            Self::Denied(reason) => write!(f, "upload not permitted: {reason}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn persisted_strings_parse_exactly() {
        for pref in UserUploadPreference::ALL {
            assert_eq!(pref.as_str().parse::<UserUploadPreference>().unwrap(), pref);
        }
        assert_eq!(
            "crash_dump_only_with_wifi".parse::<UserUploadPreference>().unwrap(),
            UserUploadPreference::WifiOnly
        );
    }

    #[test]
    fn unknown_strings_are_rejected() {
        for bad in ["", "always", "CRASH_DUMP_NEVER_UPLOAD", " crash_dump_never_upload"] {
            let err = bad.parse::<UserUploadPreference>().unwrap_err();
            assert!(
                matches!(err, CrashgateError::UnknownPreference(ref v) if v == bad),
                "unexpected error for {bad:?}: {err}"
            );
        }
    }

    #[test]
    fn serde_uses_persisted_strings() {
        let json = serde_json::to_string(&UserUploadPreference::Never).unwrap();
        assert_eq!(json, "\"crash_dump_never_upload\"");

        let pref: UserUploadPreference =
            serde_json::from_str("\"crash_dump_always_upload\"").unwrap();
        assert_eq!(pref, UserUploadPreference::Always);
    }

    #[test]
    fn legacy_flag_only_false_for_never() {
        assert!(UserUploadPreference::Always.allows_upload_without_cellular());
        assert!(UserUploadPreference::WifiOnly.allows_upload_without_cellular());
        assert!(!UserUploadPreference::Never.allows_upload_without_cellular());
    }

    #[test]
    fn decision_reports_reason() {
        assert!(UploadDecision::Permitted.is_permitted());
        assert_eq!(UploadDecision::Permitted.reason(), None);

        let denied = UploadDecision::Denied(DenialReason::NoConnectivity);
        assert!(!denied.is_permitted());
        assert_eq!(denied.reason(), Some(DenialReason::NoConnectivity));
        assert_eq!(denied.to_string(), "upload not permitted: no network connection");
    }
}
