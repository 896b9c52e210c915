// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Upload permission policy — a pure function of device capability, current
// connectivity, and the user's preference. No IO, no clocks, no state; safe
// to call from any thread.

use crashgate_core::{
    ConnectivityState, DenialReason, NetworkCapability, UploadDecision, UserUploadPreference,
};

/// Decide whether an upload may happen now, and if not, why.
///
/// Rules, first match wins:
///
/// 1. `Never` denies ([`DenialReason::UserOptedOut`]).
/// 2. No connection denies ([`DenialReason::NoConnectivity`]).
/// 3. `Always` permits.
/// 4. `WifiOnly` permits only on Wi-Fi/Ethernet
///    ([`DenialReason::RequiresUnmeteredNetwork`] otherwise).
///
/// The capability is accepted but does not change the outcome: cellular and
/// Wi-Fi-only devices decide identically for the same connectivity and
/// preference.
pub fn evaluate(
    _capability: NetworkCapability,
    connectivity: ConnectivityState,
    preference: UserUploadPreference,
) -> UploadDecision {
    if preference == UserUploadPreference::Never {
        return UploadDecision::Denied(DenialReason::UserOptedOut);
    }
    if !connectivity.is_connected {
        return UploadDecision::Denied(DenialReason::NoConnectivity);
    }
    match preference {
        UserUploadPreference::Always => UploadDecision::Permitted,
        UserUploadPreference::WifiOnly if connectivity.is_wifi_or_ethernet => {
            UploadDecision::Permitted
        }
        UserUploadPreference::WifiOnly => {
            UploadDecision::Denied(DenialReason::RequiresUnmeteredNetwork)
        }
        // Handled by the first rule.
        UserUploadPreference::Never => UploadDecision::Denied(DenialReason::UserOptedOut),
    }
}

/// Boolean form of [`evaluate`].
pub fn is_upload_permitted(
    capability: NetworkCapability,
    connectivity: ConnectivityState,
    preference: UserUploadPreference,
) -> bool {
    evaluate(capability, connectivity, preference).is_permitted()
}
