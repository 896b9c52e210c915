// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Privacy preference manager — gathers the live inputs for the upload policy
// from a platform bridge and applies operator overrides on top.
//
// Nothing is cached: every decision re-reads connectivity and the stored
// preference, so a change made in settings or a network switch is seen on
// the very next call.

use crashgate_bridge::{NativeNetwork, NativePreferences};
use crashgate_core::error::Result;
use crashgate_core::{
    ConnectivityState, CrashgateConfig, DenialReason, NetworkCapability, UploadDecision,
    UploadOverrides, UserUploadPreference,
};
use tracing::{debug, instrument, warn};

use crate::policy;
use crate::preferences::PreferenceStore;

/// Answers "may a crash dump be uploaded right now?" for one device.
pub struct PrivacyPreferencesManager<N, P> {
    network: N,
    store: PreferenceStore<P>,
    overrides: UploadOverrides,
}

impl<N: NativeNetwork, P: NativePreferences> PrivacyPreferencesManager<N, P> {
    /// Build a manager over `network` and `preferences`, taking the default
    /// preference and override switches from `config`.
    pub fn new(network: N, preferences: P, config: &CrashgateConfig) -> Self {
        Self {
            network,
            store: PreferenceStore::new(preferences, config.default_preference),
            overrides: config.overrides,
        }
    }

    // -- Platform facts ------------------------------------------------------

    pub fn is_mobile_network_capable(&self) -> Result<bool> {
        self.network.is_mobile_network_capable()
    }

    pub fn is_network_available(&self) -> Result<bool> {
        self.network.is_network_available()
    }

    pub fn is_wifi_or_ethernet_network(&self) -> Result<bool> {
        self.network.is_wifi_or_ethernet_network()
    }

    pub fn capability(&self) -> Result<NetworkCapability> {
        Ok(NetworkCapability {
            mobile_network_capable: self.is_mobile_network_capable()?,
        })
    }

    /// Current connectivity, read from the bridge now as one snapshot.
    pub fn connectivity(&self) -> Result<ConnectivityState> {
        self.network.connectivity()
    }

    // -- User preference -----------------------------------------------------

    pub fn upload_preference(&self) -> Result<UserUploadPreference> {
        self.store.load()
    }

    /// Record an explicit user choice.
    pub fn set_upload_preference(&self, pref: UserUploadPreference) -> Result<()> {
        self.store.save(pref)
    }

    pub fn overrides(&self) -> UploadOverrides {
        self.overrides
    }

    // -- Decisions -----------------------------------------------------------

    /// Full decision with its reason.
    ///
    /// Order: `disable_upload`, then connectivity, then `force_upload`, then
    /// [`policy::evaluate`] on freshly read inputs. Offline therefore always
    /// reports `NoConnectivity`, whatever the stored preference.
    #[instrument(skip(self))]
    pub fn upload_decision(&self) -> Result<UploadDecision> {
        if self.overrides.disable_upload {
            debug!("crash upload disabled by switch");
            return Ok(UploadDecision::Denied(DenialReason::DisabledBySwitch));
        }

        let connectivity = self.connectivity()?;
        if !connectivity.is_connected {
            debug!("no network connection");
            return Ok(UploadDecision::Denied(DenialReason::NoConnectivity));
        }

        if self.overrides.force_upload {
            debug!("crash upload forced by switch");
            return Ok(UploadDecision::Permitted);
        }

        let capability = self.capability()?;
        let preference = self.upload_preference()?;
        let decision = policy::evaluate(capability, connectivity, preference);

        debug!(
            cellular = capability.mobile_network_capable,
            preference = %preference,
            connected = connectivity.is_connected,
            wifi = connectivity.is_wifi_or_ethernet,
            permitted = decision.is_permitted(),
            "upload decision"
        );
        Ok(decision)
    }

    /// Boolean form of [`Self::upload_decision`]. Fails closed: if any input
    /// cannot be read, the upload is not permitted.
    pub fn is_upload_permitted(&self) -> bool {
        match self.upload_decision() {
            Ok(decision) => decision.is_permitted(),
            Err(e) => {
                warn!(error = %e, "could not evaluate upload permission; refusing upload");
                false
            }
        }
    }
}
