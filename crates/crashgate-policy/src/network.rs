// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Caller-supplied network facts, for hosts that probe connectivity
// themselves and for exercising the manager off-device.

use std::sync::atomic::{AtomicBool, Ordering};

use crashgate_bridge::NativeNetwork;
use crashgate_core::error::Result;
use crashgate_core::{ConnectivityState, NetworkCapability};

/// [`NativeNetwork`] answering from values the caller sets.
///
/// Capability is fixed at construction; connectivity may be updated at any
/// time and is read on every call.
#[derive(Debug)]
pub struct FixedNetwork {
    mobile_capable: bool,
    connected: AtomicBool,
    wifi_or_ethernet: AtomicBool,
}

impl FixedNetwork {
    pub fn new(capability: NetworkCapability, connectivity: ConnectivityState) -> Self {
        Self {
            mobile_capable: capability.mobile_network_capable,
            connected: AtomicBool::new(connectivity.is_connected),
            wifi_or_ethernet: AtomicBool::new(connectivity.is_wifi_or_ethernet),
        }
    }

    pub fn set_connectivity(&self, connectivity: ConnectivityState) {
        self.connected
            .store(connectivity.is_connected, Ordering::SeqCst);
        self.wifi_or_ethernet
            .store(connectivity.is_wifi_or_ethernet, Ordering::SeqCst);
    }
}

impl NativeNetwork for FixedNetwork {
    fn is_mobile_network_capable(&self) -> Result<bool> {
        Ok(self.mobile_capable)
    }

    fn is_network_available(&self) -> Result<bool> {
        Ok(self.connected.load(Ordering::SeqCst))
    }

    fn is_wifi_or_ethernet_network(&self) -> Result<bool> {
        Ok(self.wifi_or_ethernet.load(Ordering::SeqCst))
    }
}
