// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Display strings for upload preferences, kept apart from the enum so the
// policy never depends on presentation.

use crate::UserUploadPreference;

/// Label shown to the user for `pref`.
pub const fn display_label(pref: UserUploadPreference) -> &'static str {
    match pref {
        UserUploadPreference::Always => "Always",
        UserUploadPreference::WifiOnly => "Only on Wi-Fi",
        UserUploadPreference::Never => "Never",
    }
}

/// Settings-menu labels, one row per preference, in menu order.
pub const UPLOAD_PREFERENCE_LABELS: [(UserUploadPreference, &str); 3] = [
    label_row(UserUploadPreference::Always),
    label_row(UserUploadPreference::WifiOnly),
    label_row(UserUploadPreference::Never),
];

const fn label_row(pref: UserUploadPreference) -> (UserUploadPreference, &'static str) {
    (pref, display_label(pref))
}
