// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Typed access to the persisted upload preference.
//
// Two keys are kept in step:
//   crash_dump_upload              string, one of the three persisted values
//   crash_dump_upload_no_cellular  legacy on/off flag read by older builds

use crashgate_bridge::{NativePreferences, PrefValue};
use crashgate_core::error::Result;
use crashgate_core::UserUploadPreference;
use tracing::{debug, info};

/// Settings key holding the string-valued upload preference.
pub const PREF_CRASH_DUMP_UPLOAD: &str = "crash_dump_upload";

/// Settings key holding the legacy boolean consent flag.
pub const PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR: &str = "crash_dump_upload_no_cellular";

/// Reads and writes [`UserUploadPreference`] over a [`NativePreferences`]
/// backend.
pub struct PreferenceStore<P> {
    backend: P,
    default: UserUploadPreference,
}

impl<P: NativePreferences> PreferenceStore<P> {
    /// `default` is returned when neither key has ever been written.
    pub fn new(backend: P, default: UserUploadPreference) -> Self {
        Self { backend, default }
    }

    /// Load the current preference.
    ///
    /// The string key wins. Without it, the legacy flag maps `true` to
    /// `WifiOnly` (consent, but nothing recorded about cellular) and `false`
    /// to `Never`. A string that matches none of the known values is an
    /// error rather than a silent default.
    pub fn load(&self) -> Result<UserUploadPreference> {
        if let Some(raw) = self.backend.get_string(PREF_CRASH_DUMP_UPLOAD)? {
            return raw.parse();
        }

        match self.backend.get_bool(PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR)? {
            Some(true) => {
                debug!("upload preference resolved from legacy flag");
                Ok(UserUploadPreference::WifiOnly)
            }
            Some(false) => Ok(UserUploadPreference::Never),
            None => Ok(self.default),
        }
    }

    /// Persist `pref` under both keys in one commit.
    pub fn save(&self, pref: UserUploadPreference) -> Result<()> {
        self.backend.put_entries(&[
            (PREF_CRASH_DUMP_UPLOAD, PrefValue::String(pref.as_str())),
            (
                PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR,
                PrefValue::Bool(pref.allows_upload_without_cellular()),
            ),
        ])?;
        info!(preference = %pref, "upload preference saved");
        Ok(())
    }

    pub fn backend(&self) -> &P {
        &self.backend
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crashgate_bridge::FilePreferences;
    use crashgate_core::CrashgateError;

    fn store() -> (tempfile::TempDir, PreferenceStore<FilePreferences>) {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = FilePreferences::open(dir.path().join("prefs.json")).expect("open");
        (dir, PreferenceStore::new(prefs, UserUploadPreference::Never))
    }

    #[test]
    fn empty_store_uses_default() {
        let (_dir, store) = store();
        assert_eq!(store.load().expect("load"), UserUploadPreference::Never);

        let prefs = FilePreferences::open(store.backend().path()).expect("open");
        let permissive = PreferenceStore::new(prefs, UserUploadPreference::Always);
        assert_eq!(permissive.load().expect("load"), UserUploadPreference::Always);
    }

    #[test]
    fn save_writes_both_keys() {
        let (_dir, store) = store();
        for pref in UserUploadPreference::ALL {
            store.save(pref).expect("save");
            assert_eq!(store.load().expect("load"), pref);

            let backend = store.backend();
            assert_eq!(
                backend.get_string(PREF_CRASH_DUMP_UPLOAD).expect("get"),
                Some(pref.as_str().to_owned())
            );
            assert_eq!(
                backend
                    .get_bool(PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR)
                    .expect("get"),
                Some(pref.allows_upload_without_cellular())
            );
        }
    }

    #[test]
    fn failed_save_keeps_previous_preference() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = FilePreferences::open(dir.path().join("sub").join("prefs.json")).expect("open");
        let store = PreferenceStore::new(prefs, UserUploadPreference::Never);
        std::fs::write(dir.path().join("sub"), "").expect("write");

        assert!(matches!(
            store.save(UserUploadPreference::Always),
            Err(CrashgateError::Io(_))
        ));
        assert_eq!(store.load().expect("load"), UserUploadPreference::Never);
        assert_eq!(
            store
                .backend()
                .get_bool(PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR)
                .expect("get"),
            None
        );
    }

    #[test]
    fn legacy_flag_used_when_string_missing() {
        let (_dir, store) = store();

        store
            .backend()
            .put_bool(PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR, true)
            .expect("put");
        assert_eq!(store.load().expect("load"), UserUploadPreference::WifiOnly);

        store
            .backend()
            .put_bool(PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR, false)
            .expect("put");
        assert_eq!(store.load().expect("load"), UserUploadPreference::Never);
    }

    #[test]
    fn string_key_beats_legacy_flag() {
        let (_dir, store) = store();
        store
            .backend()
            .put_bool(PREF_CRASH_DUMP_UPLOAD_NO_CELLULAR, false)
            .expect("put");
        store
            .backend()
            .put_string(PREF_CRASH_DUMP_UPLOAD, "crash_dump_always_upload")
            .expect("put");
        assert_eq!(store.load().expect("load"), UserUploadPreference::Always);
    }

    #[test]
    fn unknown_string_is_an_error() {
        let (_dir, store) = store();
        store
            .backend()
            .put_string(PREF_CRASH_DUMP_UPLOAD, "sometimes")
            .expect("put");
        assert!(matches!(
            store.load(),
            Err(CrashgateError::UnknownPreference(v)) if v == "sometimes"
        ));
    }
}
