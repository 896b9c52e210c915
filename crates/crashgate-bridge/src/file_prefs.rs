// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop preference store — a flat JSON object on disk standing in for
// Android's SharedPreferences.
//
// Layout:
//   {
//     "crash_dump_upload": "crash_dump_only_with_wifi",
//     "crash_dump_upload_no_cellular": true
//   }

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard};

use crashgate_core::error::{CrashgateError, Result};
use serde_json::Value;
use tracing::{debug, instrument};

use crate::traits::{NativePreferences, PrefValue};

/// File-backed [`NativePreferences`].
///
/// Every put rewrites the whole file, so the store suits a handful of keys,
/// not bulk data. Writes are serialised through an internal mutex, and the
/// in-memory view only changes once the file write has succeeded.
pub struct FilePreferences {
    path: PathBuf,
    values: Mutex<BTreeMap<String, Value>>,
}

impl FilePreferences {
    /// Open (or start) the preference file at `path`.
    ///
    /// A missing file is an empty store; it is created on first write.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let values = match std::fs::read_to_string(&path) {
            Ok(data) => serde_json::from_str(&data)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(e.into()),
        };
        debug!(keys = values.len(), "preference file opened");
        Ok(Self {
            path,
            values: Mutex::new(values),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock(&self) -> Result<MutexGuard<'_, BTreeMap<String, Value>>> {
        self.values
            .lock()
            .map_err(|_| CrashgateError::Bridge("preference store lock poisoned".into()))
    }

    fn commit<'a>(&self, entries: impl IntoIterator<Item = (&'a str, Value)>) -> Result<()> {
        let mut values = self.lock()?;
        let mut next = values.clone();
        let mut written = 0usize;
        for (key, value) in entries {
            next.insert(key.to_owned(), value);
            written += 1;
        }
        persist(&self.path, &next)?;
        *values = next;
        debug!(keys = written, "preferences written");
        Ok(())
    }
}

impl NativePreferences for FilePreferences {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        match self.lock()?.get(key) {
            None => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.clone())),
            Some(other) => Err(type_mismatch(key, "string", other)),
        }
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        self.commit([(key, Value::String(value.to_owned()))])
    }

    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        match self.lock()?.get(key) {
            None => Ok(None),
            Some(Value::Bool(b)) => Ok(Some(*b)),
            Some(other) => Err(type_mismatch(key, "boolean", other)),
        }
    }

    fn put_bool(&self, key: &str, value: bool) -> Result<()> {
        self.commit([(key, Value::Bool(value))])
    }

    /// All entries go out in a single file write.
    fn put_entries(&self, entries: &[(&str, PrefValue<'_>)]) -> Result<()> {
        self.commit(entries.iter().map(|(key, value)| {
            let value = match *value {
                PrefValue::String(s) => Value::String(s.to_owned()),
                PrefValue::Bool(b) => Value::Bool(b),
            };
            (*key, value)
        }))
    }
}

fn type_mismatch(key: &str, expected: &str, found: &Value) -> CrashgateError {
    CrashgateError::Bridge(format!("preference {key:?} is not a {expected}: {found}"))
}

/// Write via a sibling temp file and rename so readers never see a torn file.
fn persist(path: &Path, values: &BTreeMap<String, Value>) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(values)?;
    let tmp = path.with_extension("json.tmp");
    std::fs::write(&tmp, json)?;
    std::fs::rename(&tmp, path)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_empty_store() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = FilePreferences::open(dir.path().join("prefs.json")).expect("open");
        assert_eq!(prefs.get_string("anything").expect("get"), None);
        assert_eq!(prefs.get_bool("anything").expect("get"), None);
        assert!(!prefs.path().exists(), "nothing written yet");
    }

    #[test]
    fn values_survive_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("nested").join("prefs.json");

        let prefs = FilePreferences::open(&path).expect("open");
        prefs
            .put_string("crash_dump_upload", "crash_dump_always_upload")
            .expect("put string");
        prefs
            .put_bool("crash_dump_upload_no_cellular", true)
            .expect("put bool");
        drop(prefs);

        let reopened = FilePreferences::open(&path).expect("reopen");
        assert_eq!(
            reopened.get_string("crash_dump_upload").expect("get"),
            Some("crash_dump_always_upload".to_owned())
        );
        assert_eq!(
            reopened.get_bool("crash_dump_upload_no_cellular").expect("get"),
            Some(true)
        );
    }

    #[test]
    fn wrong_type_is_an_error() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = FilePreferences::open(dir.path().join("prefs.json")).expect("open");
        prefs.put_bool("flag", false).expect("put");

        assert!(matches!(
            prefs.get_string("flag"),
            Err(CrashgateError::Bridge(_))
        ));
    }

    #[test]
    fn entries_land_together() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        let prefs = FilePreferences::open(&path).expect("open");
        prefs
            .put_entries(&[
                ("crash_dump_upload", PrefValue::String("crash_dump_never_upload")),
                ("crash_dump_upload_no_cellular", PrefValue::Bool(false)),
            ])
            .expect("put entries");

        let reopened = FilePreferences::open(&path).expect("reopen");
        assert_eq!(
            reopened.get_string("crash_dump_upload").expect("get"),
            Some("crash_dump_never_upload".to_owned())
        );
        assert_eq!(
            reopened.get_bool("crash_dump_upload_no_cellular").expect("get"),
            Some(false)
        );
    }

    #[test]
    fn failed_write_leaves_store_unchanged() {
        let dir = tempfile::tempdir().expect("tempdir");
        let prefs = FilePreferences::open(dir.path().join("sub").join("prefs.json")).expect("open");
        // A regular file where the parent directory should be.
        std::fs::write(dir.path().join("sub"), "").expect("write");

        assert!(matches!(
            prefs.put_entries(&[
                ("crash_dump_upload", PrefValue::String("crash_dump_always_upload")),
                ("crash_dump_upload_no_cellular", PrefValue::Bool(true)),
            ]),
            Err(CrashgateError::Io(_))
        ));
        assert!(prefs.put_bool("crash_dump_upload_no_cellular", true).is_err());

        assert_eq!(prefs.get_string("crash_dump_upload").expect("get"), None);
        assert_eq!(
            prefs.get_bool("crash_dump_upload_no_cellular").expect("get"),
            None
        );
    }

    #[test]
    fn corrupt_file_fails_to_open() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{ not json").expect("write");

        assert!(matches!(
            FilePreferences::open(&path),
            Err(CrashgateError::Serialization(_))
        ));
    }
}
