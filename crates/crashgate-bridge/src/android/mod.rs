// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android platform bridge via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Network facts come from `PackageManager` and
// `ConnectivityManager`; settings live in the app's default
// `SharedPreferences`, the same file the settings screen writes.

#![cfg(target_os = "android")]

use jni::objects::{JObject, JString, JValue};
use jni::{JNIEnv, JavaVM};

use crashgate_core::ConnectivityState;
use crashgate_core::error::{CrashgateError, Result};

use crate::traits::*;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// `Context.CONNECTIVITY_SERVICE`.
const CONNECTIVITY_SERVICE: &str = "connectivity";

/// `PackageManager.FEATURE_TELEPHONY`.
const FEATURE_TELEPHONY: &str = "android.hardware.telephony";

/// `ConnectivityManager.TYPE_WIFI`.
const TYPE_WIFI: i32 = 1;

/// `ConnectivityManager.TYPE_ETHERNET`.
const TYPE_ETHERNET: i32 = 9;

/// Local reference capacity reserved for one bridge call.
const LOCAL_FRAME_CAPACITY: i32 = 16;

/// Run `f` with an attached [`JNIEnv`] and the hosting `Context`.
///
/// The `JavaVM*` and context come from `ndk_context::android_context()`,
/// set by `android_main` or `ANativeActivity_onCreate`. The current thread
/// is attached for the duration of the call, and `f` runs inside its own
/// local frame so every local reference it creates is released on return,
/// even on a thread that was already attached.
fn with_env<T>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| jni_err("failed to obtain JavaVM", e))?;

    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(CrashgateError::Bridge(
            "Android context is null — native activity not initialised".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Context.
    let context = unsafe { JObject::from_raw(ptr.cast()) };

    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_err("failed to attach JNI thread", e))?;
    env.with_local_frame(LOCAL_FRAME_CAPACITY, |env| {
        Ok::<_, jni::errors::Error>(f(env, &context))
    })
    .map_err(|e| jni_err("local frame", e))?
}

/// Convenience: map any `jni::errors::Error` into `CrashgateError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> CrashgateError {
    CrashgateError::Bridge(format!("{context}: {e}"))
}

// ---------------------------------------------------------------------------
// Bridge struct
// ---------------------------------------------------------------------------

/// Android implementation of the Crashgate platform bridge.
///
/// The struct is zero-sized; all state lives on the Java side and is read
/// fresh on every call.
pub struct AndroidBridge;

impl AndroidBridge {
    /// Create a new Android bridge. No JNI call happens until a trait method
    /// is invoked.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBridge {
    fn default() -> Self {
        Self::new()
    }
}

impl PlatformBridge for AndroidBridge {
    fn platform_name(&self) -> &str {
        "Android"
    }
}

// ---------------------------------------------------------------------------
// NativeNetwork — PackageManager / ConnectivityManager
// ---------------------------------------------------------------------------

impl NativeNetwork for AndroidBridge {
    /// `context.getPackageManager().hasSystemFeature(FEATURE_TELEPHONY)`.
    fn is_mobile_network_capable(&self) -> Result<bool> {
        with_env(|env, context| {
            let pm: JObject = env
                .call_method(
                    context,
                    "getPackageManager",
                    "()Landroid/content/pm/PackageManager;",
                    &[],
                )
                .map_err(|e| jni_err("getPackageManager", e))?
                .l()
                .map_err(|e| jni_err("getPackageManager->l", e))?;

            let j_feature: JString = env
                .new_string(FEATURE_TELEPHONY)
                .map_err(|e| jni_err("new_string(feature)", e))?;

            let capable = env
                .call_method(
                    &pm,
                    "hasSystemFeature",
                    "(Ljava/lang/String;)Z",
                    &[JValue::Object(&j_feature)],
                )
                .map_err(|e| jni_err("hasSystemFeature", e))?
                .z()
                .map_err(|e| jni_err("hasSystemFeature->z", e))?;

            tracing::debug!(capable, "Android: telephony feature probed");
            Ok(capable)
        })
    }

    /// `activeNetworkInfo != null && activeNetworkInfo.isConnected()`.
    fn is_network_available(&self) -> Result<bool> {
        with_env(|env, context| {
            let Some(info) = active_network_info(env, context)? else {
                tracing::debug!("Android: no active network");
                return Ok(false);
            };
            is_connected(env, &info)
        })
    }

    /// Active network type is `TYPE_WIFI` or `TYPE_ETHERNET`.
    fn is_wifi_or_ethernet_network(&self) -> Result<bool> {
        with_env(|env, context| {
            let Some(info) = active_network_info(env, context)? else {
                return Ok(false);
            };
            is_wifi_or_ethernet(env, &info)
        })
    }

    /// Both facts from the same `NetworkInfo`.
    fn connectivity(&self) -> Result<ConnectivityState> {
        with_env(|env, context| {
            let Some(info) = active_network_info(env, context)? else {
                tracing::debug!("Android: no active network");
                return Ok(ConnectivityState::DISCONNECTED);
            };
            Ok(ConnectivityState::new(
                is_connected(env, &info)?,
                is_wifi_or_ethernet(env, &info)?,
            ))
        })
    }
}

// ---------------------------------------------------------------------------
// NativePreferences — default SharedPreferences
// ---------------------------------------------------------------------------

impl NativePreferences for AndroidBridge {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        with_env(|env, context| {
            let prefs = default_shared_preferences(env, context)?;
            let j_key: JString = env
                .new_string(key)
                .map_err(|e| jni_err("new_string(key)", e))?;

            // prefs.getString(key, null)
            let value: JObject = env
                .call_method(
                    &prefs,
                    "getString",
                    "(Ljava/lang/String;Ljava/lang/String;)Ljava/lang/String;",
                    &[JValue::Object(&j_key), JValue::Object(&JObject::null())],
                )
                .map_err(|e| jni_err("getString", e))?
                .l()
                .map_err(|e| jni_err("getString->l", e))?;

            if value.is_null() {
                tracing::debug!(key, "Android: preference not set");
                return Ok(None);
            }

            let value: String = env
                .get_string(&JString::from(value))
                .map_err(|e| jni_err("get_string(value)", e))?
                .into();
            Ok(Some(value))
        })
    }

    fn put_string(&self, key: &str, value: &str) -> Result<()> {
        self.put_entries(&[(key, PrefValue::String(value))])
    }

    /// `getBoolean` cannot tell "absent" from the default, so `contains`
    /// is checked first.
    fn get_bool(&self, key: &str) -> Result<Option<bool>> {
        with_env(|env, context| {
            let prefs = default_shared_preferences(env, context)?;
            let j_key: JString = env
                .new_string(key)
                .map_err(|e| jni_err("new_string(key)", e))?;

            let present = env
                .call_method(
                    &prefs,
                    "contains",
                    "(Ljava/lang/String;)Z",
                    &[JValue::Object(&j_key)],
                )
                .map_err(|e| jni_err("contains", e))?
                .z()
                .map_err(|e| jni_err("contains->z", e))?;
            if !present {
                return Ok(None);
            }

            let value = env
                .call_method(
                    &prefs,
                    "getBoolean",
                    "(Ljava/lang/String;Z)Z",
                    &[JValue::Object(&j_key), JValue::Bool(0)],
                )
                .map_err(|e| jni_err("getBoolean", e))?
                .z()
                .map_err(|e| jni_err("getBoolean->z", e))?;
            Ok(Some(value))
        })
    }

    fn put_bool(&self, key: &str, value: bool) -> Result<()> {
        self.put_entries(&[(key, PrefValue::Bool(value))])
    }

    /// One `edit()`, one setter per entry, one `apply()`.
    fn put_entries(&self, entries: &[(&str, PrefValue<'_>)]) -> Result<()> {
        with_env(|env, context| {
            let prefs = default_shared_preferences(env, context)?;
            let editor: JObject = env
                .call_method(
                    &prefs,
                    "edit",
                    "()Landroid/content/SharedPreferences$Editor;",
                    &[],
                )
                .map_err(|e| jni_err("SharedPreferences.edit", e))?
                .l()
                .map_err(|e| jni_err("edit->l", e))?;

            for (key, value) in entries {
                put_on_editor(env, &editor, key, *value)?;
            }

            // apply() is the async, non-blocking commit.
            env.call_method(&editor, "apply", "()V", &[])
                .map_err(|e| jni_err("editor.apply", e))?;
            tracing::info!(keys = entries.len(), "Android: preferences stored");
            Ok(())
        })
    }
}

// ---------------------------------------------------------------------------
// Internal helpers
// ---------------------------------------------------------------------------

/// `ConnectivityManager.getActiveNetworkInfo()`, or `None` when there is no
/// active network.
fn active_network_info<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
) -> Result<Option<JObject<'local>>> {
    let j_service: JString = env
        .new_string(CONNECTIVITY_SERVICE)
        .map_err(|e| jni_err("new_string(service)", e))?;

    let manager: JObject = env
        .call_method(
            context,
            "getSystemService",
            "(Ljava/lang/String;)Ljava/lang/Object;",
            &[JValue::Object(&j_service)],
        )
        .map_err(|e| jni_err("getSystemService(connectivity)", e))?
        .l()
        .map_err(|e| jni_err("getSystemService->l", e))?;

    if manager.is_null() {
        return Err(CrashgateError::Bridge(
            "ConnectivityManager unavailable".into(),
        ));
    }

    let info: JObject = env
        .call_method(
            &manager,
            "getActiveNetworkInfo",
            "()Landroid/net/NetworkInfo;",
            &[],
        )
        .map_err(|e| jni_err("getActiveNetworkInfo", e))?
        .l()
        .map_err(|e| jni_err("getActiveNetworkInfo->l", e))?;

    Ok(if info.is_null() { None } else { Some(info) })
}

/// `PreferenceManager.getDefaultSharedPreferences(context)`.
fn default_shared_preferences<'local>(
    env: &mut JNIEnv<'local>,
    context: &JObject<'_>,
) -> Result<JObject<'local>> {
    env.call_static_method(
        "android/preference/PreferenceManager",
        "getDefaultSharedPreferences",
        "(Landroid/content/Context;)Landroid/content/SharedPreferences;",
        &[JValue::Object(context)],
    )
    .map_err(|e| jni_err("getDefaultSharedPreferences", e))?
    .l()
    .map_err(|e| jni_err("getDefaultSharedPreferences->l", e))
}

/// `NetworkInfo.isConnected()`.
fn is_connected(env: &mut JNIEnv<'_>, info: &JObject<'_>) -> Result<bool> {
    env.call_method(info, "isConnected", "()Z", &[])
        .map_err(|e| jni_err("NetworkInfo.isConnected", e))?
        .z()
        .map_err(|e| jni_err("isConnected->z", e))
}

/// `NetworkInfo.getType()` is `TYPE_WIFI` or `TYPE_ETHERNET`.
fn is_wifi_or_ethernet(env: &mut JNIEnv<'_>, info: &JObject<'_>) -> Result<bool> {
    let network_type = env
        .call_method(info, "getType", "()I", &[])
        .map_err(|e| jni_err("NetworkInfo.getType", e))?
        .i()
        .map_err(|e| jni_err("getType->i", e))?;

    tracing::debug!(network_type, "Android: active network type");
    Ok(network_type == TYPE_WIFI || network_type == TYPE_ETHERNET)
}

/// `editor.putString(key, value)` or `editor.putBoolean(key, value)`.
fn put_on_editor(
    env: &mut JNIEnv<'_>,
    editor: &JObject<'_>,
    key: &str,
    value: PrefValue<'_>,
) -> Result<()> {
    let j_key: JString = env
        .new_string(key)
        .map_err(|e| jni_err("new_string(key)", e))?;

    match value {
        PrefValue::String(s) => {
            let j_value: JString = env
                .new_string(s)
                .map_err(|e| jni_err("new_string(value)", e))?;
            env.call_method(
                editor,
                "putString",
                "(Ljava/lang/String;Ljava/lang/String;)Landroid/content/SharedPreferences$Editor;",
                &[JValue::Object(&j_key), JValue::Object(&j_value)],
            )
            .map_err(|e| jni_err("putString", e))?;
        }
        PrefValue::Bool(b) => {
            env.call_method(
                editor,
                "putBoolean",
                "(Ljava/lang/String;Z)Landroid/content/SharedPreferences$Editor;",
                &[JValue::Object(&j_key), JValue::Bool(u8::from(b))],
            )
            .map_err(|e| jni_err("putBoolean", e))?;
        }
    }
    Ok(())
}
