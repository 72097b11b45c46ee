// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Android system bar backend via JNI.
//
// Requires the Android NDK and targets `aarch64-linux-android` or
// `armv7-linux-androideabi`. Each trait method drives the hosting Activity's
// `Window` and content view through JNI calls into the ART runtime.
//
// ## Architecture notes
//
// API 30+ uses `Window#setDecorFitsSystemWindows` and
// `WindowInsetsController#setSystemBarsAppearance`. Older releases fall back
// to the `View.SYSTEM_UI_FLAG_*` bits, updated read-modify-write so flags
// owned by the host app survive.
//
// Every view mutation must happen on the UI thread. The plugin host only
// calls into the bridge from there.

#![cfg(target_os = "android")]

use jni::objects::{JObject, JValue};
use jni::{JNIEnv, JavaVM};

use safearea_core::{AppearanceConfig, Result, SafeAreaError};

use crate::traits::{SystemBars, undo_on_error};

// ---------------------------------------------------------------------------
// Android SDK constants
// ---------------------------------------------------------------------------

/// `android.R.id.content`
const ANDROID_R_ID_CONTENT: i32 = 0x0102_0002;

/// `WindowManager.LayoutParams.FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS`
const FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS: i32 = 0x8000_0000_u32 as i32;

/// `WindowInsetsController.APPEARANCE_LIGHT_STATUS_BARS`
const APPEARANCE_LIGHT_STATUS_BARS: i32 = 0x0000_0008;
/// `WindowInsetsController.APPEARANCE_LIGHT_NAVIGATION_BARS`
const APPEARANCE_LIGHT_NAVIGATION_BARS: i32 = 0x0000_0010;

/// `View.SYSTEM_UI_FLAG_LAYOUT_STABLE | LAYOUT_HIDE_NAVIGATION | LAYOUT_FULLSCREEN`
const LEGACY_EDGE_TO_EDGE_FLAGS: i32 = 0x0000_0100 | 0x0000_0200 | 0x0000_0400;
/// `View.SYSTEM_UI_FLAG_LIGHT_STATUS_BAR` (API 23)
const LEGACY_LIGHT_STATUS_BAR: i32 = 0x0000_2000;
/// `View.SYSTEM_UI_FLAG_LIGHT_NAVIGATION_BAR` (API 26)
const LEGACY_LIGHT_NAVIGATION_BAR: i32 = 0x0000_0010;

const API_MARSHMALLOW: i32 = 23;
const API_OREO: i32 = 26;
const API_R: i32 = 30;

// ---------------------------------------------------------------------------
// JNI bootstrap helpers
// ---------------------------------------------------------------------------

/// Convenience: map any `jni::errors::Error` into `SafeAreaError::Bridge`.
fn jni_err(context: &str, e: jni::errors::Error) -> SafeAreaError {
    SafeAreaError::Bridge(format!("{context}: {e}"))
}

/// Run `f` with an attached [`JNIEnv`] and the hosting `Activity`.
///
/// The `JavaVM*` and `Activity` pointers come from `ndk_context`, set by the
/// NDK glue code. A pending Java exception left behind by a failed call is
/// cleared before returning so the next invocation starts clean.
fn with_activity<T>(f: impl FnOnce(&mut JNIEnv<'_>, &JObject<'_>) -> Result<T>) -> Result<T> {
    let ctx = ndk_context::android_context();
    // SAFETY: `ctx.vm()` returns the `JavaVM*` set by the NDK glue code.
    // The pointer is guaranteed valid for the lifetime of the process.
    let vm = unsafe { JavaVM::from_raw(ctx.vm().cast()) }
        .map_err(|e| jni_err("failed to obtain JavaVM", e))?;
    let mut env = vm
        .attach_current_thread()
        .map_err(|e| jni_err("failed to attach JNI thread", e))?;

    let ptr = ctx.context();
    if ptr.is_null() {
        return Err(SafeAreaError::Bridge(
            "Android context is null, no hosting activity".into(),
        ));
    }
    // SAFETY: the NDK guarantees this pointer is a valid global jobject for
    // the hosting Activity.
    let activity = unsafe { JObject::from_raw(ptr.cast()) };

    let result = f(&mut env, &activity);
    if result.is_err() {
        let _ = env.exception_clear();
    }
    result
}

fn sdk_int(env: &mut JNIEnv<'_>) -> Result<i32> {
    env.get_static_field("android/os/Build$VERSION", "SDK_INT", "I")
        .map_err(|e| jni_err("Build.VERSION.SDK_INT", e))?
        .i()
        .map_err(|e| jni_err("SDK_INT->i", e))
}

/// The Activity's window, its decor view and the `android.R.id.content`
/// container that hosts the web view.
struct WindowHandles<'local> {
    window: JObject<'local>,
    decor: JObject<'local>,
    content: JObject<'local>,
    sdk: i32,
}

impl<'local> WindowHandles<'local> {
    fn resolve(env: &mut JNIEnv<'local>, activity: &JObject<'_>) -> Result<Self> {
        let sdk = sdk_int(env)?;

        let window = env
            .call_method(activity, "getWindow", "()Landroid/view/Window;", &[])
            .map_err(|e| jni_err("Activity.getWindow", e))?
            .l()
            .map_err(|e| jni_err("getWindow->l", e))?;
        if window.is_null() {
            return Err(SafeAreaError::Bridge("activity has no window".into()));
        }

        let decor = env
            .call_method(&window, "getDecorView", "()Landroid/view/View;", &[])
            .map_err(|e| jni_err("Window.getDecorView", e))?
            .l()
            .map_err(|e| jni_err("getDecorView->l", e))?;

        let content = env
            .call_method(
                activity,
                "findViewById",
                "(I)Landroid/view/View;",
                &[JValue::Int(ANDROID_R_ID_CONTENT)],
            )
            .map_err(|e| jni_err("Activity.findViewById(content)", e))?
            .l()
            .map_err(|e| jni_err("findViewById->l", e))?;
        if content.is_null() {
            return Err(SafeAreaError::Bridge("content view not attached yet".into()));
        }

        Ok(Self {
            window,
            decor,
            content,
            sdk,
        })
    }

    /// Toggle whether the OS insets the content inside the system bars.
    fn set_decor_fits_system_windows(&self, env: &mut JNIEnv<'local>, fits: bool) -> Result<()> {
        if self.sdk >= API_R {
            env.call_method(
                &self.window,
                "setDecorFitsSystemWindows",
                "(Z)V",
                &[JValue::Bool(u8::from(fits))],
            )
            .map_err(|e| jni_err("Window.setDecorFitsSystemWindows", e))?;
            return Ok(());
        }

        self.update_legacy_flags(env, LEGACY_EDGE_TO_EDGE_FLAGS, !fits)
    }

    /// Set or clear `bits` in the decor view's legacy system UI visibility.
    fn update_legacy_flags(&self, env: &mut JNIEnv<'local>, bits: i32, set: bool) -> Result<()> {
        let current = env
            .call_method(&self.decor, "getSystemUiVisibility", "()I", &[])
            .map_err(|e| jni_err("View.getSystemUiVisibility", e))?
            .i()
            .map_err(|e| jni_err("getSystemUiVisibility->i", e))?;
        let next = if set { current | bits } else { current & !bits };
        if next != current {
            env.call_method(
                &self.decor,
                "setSystemUiVisibility",
                "(I)V",
                &[JValue::Int(next)],
            )
            .map_err(|e| jni_err("View.setSystemUiVisibility", e))?;
        }
        Ok(())
    }

    fn apply_colors(&self, env: &mut JNIEnv<'local>, appearance: &AppearanceConfig) -> Result<()> {
        env.call_method(
            &self.window,
            "addFlags",
            "(I)V",
            &[JValue::Int(FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS)],
        )
        .map_err(|e| jni_err("Window.addFlags", e))?;

        env.call_method(
            &self.window,
            "setStatusBarColor",
            "(I)V",
            &[JValue::Int(appearance.status_bar().as_android_int())],
        )
        .map_err(|e| jni_err("Window.setStatusBarColor", e))?;

        env.call_method(
            &self.window,
            "setNavigationBarColor",
            "(I)V",
            &[JValue::Int(appearance.navigation_bar().as_android_int())],
        )
        .map_err(|e| jni_err("Window.setNavigationBarColor", e))?;
        Ok(())
    }

    /// Hand bar backgrounds back to the window theme.
    fn clear_colors(&self, env: &mut JNIEnv<'local>) -> Result<()> {
        env.call_method(
            &self.window,
            "clearFlags",
            "(I)V",
            &[JValue::Int(FLAG_DRAWS_SYSTEM_BAR_BACKGROUNDS)],
        )
        .map_err(|e| jni_err("Window.clearFlags", e))?;
        Ok(())
    }

    /// Light/dark glyphs for both bars. "dark" content means the bar has a
    /// light appearance in Android terms.
    fn apply_content_styles(
        &self,
        env: &mut JNIEnv<'local>,
        appearance: &AppearanceConfig,
    ) -> Result<()> {
        let dark_status = appearance.status_bar_content.wants_dark_glyphs();
        let dark_navigation = appearance.navigation_bar_content.wants_dark_glyphs();

        if self.sdk >= API_R {
            let controller = env
                .call_method(
                    &self.window,
                    "getInsetsController",
                    "()Landroid/view/WindowInsetsController;",
                    &[],
                )
                .map_err(|e| jni_err("Window.getInsetsController", e))?
                .l()
                .map_err(|e| jni_err("getInsetsController->l", e))?;
            if controller.is_null() {
                tracing::debug!("Android: no insets controller yet, skipping bar appearance");
                return Ok(());
            }

            let mut flags = 0;
            if dark_status {
                flags |= APPEARANCE_LIGHT_STATUS_BARS;
            }
            if dark_navigation {
                flags |= APPEARANCE_LIGHT_NAVIGATION_BARS;
            }
            env.call_method(
                &controller,
                "setSystemBarsAppearance",
                "(II)V",
                &[
                    JValue::Int(flags),
                    JValue::Int(APPEARANCE_LIGHT_STATUS_BARS | APPEARANCE_LIGHT_NAVIGATION_BARS),
                ],
            )
            .map_err(|e| jni_err("WindowInsetsController.setSystemBarsAppearance", e))?;
            return Ok(());
        }

        if self.sdk >= API_MARSHMALLOW {
            self.update_legacy_flags(env, LEGACY_LIGHT_STATUS_BAR, dark_status)?;
        }
        if self.sdk >= API_OREO {
            self.update_legacy_flags(env, LEGACY_LIGHT_NAVIGATION_BAR, dark_navigation)?;
        }
        Ok(())
    }

    fn apply_appearance(
        &self,
        env: &mut JNIEnv<'local>,
        appearance: &AppearanceConfig,
    ) -> Result<()> {
        if appearance.custom_colors_for_system_bars {
            self.apply_colors(env, appearance)?;
        }
        self.apply_content_styles(env, appearance)
    }

    fn set_top_inset(&self, env: &mut JNIEnv<'local>, inset: i32, animated: bool) -> Result<()> {
        if animated {
            env.call_static_method(
                "android/transition/TransitionManager",
                "beginDelayedTransition",
                "(Landroid/view/ViewGroup;)V",
                &[JValue::Object(&self.content)],
            )
            .map_err(|e| jni_err("TransitionManager.beginDelayedTransition", e))?;
        }

        env.call_method(
            &self.content,
            "setPadding",
            "(IIII)V",
            &[
                JValue::Int(0),
                JValue::Int(inset),
                JValue::Int(0),
                JValue::Int(0),
            ],
        )
        .map_err(|e| jni_err("View.setPadding", e))?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Backend struct
// ---------------------------------------------------------------------------

/// Android implementation of the system bar backend.
///
/// The struct is zero-sized; all state lives on the Java side.
pub struct AndroidBars;

impl AndroidBars {
    /// Create a new Android backend.
    ///
    /// No JNI work happens here; the activity is looked up on every call.
    pub fn new() -> Self {
        Self
    }
}

impl Default for AndroidBars {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBars for AndroidBars {
    fn platform_name(&self) -> &str {
        "Android"
    }

    fn enable(&self, inset: i32, animated: bool, appearance: &AppearanceConfig) -> Result<()> {
        with_activity(|env, activity| {
            let handles = WindowHandles::resolve(env, activity)?;
            tracing::debug!(sdk = handles.sdk, inset, animated, "Android: enabling edge-to-edge");

            handles.set_decor_fits_system_windows(env, false)?;
            let applied = handles.apply_appearance(env, appearance).and_then(|()| {
                handles.set_top_inset(env, inset, animated)
            });
            undo_on_error(applied, || handles.set_decor_fits_system_windows(env, true))
        })
    }

    /// Bars are tinted before the layout is touched, so a failed JNI call
    /// never leaves the content half-refitted.
    fn disable(&self, appearance: &AppearanceConfig) -> Result<()> {
        with_activity(|env, activity| {
            let handles = WindowHandles::resolve(env, activity)?;
            tracing::debug!(sdk = handles.sdk, "Android: disabling edge-to-edge");

            handles.apply_appearance(env, appearance)?;
            handles.set_top_inset(env, 0, false)?;
            handles.set_decor_fits_system_windows(env, true)
        })
    }

    fn reset_insets(&self) -> Result<()> {
        with_activity(|env, activity| {
            let handles = WindowHandles::resolve(env, activity)?;
            tracing::debug!(sdk = handles.sdk, "Android: resetting system window insets");

            handles.set_top_inset(env, 0, false)?;
            handles.set_decor_fits_system_windows(env, true)?;
            handles.clear_colors(env)?;
            handles.apply_content_styles(env, &AppearanceConfig::default())
        })
    }
}
