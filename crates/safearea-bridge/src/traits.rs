// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Platform-agnostic trait for native system bar control.
//
// Android and iOS implement the same contract; keeping it behind one trait
// stops the two native call chains from drifting apart.

use safearea_core::{AppearanceConfig, Result};

/// Native control over the status bar, navigation bar and content insets.
///
/// All methods are called on the host UI thread. Each call fully re-applies
/// its state; backends do not diff against previous calls.
pub trait SystemBars {
    /// Human-readable platform name (e.g. "Android", "iOS").
    fn platform_name(&self) -> &str;

    /// Draw content under the system bars, reserve `inset` at the top edge
    /// and apply the bar appearance.
    fn enable(&self, inset: i32, animated: bool, appearance: &AppearanceConfig) -> Result<()>;

    /// Remove the reserved inset and let the OS fit content inside the
    /// system bars again. Bars are tinted from `appearance` when it asks for
    /// custom colors.
    fn disable(&self, appearance: &AppearanceConfig) -> Result<()>;

    /// Put the window back to the OS defaults: content fitted inside the
    /// system bars, no reserved inset, theme bar colors and light glyphs.
    fn reset_insets(&self) -> Result<()>;
}

/// Pass `result` through, running `undo` first when it is an error.
///
/// Backends apply a call as a chain of native steps; this puts back the
/// first step when a later one fails. A failing `undo` is logged and the
/// original error is returned.
pub fn undo_on_error<T>(result: Result<T>, undo: impl FnOnce() -> Result<()>) -> Result<T> {
    if let Err(error) = &result {
        if let Err(undo_error) = undo() {
            tracing::warn!(%error, %undo_error, "could not undo partially applied bar state");
        }
    }
    result
}
