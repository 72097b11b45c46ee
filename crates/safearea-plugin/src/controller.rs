// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Appearance controller.
//
// Holds the offset and enablement state and forwards each request to the
// platform's system bar backend. State only changes after the backend call
// succeeds.

use safearea_bridge::SystemBars;
use safearea_core::{AppearanceConfig, Result};

pub struct SafeArea {
    bars: Box<dyn SystemBars>,
    offset: i32,
    enabled: bool,
    appearance: Option<AppearanceConfig>,
}

impl SafeArea {
    pub fn new(bars: Box<dyn SystemBars>) -> Self {
        Self {
            bars,
            offset: 0,
            enabled: false,
            appearance: None,
        }
    }

    pub fn platform_name(&self) -> &str {
        self.bars.platform_name()
    }

    /// Space reserved at the top edge while enabled.
    pub fn offset(&self) -> i32 {
        self.offset
    }

    /// Takes effect on the next `enable`.
    pub fn set_offset(&mut self, offset: i32) {
        self.offset = offset;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// The configuration most recently applied, if any.
    pub fn appearance(&self) -> Option<&AppearanceConfig> {
        self.appearance.as_ref()
    }

    /// Extend content under the system bars, reserve the offset and apply
    /// `appearance`. Safe to call repeatedly; each call re-applies fully.
    pub fn enable(&mut self, animated: bool, appearance: AppearanceConfig) -> Result<()> {
        self.bars.enable(self.offset, animated, &appearance)?;
        tracing::info!(
            platform = self.bars.platform_name(),
            offset = self.offset,
            animated,
            "safe area enabled"
        );
        self.enabled = true;
        self.appearance = Some(appearance);
        Ok(())
    }

    /// Remove the reserved offset and restore the bars. The stored offset
    /// is kept for the next `enable`.
    pub fn disable(&mut self, appearance: AppearanceConfig) -> Result<()> {
        self.bars.disable(&appearance)?;
        tracing::info!(platform = self.bars.platform_name(), "safe area disabled");
        self.enabled = false;
        self.appearance = Some(appearance);
        Ok(())
    }

    /// Put the content view back inside the system bars, whatever the
    /// current state.
    pub fn reset_decor_fits_system_windows(&mut self) -> Result<()> {
        self.bars.reset_insets()?;
        tracing::debug!(platform = self.bars.platform_name(), "system window insets reset");
        self.enabled = false;
        self.appearance = None;
        Ok(())
    }
}

impl std::fmt::Debug for SafeArea {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SafeArea")
            .field("platform", &self.bars.platform_name())
            .field("offset", &self.offset)
            .field("enabled", &self.enabled)
            .field("appearance", &self.appearance)
            .finish()
    }
}
