// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Stub backend for desktop/CI builds where there are no system bars.
//
// Instead of touching a window it records the effective bar state, so the
// whole bridge → plugin → controller chain can be driven and asserted
// without a device. Clones share the same recorded state.

use std::cell::RefCell;
use std::rc::Rc;

use safearea_core::{AppearanceConfig, BarColor, BarContent, Result, SafeAreaError};

use crate::traits::SystemBars;

/// What a real device would currently be showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BarsSnapshot {
    /// Content extends under the status and navigation bars.
    pub draws_under_system_bars: bool,
    /// Space reserved at the top edge of the content view.
    pub inset: i32,
    /// `None` until a call applies custom colors.
    pub status_bar_color: Option<BarColor>,
    pub navigation_bar_color: Option<BarColor>,
    pub status_bar_content: BarContent,
    pub navigation_bar_content: BarContent,
    pub last_animated: Option<bool>,
    pub enable_calls: u32,
    pub disable_calls: u32,
    pub reset_calls: u32,
}

impl Default for BarsSnapshot {
    fn default() -> Self {
        Self {
            draws_under_system_bars: false,
            inset: 0,
            status_bar_color: None,
            navigation_bar_color: None,
            status_bar_content: BarContent::Light,
            navigation_bar_content: BarContent::Light,
            last_animated: None,
            enable_calls: 0,
            disable_calls: 0,
            reset_calls: 0,
        }
    }
}

#[derive(Debug, Default)]
struct StubState {
    bars: BarsSnapshot,
    fail_next: bool,
}

/// Recording backend returned on non-mobile platforms.
#[derive(Debug, Clone, Default)]
pub struct StubBars {
    state: Rc<RefCell<StubState>>,
}

impl StubBars {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the recorded bar state.
    pub fn snapshot(&self) -> BarsSnapshot {
        self.state.borrow().bars.clone()
    }

    /// Make the next native call fail with a bridge error, as a JNI or
    /// UIKit failure would.
    pub fn fail_next_call(&self) {
        self.state.borrow_mut().fail_next = true;
    }

    fn check_failure(&self, call: &str) -> Result<()> {
        let mut state = self.state.borrow_mut();
        if state.fail_next {
            state.fail_next = false;
            tracing::warn!(call, "stub bars: injected failure");
            return Err(SafeAreaError::Bridge(format!("{call}: injected failure")));
        }
        Ok(())
    }

    fn tint(bars: &mut BarsSnapshot, appearance: &AppearanceConfig) {
        if appearance.custom_colors_for_system_bars {
            bars.status_bar_color = Some(appearance.status_bar());
            bars.navigation_bar_color = Some(appearance.navigation_bar());
        }
        bars.status_bar_content = appearance.status_bar_content;
        bars.navigation_bar_content = appearance.navigation_bar_content;
    }
}

impl SystemBars for StubBars {
    fn platform_name(&self) -> &str {
        "Desktop (stub)"
    }

    fn enable(&self, inset: i32, animated: bool, appearance: &AppearanceConfig) -> Result<()> {
        self.check_failure("enable")?;
        tracing::debug!(inset, animated, "stub bars: enable");

        let mut state = self.state.borrow_mut();
        let bars = &mut state.bars;
        bars.draws_under_system_bars = true;
        bars.inset = inset;
        bars.last_animated = Some(animated);
        bars.enable_calls += 1;
        Self::tint(bars, appearance);
        Ok(())
    }

    fn disable(&self, appearance: &AppearanceConfig) -> Result<()> {
        self.check_failure("disable")?;
        tracing::debug!("stub bars: disable");

        let mut state = self.state.borrow_mut();
        let bars = &mut state.bars;
        bars.draws_under_system_bars = false;
        bars.inset = 0;
        bars.disable_calls += 1;
        Self::tint(bars, appearance);
        Ok(())
    }

    fn reset_insets(&self) -> Result<()> {
        self.check_failure("reset_insets")?;
        tracing::debug!("stub bars: reset insets");

        let mut state = self.state.borrow_mut();
        let bars = &mut state.bars;
        bars.draws_under_system_bars = false;
        bars.inset = 0;
        bars.status_bar_color = None;
        bars.navigation_bar_color = None;
        bars.status_bar_content = BarContent::Light;
        bars.navigation_bar_content = BarContent::Light;
        bars.reset_calls += 1;
        Ok(())
    }
}
