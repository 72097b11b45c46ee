// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SafeArea — web-view plugin for system bar appearance.
//
// Straight-line call chain: bridge → `SafeAreaPlugin` → configuration
// decoder → `SafeArea` controller → platform `SystemBars` backend.

pub mod controller;
pub mod host;
pub mod invoke;
pub mod plugin;

use safearea_bridge::SystemBars;

pub use controller::SafeArea;
pub use host::{PluginHost, StaticHost};
pub use invoke::{InvokeResponse, Invocation, ResponseSlot};
pub use plugin::SafeAreaPlugin;

/// Initialise the plugin against the current platform's system bars.
pub fn init<H: PluginHost>(host: H) -> SafeAreaPlugin<H> {
    let bars = safearea_bridge::platform_bars();
    tracing::info!(
        plugin = SafeAreaPlugin::<H>::NAME,
        platform = bars.platform_name(),
        "plugin initialised"
    );
    SafeAreaPlugin::new(host, bars)
}
