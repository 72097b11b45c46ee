// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Plugin entry point.
//
// Receives lifecycle calls and the `enable` / `disable` commands from the
// bridge, decodes their arguments once, and hands a fresh configuration to
// the appearance controller. Everything runs synchronously on the host UI
// thread; each invocation is answered before the call returns.

use serde::Deserialize;
use serde_json::{Map, Value};

use safearea_bridge::SystemBars;
use safearea_core::config::decode_offset;
use safearea_core::{AppearanceConfig, Result, SafeAreaConfig, SafeAreaError, StartupConfig};

use crate::controller::SafeArea;
use crate::host::PluginHost;
use crate::invoke::Invocation;

/// Arguments shared by both commands: `{ config?: object | null }`.
#[derive(Debug, Default, Deserialize)]
struct ConfigArgs {
    #[serde(default)]
    config: Option<Map<String, Value>>,
}

impl ConfigArgs {
    fn from_invocation(invoke: &Invocation) -> Result<Map<String, Value>> {
        let args: ConfigArgs = invoke.parse_args()?;
        Ok(args.config.unwrap_or_default())
    }
}

/// The bridge-facing SafeArea plugin.
pub struct SafeAreaPlugin<H: PluginHost> {
    host: H,
    safe_area: SafeArea,
}

impl<H: PluginHost> SafeAreaPlugin<H> {
    /// Name the plugin is registered under on the bridge.
    pub const NAME: &'static str = "safearea";

    pub fn new(host: H, bars: Box<dyn SystemBars>) -> Self {
        Self {
            host,
            safe_area: SafeArea::new(bars),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn safe_area(&self) -> &SafeArea {
        &self.safe_area
    }

    /// Host view is ready. Applies the startup configuration if it asks for
    /// the safe area to be enabled. Best-effort: failures are logged only.
    pub fn load(&mut self) {
        let startup = StartupConfig::from_map(self.host.plugin_config());
        tracing::debug!(
            enabled = startup.enabled,
            offset = startup.offset,
            "safearea: startup configuration"
        );
        if !startup.enabled {
            return;
        }

        if let Err(e) = self.apply_enable(Some(startup.offset), false, startup.appearance) {
            tracing::warn!(error = %e, "safearea: could not apply startup configuration");
        }
    }

    /// Host view lost the foreground. Always reverts insets, then runs the
    /// host's own pause behaviour.
    pub fn pause(&mut self) {
        if let Err(e) = self.safe_area.reset_decor_fits_system_windows() {
            tracing::warn!(error = %e, "safearea: failed to reset insets on pause");
        }
        self.host.on_pause();
    }

    /// Route a named command to its handler.
    pub fn handle(&mut self, command: &str, invoke: Invocation) {
        match command {
            "enable" => self.enable(invoke),
            "disable" => self.disable(invoke),
            other => {
                let err = SafeAreaError::UnknownCommand(other.to_string());
                tracing::warn!(command = other, "safearea: rejecting unknown command");
                invoke.reject(&err);
            }
        }
    }

    /// `enable { config? }`
    pub fn enable(&mut self, invoke: Invocation) {
        let result = ConfigArgs::from_invocation(&invoke).and_then(|bag| {
            let offset = decode_offset(&bag)?;
            let appearance = AppearanceConfig::from_map(&bag);
            tracing::debug!(?offset, ?appearance, "safearea: enable");
            self.apply_enable(offset, true, appearance)
        });
        Self::answer(invoke, "enable", result);
    }

    /// `disable { config? }`. Any `offset` in the bag is ignored.
    pub fn disable(&mut self, invoke: Invocation) {
        let result = ConfigArgs::from_invocation(&invoke).and_then(|bag| {
            let appearance = AppearanceConfig::from_map(&bag);
            tracing::debug!(?appearance, "safearea: disable");
            self.safe_area.disable(appearance)
        });
        Self::answer(invoke, "disable", result);
    }

    /// Typed equivalent of the `enable` command for Rust callers.
    pub fn enable_with(&mut self, config: SafeAreaConfig) -> Result<()> {
        self.apply_enable(Some(config.offset), true, config.appearance)
    }

    /// Typed equivalent of the `disable` command for Rust callers.
    pub fn disable_with(&mut self, appearance: AppearanceConfig) -> Result<()> {
        self.safe_area.disable(appearance)
    }

    /// Set the offset (if given) and enable; on failure the previous offset
    /// is restored so state matches the last successful call.
    fn apply_enable(
        &mut self,
        offset: Option<i32>,
        animated: bool,
        appearance: AppearanceConfig,
    ) -> Result<()> {
        let previous = self.safe_area.offset();
        if let Some(offset) = offset {
            self.safe_area.set_offset(offset);
        }
        self.safe_area.enable(animated, appearance).inspect_err(|_| {
            self.safe_area.set_offset(previous);
        })
    }

    fn answer(invoke: Invocation, command: &str, result: Result<()>) {
        match result {
            Ok(()) => invoke.resolve(),
            Err(e) => {
                tracing::warn!(command, code = e.code(), error = %e, "safearea: invocation rejected");
                invoke.reject(&e);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::StaticHost;
    use crate::invoke::InvokeResponse;
    use safearea_bridge::stub::StubBars;
    use safearea_core::BarContent;
    use serde_json::json;

    fn plugin_with(config: Value) -> (SafeAreaPlugin<StaticHost>, StubBars) {
        let bars = StubBars::new();
        let plugin = SafeAreaPlugin::new(StaticHost::from_json(config), Box::new(bars.clone()));
        (plugin, bars)
    }

    fn call(plugin: &mut SafeAreaPlugin<StaticHost>, command: &str, args: Value) -> InvokeResponse {
        let (invoke, slot) = Invocation::pending(args);
        plugin.handle(command, invoke);
        slot.take().expect("invocation answered")
    }

    fn resolved() -> InvokeResponse {
        InvokeResponse::Resolved { payload: None }
    }

    fn rejected_code(response: InvokeResponse) -> String {
        match response {
            InvokeResponse::Rejected { code, .. } => code,
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn load_applies_enabled_startup_config() {
        let (mut plugin, bars) = plugin_with(json!({
            "enabled": true,
            "offset": 24,
            "statusBarContent": "dark",
        }));
        plugin.load();

        let safe_area = plugin.safe_area();
        assert!(safe_area.is_enabled());
        assert_eq!(safe_area.offset(), 24);
        let applied = safe_area.appearance().expect("appearance applied");
        assert_eq!(applied.status_bar_content, BarContent::Dark);
        assert_eq!(
            *applied,
            AppearanceConfig {
                status_bar_content: BarContent::Dark,
                ..AppearanceConfig::default()
            }
        );

        let snap = bars.snapshot();
        assert_eq!(snap.inset, 24);
        assert_eq!(snap.last_animated, Some(false));
    }

    #[test]
    fn load_does_nothing_when_disabled() {
        let (mut plugin, bars) = plugin_with(json!({ "offset": 24 }));
        plugin.load();

        assert!(!plugin.safe_area().is_enabled());
        assert_eq!(plugin.safe_area().offset(), 0);
        assert_eq!(bars.snapshot().enable_calls, 0);
    }

    #[test]
    fn load_swallows_backend_failure() {
        let (mut plugin, bars) = plugin_with(json!({ "enabled": true, "offset": 10 }));
        bars.fail_next_call();
        plugin.load();

        assert!(!plugin.safe_area().is_enabled());
        assert_eq!(plugin.safe_area().offset(), 0);
    }

    #[test]
    fn enable_then_disable_leaves_disabled() {
        let (mut plugin, bars) = plugin_with(json!({}));
        let first = call(
            &mut plugin,
            "enable",
            json!({ "config": { "offset": 40, "statusBarColor": "#FFFFFF" } }),
        );
        assert_eq!(first, resolved());
        assert_eq!(call(&mut plugin, "disable", json!({ "config": {} })), resolved());

        assert!(!plugin.safe_area().is_enabled());
        let snap = bars.snapshot();
        assert!(!snap.draws_under_system_bars);
        assert_eq!(snap.inset, 0);
        assert_eq!(snap.last_animated, Some(true));
    }

    #[test]
    fn disable_ignores_offset() {
        let (mut plugin, _bars) = plugin_with(json!({}));
        call(&mut plugin, "enable", json!({ "config": { "offset": 5 } }));
        call(&mut plugin, "disable", json!({ "config": { "offset": 99 } }));
        assert_eq!(plugin.safe_area().offset(), 5);
    }

    #[test]
    fn pause_always_reverts_insets() {
        let (mut plugin, bars) = plugin_with(json!({}));
        plugin.pause();
        assert!(!bars.snapshot().draws_under_system_bars);

        call(
            &mut plugin,
            "enable",
            json!({ "config": { "offset": 12, "statusBarColor": "#FFFFFF" } }),
        );
        assert!(bars.snapshot().draws_under_system_bars);

        plugin.pause();
        plugin.pause();
        let snap = bars.snapshot();
        assert!(!snap.draws_under_system_bars);
        assert_eq!(snap.inset, 0);
        assert_eq!(snap.status_bar_color, None);
        assert_eq!(snap.navigation_bar_color, None);
        assert!(!plugin.safe_area().is_enabled());
        assert_eq!(snap.reset_calls, 3);
        assert_eq!(plugin.host().pauses(), 3);
    }

    #[test]
    fn missing_offset_keeps_previous_and_config_is_replaced() {
        let (mut plugin, bars) = plugin_with(json!({}));
        call(
            &mut plugin,
            "enable",
            json!({ "config": { "offset": 10, "navigationBarContent": "dark" } }),
        );
        call(&mut plugin, "enable", json!({ "config": {} }));

        assert_eq!(plugin.safe_area().offset(), 10);
        assert_eq!(
            plugin.safe_area().appearance(),
            Some(&AppearanceConfig::default())
        );
        assert_eq!(bars.snapshot().inset, 10);
        assert_eq!(bars.snapshot().navigation_bar_content, BarContent::Light);
    }

    #[test]
    fn absent_or_null_config_is_empty() {
        let (mut plugin, _bars) = plugin_with(json!({}));
        assert_eq!(call(&mut plugin, "enable", Value::Null), resolved());
        assert_eq!(call(&mut plugin, "enable", json!({ "config": null })), resolved());
        assert_eq!(call(&mut plugin, "disable", json!({})), resolved());
    }

    #[test]
    fn malformed_config_rejects_only_that_call() {
        let (mut plugin, bars) = plugin_with(json!({}));
        call(&mut plugin, "enable", json!({ "config": { "offset": 7 } }));

        let response = call(&mut plugin, "enable", json!({ "config": "offset=9" }));
        assert_eq!(rejected_code(response), "DECODE_ERROR");
        assert_eq!(plugin.safe_area().offset(), 7);
        assert_eq!(bars.snapshot().enable_calls, 1);

        let response = call(&mut plugin, "enable", json!({ "config": { "offset": 9 } }));
        assert_eq!(response, resolved());
        assert_eq!(plugin.safe_area().offset(), 9);
    }

    #[test]
    fn non_integer_offset_is_a_decode_error() {
        let (mut plugin, bars) = plugin_with(json!({}));
        let response = call(&mut plugin, "enable", json!({ "config": { "offset": "12px" } }));
        assert_eq!(rejected_code(response), "DECODE_ERROR");
        assert!(!plugin.safe_area().is_enabled());
        assert_eq!(bars.snapshot().enable_calls, 0);
    }

    #[test]
    fn whole_number_offsets_from_javascript_are_accepted() {
        let (mut plugin, bars) = plugin_with(json!({ "enabled": true, "offset": 24.0 }));
        plugin.load();
        assert_eq!(plugin.safe_area().offset(), 24);

        let response = call(&mut plugin, "enable", json!({ "config": { "offset": 10.0 } }));
        assert_eq!(response, resolved());
        assert_eq!(plugin.safe_area().offset(), 10);
        assert_eq!(bars.snapshot().inset, 10);
    }

    #[test]
    fn negative_offset_is_accepted_raw() {
        let (mut plugin, bars) = plugin_with(json!({}));
        call(&mut plugin, "enable", json!({ "config": { "offset": -20 } }));
        assert_eq!(bars.snapshot().inset, -20);
    }

    #[test]
    fn backend_failure_rejects_and_restores_offset() {
        let (mut plugin, bars) = plugin_with(json!({}));
        call(&mut plugin, "enable", json!({ "config": { "offset": 3 } }));
        bars.fail_next_call();

        let response = call(&mut plugin, "enable", json!({ "config": { "offset": 50 } }));
        assert_eq!(rejected_code(response), "BRIDGE_ERROR");
        assert_eq!(plugin.safe_area().offset(), 3);
        assert!(plugin.safe_area().is_enabled());
    }

    #[test]
    fn unknown_command_is_rejected() {
        let (mut plugin, _bars) = plugin_with(json!({}));
        let response = call(&mut plugin, "hide", json!({}));
        assert_eq!(rejected_code(response), "UNKNOWN_COMMAND");
    }

    #[test]
    fn typed_api_matches_commands() {
        let (mut plugin, bars) = plugin_with(json!({}));
        plugin
            .enable_with(SafeAreaConfig {
                offset: 18,
                appearance: AppearanceConfig {
                    custom_colors_for_system_bars: false,
                    ..AppearanceConfig::default()
                },
            })
            .expect("enable_with");
        assert_eq!(bars.snapshot().inset, 18);
        assert_eq!(bars.snapshot().status_bar_color, None);

        plugin
            .disable_with(AppearanceConfig::default())
            .expect("disable_with");
        assert!(!plugin.safe_area().is_enabled());
    }
}
