// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Appearance and startup configuration.
//
// Bridge arguments arrive as untyped JSON bags. Every appearance field is
// optional: a missing field, or one holding the wrong JSON type, takes its
// default. `offset` is coerced like `JSONObject#getInt`: numbers truncate
// toward zero and numeric strings are parsed. Anything else is an error,
// because a bogus offset would otherwise silently move the web content.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::color::BarColor;
use crate::error::{Result, SafeAreaError};

const KEY_CUSTOM_COLORS: &str = "customColorsForSystemBars";
const KEY_STATUS_BAR_COLOR: &str = "statusBarColor";
const KEY_STATUS_BAR_CONTENT: &str = "statusBarContent";
const KEY_NAVIGATION_BAR_COLOR: &str = "navigationBarColor";
const KEY_NAVIGATION_BAR_CONTENT: &str = "navigationBarContent";
const KEY_ENABLED: &str = "enabled";
const KEY_OFFSET: &str = "offset";

const DEFAULT_BAR_COLOR: &str = "#000000";

/// Style of the glyphs (clock, battery, nav buttons) drawn in a system bar.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BarContent {
    /// Light glyphs, for dark bar backgrounds.
    #[default]
    Light,
    /// Dark glyphs, for light bar backgrounds.
    Dark,
}

impl BarContent {
    fn from_value(value: &Value) -> Option<Self> {
        match value.as_str()? {
            "light" => Some(BarContent::Light),
            "dark" => Some(BarContent::Dark),
            _ => None,
        }
    }

    /// Whether the platform should draw dark glyphs ("light appearance").
    pub fn wants_dark_glyphs(self) -> bool {
        self == BarContent::Dark
    }
}

/// Appearance of the status and navigation bars for one call.
///
/// Built fresh from each invocation and replaced wholesale; never merged
/// with the previous configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppearanceConfig {
    /// Whether custom colors should be applied to system bars.
    #[serde(default = "default_custom_colors_for_system_bars")]
    pub custom_colors_for_system_bars: bool,
    /// The color of the status bar (default: `#000000`).
    #[serde(default = "default_bar_color")]
    pub status_bar_color: String,
    /// Glyph style in the status bar (default: `light`).
    #[serde(default)]
    pub status_bar_content: BarContent,
    /// The color of the navigation bar (default: `#000000`).
    #[serde(default = "default_bar_color")]
    pub navigation_bar_color: String,
    /// Glyph style in the navigation bar (default: `light`).
    #[serde(default)]
    pub navigation_bar_content: BarContent,
}

fn default_custom_colors_for_system_bars() -> bool {
    true
}

fn default_bar_color() -> String {
    DEFAULT_BAR_COLOR.to_string()
}

impl Default for AppearanceConfig {
    fn default() -> Self {
        Self {
            custom_colors_for_system_bars: default_custom_colors_for_system_bars(),
            status_bar_color: default_bar_color(),
            status_bar_content: BarContent::default(),
            navigation_bar_color: default_bar_color(),
            navigation_bar_content: BarContent::default(),
        }
    }
}

impl AppearanceConfig {
    /// Decode from an untyped key/value bag. Never fails.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        let string_field = |key: &str| {
            map.get(key)
                .and_then(Value::as_str)
                .map_or_else(default_bar_color, str::to_owned)
        };
        let content_field = |key: &str| {
            map.get(key)
                .and_then(BarContent::from_value)
                .unwrap_or_default()
        };

        Self {
            custom_colors_for_system_bars: map
                .get(KEY_CUSTOM_COLORS)
                .and_then(Value::as_bool)
                .unwrap_or_else(default_custom_colors_for_system_bars),
            status_bar_color: string_field(KEY_STATUS_BAR_COLOR),
            status_bar_content: content_field(KEY_STATUS_BAR_CONTENT),
            navigation_bar_color: string_field(KEY_NAVIGATION_BAR_COLOR),
            navigation_bar_content: content_field(KEY_NAVIGATION_BAR_CONTENT),
        }
    }

    /// Decode from an optional JSON value. Anything other than an object
    /// yields the defaults.
    pub fn from_json(value: Option<&Value>) -> Self {
        match value.and_then(Value::as_object) {
            Some(map) => Self::from_map(map),
            None => Self::default(),
        }
    }

    pub fn status_bar(&self) -> BarColor {
        BarColor::parse_or_black(&self.status_bar_color)
    }

    pub fn navigation_bar(&self) -> BarColor {
        BarColor::parse_or_black(&self.navigation_bar_color)
    }
}

/// Typed payload for enabling the safe area from Rust callers.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SafeAreaConfig {
    /// Space reserved at the top edge, in platform units (px on Android,
    /// points on iOS).
    #[serde(default)]
    pub offset: i32,
    #[serde(flatten)]
    pub appearance: AppearanceConfig,
}

/// Plugin configuration supplied once by the host at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartupConfig {
    /// Apply the safe area as soon as the plugin loads.
    pub enabled: bool,
    pub offset: i32,
    pub appearance: AppearanceConfig,
}

impl StartupConfig {
    /// Decode the host's plugin configuration bag. Never fails; an offset
    /// that cannot be coerced to an `i32` is ignored.
    pub fn from_map(map: &Map<String, Value>) -> Self {
        Self {
            enabled: map
                .get(KEY_ENABLED)
                .and_then(Value::as_bool)
                .unwrap_or(false),
            offset: map
                .get(KEY_OFFSET)
                .and_then(coerce_offset)
                .unwrap_or(0),
            appearance: AppearanceConfig::from_map(map),
        }
    }
}

/// Coerce a JSON value to an offset: integers as-is, other numbers
/// truncated toward zero, strings parsed as numbers. `None` for anything
/// else or for values outside `i32` range.
fn coerce_offset(value: &Value) -> Option<i32> {
    let number = match value {
        Value::Number(n) => match n.as_i64() {
            Some(v) => return i32::try_from(v).ok(),
            None => n.as_f64()?,
        },
        Value::String(s) => {
            let s = s.trim();
            match s.parse::<i64>() {
                Ok(v) => return i32::try_from(v).ok(),
                Err(_) => s.parse::<f64>().ok()?,
            }
        }
        _ => return None,
    };

    let truncated = number.trunc();
    if !truncated.is_finite() || truncated < f64::from(i32::MIN) || truncated > f64::from(i32::MAX) {
        return None;
    }
    Some(truncated as i32)
}

/// Read the `offset` field of an invocation bag.
///
/// Absent or `null` means "leave the offset alone". Any other value must
/// coerce to an `i32`; sign is not checked.
pub fn decode_offset(map: &Map<String, Value>) -> Result<Option<i32>> {
    match map.get(KEY_OFFSET) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => coerce_offset(value)
            .map(Some)
            .ok_or_else(|| SafeAreaError::Decode(format!("offset is not a number in i32 range: {value}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn bag(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("test bag is an object")
    }

    #[test]
    fn empty_bag_yields_defaults() {
        let cfg = AppearanceConfig::from_map(&Map::new());
        assert_eq!(cfg, AppearanceConfig::default());
        assert!(cfg.custom_colors_for_system_bars);
        assert_eq!(cfg.status_bar_color, "#000000");
        assert_eq!(cfg.status_bar_content, BarContent::Light);
        assert_eq!(cfg.navigation_bar_color, "#000000");
        assert_eq!(cfg.navigation_bar_content, BarContent::Light);
    }

    #[test]
    fn present_fields_are_taken_literally() {
        let cfg = AppearanceConfig::from_map(&bag(json!({
            "customColorsForSystemBars": false,
            "statusBarColor": "#FF0000",
            "statusBarContent": "dark",
            "navigationBarColor": "#00FF00",
            "navigationBarContent": "dark",
        })));
        assert!(!cfg.custom_colors_for_system_bars);
        assert_eq!(cfg.status_bar_color, "#FF0000");
        assert_eq!(cfg.status_bar_content, BarContent::Dark);
        assert_eq!(cfg.navigation_bar_color, "#00FF00");
        assert_eq!(cfg.navigation_bar_content, BarContent::Dark);
    }

    #[test]
    fn each_missing_field_defaults_independently() {
        let cfg = AppearanceConfig::from_map(&bag(json!({
            "statusBarContent": "dark",
            "navigationBarColor": "#123456",
        })));
        assert!(cfg.custom_colors_for_system_bars);
        assert_eq!(cfg.status_bar_color, "#000000");
        assert_eq!(cfg.status_bar_content, BarContent::Dark);
        assert_eq!(cfg.navigation_bar_color, "#123456");
        assert_eq!(cfg.navigation_bar_content, BarContent::Light);
    }

    #[test]
    fn wrong_types_are_treated_as_absent() {
        let cfg = AppearanceConfig::from_map(&bag(json!({
            "customColorsForSystemBars": "yes",
            "statusBarColor": 42,
            "statusBarContent": "sepia",
            "navigationBarColor": null,
            "navigationBarContent": true,
        })));
        assert_eq!(cfg, AppearanceConfig::default());
    }

    #[test]
    fn non_object_json_yields_defaults() {
        assert_eq!(
            AppearanceConfig::from_json(Some(&json!([1, 2]))),
            AppearanceConfig::default()
        );
        assert_eq!(AppearanceConfig::from_json(None), AppearanceConfig::default());
    }

    #[test]
    fn bar_colors_resolve_with_fallback() {
        let cfg = AppearanceConfig::from_map(&bag(json!({
            "statusBarColor": "#FFFFFF",
            "navigationBarColor": "chartreuse-ish",
        })));
        assert_eq!(cfg.status_bar(), BarColor::WHITE);
        assert_eq!(cfg.navigation_bar(), BarColor::BLACK);
    }

    #[test]
    fn startup_config_reads_enabled_and_offset() {
        let startup = StartupConfig::from_map(&bag(json!({
            "enabled": true,
            "offset": 24,
            "statusBarContent": "dark",
        })));
        assert!(startup.enabled);
        assert_eq!(startup.offset, 24);
        assert_eq!(startup.appearance.status_bar_content, BarContent::Dark);
        assert_eq!(startup.appearance.status_bar_color, "#000000");
    }

    #[test]
    fn startup_config_defaults_to_disabled() {
        let startup = StartupConfig::from_map(&bag(json!({ "offset": 1e12 })));
        assert_eq!(startup, StartupConfig::default());
    }

    #[test]
    fn offset_decoding() {
        assert_eq!(decode_offset(&Map::new()).expect("absent"), None);
        assert_eq!(decode_offset(&bag(json!({ "offset": null }))).expect("null"), None);
        assert_eq!(decode_offset(&bag(json!({ "offset": -8 }))).expect("negative"), Some(-8));
        assert!(decode_offset(&bag(json!({ "offset": 1_u64 << 40 }))).is_err());
        assert!(decode_offset(&bag(json!({ "offset": "12px" }))).is_err());
        assert!(decode_offset(&bag(json!({ "offset": true }))).is_err());
        assert!(decode_offset(&bag(json!({ "offset": [4] }))).is_err());
    }

    #[test]
    fn offset_coerces_like_get_int() {
        let offset = |v: Value| decode_offset(&bag(json!({ "offset": v }))).expect("coercible");
        assert_eq!(offset(json!(10.0)), Some(10));
        assert_eq!(offset(json!(27.5)), Some(27));
        assert_eq!(offset(json!(-3.9)), Some(-3));
        assert_eq!(offset(json!("10")), Some(10));
        assert_eq!(offset(json!(" 7.25 ")), Some(7));
        assert!(decode_offset(&bag(json!({ "offset": 3.0e10 }))).is_err());
    }

    #[test]
    fn startup_offset_accepts_float_and_string() {
        let startup = StartupConfig::from_map(&bag(json!({ "enabled": true, "offset": 24.0 })));
        assert_eq!(startup.offset, 24);
        let startup = StartupConfig::from_map(&bag(json!({ "offset": "16" })));
        assert_eq!(startup.offset, 16);
    }

    #[test]
    fn safe_area_config_flattens_appearance() {
        let cfg: SafeAreaConfig = serde_json::from_value(json!({
            "offset": 12,
            "navigationBarContent": "dark",
        }))
        .expect("typed payload");
        assert_eq!(cfg.offset, 12);
        assert_eq!(cfg.appearance.navigation_bar_content, BarContent::Dark);
        assert!(cfg.appearance.custom_colors_for_system_bars);
    }
}
