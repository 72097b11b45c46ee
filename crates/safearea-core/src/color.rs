// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// System bar colors.
//
// Accepts the same notation as Android's `Color.parseColor`: `#RRGGBB`,
// `#AARRGGBB`, or one of a small set of color names.

use std::str::FromStr;

use crate::error::SafeAreaError;

/// A packed 32-bit ARGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BarColor(pub u32);

impl BarColor {
    pub const BLACK: BarColor = BarColor(0xFF00_0000);
    pub const WHITE: BarColor = BarColor(0xFFFF_FFFF);
    pub const TRANSPARENT: BarColor = BarColor(0x0000_0000);

    /// Parse a color, falling back to opaque black when the string is not
    /// a recognised color.
    pub fn parse_or_black(value: &str) -> Self {
        value.parse().unwrap_or_else(|e: SafeAreaError| {
            tracing::warn!(color = value, error = %e, "unrecognised bar color, using black");
            BarColor::BLACK
        })
    }

    pub fn alpha(self) -> u8 {
        (self.0 >> 24) as u8
    }

    pub fn red(self) -> u8 {
        (self.0 >> 16) as u8
    }

    pub fn green(self) -> u8 {
        (self.0 >> 8) as u8
    }

    pub fn blue(self) -> u8 {
        self.0 as u8
    }

    /// The signed form taken by `android.view.Window#setStatusBarColor(int)`.
    pub fn as_android_int(self) -> i32 {
        self.0 as i32
    }

    /// Normalised `(red, green, blue, alpha)` components for UIKit.
    pub fn components(self) -> (f64, f64, f64, f64) {
        let unit = |c: u8| f64::from(c) / 255.0;
        (
            unit(self.red()),
            unit(self.green()),
            unit(self.blue()),
            unit(self.alpha()),
        )
    }
}

impl FromStr for BarColor {
    type Err = SafeAreaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || SafeAreaError::InvalidColor(s.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let value = u32::from_str_radix(hex, 16).map_err(|_| invalid())?;
            return match hex.len() {
                6 => Ok(BarColor(0xFF00_0000 | value)),
                8 => Ok(BarColor(value)),
                _ => Err(invalid()),
            };
        }

        let named = match s.to_ascii_lowercase().as_str() {
            "black" => 0xFF00_0000,
            "darkgray" | "darkgrey" => 0xFF44_4444,
            "gray" | "grey" => 0xFF88_8888,
            "lightgray" | "lightgrey" => 0xFFCC_CCCC,
            "white" => 0xFFFF_FFFF,
            "red" => 0xFFFF_0000,
            "green" => 0xFF00_FF00,
            "blue" => 0xFF00_00FF,
            "yellow" => 0xFFFF_FF00,
            "cyan" | "aqua" => 0xFF00_FFFF,
            "magenta" | "fuchsia" => 0xFFFF_00FF,
            "transparent" => 0x0000_0000,
            _ => return Err(invalid()),
        };
        Ok(BarColor(named))
    }
}
