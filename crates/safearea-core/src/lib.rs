// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SafeArea — Core types, configuration decoding and error definitions shared
// across all crates.

pub mod color;
pub mod config;
pub mod error;

pub use color::BarColor;
pub use config::{AppearanceConfig, BarContent, SafeAreaConfig, StartupConfig};
pub use error::{Result, SafeAreaError};
