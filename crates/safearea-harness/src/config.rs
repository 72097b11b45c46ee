// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Startup configuration file.

use std::path::Path;

use serde_json::{Map, Value};

use safearea_core::{Result, SafeAreaError};

/// Environment variable consulted when no path is given on the command line.
pub const CONFIG_ENV: &str = "SAFEAREA_CONFIG";

/// Read the plugin's startup configuration. No path means an empty
/// configuration; a file that is not a JSON object is an error.
pub fn load_startup_config(path: Option<&str>) -> Result<Value> {
    let Some(path) = path else {
        return Ok(Value::Object(Map::new()));
    };

    let text = std::fs::read_to_string(Path::new(path))?;
    let value: Value = serde_json::from_str(&text)?;
    if !value.is_object() {
        return Err(SafeAreaError::Decode(format!(
            "{path}: startup configuration must be a JSON object"
        )));
    }
    Ok(value)
}
