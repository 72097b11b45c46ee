// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// The hosting web view, as seen by the plugin.

use std::cell::Cell;

use serde_json::{Map, Value};

/// Host-owned context handed to the plugin at construction.
///
/// The host drives the plugin's lifecycle; the plugin never owns it.
pub trait PluginHost {
    /// Static plugin configuration from the host's embedding config.
    fn plugin_config(&self) -> &Map<String, Value>;

    /// Base pause behaviour, run after the plugin has reverted its
    /// overrides.
    fn on_pause(&self) {}
}

/// Host with a fixed configuration bag, for embedders that read their
/// plugin configuration once up front.
#[derive(Debug, Default)]
pub struct StaticHost {
    config: Map<String, Value>,
    pauses: Cell<u32>,
}

impl StaticHost {
    pub fn new(config: Map<String, Value>) -> Self {
        Self {
            config,
            pauses: Cell::new(0),
        }
    }

    /// Build from any JSON value; non-objects give an empty configuration.
    pub fn from_json(value: Value) -> Self {
        match value {
            Value::Object(map) => Self::new(map),
            other => {
                tracing::warn!(kind = json_kind(&other), "plugin config is not an object, ignoring");
                Self::default()
            }
        }
    }

    /// How many times the host has been paused.
    pub fn pauses(&self) -> u32 {
        self.pauses.get()
    }
}

impl PluginHost for StaticHost {
    fn plugin_config(&self) -> &Map<String, Value> {
        &self.config
    }

    fn on_pause(&self) {
        self.pauses.set(self.pauses.get() + 1);
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
