// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// One harness session: a plugin wired to the recording stub backend.

use serde::Deserialize;
use serde_json::{Value, json};

use safearea_bridge::stub::{BarsSnapshot, StubBars};
use safearea_core::{BarColor, SafeAreaError};
use safearea_plugin::{Invocation, SafeAreaPlugin, StaticHost};

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum Lifecycle {
    Load,
    Pause,
}

/// A single stdin line.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum Request {
    Command {
        command: String,
        #[serde(default)]
        args: Value,
    },
    Lifecycle {
        lifecycle: Lifecycle,
    },
}

pub struct Session {
    plugin: SafeAreaPlugin<StaticHost>,
    bars: StubBars,
}

impl Session {
    pub fn new(startup: Value) -> Self {
        let bars = StubBars::new();
        let plugin = SafeAreaPlugin::new(StaticHost::from_json(startup), Box::new(bars.clone()));
        Self { plugin, bars }
    }

    /// Answer one request line. Never fails: malformed lines come back as
    /// rejections and the session carries on.
    pub fn handle_line(&mut self, line: &str) -> Value {
        let mut response = match serde_json::from_str::<Request>(line) {
            Ok(Request::Command { command, args }) => {
                let (invoke, slot) = Invocation::pending(args);
                self.plugin.handle(&command, invoke);
                match slot.take() {
                    Some(answer) => {
                        serde_json::to_value(answer).unwrap_or_else(|e| rejection(&e.into()))
                    }
                    None => unanswered(&command),
                }
            }
            Ok(Request::Lifecycle { lifecycle }) => {
                match lifecycle {
                    Lifecycle::Load => self.plugin.load(),
                    Lifecycle::Pause => self.plugin.pause(),
                }
                json!({ "status": "ok" })
            }
            Err(e) => {
                tracing::warn!(error = %e, "unreadable request line");
                rejection(&SafeAreaError::Decode(e.to_string()))
            }
        };

        response["state"] = self.state();
        response
    }

    fn state(&self) -> Value {
        let safe_area = self.plugin.safe_area();
        json!({
            "platform": safe_area.platform_name(),
            "enabled": safe_area.is_enabled(),
            "offset": safe_area.offset(),
            "appearance": safe_area.appearance(),
            "bars": bars_json(&self.bars.snapshot()),
        })
    }
}

fn rejection(error: &SafeAreaError) -> Value {
    json!({
        "status": "rejected",
        "code": error.code(),
        "message": error.to_string(),
    })
}

/// A command that returned without answering its invocation.
fn unanswered(command: &str) -> Value {
    rejection(&SafeAreaError::Bridge(format!("{command} was not answered")))
}

fn color_json(color: Option<BarColor>) -> Value {
    color.map_or(Value::Null, |c| Value::String(format!("#{:08X}", c.0)))
}

fn bars_json(snap: &BarsSnapshot) -> Value {
    json!({
        "drawsUnderSystemBars": snap.draws_under_system_bars,
        "inset": snap.inset,
        "statusBarColor": color_json(snap.status_bar_color),
        "statusBarContent": snap.status_bar_content,
        "navigationBarColor": color_json(snap.navigation_bar_color),
        "navigationBarContent": snap.navigation_bar_content,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_then_enable_reports_state() {
        let mut session = Session::new(json!({ "enabled": true, "offset": 24 }));

        let loaded = session.handle_line(r#"{"lifecycle": "load"}"#);
        assert_eq!(loaded["status"], "ok");
        assert_eq!(loaded["state"]["enabled"], true);
        assert_eq!(loaded["state"]["bars"]["inset"], 24);

        let enabled = session.handle_line(
            r##"{"command": "enable", "args": {"config": {"statusBarColor": "#336699", "statusBarContent": "dark"}}}"##,
        );
        assert_eq!(enabled["status"], "resolved");
        assert_eq!(enabled["state"]["offset"], 24);
        assert_eq!(enabled["state"]["bars"]["statusBarColor"], "#FF336699");
        assert_eq!(enabled["state"]["bars"]["statusBarContent"], "dark");
        assert_eq!(enabled["state"]["appearance"]["statusBarContent"], "dark");
    }

    #[test]
    fn pause_reports_not_drawing_under_bars() {
        let mut session = Session::new(json!({}));
        session.handle_line(r#"{"command": "enable", "args": {}}"#);
        let paused = session.handle_line(r#"{"lifecycle": "pause"}"#);
        assert_eq!(paused["state"]["bars"]["drawsUnderSystemBars"], false);
        assert_eq!(paused["state"]["appearance"], Value::Null);
    }

    #[test]
    fn bad_lines_are_rejected_and_session_continues() {
        let mut session = Session::new(json!({}));

        let garbage = session.handle_line("not json");
        assert_eq!(garbage["status"], "rejected");
        assert_eq!(garbage["code"], "DECODE_ERROR");

        let bad_config = session.handle_line(r#"{"command": "enable", "args": {"config": 5}}"#);
        assert_eq!(bad_config["code"], "DECODE_ERROR");
        assert_eq!(bad_config["state"]["enabled"], false);

        let unknown = session.handle_line(r#"{"command": "toggle"}"#);
        assert_eq!(unknown["code"], "UNKNOWN_COMMAND");

        let ok = session.handle_line(r#"{"command": "disable"}"#);
        assert_eq!(ok["status"], "resolved");
    }

    #[test]
    fn unanswered_command_uses_bridge_error_code() {
        let silent = unanswered("enable");
        assert_eq!(silent["status"], "rejected");
        assert_eq!(silent["code"], "BRIDGE_ERROR");
        assert!(silent["message"].as_str().is_some_and(|m| m.contains("enable")));
    }
}
