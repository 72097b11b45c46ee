// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// SafeArea harness — drives the plugin from the command line.
//
// Reads the startup configuration from the file named by the first argument
// (or `SAFEAREA_CONFIG`), then answers one JSON request per stdin line with
// one JSON response per stdout line. Logs go to stderr.

mod config;
mod session;

use std::io::{BufRead, Write};
use std::process::ExitCode;

use session::Session;

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(config::CONFIG_ENV).ok());

    let startup = match config::load_startup_config(path.as_deref()) {
        Ok(value) => value,
        Err(e) => {
            tracing::error!(error = %e, path = ?path, "failed to read startup configuration");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(path = ?path, "SafeArea harness starting");
    let mut session = Session::new(startup);

    let stdin = std::io::stdin();
    let mut stdout = std::io::stdout().lock();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(e) => {
                tracing::error!(error = %e, "failed to read stdin");
                return ExitCode::FAILURE;
            }
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = session.handle_line(&line);
        if let Err(e) = writeln!(stdout, "{response}") {
            tracing::error!(error = %e, "failed to write response");
            return ExitCode::FAILURE;
        }
    }

    ExitCode::SUCCESS
}
