// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for SafeArea.

use thiserror::Error;

/// Top-level error type for all SafeArea operations.
#[derive(Debug, Error)]
pub enum SafeAreaError {
    // -- Invocation errors --
    #[error("failed to decode invocation arguments: {0}")]
    Decode(String),

    #[error("unknown command: {0}")]
    UnknownCommand(String),

    #[error("invalid color: {0:?}")]
    InvalidColor(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    // -- Host I/O --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl SafeAreaError {
    /// Stable code reported to the web view when an invocation is rejected.
    pub fn code(&self) -> &'static str {
        match self {
            SafeAreaError::Decode(_) | SafeAreaError::Serialization(_) => "DECODE_ERROR",
            SafeAreaError::UnknownCommand(_) => "UNKNOWN_COMMAND",
            SafeAreaError::InvalidColor(_) => "INVALID_COLOR",
            SafeAreaError::Bridge(_) => "BRIDGE_ERROR",
            SafeAreaError::Io(_) => "IO_ERROR",
        }
    }
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, SafeAreaError>;
