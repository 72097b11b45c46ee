// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>

//! SafeArea — Native system bar bridge abstractions.
//!
//! This crate defines the platform-agnostic [`traits::SystemBars`] capability
//! set and the dispatch logic that picks a backend for the target operating
//! system: Android (ART/JNI), iOS (UIKit via objc2), or a recording stub for
//! desktop and CI builds.

pub mod traits;

#[cfg(target_os = "ios")]
pub mod ios;

#[cfg(target_os = "android")]
pub mod android;

pub mod stub;

pub use traits::SystemBars;

/// Retrieves the system bar backend for the target operating system.
pub fn platform_bars() -> Box<dyn SystemBars> {
    #[cfg(target_os = "ios")]
    {
        Box::new(ios::IosBars::new())
    }
    #[cfg(target_os = "android")]
    {
        Box::new(android::AndroidBars::new())
    }
    #[cfg(not(any(target_os = "ios", target_os = "android")))]
    {
        // Desktop/CI: no system bars, record what would have been applied.
        Box::new(stub::StubBars::new())
    }
}
