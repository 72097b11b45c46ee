// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// iOS system bar backend via objc2.
//
// Requires compilation with the iOS SDK (Xcode). This module is cfg-gated to
// `target_os = "ios"` and will not compile on other platforms. All UIKit
// interactions require the main thread; every method returns
// `SafeAreaError::Bridge` if called off-main.
//
// iOS has no tintable navigation bar: the navigation bar fields of the
// appearance configuration are accepted and ignored. The status bar has no
// background of its own either, so its color is painted onto the root view,
// which shows through once content extends under the bar.
//
// Status bar content style only takes effect when the host app sets
// `UIViewControllerBasedStatusBarAppearance` to `NO` in its Info.plist. With
// view-controller-based appearance UIKit asks the root view controller's
// `preferredStatusBarStyle`, which this backend does not override.

#![cfg(target_os = "ios")]

use objc2::rc::Retained;
use objc2::runtime::AnyObject;
use objc2::{MainThreadMarker, class, msg_send};
use objc2_core_foundation::CGFloat;
use objc2_ui_kit::{UIApplication, UIEdgeInsets, UIViewController};

use safearea_core::{AppearanceConfig, BarContent, Result, SafeAreaError};

use crate::traits::SystemBars;

/// `UIStatusBarStyleDefault`
const STATUS_BAR_STYLE_DEFAULT: isize = 0;
/// `UIStatusBarStyleLightContent`
const STATUS_BAR_STYLE_LIGHT_CONTENT: isize = 1;
/// `UIStatusBarStyleDarkContent` (iOS 13)
const STATUS_BAR_STYLE_DARK_CONTENT: isize = 3;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Assert that we are on the main thread and return the marker.
fn require_main_thread() -> Result<MainThreadMarker> {
    MainThreadMarker::new()
        .ok_or_else(|| SafeAreaError::Bridge("must be called from the main thread".into()))
}

/// Obtain the shared application and the key window's root view controller.
///
/// Uses the deprecated `keyWindow` property for broad iOS-version compat.
fn app_and_root() -> Result<(Retained<UIApplication>, Retained<UIViewController>)> {
    let mtm = require_main_thread()?;
    let app = UIApplication::sharedApplication(mtm);

    // SAFETY: msg_send! to well-known UIApplication / UIWindow selectors.
    // MainThreadMarker guarantees we are on the main thread.
    let root: Option<Retained<UIViewController>> = unsafe {
        let window: Option<Retained<AnyObject>> = msg_send![&app, keyWindow];
        window.and_then(|w| msg_send![&w, rootViewController])
    };

    let root =
        root.ok_or_else(|| SafeAreaError::Bridge("no root view controller available".into()))?;
    Ok((app, root))
}

fn root_view(root: &UIViewController) -> Result<Retained<AnyObject>> {
    // SAFETY: `view` is a UIViewController property; loads the view if needed.
    let view: Option<Retained<AnyObject>> = unsafe { msg_send![root, view] };
    view.ok_or_else(|| SafeAreaError::Bridge("root view controller has no view".into()))
}

fn set_top_inset(root: &UIViewController, inset: i32) {
    let insets = UIEdgeInsets {
        top: inset as CGFloat,
        left: 0.0,
        bottom: 0.0,
        right: 0.0,
    };
    // SAFETY: `additionalSafeAreaInsets` is available from iOS 11; the
    // struct layout matches UIKit's UIEdgeInsets.
    unsafe {
        let _: () = msg_send![root, setAdditionalSafeAreaInsets: insets];
    }
}

/// Whether the root view derives its layout margins from the safe area.
fn set_margins_from_safe_area(view: &AnyObject, from_safe_area: bool) {
    // SAFETY: `insetsLayoutMarginsFromSafeArea` is a BOOL property on UIView.
    unsafe {
        let _: () = msg_send![view, setInsetsLayoutMarginsFromSafeArea: from_safe_area];
        let _: () = msg_send![view, setNeedsLayout];
    }
}

fn paint_status_bar(view: &AnyObject, appearance: &AppearanceConfig) {
    let (r, g, b, a) = appearance.status_bar().components();
    // SAFETY: class method on UIColor returning an autoreleased color, then
    // a plain property setter on UIView.
    unsafe {
        let color: Retained<AnyObject> = msg_send![
            class!(UIColor),
            colorWithRed: r as CGFloat,
            green: g as CGFloat,
            blue: b as CGFloat,
            alpha: a as CGFloat
        ];
        let _: () = msg_send![view, setBackgroundColor: &*color];
    }
}

fn set_status_bar_style(
    app: &UIApplication,
    root: &UIViewController,
    style: isize,
    animated: bool,
) {
    // SAFETY: both selectors exist on every supported iOS release.
    // `setStatusBarStyle:animated:` is a no-op under view-controller-based
    // appearance; the update request then only re-reads the host's style.
    unsafe {
        let _: () = msg_send![app, setStatusBarStyle: style, animated: animated];
        let _: () = msg_send![root, setNeedsStatusBarAppearanceUpdate];
    }
}

fn status_bar_style(content: BarContent) -> isize {
    match content {
        BarContent::Light => STATUS_BAR_STYLE_LIGHT_CONTENT,
        BarContent::Dark => STATUS_BAR_STYLE_DARK_CONTENT,
    }
}

// ---------------------------------------------------------------------------
// Backend struct
// ---------------------------------------------------------------------------

/// iOS implementation of the system bar backend.
pub struct IosBars;

impl IosBars {
    pub fn new() -> Self {
        Self
    }
}

impl Default for IosBars {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemBars for IosBars {
    fn platform_name(&self) -> &str {
        "iOS"
    }

    fn enable(&self, inset: i32, animated: bool, appearance: &AppearanceConfig) -> Result<()> {
        let (app, root) = app_and_root()?;
        let view = root_view(&root)?;
        tracing::debug!(inset, animated, "iOS: extending content under system bars");

        set_margins_from_safe_area(&view, false);
        set_top_inset(&root, inset);
        if appearance.custom_colors_for_system_bars {
            paint_status_bar(&view, appearance);
            tracing::debug!(
                color = %appearance.navigation_bar_color,
                "iOS: no navigation bar to tint"
            );
        }
        set_status_bar_style(
            &app,
            &root,
            status_bar_style(appearance.status_bar_content),
            animated,
        );
        Ok(())
    }

    fn disable(&self, appearance: &AppearanceConfig) -> Result<()> {
        let (app, root) = app_and_root()?;
        let view = root_view(&root)?;
        tracing::debug!("iOS: restoring safe area layout");

        set_top_inset(&root, 0);
        set_margins_from_safe_area(&view, true);
        if appearance.custom_colors_for_system_bars {
            paint_status_bar(&view, appearance);
        }
        set_status_bar_style(
            &app,
            &root,
            status_bar_style(appearance.status_bar_content),
            false,
        );
        Ok(())
    }

    fn reset_insets(&self) -> Result<()> {
        let (app, root) = app_and_root()?;
        let view = root_view(&root)?;

        set_top_inset(&root, 0);
        set_margins_from_safe_area(&view, true);
        set_status_bar_style(&app, &root, STATUS_BAR_STYLE_DEFAULT, false);
        Ok(())
    }
}
