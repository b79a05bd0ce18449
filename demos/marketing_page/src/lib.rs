// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint-aware enhancements for a static marketing page.
//!
//! Registers the page's features with a [`ResponsiveController`] and installs
//! it. Features swap in and out as the viewport crosses the 768 px and 992 px
//! thresholds; `window.reflowTeardown()` removes everything.
//!
//! | Feature            | Compact | Tablet | Wide |
//! |--------------------|:-------:|:------:|:----:|
//! | `mobile_menu`      |    x    |   x    |      |
//! | `desktop_menu`     |         |        |  x   |
//! | `button_effect`    |    x    |   x    |  x   |
//! | `lazy_backgrounds` |    x    |   x    |  x   |
//! | `carousel`         |    x    |   x    |  x   |
//! | `service_pin`      |         |        |  x   |
//! | `smooth_scroll`    |         |   x    |  x   |
//!
//! Build with: `wasm-pack build --target web demos/marketing_page`
//! Then serve `demos/marketing_page/` and open `index.html`.

#![no_std]
#![cfg_attr(
    not(target_arch = "wasm32"),
    allow(dead_code, reason = "this crate only runs in the browser")
)]

extern crate alloc;

mod button;
mod carousel;
mod lazy;
mod menu;
mod services;
mod smooth_scroll;

use alloc::boxed::Box;
use alloc::format;
use alloc::vec;
use alloc::vec::Vec;

use reflow_backend_web::{ConsoleSink, ResponsiveController, dom};
use reflow_core::coordinator::CoordinatorConfig;
use reflow_core::feature::Feature;
use wasm_bindgen::prelude::*;

/// Name of the global teardown function installed on `window`.
pub const TEARDOWN_HOOK: &str = "reflowTeardown";

/// The page's features in registration order.
///
/// Order matters where features touch the same element: the mobile menu
/// releases `#main-navigation` before the desktop menu takes it over.
pub fn page_features() -> Vec<Box<dyn Feature>> {
    vec![
        Box::new(menu::mobile_menu()),
        Box::new(menu::desktop_menu()),
        Box::new(button::button_effect()),
        Box::new(lazy::lazy_backgrounds()),
        Box::new(carousel::carousel()),
        Box::new(services::service_pin()),
        Box::new(smooth_scroll::smooth_scroll()),
    ]
}

/// Entry point, run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    let controller =
        ResponsiveController::new(CoordinatorConfig::web()).map_err(|err| dom::to_js_error(&err))?;
    controller.set_sink(Box::new(ConsoleSink::default()));
    for feature in page_features() {
        controller
            .register_boxed(feature)
            .map_err(|err| JsValue::from_str(&format!("{err}")))?;
    }
    controller.set_layout_refresh(|| {
        if let Err(err) = services::refresh_layout() {
            web_sys::console::warn_1(&JsValue::from_str(&format!("{err}")));
        }
    });
    controller.expose_teardown(TEARDOWN_HOOK)?;
    controller.install()
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::{String, ToString as _};
    use reflow_core::breakpoint::BreakpointClass::{self, Compact, Tablet, Wide};
    use reflow_core::feature::is_breakpoint_sensitive;

    fn live_at(class: BreakpointClass) -> Vec<String> {
        page_features()
            .iter()
            .filter(|f| f.is_applicable(class))
            .map(|f| f.name().to_string())
            .collect()
    }

    #[test]
    fn feature_names_are_unique() {
        let features = page_features();
        let mut names: Vec<&str> = features.iter().map(|f| f.name()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), features.len());
    }

    #[test]
    fn applicability_matches_page_layout() {
        assert_eq!(
            live_at(Compact),
            ["mobile_menu", "button_effect", "lazy_backgrounds", "carousel"]
        );
        assert_eq!(
            live_at(Tablet),
            [
                "mobile_menu",
                "button_effect",
                "lazy_backgrounds",
                "carousel",
                "smooth_scroll"
            ]
        );
        assert_eq!(
            live_at(Wide),
            [
                "desktop_menu",
                "button_effect",
                "lazy_backgrounds",
                "carousel",
                "service_pin",
                "smooth_scroll"
            ]
        );
    }

    #[test]
    fn content_features_survive_breakpoint_changes() {
        let sensitive: Vec<String> = page_features()
            .iter()
            .filter(|f| is_breakpoint_sensitive(f.as_ref()))
            .map(|f| f.name().to_string())
            .collect();
        assert_eq!(
            sensitive,
            ["mobile_menu", "desktop_menu", "service_pin", "smooth_scroll"]
        );
    }
}
