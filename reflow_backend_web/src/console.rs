// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle tracing to the browser console.

use alloc::format;
use alloc::string::String;

use reflow_core::trace::{
    FailureEvent, FeatureEvent, InactiveEvent, LifecycleSink, ReconcileEvent,
    ResizeDeferredEvent, StartEvent, TeardownEvent,
};
use wasm_bindgen::JsValue;
use web_sys::console;

/// A [`LifecycleSink`] that writes to the browser console.
///
/// Inactive features and deferred resizes go to `console.debug`, activation
/// failures to `console.warn`, everything else to `console.info`.
#[derive(Debug)]
pub struct ConsoleSink {
    prefix: String,
    verbose: bool,
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new("reflow")
    }
}

impl ConsoleSink {
    /// Creates a sink that prefixes every line with `[prefix]`.
    #[must_use]
    pub fn new(prefix: &str) -> Self {
        Self {
            prefix: format!("[{prefix}]"),
            verbose: false,
        }
    }

    /// Also logs per-feature activations, disposals and deferred resizes.
    #[must_use]
    pub fn verbose(mut self) -> Self {
        self.verbose = true;
        self
    }

    fn debug(&self, line: &str) {
        console::debug_1(&JsValue::from_str(&format!("{} {line}", self.prefix)));
    }

    fn info(&self, line: &str) {
        console::info_1(&JsValue::from_str(&format!("{} {line}", self.prefix)));
    }

    fn warn(&self, line: &str) {
        console::warn_1(&JsValue::from_str(&format!("{} {line}", self.prefix)));
    }
}

impl LifecycleSink for ConsoleSink {
    fn on_start(&mut self, e: &StartEvent) {
        self.info(&format!(
            "started at {}px ({}), {}/{} features live",
            e.width, e.class, e.live, e.registered
        ));
        if e.failed > 0 {
            self.warn(&format!("{} features failed to activate", e.failed));
        }
    }

    fn on_activated(&mut self, e: &FeatureEvent<'_>) {
        if self.verbose {
            self.info(&format!("activated {} ({})", e.name, e.class));
        }
    }

    fn on_inactive(&mut self, e: &InactiveEvent<'_>) {
        self.debug(&format!("{} inactive: no `{}` on this page", e.name, e.selector));
    }

    fn on_disposed(&mut self, e: &FeatureEvent<'_>) {
        if self.verbose {
            self.info(&format!("disposed {} ({})", e.name, e.class));
        }
    }

    fn on_activation_failed(&mut self, e: &FailureEvent<'_>) {
        self.warn(&format!("{} failed to activate: {}", e.name, e.error));
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        self.info(&format!(
            "{} -> {} at {}px: disposed {}, activated {}",
            e.from, e.to, e.width, e.disposed, e.activated
        ));
    }

    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        if self.verbose {
            match e.delay {
                Some(delay) => self.debug(&format!(
                    "resize to {}px deferred {}ms",
                    e.width,
                    delay.as_millis_ceil()
                )),
                None => self.debug(&format!("resize to {}px coalesced", e.width)),
            }
        }
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        self.info(&format!(
            "torn down: disposed {}{}",
            e.disposed,
            if e.cancelled_wakeup {
                ", cancelled pending resize"
            } else {
                ""
            }
        ));
    }
}
