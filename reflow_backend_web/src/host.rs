// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! [`Host`] implementation backed by browser globals.

use reflow_core::error::EnvironmentError;
use reflow_core::host::Host;
use reflow_core::time::{Duration, HostTime};
use web_sys::Window;

use crate::dom;
use crate::listener::EventBinding;
use crate::timer::Timeout;

/// Browser services for a [`Coordinator`].
///
/// - clock: `performance.now()`
/// - viewport: `window.innerWidth`
/// - wakeups: a single re-armable `setTimeout`
/// - resize source: the window `resize` binding, once attached
///
/// [`Coordinator`]: reflow_core::coordinator::Coordinator
pub struct WebHost {
    window: Window,
    timer: Timeout,
    resize: Option<EventBinding>,
}

impl WebHost {
    /// Creates a host whose wakeups fire `timer`.
    #[must_use]
    pub fn new(window: Window, timer: Timeout) -> Self {
        Self {
            window,
            timer,
            resize: None,
        }
    }

    /// Takes ownership of the resize listener, replacing any previous one.
    pub fn attach_resize(&mut self, binding: EventBinding) {
        self.resize = Some(binding);
    }
}

impl Host for WebHost {
    fn now(&self) -> HostTime {
        crate::now()
    }

    fn viewport_width(&self) -> Result<u32, EnvironmentError> {
        dom::viewport_width(&self.window)
    }

    fn schedule_wakeup(&mut self, delay: Duration) {
        self.timer.arm(delay);
    }

    fn cancel_wakeup(&mut self) {
        self.timer.clear();
    }

    fn release_resize_source(&mut self) {
        self.resize = None;
    }
}

impl core::fmt::Debug for WebHost {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WebHost")
            .field("timer", &self.timer)
            .field("resize", &self.resize.is_some())
            .finish_non_exhaustive()
    }
}
