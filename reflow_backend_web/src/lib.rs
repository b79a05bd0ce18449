// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Browser backend for reflow.
//!
//! This crate provides integration with browser APIs:
//!
//! - [`ResponsiveController`]: installs a [`Coordinator`] on the page, feeds
//!   it `resize` events and exposes a global teardown function
//! - [`WebHost`]: the [`Host`] implementation (`performance.now()`,
//!   `window.innerWidth`, `setTimeout`)
//! - [`EventBinding`] and [`IntersectionWatch`]: RAII wrappers that convert
//!   into [`Disposable`]s for feature activations
//! - [`RafLoop`]: `requestAnimationFrame` loop for scroll-linked features
//! - [`ConsoleSink`]: lifecycle tracing to the browser console
//! - [`dom`]: element lookup helpers returning reflow errors
//!
//! [`Coordinator`]: reflow_core::coordinator::Coordinator
//! [`Host`]: reflow_core::host::Host
//! [`Disposable`]: reflow_core::disposable::Disposable

#![no_std]

extern crate alloc;

mod console;
mod controller;
pub mod dom;
mod host;
mod listener;
mod observer;
mod raf;
mod timer;

pub use console::ConsoleSink;
pub use controller::ResponsiveController;
pub use host::WebHost;
pub use listener::EventBinding;
pub use observer::IntersectionWatch;
pub use raf::RafLoop;
pub use timer::Timeout;

use reflow_core::time::HostTime;

/// Returns the current host time from `performance.now()`.
///
/// The returned [`HostTime`] is in microsecond ticks.
#[must_use]
pub fn now() -> HostTime {
    host_time_from_millis(raf::performance_now())
}

/// Converts a `DOMHighResTimeStamp` (milliseconds) to microsecond ticks.
///
/// Negative and non-finite inputs clamp to zero.
#[must_use]
pub fn host_time_from_millis(ms: f64) -> HostTime {
    if !ms.is_finite() || ms <= 0.0 {
        return HostTime(0);
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "positive finite timestamp; float-to-int casts saturate"
    )]
    let us = (ms * 1000.0) as u64;
    HostTime(us)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn timestamps_convert_to_microseconds() {
        assert_eq!(host_time_from_millis(16.0), HostTime(16_000));
        assert_eq!(host_time_from_millis(0.5), HostTime(500));
    }

    #[test]
    fn bogus_timestamps_clamp_to_zero() {
        assert_eq!(host_time_from_millis(-3.0), HostTime(0));
        assert_eq!(host_time_from_millis(f64::NAN), HostTime(0));
        assert_eq!(host_time_from_millis(f64::INFINITY), HostTime(0));
    }
}
