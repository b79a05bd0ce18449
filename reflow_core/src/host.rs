// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Platform contract for the coordinator.
//!
//! A backend provides the pieces the [`Coordinator`] cannot own itself:
//!
//! - **Clock**: `now()` on a monotonic microsecond timeline.
//! - **Viewport**: the current layout width, read at startup.
//! - **Wakeup timer**: one-shot, at most one outstanding. The backend calls
//!   [`Coordinator::on_wakeup`] when it fires.
//! - **Resize source**: the backend delivers resize events to
//!   [`Coordinator::on_resize`] and releases its listener when asked.
//!
//! Test doubles implement this trait with a scripted clock and a recorded
//! timer.
//!
//! [`Coordinator`]: crate::coordinator::Coordinator
//! [`Coordinator::on_wakeup`]: crate::coordinator::Coordinator::on_wakeup
//! [`Coordinator::on_resize`]: crate::coordinator::Coordinator::on_resize

use crate::error::EnvironmentError;
use crate::time::{Duration, HostTime};

/// Environment services the coordinator depends on.
pub trait Host {
    /// Current time on the host's monotonic clock.
    fn now(&self) -> HostTime;

    /// Current viewport width in CSS pixels.
    fn viewport_width(&self) -> Result<u32, EnvironmentError>;

    /// Schedules a single wakeup after `delay`, replacing any armed one.
    fn schedule_wakeup(&mut self, delay: Duration);

    /// Clears the armed wakeup, if any. Must complete synchronously.
    fn cancel_wakeup(&mut self);

    /// Stops delivering resize events.
    fn release_resize_source(&mut self);
}
