// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lifecycle tracing.
//!
//! [`LifecycleSink`] has one method per lifecycle event, each defaulting to a
//! no-op, so a sink only implements what it cares about.
//!
//! [`Tracer`] owns an optional boxed sink. When the `trace` feature is
//! **off**, every `Tracer` method compiles to nothing and installing a sink
//! simply drops it. When **on**, each method performs a single `Option`
//! branch before dispatching.
//!
//! Inactive features are reported through [`LifecycleSink::on_inactive`];
//! sinks should treat that as debug-level noise, not a failure.

use alloc::boxed::Box;

use crate::breakpoint::BreakpointClass;
use crate::error::EnvironmentError;
use crate::time::{Duration, HostTime};

// ---------------------------------------------------------------------------
// Event structs
// ---------------------------------------------------------------------------

/// Emitted once the registry has activated its initial feature set.
#[derive(Clone, Copy, Debug)]
pub struct StartEvent {
    /// Viewport width used for classification.
    pub width: u32,
    /// Resulting class.
    pub class: BreakpointClass,
    /// Number of features that ended up live.
    pub live: usize,
    /// Number of registered features.
    pub registered: usize,
    /// Number of features whose collaborator failed; they stay empty.
    pub failed: usize,
}

/// Emitted when a feature activates or is disposed.
#[derive(Clone, Copy, Debug)]
pub struct FeatureEvent<'a> {
    /// Feature name.
    pub name: &'a str,
    /// Class in effect after the transition.
    pub class: BreakpointClass,
}

/// Emitted when a feature declines to activate because an optional element
/// is absent.
#[derive(Clone, Copy, Debug)]
pub struct InactiveEvent<'a> {
    /// Feature name.
    pub name: &'a str,
    /// Selector that matched nothing.
    pub selector: &'a str,
}

/// Emitted when a feature's activation fails with an [`EnvironmentError`].
#[derive(Clone, Copy, Debug)]
pub struct FailureEvent<'a> {
    /// Feature name.
    pub name: &'a str,
    /// The failure.
    pub error: &'a EnvironmentError,
}

/// Emitted after a reconciliation pass.
#[derive(Clone, Copy, Debug)]
pub struct ReconcileEvent {
    /// Width the pass evaluated.
    pub width: u32,
    /// Class before the pass.
    pub from: BreakpointClass,
    /// Class after the pass.
    pub to: BreakpointClass,
    /// Number of features disposed.
    pub disposed: usize,
    /// Number of features activated.
    pub activated: usize,
}

/// Emitted when a resize request is deferred to a later wakeup.
#[derive(Clone, Copy, Debug)]
pub struct ResizeDeferredEvent {
    /// Time of the request.
    pub now: HostTime,
    /// Requested width.
    pub width: u32,
    /// Delay until the wakeup, or `None` if one was already armed.
    pub delay: Option<Duration>,
}

/// Emitted when the registry is torn down.
#[derive(Clone, Copy, Debug)]
pub struct TeardownEvent {
    /// Number of live features disposed by the teardown.
    pub disposed: usize,
    /// Whether a pending resize wakeup was cancelled.
    pub cancelled_wakeup: bool,
}

// ---------------------------------------------------------------------------
// LifecycleSink trait
// ---------------------------------------------------------------------------

/// Receives lifecycle events.
///
/// All methods have default no-op implementations.
pub trait LifecycleSink {
    /// Called once after startup activation.
    fn on_start(&mut self, e: &StartEvent) {
        _ = e;
    }

    /// Called when a feature becomes live.
    fn on_activated(&mut self, e: &FeatureEvent<'_>) {
        _ = e;
    }

    /// Called when a feature reports a missing optional element.
    fn on_inactive(&mut self, e: &InactiveEvent<'_>) {
        _ = e;
    }

    /// Called when a live feature is disposed.
    fn on_disposed(&mut self, e: &FeatureEvent<'_>) {
        _ = e;
    }

    /// Called when a feature's activation fails.
    fn on_activation_failed(&mut self, e: &FailureEvent<'_>) {
        _ = e;
    }

    /// Called after a reconciliation that changed class.
    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        _ = e;
    }

    /// Called when a resize is deferred by the rate limiter.
    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        _ = e;
    }

    /// Called when teardown completes.
    fn on_teardown(&mut self, e: &TeardownEvent) {
        _ = e;
    }
}

// ---------------------------------------------------------------------------
// Tracer wrapper
// ---------------------------------------------------------------------------

/// Owner of an optional [`LifecycleSink`].
#[derive(Default)]
pub struct Tracer {
    #[cfg(feature = "trace")]
    sink: Option<Box<dyn LifecycleSink>>,
}

impl core::fmt::Debug for Tracer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Tracer").finish_non_exhaustive()
    }
}

macro_rules! dispatch {
    ($self:ident, $method:ident, $event:expr) => {{
        #[cfg(feature = "trace")]
        if let Some(sink) = &mut $self.sink {
            sink.$method($event);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = $event;
        }
    }};
}

impl Tracer {
    /// Creates a tracer that discards all events.
    #[inline]
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Creates a tracer that dispatches to `sink`.
    #[inline]
    #[must_use]
    pub fn new(sink: Box<dyn LifecycleSink>) -> Self {
        let mut tracer = Self::none();
        tracer.set_sink(sink);
        tracer
    }

    /// Replaces the sink.
    #[inline]
    pub fn set_sink(&mut self, sink: Box<dyn LifecycleSink>) {
        #[cfg(feature = "trace")]
        {
            self.sink = Some(sink);
        }
        #[cfg(not(feature = "trace"))]
        {
            _ = sink;
        }
    }

    /// Emits a [`StartEvent`].
    #[inline]
    pub fn start(&mut self, e: &StartEvent) {
        dispatch!(self, on_start, e);
    }

    /// Emits an activation [`FeatureEvent`].
    #[inline]
    pub fn activated(&mut self, e: &FeatureEvent<'_>) {
        dispatch!(self, on_activated, e);
    }

    /// Emits an [`InactiveEvent`].
    #[inline]
    pub fn inactive(&mut self, e: &InactiveEvent<'_>) {
        dispatch!(self, on_inactive, e);
    }

    /// Emits a disposal [`FeatureEvent`].
    #[inline]
    pub fn disposed(&mut self, e: &FeatureEvent<'_>) {
        dispatch!(self, on_disposed, e);
    }

    /// Emits a [`FailureEvent`].
    #[inline]
    pub fn activation_failed(&mut self, e: &FailureEvent<'_>) {
        dispatch!(self, on_activation_failed, e);
    }

    /// Emits a [`ReconcileEvent`].
    #[inline]
    pub fn reconcile(&mut self, e: &ReconcileEvent) {
        dispatch!(self, on_reconcile, e);
    }

    /// Emits a [`ResizeDeferredEvent`].
    #[inline]
    pub fn resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        dispatch!(self, on_resize_deferred, e);
    }

    /// Emits a [`TeardownEvent`].
    #[inline]
    pub fn teardown(&mut self, e: &TeardownEvent) {
        dispatch!(self, on_teardown, e);
    }
}
