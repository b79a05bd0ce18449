// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Forwarding one event stream to several sinks.

use reflow_core::trace::{
    FailureEvent, FeatureEvent, InactiveEvent, LifecycleSink, ReconcileEvent,
    ResizeDeferredEvent, StartEvent, TeardownEvent,
};

/// A [`LifecycleSink`] that forwards every event to each inner sink in
/// insertion order.
#[derive(Default)]
pub struct Fanout {
    sinks: Vec<Box<dyn LifecycleSink>>,
}

impl std::fmt::Debug for Fanout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fanout")
            .field("sinks", &self.sinks.len())
            .finish()
    }
}

impl Fanout {
    /// Creates an empty fanout.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sink and returns `self` for chaining.
    #[must_use]
    pub fn with(mut self, sink: Box<dyn LifecycleSink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Adds a sink.
    pub fn push(&mut self, sink: Box<dyn LifecycleSink>) {
        self.sinks.push(sink);
    }
}

macro_rules! forward {
    ($($method:ident($ty:ty)),* $(,)?) => {
        $(
            fn $method(&mut self, e: $ty) {
                for sink in &mut self.sinks {
                    sink.$method(e);
                }
            }
        )*
    };
}

impl LifecycleSink for Fanout {
    forward! {
        on_start(&StartEvent),
        on_activated(&FeatureEvent<'_>),
        on_inactive(&InactiveEvent<'_>),
        on_disposed(&FeatureEvent<'_>),
        on_activation_failed(&FailureEvent<'_>),
        on_reconcile(&ReconcileEvent),
        on_resize_deferred(&ResizeDeferredEvent),
        on_teardown(&TeardownEvent),
    }
}
