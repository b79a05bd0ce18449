// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Human-readable lifecycle output.
//!
//! [`PrettyPrintSink`] implements [`LifecycleSink`] and writes one line per
//! event to a [`Write`](std::io::Write) destination (default: stderr).

use std::io::Write;

use reflow_core::time::Duration;
use reflow_core::trace::{
    FailureEvent, FeatureEvent, InactiveEvent, LifecycleSink, ReconcileEvent,
    ResizeDeferredEvent, StartEvent, TeardownEvent,
};

/// Writes human-readable lifecycle lines to a [`Write`](std::io::Write)
/// destination.
pub struct PrettyPrintSink<W: Write = Box<dyn Write>> {
    writer: W,
}

impl<W: Write> std::fmt::Debug for PrettyPrintSink<W> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PrettyPrintSink").finish_non_exhaustive()
    }
}

impl PrettyPrintSink {
    /// Creates a sink that writes to stderr.
    #[must_use]
    pub fn stderr() -> Self {
        Self {
            writer: Box::new(std::io::stderr()),
        }
    }

    /// Creates a sink that writes to a boxed writer.
    #[must_use]
    pub fn new(writer: Box<dyn Write>) -> Self {
        Self { writer }
    }
}

impl<W: Write> PrettyPrintSink<W> {
    /// Creates a sink that writes to the given destination.
    #[must_use]
    pub fn with_writer(writer: W) -> Self {
        Self { writer }
    }

    /// Consumes the sink and returns its writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

fn ms(d: Duration) -> f64 {
    d.ticks() as f64 / 1000.0
}

impl<W: Write> LifecycleSink for PrettyPrintSink<W> {
    fn on_start(&mut self, e: &StartEvent) {
        let _ = writeln!(
            self.writer,
            "[start] width={} class={} live={}/{} failed={}",
            e.width, e.class, e.live, e.registered, e.failed,
        );
    }

    fn on_activated(&mut self, e: &FeatureEvent<'_>) {
        let _ = writeln!(self.writer, "[activate] {} ({})", e.name, e.class);
    }

    fn on_inactive(&mut self, e: &InactiveEvent<'_>) {
        let _ = writeln!(
            self.writer,
            "[inactive] {} missing `{}`",
            e.name, e.selector,
        );
    }

    fn on_disposed(&mut self, e: &FeatureEvent<'_>) {
        let _ = writeln!(self.writer, "[dispose] {} ({})", e.name, e.class);
    }

    fn on_activation_failed(&mut self, e: &FailureEvent<'_>) {
        let _ = writeln!(self.writer, "[failed] {}: {}", e.name, e.error);
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        let _ = writeln!(
            self.writer,
            "[reconcile] width={} {} -> {} disposed={} activated={}",
            e.width, e.from, e.to, e.disposed, e.activated,
        );
    }

    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        match e.delay {
            Some(delay) => {
                let _ = writeln!(
                    self.writer,
                    "[resize] width={} deferred {:.1}ms",
                    e.width,
                    ms(delay),
                );
            }
            None => {
                let _ = writeln!(self.writer, "[resize] width={} coalesced", e.width);
            }
        }
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        let _ = writeln!(
            self.writer,
            "[teardown] disposed={} cancelled_wakeup={}",
            e.disposed, e.cancelled_wakeup,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::breakpoint::BreakpointClass;
    use reflow_core::time::HostTime;

    #[test]
    fn pretty_print_reconcile() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_reconcile(&ReconcileEvent {
            width: 1200,
            from: BreakpointClass::Compact,
            to: BreakpointClass::Wide,
            disposed: 1,
            activated: 2,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("[reconcile]"), "got: {output}");
        assert!(output.contains("compact -> wide"), "got: {output}");
    }

    #[test]
    fn pretty_print_deferred_resize() {
        let mut sink = PrettyPrintSink::with_writer(Vec::<u8>::new());
        sink.on_resize_deferred(&ResizeDeferredEvent {
            now: HostTime::from_millis(10),
            width: 900,
            delay: Some(Duration::from_millis(190)),
        });
        sink.on_resize_deferred(&ResizeDeferredEvent {
            now: HostTime::from_millis(20),
            width: 950,
            delay: None,
        });
        let output = String::from_utf8(sink.into_inner()).unwrap();
        assert!(output.contains("deferred 190.0ms"), "got: {output}");
        assert!(output.contains("width=950 coalesced"), "got: {output}");
    }
}
