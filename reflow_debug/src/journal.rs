// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Structured lifecycle journal.
//!
//! A [`Journal`] is a shared, append-only list of JSON records. Hand a
//! [`JournalSink`] to the registry (which takes ownership of its sink) and
//! keep the `Journal` to read or export the records afterwards:
//!
//! ```rust,ignore
//! let journal = Journal::new();
//! registry.set_sink(Box::new(journal.sink()));
//! // ... drive the registry ...
//! journal.export(&mut std::io::stdout())?;
//! ```
//!
//! Every record has an `"event"` key naming the event kind and a `"seq"`
//! counter giving its position in the journal.

use std::cell::RefCell;
use std::io::{self, Write};
use std::rc::Rc;

use serde_json::{Value, json};

use reflow_core::trace::{
    FailureEvent, FeatureEvent, InactiveEvent, LifecycleSink, ReconcileEvent,
    ResizeDeferredEvent, StartEvent, TeardownEvent,
};

/// Shared list of journal records.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    records: Rc<RefCell<Vec<Value>>>,
}

impl Journal {
    /// Creates an empty journal.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a sink that appends to this journal.
    #[must_use]
    pub fn sink(&self) -> JournalSink {
        JournalSink {
            journal: self.clone(),
        }
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.borrow().len()
    }

    /// Whether the journal is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.borrow().is_empty()
    }

    /// A copy of every record, oldest first.
    #[must_use]
    pub fn records(&self) -> Vec<Value> {
        self.records.borrow().clone()
    }

    /// The `"event"` kind of every record, oldest first.
    #[must_use]
    pub fn kinds(&self) -> Vec<String> {
        self.records
            .borrow()
            .iter()
            .filter_map(|r| r["event"].as_str().map(str::to_owned))
            .collect()
    }

    /// Writes the journal as a pretty-printed JSON array.
    pub fn export(&self, writer: &mut dyn Write) -> io::Result<()> {
        let records = Value::Array(self.records());
        serde_json::to_writer_pretty(&mut *writer, &records)?;
        writer.write_all(b"\n")
    }

    fn push(&self, event: &str, mut record: Value) {
        let mut records = self.records.borrow_mut();
        if let Value::Object(map) = &mut record {
            map.insert("event".to_owned(), Value::from(event));
            map.insert("seq".to_owned(), Value::from(records.len()));
        }
        records.push(record);
    }
}

/// A [`LifecycleSink`] that appends to a [`Journal`].
#[derive(Debug)]
pub struct JournalSink {
    journal: Journal,
}

impl LifecycleSink for JournalSink {
    fn on_start(&mut self, e: &StartEvent) {
        self.journal.push(
            "start",
            json!({
                "width": e.width,
                "class": e.class.label(),
                "live": e.live,
                "registered": e.registered,
                "failed": e.failed,
            }),
        );
    }

    fn on_activated(&mut self, e: &FeatureEvent<'_>) {
        self.journal.push(
            "activate",
            json!({ "feature": e.name, "class": e.class.label() }),
        );
    }

    fn on_inactive(&mut self, e: &InactiveEvent<'_>) {
        self.journal.push(
            "inactive",
            json!({ "feature": e.name, "selector": e.selector }),
        );
    }

    fn on_disposed(&mut self, e: &FeatureEvent<'_>) {
        self.journal.push(
            "dispose",
            json!({ "feature": e.name, "class": e.class.label() }),
        );
    }

    fn on_activation_failed(&mut self, e: &FailureEvent<'_>) {
        self.journal.push(
            "failed",
            json!({ "feature": e.name, "error": e.error.to_string() }),
        );
    }

    fn on_reconcile(&mut self, e: &ReconcileEvent) {
        self.journal.push(
            "reconcile",
            json!({
                "width": e.width,
                "from": e.from.label(),
                "to": e.to.label(),
                "disposed": e.disposed,
                "activated": e.activated,
            }),
        );
    }

    fn on_resize_deferred(&mut self, e: &ResizeDeferredEvent) {
        self.journal.push(
            "resize_deferred",
            json!({
                "at_us": e.now.ticks(),
                "width": e.width,
                "delay_us": e.delay.map(|d| d.ticks()),
            }),
        );
    }

    fn on_teardown(&mut self, e: &TeardownEvent) {
        self.journal.push(
            "teardown",
            json!({
                "disposed": e.disposed,
                "cancelled_wakeup": e.cancelled_wakeup,
            }),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::breakpoint::{BreakpointClass, Breakpoints, ClassSet};
    use reflow_core::disposable::Disposable;
    use reflow_core::feature::{Activation, FnFeature};
    use reflow_core::registry::LifecycleRegistry;

    #[test]
    fn journal_records_registry_session() {
        let journal = Journal::new();
        let mut registry = LifecycleRegistry::new(Breakpoints::DEFAULT);
        registry.set_sink(Box::new(journal.sink()));
        registry
            .register(FnFeature::new("menu", ClassSet::BELOW_WIDE, || {
                Ok(Activation::Active(Disposable::empty()))
            }))
            .unwrap();
        registry
            .register(FnFeature::new("carousel", ClassSet::ALL, || {
                Ok(Activation::missing(".splide"))
            }))
            .unwrap();

        registry.start(500).unwrap();
        registry.reconcile(1200).unwrap();
        registry.teardown();

        assert_eq!(
            journal.kinds(),
            [
                "activate",
                "inactive",
                "start",
                "dispose",
                "reconcile",
                "teardown"
            ]
        );
        let records = journal.records();
        assert_eq!(records[1]["selector"], ".splide");
        assert_eq!(records[4]["to"], BreakpointClass::Wide.label());
        assert_eq!(records[5]["disposed"], 0, "menu was already gone");
        assert_eq!(records[5]["seq"], 5);
    }

    #[test]
    fn export_produces_valid_json() {
        let journal = Journal::new();
        journal.sink().on_teardown(&TeardownEvent {
            disposed: 3,
            cancelled_wakeup: true,
        });
        let mut out = Vec::new();
        journal.export(&mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        let arr = parsed.as_array().expect("top-level array");
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["event"], "teardown");
        assert_eq!(arr[0]["cancelled_wakeup"], true);
    }

    #[test]
    fn export_empty_journal() {
        let journal = Journal::new();
        assert!(journal.is_empty());
        let mut out = Vec::new();
        journal.export(&mut out).unwrap();
        let parsed: Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(parsed, json!([]));
    }
}
