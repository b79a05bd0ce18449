// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Simulated resize session that exercises the tracing and diagnostics
//! pipeline.
//!
//! Drives a [`Coordinator`] against a scripted host through a phone-sized
//! boot, a drag out to desktop width, a drag back, and a teardown, recording
//! events to both a [`PrettyPrintSink`] (stdout) and a [`Journal`], then
//! writes the journal to `reflow_journal.json`.

use std::cell::{Cell, RefCell};
use std::fs::File;
use std::io::BufWriter;
use std::rc::Rc;

use reflow_core::breakpoint::ClassSet;
use reflow_core::coordinator::{Coordinator, CoordinatorConfig};
use reflow_core::disposable::Disposable;
use reflow_core::error::EnvironmentError;
use reflow_core::feature::{Activation, FnFeature};
use reflow_core::host::Host;
use reflow_core::time::{Duration, HostTime};

use reflow_debug::fanout::Fanout;
use reflow_debug::journal::Journal;
use reflow_debug::pretty::PrettyPrintSink;

/// Width samples of a window drag: `(ms since boot, width)`.
const DRAG: &[(u64, u32)] = &[
    (1_000, 420),
    (1_016, 520),
    (1_033, 700),
    (1_050, 880),
    (1_066, 1_010),
    (1_083, 1_180),
    (1_100, 1_280),
    (2_000, 1_260),
    (2_016, 1_020),
    (2_033, 960),
    (2_050, 800),
    (2_066, 740),
    (2_083, 600),
];

/// Scripted clock and a recorded timer.
#[derive(Debug, Default)]
struct SimHost {
    now: HostTime,
    width: u32,
    wakeup_at: Option<HostTime>,
    resize_attached: bool,
}

impl Host for SimHost {
    fn now(&self) -> HostTime {
        self.now
    }

    fn viewport_width(&self) -> Result<u32, EnvironmentError> {
        Ok(self.width)
    }

    fn schedule_wakeup(&mut self, delay: Duration) {
        self.wakeup_at = Some(self.now + delay);
    }

    fn cancel_wakeup(&mut self) {
        self.wakeup_at = None;
    }

    fn release_resize_source(&mut self) {
        self.resize_attached = false;
    }
}

/// A feature that only records whether it is live.
fn counting(name: &'static str, classes: ClassSet, live: &Rc<RefCell<Vec<&'static str>>>) -> FnFeature {
    let live = Rc::clone(live);
    FnFeature::new(name, classes, move || {
        live.borrow_mut().push(name);
        let live = Rc::clone(&live);
        Ok(Activation::Active(Disposable::new(move || {
            live.borrow_mut().retain(|n| *n != name);
        })))
    })
}

/// Advances the clock to `ms`, firing the wakeup if it is due first.
fn advance(c: &mut Coordinator<SimHost>, ms: u64) {
    let t = HostTime::from_millis(ms);
    if let Some(at) = c.host().wakeup_at
        && at <= t
    {
        c.host_mut().now = at;
        c.host_mut().wakeup_at = None;
        c.on_wakeup();
    }
    c.host_mut().now = t;
}

fn main() {
    // -- sinks -------------------------------------------------------------
    let journal = Journal::new();
    let sink = Fanout::new()
        .with(Box::new(PrettyPrintSink::new(Box::new(std::io::stdout()))))
        .with(Box::new(journal.sink()));

    // -- coordinator -------------------------------------------------------
    let live = Rc::new(RefCell::new(Vec::new()));
    let host = SimHost {
        width: 390,
        resize_attached: true,
        ..SimHost::default()
    };
    let mut c = Coordinator::new(CoordinatorConfig::web(), host);
    c.set_sink(Box::new(sink));
    for (name, classes) in [
        ("mobile_menu", ClassSet::BELOW_WIDE),
        ("desktop_menu", ClassSet::WIDE),
        ("button_effect", ClassSet::ALL),
        ("service_pin", ClassSet::WIDE),
        ("smooth_scroll", ClassSet::ABOVE_COMPACT),
    ] {
        c.register(counting(name, classes, &live))
            .expect("names are unique");
    }
    c.register(FnFeature::new("carousel", ClassSet::ALL, || {
        Ok(Activation::missing(".splide"))
    }))
    .expect("names are unique");
    let refreshes = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&refreshes);
    c.set_layout_refresh(move || counter.set(counter.get() + 1));

    // -- simulated session -------------------------------------------------
    c.start().expect("simulated host always has a viewport");
    println!("live: {:?}", live.borrow());

    for &(ms, width) in DRAG {
        advance(&mut c, ms);
        c.host_mut().width = width;
        c.on_resize(width);
        println!("  t={ms}ms width={width} live: {:?}", live.borrow());
    }
    advance(&mut c, 3_000);
    println!("settled live: {:?}", live.borrow());

    c.teardown();
    assert!(live.borrow().is_empty(), "teardown leaves nothing live");
    assert!(!c.host().resize_attached);
    println!("layout refreshes: {}", refreshes.get());

    // -- export ------------------------------------------------------------
    let path = "reflow_journal.json";
    let file = File::create(path).expect("failed to create reflow_journal.json");
    let mut writer = BufWriter::new(file);
    journal
        .export(&mut writer)
        .expect("failed to write journal");

    println!("Wrote {path} ({} records)", journal.len());
}
