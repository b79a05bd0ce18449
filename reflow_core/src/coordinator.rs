// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Resize-driven reconciliation.
//!
//! [`Coordinator`] wires a [`LifecycleRegistry`] to a [`Throttle`] and a
//! [`Host`]:
//!
//! ```text
//!   resize(width) ──► Throttle::request ──RunNow──► LifecycleRegistry::reconcile
//!                          │
//!                        Arm/Rearm
//!                          ▼
//!                  Host::schedule_wakeup ──► on_wakeup ──► reconcile(latest width)
//! ```
//!
//! [`teardown`](Coordinator::teardown) cancels the throttle and the host
//! timer, releases the resize source and tears the registry down, in that
//! order, before returning.

use crate::breakpoint::Breakpoints;
use crate::error::{RegistryError, StartError};
use crate::feature::Feature;
use crate::host::Host;
use crate::registry::{LifecycleRegistry, Phase, Reconciliation};
use crate::scheduler::{Decision, RatePolicy, Throttle};
use crate::time::Duration;
use crate::trace::{LifecycleSink, ResizeDeferredEvent};

/// Configuration for the [`Coordinator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CoordinatorConfig {
    /// Width thresholds.
    pub breakpoints: Breakpoints,
    /// Minimum spacing between reconciliations.
    pub resize_interval: Duration,
    /// How resize bursts are coalesced.
    pub policy: RatePolicy,
}

impl CoordinatorConfig {
    /// Defaults for browsers: 768/992 px thresholds, 200 ms throttle.
    #[must_use]
    pub const fn web() -> Self {
        Self {
            breakpoints: Breakpoints::DEFAULT,
            resize_interval: Duration::from_millis(200),
            policy: RatePolicy::Throttle,
        }
    }
}

impl Default for CoordinatorConfig {
    fn default() -> Self {
        Self::web()
    }
}

/// Rate-limited driver around a [`LifecycleRegistry`].
#[derive(Debug)]
pub struct Coordinator<H> {
    registry: LifecycleRegistry,
    throttle: Throttle<u32>,
    host: H,
}

impl<H: Host> Coordinator<H> {
    /// Creates a coordinator with an empty registry.
    #[must_use]
    pub fn new(config: CoordinatorConfig, host: H) -> Self {
        Self {
            registry: LifecycleRegistry::new(config.breakpoints),
            throttle: Throttle::new(config.resize_interval, config.policy),
            host,
        }
    }

    /// Registers a feature. See [`LifecycleRegistry::register`].
    pub fn register(&mut self, feature: impl Feature + 'static) -> Result<(), RegistryError> {
        self.registry.register(feature)
    }

    /// Registers an already boxed feature.
    pub fn register_boxed(
        &mut self,
        feature: alloc::boxed::Box<dyn Feature>,
    ) -> Result<(), RegistryError> {
        self.registry.register_boxed(feature)
    }

    /// Installs the layout-refresh hook. See
    /// [`LifecycleRegistry::set_layout_refresh`].
    pub fn set_layout_refresh(&mut self, refresh: impl FnMut() + 'static) {
        self.registry.set_layout_refresh(refresh);
    }

    /// Installs a lifecycle sink.
    pub fn set_sink(&mut self, sink: alloc::boxed::Box<dyn LifecycleSink>) {
        self.registry.set_sink(sink);
    }

    /// Reads the viewport and activates the initial feature set.
    ///
    /// An environment failure also releases the host's resize source, so a
    /// page that never started holds no listener.
    pub fn start(&mut self) -> Result<(), StartError> {
        let result = self
            .host
            .viewport_width()
            .map_err(StartError::from)
            .and_then(|width| self.registry.start(width));
        if let Err(StartError::Environment(_)) = &result {
            self.host.release_resize_source();
        }
        result
    }

    /// Handles one resize event carrying the new viewport width.
    ///
    /// Returns the reconciliation report if the event was processed
    /// immediately, `None` if it was deferred, coalesced or ignored.
    pub fn on_resize(&mut self, width: u32) -> Option<Reconciliation> {
        if self.registry.phase() != Phase::Active {
            return None;
        }
        let now = self.host.now();
        match self.throttle.request(now, width) {
            Decision::RunNow(width) => self.reconcile(width),
            Decision::Arm { delay } => {
                self.host.schedule_wakeup(delay);
                self.deferred(width, Some(delay));
                None
            }
            Decision::Rearm { delay } => {
                self.host.cancel_wakeup();
                self.host.schedule_wakeup(delay);
                self.deferred(width, Some(delay));
                None
            }
            Decision::Coalesced => {
                self.deferred(width, None);
                None
            }
            Decision::Ignored => None,
        }
    }

    /// Handles the host timer firing.
    ///
    /// Returns the report of the trailing reconciliation, if one ran.
    pub fn on_wakeup(&mut self) -> Option<Reconciliation> {
        let now = self.host.now();
        match self.throttle.on_wakeup(now) {
            Ok(Some(width)) => self.reconcile(width),
            Ok(None) => None,
            Err(delay) => {
                self.host.schedule_wakeup(delay);
                None
            }
        }
    }

    /// Cancels pending work, releases the resize source and disposes every
    /// live feature. Idempotent; safe before [`start`](Self::start).
    pub fn teardown(&mut self) -> usize {
        if self.registry.phase() == Phase::Disposed {
            return 0;
        }
        let cancelled_wakeup = self.throttle.cancel();
        if cancelled_wakeup {
            self.host.cancel_wakeup();
        }
        self.host.release_resize_source();
        self.registry.teardown_inner(cancelled_wakeup)
    }

    /// The registry.
    #[must_use]
    pub fn registry(&self) -> &LifecycleRegistry {
        &self.registry
    }

    /// The host.
    #[must_use]
    pub fn host(&self) -> &H {
        &self.host
    }

    /// Mutable access to the host.
    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    fn reconcile(&mut self, width: u32) -> Option<Reconciliation> {
        // Only `Active` reaches here; the registry rejects anything else.
        self.registry.reconcile(width).ok()
    }

    fn deferred(&mut self, width: u32, delay: Option<Duration>) {
        let now = self.host.now();
        self.registry
            .tracer_mut()
            .resize_deferred(&ResizeDeferredEvent { now, width, delay });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::breakpoint::{BreakpointClass, ClassSet};
    use crate::error::EnvironmentError;
    use crate::feature::FnFeature;
    use crate::registry::tests::{Log, counting};
    use crate::time::HostTime;
    use alloc::rc::Rc;
    use core::cell::Cell;

    #[derive(Debug, Default)]
    struct FakeHost {
        now: HostTime,
        width: Option<u32>,
        wakeup_at: Option<HostTime>,
        cancels: u32,
        resize_attached: bool,
    }

    impl FakeHost {
        fn at_width(width: u32) -> Self {
            Self {
                width: Some(width),
                resize_attached: true,
                ..Self::default()
            }
        }
    }

    impl Host for FakeHost {
        fn now(&self) -> HostTime {
            self.now
        }

        fn viewport_width(&self) -> Result<u32, EnvironmentError> {
            self.width.ok_or(EnvironmentError::ViewportUnavailable)
        }

        fn schedule_wakeup(&mut self, delay: Duration) {
            self.wakeup_at = Some(self.now + delay);
        }

        fn cancel_wakeup(&mut self) {
            self.wakeup_at = None;
            self.cancels += 1;
        }

        fn release_resize_source(&mut self) {
            self.resize_attached = false;
        }
    }

    fn advance_to(c: &mut Coordinator<FakeHost>, ms: u64) -> Option<Reconciliation> {
        let t = HostTime::from_millis(ms);
        c.host_mut().now = t;
        match c.host().wakeup_at {
            Some(at) if at <= t => {
                c.host_mut().wakeup_at = None;
                c.on_wakeup()
            }
            _ => None,
        }
    }

    fn resize(c: &mut Coordinator<FakeHost>, ms: u64, width: u32) -> Option<Reconciliation> {
        let fired = advance_to(c, ms);
        assert!(fired.is_none(), "no timer expected to be due at {ms}ms");
        c.host_mut().width = Some(width);
        c.on_resize(width)
    }

    fn menu_and_pin(host: FakeHost) -> (Coordinator<FakeHost>, Rc<Cell<i32>>, Rc<Cell<i32>>, Log) {
        let log = Log::default();
        let menu = Rc::new(Cell::new(0));
        let pin = Rc::new(Cell::new(0));
        let mut c = Coordinator::new(CoordinatorConfig::web(), host);
        c.register(counting("menu", ClassSet::BELOW_WIDE, &menu, &log))
            .unwrap();
        c.register(counting("pin", ClassSet::WIDE, &pin, &log))
            .unwrap();
        (c, menu, pin, log)
    }

    #[test]
    fn start_reads_viewport_from_host() {
        let (mut c, menu, pin, _) = menu_and_pin(FakeHost::at_width(500));
        c.start().unwrap();
        assert_eq!(
            c.registry().current_class(),
            Some(BreakpointClass::Compact)
        );
        assert_eq!((menu.get(), pin.get()), (1, 0));
    }

    #[test]
    fn missing_viewport_aborts_start() {
        let (mut c, menu, _, _) = menu_and_pin(FakeHost::default());
        assert_eq!(
            c.start(),
            Err(StartError::Environment(EnvironmentError::ViewportUnavailable))
        );
        assert_eq!(menu.get(), 0);
        assert_eq!(c.registry().phase(), Phase::Uninitialized);
    }

    #[test]
    fn failed_start_releases_resize_source() {
        let (mut c, menu, _, _) = menu_and_pin(FakeHost::at_width(500));
        c.register(FnFeature::new("broken", ClassSet::ALL, || {
            Err(EnvironmentError::MissingDocument)
        }))
        .unwrap();
        assert!(c.start().is_err());
        assert!(!c.host().resize_attached);
        assert_eq!(menu.get(), 0);

        let (mut c, _, _, _) = menu_and_pin(FakeHost::at_width(500));
        c.start().unwrap();
        assert_eq!(
            c.start(),
            Err(StartError::Registry(RegistryError::AlreadyStarted))
        );
        assert!(c.host().resize_attached, "a second start keeps the listener");
    }

    #[test]
    fn burst_reconciles_against_final_width() {
        let (mut c, menu, pin, log) = menu_and_pin(FakeHost::at_width(500));
        c.start().unwrap();
        log.take();

        // Leading edge: still compact, nothing to do.
        let first = resize(&mut c, 0, 520).expect("leading edge runs");
        assert!(first.is_noop());

        // The burst passes through wide widths and settles back on compact.
        for (ms, width) in [(20, 900), (40, 1300), (90, 1500), (150, 640)] {
            assert!(resize(&mut c, ms, width).is_none(), "deferred");
        }
        let trailing = advance_to(&mut c, 200).expect("trailing edge runs");
        assert!(trailing.is_noop(), "evaluated against 640, not 1500");
        assert!(log.take().is_empty());
        assert_eq!((menu.get(), pin.get()), (1, 0));
        assert_eq!(advance_to(&mut c, 1000), None, "exactly one trailing run");
    }

    #[test]
    fn trailing_run_crosses_breakpoint() {
        let (mut c, menu, pin, log) = menu_and_pin(FakeHost::at_width(500));
        c.start().unwrap();
        log.take();

        resize(&mut c, 0, 510);
        for (ms, width) in [(10, 700), (60, 1000), (120, 1200)] {
            resize(&mut c, ms, width);
        }
        let report = advance_to(&mut c, 200).expect("trailing edge runs");
        assert_eq!(report.disposed, ["menu"]);
        assert_eq!(report.activated, ["pin"]);
        assert_eq!(log.take(), ["-menu", "+pin"]);
        assert_eq!((menu.get(), pin.get()), (0, 1));
    }

    #[test]
    fn teardown_cancels_pending_wakeup_and_releases_resize() {
        let (mut c, menu, pin, log) = menu_and_pin(FakeHost::at_width(500));
        c.start().unwrap();
        resize(&mut c, 0, 500);
        resize(&mut c, 50, 1400);
        assert!(c.host().wakeup_at.is_some(), "trailing wakeup armed");
        log.take();

        assert_eq!(c.teardown(), 1);
        assert_eq!(c.host().wakeup_at, None);
        assert_eq!(c.host().cancels, 1);
        assert!(!c.host().resize_attached);

        // A stray timer callback or resize after teardown does nothing.
        c.host_mut().now = HostTime::from_millis(400);
        assert_eq!(c.on_wakeup(), None);
        assert_eq!(c.on_resize(1400), None);
        assert_eq!(log.take(), ["-menu"]);
        assert_eq!((menu.get(), pin.get()), (0, 0));

        assert_eq!(c.teardown(), 0, "second teardown is a no-op");
        assert_eq!(c.host().cancels, 1);
    }

    #[test]
    fn teardown_before_start_releases_resize_source() {
        let (mut c, _, _, _) = menu_and_pin(FakeHost::at_width(800));
        assert_eq!(c.teardown(), 0);
        assert!(!c.host().resize_attached);
        assert_eq!(c.start(), Err(StartError::Registry(RegistryError::Disposed)));
    }

    #[test]
    fn resize_before_start_is_ignored() {
        let (mut c, menu, _, _) = menu_and_pin(FakeHost::at_width(500));
        assert_eq!(c.on_resize(1200), None);
        assert_eq!(c.host().wakeup_at, None);
        c.start().unwrap();
        assert_eq!(menu.get(), 1);
    }

    #[test]
    fn debounce_rearms_host_timer() {
        let log = Log::default();
        let pin = Rc::new(Cell::new(0));
        let config = CoordinatorConfig {
            policy: RatePolicy::Debounce,
            ..CoordinatorConfig::web()
        };
        let mut c = Coordinator::new(config, FakeHost::at_width(500));
        c.register(counting("pin", ClassSet::WIDE, &pin, &log))
            .unwrap();
        c.start().unwrap();

        resize(&mut c, 0, 900);
        resize(&mut c, 100, 1100);
        resize(&mut c, 150, 1300);
        assert_eq!(c.host().cancels, 2, "each later request rearms");
        assert_eq!(c.host().wakeup_at, Some(HostTime::from_millis(350)));
        assert_eq!(pin.get(), 0);

        let report = advance_to(&mut c, 350).expect("debounced run");
        assert_eq!(report.activated, ["pin"]);
        assert_eq!(pin.get(), 1);
    }
}
