// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The feature lifecycle state machine.
//!
//! [`LifecycleRegistry`] owns one slot per registered [`Feature`], in
//! registration order. Each slot holds the feature's live [`Disposable`], if
//! any. The registry moves through three phases:
//!
//! ```text
//!   Uninitialized ──start()──► Active ──teardown()──► Disposed
//!         │                    │    ▲
//!         │                    └────┘ reconcile()
//!         └────────────teardown()───────────────────────►
//! ```
//!
//! # Reconciliation
//!
//! [`reconcile`](LifecycleRegistry::reconcile) reclassifies the viewport. If
//! the class is unchanged nothing happens at all. Otherwise, for every
//! breakpoint-sensitive feature:
//!
//! | before | after | action |
//! |---|---|---|
//! | applicable | not applicable | dispose, clear slot |
//! | not applicable | applicable | activate, fill slot |
//! | applicable | applicable | untouched |
//!
//! All disposals run before any activation, each pass in registration order,
//! so a feature leaving an element is always unbound before the feature
//! taking it over binds. The layout-refresh hook runs once afterwards.

use alloc::boxed::Box;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use crate::breakpoint::{BreakpointClass, Breakpoints};
use crate::disposable::Disposable;
use crate::error::{EnvironmentError, RegistryError, StartError};
use crate::feature::{Activation, Feature, is_breakpoint_sensitive};
use crate::trace::{
    FailureEvent, FeatureEvent, InactiveEvent, LifecycleSink, ReconcileEvent, StartEvent,
    TeardownEvent, Tracer,
};

/// Lifecycle phase of a [`LifecycleRegistry`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Phase {
    /// Features may be registered; nothing is live.
    Uninitialized,
    /// Started; reconciliation is allowed.
    Active,
    /// Torn down. Terminal.
    Disposed,
}

/// Report of one [`LifecycleRegistry::reconcile`] call.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Reconciliation {
    /// Class before the call.
    pub from: BreakpointClass,
    /// Class after the call.
    pub to: BreakpointClass,
    /// Features disposed, in order.
    pub disposed: Vec<String>,
    /// Features activated, in order.
    pub activated: Vec<String>,
    /// Features that became applicable but reported a missing element.
    pub inactive: Vec<String>,
    /// Features whose activation failed.
    pub failed: Vec<(String, EnvironmentError)>,
}

impl Reconciliation {
    fn unchanged(class: BreakpointClass) -> Self {
        Self {
            from: class,
            to: class,
            disposed: Vec::new(),
            activated: Vec::new(),
            inactive: Vec::new(),
            failed: Vec::new(),
        }
    }

    /// Whether the class was unchanged (and therefore nothing happened).
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.from == self.to
    }
}

struct Slot {
    feature: Box<dyn Feature>,
    sensitive: bool,
    live: Option<Disposable>,
}

enum Outcome {
    Live,
    Inactive,
    Failed(EnvironmentError),
}

impl Slot {
    fn activate(&mut self, class: BreakpointClass, tracer: &mut Tracer) -> Outcome {
        let name = self.feature.name();
        match self.feature.activate() {
            Ok(Activation::Active(disposable)) => {
                tracer.activated(&FeatureEvent { name, class });
                self.live = Some(disposable);
                Outcome::Live
            }
            Ok(Activation::Inactive(missing)) => {
                tracer.inactive(&InactiveEvent {
                    name,
                    selector: &missing.selector,
                });
                Outcome::Inactive
            }
            Err(error) => {
                tracer.activation_failed(&FailureEvent {
                    name,
                    error: &error,
                });
                Outcome::Failed(error)
            }
        }
    }

    /// Disposes the live handle, if any. Returns whether one was live.
    fn dispose(&mut self, class: BreakpointClass, tracer: &mut Tracer) -> bool {
        let Some(mut live) = self.live.take() else {
            return false;
        };
        live.dispose();
        tracer.disposed(&FeatureEvent {
            name: self.feature.name(),
            class,
        });
        true
    }
}

/// Owns the live set of feature activations and reconciles it against the
/// viewport's [`BreakpointClass`].
pub struct LifecycleRegistry {
    breakpoints: Breakpoints,
    slots: Vec<Slot>,
    phase: Phase,
    class: Option<BreakpointClass>,
    layout_refresh: Option<Box<dyn FnMut()>>,
    tracer: Tracer,
}

impl LifecycleRegistry {
    /// Creates an empty registry classifying widths with `breakpoints`.
    #[must_use]
    pub fn new(breakpoints: Breakpoints) -> Self {
        Self {
            breakpoints,
            slots: Vec::new(),
            phase: Phase::Uninitialized,
            class: None,
            layout_refresh: None,
            tracer: Tracer::none(),
        }
    }

    /// Registers a feature. Only valid before [`start`](Self::start).
    pub fn register(&mut self, feature: impl Feature + 'static) -> Result<(), RegistryError> {
        self.register_boxed(Box::new(feature))
    }

    /// Registers an already boxed feature.
    pub fn register_boxed(&mut self, feature: Box<dyn Feature>) -> Result<(), RegistryError> {
        match self.phase {
            Phase::Uninitialized => {}
            Phase::Active => return Err(RegistryError::AlreadyStarted),
            Phase::Disposed => return Err(RegistryError::Disposed),
        }
        if self.slots.iter().any(|s| s.feature.name() == feature.name()) {
            return Err(RegistryError::DuplicateName(feature.name().to_string()));
        }
        let sensitive = is_breakpoint_sensitive(feature.as_ref());
        self.slots.push(Slot {
            feature,
            sensitive,
            live: None,
        });
        Ok(())
    }

    /// Installs the hook run once after every reconciliation that changed
    /// class, so scroll-linked collaborators can recompute trigger positions.
    pub fn set_layout_refresh(&mut self, refresh: impl FnMut() + 'static) {
        self.layout_refresh = Some(Box::new(refresh));
    }

    /// Installs a lifecycle sink. Events are only delivered with the `trace`
    /// feature enabled.
    pub fn set_sink(&mut self, sink: Box<dyn LifecycleSink>) {
        self.tracer.set_sink(sink);
    }

    pub(crate) fn tracer_mut(&mut self) -> &mut Tracer {
        &mut self.tracer
    }

    /// Activates every feature applicable at `width`, in registration order.
    ///
    /// A [`Collaborator`](EnvironmentError::Collaborator) failure leaves
    /// that feature's slot empty and start carries on; the count is reported
    /// in the [`StartEvent`]. Any root [`EnvironmentError`] disposes the
    /// features this call already activated and leaves the registry
    /// [`Phase::Uninitialized`].
    pub fn start(&mut self, width: u32) -> Result<(), StartError> {
        match self.phase {
            Phase::Uninitialized => {}
            Phase::Active => return Err(RegistryError::AlreadyStarted.into()),
            Phase::Disposed => return Err(RegistryError::Disposed.into()),
        }
        let class = self.breakpoints.classify(width);

        let mut failed = 0;
        for idx in 0..self.slots.len() {
            let slot = &mut self.slots[idx];
            if !slot.feature.is_applicable(class) {
                continue;
            }
            match slot.activate(class, &mut self.tracer) {
                Outcome::Failed(error) if error.is_root() => {
                    for earlier in &mut self.slots[..idx] {
                        earlier.dispose(class, &mut self.tracer);
                    }
                    return Err(error.into());
                }
                Outcome::Failed(_) => failed += 1,
                Outcome::Live | Outcome::Inactive => {}
            }
        }

        self.phase = Phase::Active;
        self.class = Some(class);
        self.tracer.start(&StartEvent {
            width,
            class,
            live: self.live_count(),
            registered: self.slots.len(),
            failed,
        });
        Ok(())
    }

    /// Brings the live set in line with the class of `width`.
    ///
    /// Rejected unless the registry is [`Phase::Active`]; a torn-down
    /// registry never reactivates anything.
    pub fn reconcile(&mut self, width: u32) -> Result<Reconciliation, RegistryError> {
        let from = match (self.phase, self.class) {
            (Phase::Active, Some(class)) => class,
            (Phase::Disposed, _) => return Err(RegistryError::Disposed),
            _ => return Err(RegistryError::NotStarted),
        };
        let to = self.breakpoints.classify(width);
        if from == to {
            return Ok(Reconciliation::unchanged(from));
        }

        let mut report = Reconciliation::unchanged(from);
        report.to = to;

        for slot in self.slots.iter_mut().filter(|s| s.sensitive) {
            let leaving = slot.feature.is_applicable(from) && !slot.feature.is_applicable(to);
            if leaving && slot.dispose(to, &mut self.tracer) {
                report.disposed.push(slot.feature.name().to_string());
            }
        }

        for slot in self.slots.iter_mut().filter(|s| s.sensitive) {
            let entering = !slot.feature.is_applicable(from) && slot.feature.is_applicable(to);
            if !entering {
                continue;
            }
            let name = slot.feature.name().to_string();
            match slot.activate(to, &mut self.tracer) {
                Outcome::Live => report.activated.push(name),
                Outcome::Inactive => report.inactive.push(name),
                Outcome::Failed(error) => report.failed.push((name, error)),
            }
        }

        self.class = Some(to);
        if let Some(refresh) = &mut self.layout_refresh {
            refresh();
        }
        self.tracer.reconcile(&ReconcileEvent {
            width,
            from,
            to,
            disposed: report.disposed.len(),
            activated: report.activated.len(),
        });
        Ok(report)
    }

    /// Disposes every live feature in registration order and enters
    /// [`Phase::Disposed`].
    ///
    /// Idempotent, and valid from any phase. Returns the number of features
    /// disposed by this call.
    pub fn teardown(&mut self) -> usize {
        self.teardown_inner(false)
    }

    pub(crate) fn teardown_inner(&mut self, cancelled_wakeup: bool) -> usize {
        if self.phase == Phase::Disposed {
            return 0;
        }
        let mut disposed = 0;
        if let Some(class) = self.class {
            for slot in &mut self.slots {
                if slot.dispose(class, &mut self.tracer) {
                    disposed += 1;
                }
            }
        }
        self.phase = Phase::Disposed;
        self.class = None;
        self.tracer.teardown(&TeardownEvent {
            disposed,
            cancelled_wakeup,
        });
        disposed
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// The class last reconciled against, while active.
    #[must_use]
    pub fn current_class(&self) -> Option<BreakpointClass> {
        self.class
    }

    /// The thresholds in use.
    #[must_use]
    pub fn breakpoints(&self) -> Breakpoints {
        self.breakpoints
    }

    /// Whether the named feature currently holds a live disposable.
    #[must_use]
    pub fn is_live(&self, name: &str) -> bool {
        self.slots
            .iter()
            .any(|s| s.live.is_some() && s.feature.name() == name)
    }

    /// Names of live features, in registration order.
    pub fn live_names(&self) -> impl Iterator<Item = &str> {
        self.slots
            .iter()
            .filter(|s| s.live.is_some())
            .map(|s| s.feature.name())
    }

    /// Number of live features.
    #[must_use]
    pub fn live_count(&self) -> usize {
        self.slots.iter().filter(|s| s.live.is_some()).count()
    }

    /// Number of registered features.
    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no features are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl core::fmt::Debug for LifecycleRegistry {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("LifecycleRegistry")
            .field("breakpoints", &self.breakpoints)
            .field("phase", &self.phase)
            .field("class", &self.class)
            .field("registered", &self.slots.len())
            .field("live", &self.live_count())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::breakpoint::ClassSet;
    use crate::feature::FnFeature;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::{Cell, RefCell};

    /// Shared record of what features did, in order.
    #[derive(Clone, Default)]
    pub(crate) struct Log(Rc<RefCell<Vec<String>>>);

    impl Log {
        pub(crate) fn push(&self, entry: String) {
            self.0.borrow_mut().push(entry);
        }

        pub(crate) fn take(&self) -> Vec<String> {
            core::mem::take(&mut *self.0.borrow_mut())
        }
    }

    /// A feature that "binds a listener" on activate and unbinds on dispose,
    /// counting live bindings on a shared target.
    pub(crate) fn counting(
        name: &'static str,
        classes: ClassSet,
        target: &Rc<Cell<i32>>,
        log: &Log,
    ) -> FnFeature {
        let target = Rc::clone(target);
        let log = log.clone();
        FnFeature::new(name, classes, move || {
            assert_eq!(target.get(), 0, "{name} bound over a live listener");
            target.set(target.get() + 1);
            log.push(alloc::format!("+{name}"));
            let target = Rc::clone(&target);
            let log = log.clone();
            Ok(Activation::Active(Disposable::new(move || {
                target.set(target.get() - 1);
                log.push(alloc::format!("-{name}"));
            })))
        })
    }

    fn registry() -> LifecycleRegistry {
        LifecycleRegistry::new(Breakpoints::new(768, 992).unwrap())
    }

    #[test]
    fn boot_on_compact_viewport() {
        let log = Log::default();
        let toggler = Rc::new(Cell::new(0));
        let services = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::COMPACT, &toggler, &log))
            .unwrap();
        reg.register(counting("services", ClassSet::WIDE, &services, &log))
            .unwrap();

        reg.start(500).unwrap();

        assert_eq!(reg.phase(), Phase::Active);
        assert_eq!(reg.current_class(), Some(BreakpointClass::Compact));
        assert_eq!(reg.live_count(), 1);
        assert!(reg.is_live("menu"));
        assert!(!reg.is_live("services"));
        assert_eq!(log.take(), ["+menu"]);
    }

    #[test]
    fn crossing_upward_swaps_features_without_duplicates() {
        let log = Log::default();
        let toggler = Rc::new(Cell::new(0));
        let services = Rc::new(Cell::new(0));
        let refreshes = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::COMPACT, &toggler, &log))
            .unwrap();
        reg.register(counting("services", ClassSet::WIDE, &services, &log))
            .unwrap();
        let counter = Rc::clone(&refreshes);
        reg.set_layout_refresh(move || counter.set(counter.get() + 1));

        reg.start(500).unwrap();
        log.take();
        let report = reg.reconcile(1200).unwrap();

        assert_eq!(report.from, BreakpointClass::Compact);
        assert_eq!(report.to, BreakpointClass::Wide);
        assert_eq!(report.disposed, ["menu"]);
        assert_eq!(report.activated, ["services"]);
        assert_eq!(log.take(), ["-menu", "+services"]);
        assert_eq!(toggler.get(), 0, "no listener left on the toggler");
        assert_eq!(services.get(), 1);
        assert_eq!(refreshes.get(), 1, "layout refresh runs exactly once");
    }

    #[test]
    fn unchanged_class_is_a_noop() {
        let log = Log::default();
        let target = Rc::new(Cell::new(0));
        let refreshes = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::BELOW_WIDE, &target, &log))
            .unwrap();
        let counter = Rc::clone(&refreshes);
        reg.set_layout_refresh(move || counter.set(counter.get() + 1));
        reg.start(800).unwrap();
        log.take();

        for width in [810, 900, 780, 991, 768] {
            let report = reg.reconcile(width).unwrap();
            assert!(report.is_noop(), "{width} stays tablet");
        }
        assert!(log.take().is_empty(), "no dispose or activate calls");
        assert_eq!(refreshes.get(), 0);
    }

    #[test]
    fn repeated_crossings_never_duplicate_bindings() {
        let log = Log::default();
        let toggler = Rc::new(Cell::new(0));
        let pin = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::BELOW_WIDE, &toggler, &log))
            .unwrap();
        reg.register(counting("pin", ClassSet::WIDE, &pin, &log))
            .unwrap();
        reg.start(500).unwrap();

        for _ in 0..25 {
            reg.reconcile(1200).unwrap();
            assert_eq!((toggler.get(), pin.get()), (0, 1));
            reg.reconcile(500).unwrap();
            assert_eq!((toggler.get(), pin.get()), (1, 0));
        }
        assert_eq!(reg.live_names().collect::<Vec<_>>(), ["menu"]);
    }

    #[test]
    fn features_sharing_a_target_unbind_before_rebinding() {
        let log = Log::default();
        // Both menu variants bind the same toggler.
        let toggler = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("desktop_menu", ClassSet::WIDE, &toggler, &log))
            .unwrap();
        reg.register(counting("mobile_menu", ClassSet::BELOW_WIDE, &toggler, &log))
            .unwrap();
        reg.start(1200).unwrap();
        log.take();

        // `desktop_menu` is registered first, yet it must still be disposed
        // before `mobile_menu` activates and vice versa.
        reg.reconcile(400).unwrap();
        assert_eq!(log.take(), ["-desktop_menu", "+mobile_menu"]);
        reg.reconcile(1000).unwrap();
        assert_eq!(log.take(), ["-mobile_menu", "+desktop_menu"]);
        assert_eq!(toggler.get(), 1);
    }

    #[test]
    fn features_applicable_on_both_sides_are_untouched() {
        let log = Log::default();
        let menu = Rc::new(Cell::new(0));
        let buttons = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::BELOW_WIDE, &menu, &log))
            .unwrap();
        reg.register(counting("buttons", ClassSet::ALL, &buttons, &log))
            .unwrap();
        reg.start(500).unwrap();
        log.take();

        let report = reg.reconcile(800).unwrap();
        assert!(!report.is_noop());
        assert!(report.disposed.is_empty() && report.activated.is_empty());
        assert!(log.take().is_empty());

        reg.reconcile(1400).unwrap();
        assert_eq!(log.take(), ["-menu"], "non-sensitive buttons stay bound");
        assert_eq!(buttons.get(), 1);
    }

    #[test]
    fn missing_element_is_inactive_and_teardown_still_completes() {
        let log = Log::default();
        let buttons = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(FnFeature::new("carousel", ClassSet::ALL, || {
            Ok(Activation::missing(".splide"))
        }))
        .unwrap();
        reg.register(counting("buttons", ClassSet::ALL, &buttons, &log))
            .unwrap();

        reg.start(1200).unwrap();
        assert!(!reg.is_live("carousel"));
        assert!(reg.is_live("buttons"), "siblings still activate");

        assert_eq!(reg.teardown(), 1);
        assert_eq!(buttons.get(), 0);
        assert_eq!(reg.phase(), Phase::Disposed);
    }

    #[test]
    fn teardown_is_idempotent_and_final() {
        let log = Log::default();
        let menu = Rc::new(Cell::new(0));
        let pin = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::BELOW_WIDE, &menu, &log))
            .unwrap();
        reg.register(counting("pin", ClassSet::WIDE, &pin, &log))
            .unwrap();
        reg.start(500).unwrap();
        log.take();

        assert_eq!(reg.teardown(), 1);
        let after_first = (menu.get(), pin.get(), log.take());
        assert_eq!(reg.teardown(), 0);
        assert_eq!((menu.get(), pin.get(), log.take()), (0, 0, Vec::new()));
        assert_eq!(after_first, (0, 0, vec![String::from("-menu")]));

        assert_eq!(reg.reconcile(1200), Err(RegistryError::Disposed));
        assert_eq!(pin.get(), 0, "no reactivation after teardown");
        assert_eq!(
            reg.start(500),
            Err(StartError::Registry(RegistryError::Disposed))
        );
    }

    #[test]
    fn teardown_before_start_is_safe() {
        let mut reg = registry();
        reg.register(FnFeature::new("noop", ClassSet::ALL, || {
            Ok(Activation::Active(Disposable::empty()))
        }))
        .unwrap();
        assert_eq!(reg.teardown(), 0);
        assert_eq!(reg.phase(), Phase::Disposed);
    }

    #[test]
    fn environment_error_rolls_back_start() {
        let log = Log::default();
        let menu = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(counting("menu", ClassSet::ALL, &menu, &log))
            .unwrap();
        reg.register(FnFeature::new("broken", ClassSet::ALL, || {
            Err(EnvironmentError::MissingDocument)
        }))
        .unwrap();

        assert_eq!(
            reg.start(500),
            Err(StartError::Environment(EnvironmentError::MissingDocument))
        );
        assert_eq!(log.take(), ["+menu", "-menu"]);
        assert_eq!(reg.phase(), Phase::Uninitialized);
        assert_eq!(reg.live_count(), 0);
    }

    #[test]
    fn collaborator_failure_at_start_is_contained() {
        let log = Log::default();
        let menu = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(FnFeature::new("gsap", ClassSet::WIDE, || {
            Err(EnvironmentError::Collaborator("gsap".into()))
        }))
        .unwrap();
        reg.register(counting("menu", ClassSet::ALL, &menu, &log))
            .unwrap();

        assert_eq!(reg.start(1200), Ok(()));
        assert_eq!(reg.phase(), Phase::Active);
        assert!(reg.is_live("menu"));
        assert!(!reg.is_live("gsap"));
        assert_eq!(menu.get(), 1);
        assert_eq!(log.take(), ["+menu"]);
    }

    #[test]
    fn reconcile_contains_feature_failures() {
        let log = Log::default();
        let pin = Rc::new(Cell::new(0));
        let mut reg = registry();
        reg.register(FnFeature::new("gsap", ClassSet::WIDE, || {
            Err(EnvironmentError::Collaborator("gsap".into()))
        }))
        .unwrap();
        reg.register(counting("pin", ClassSet::WIDE, &pin, &log))
            .unwrap();
        reg.start(500).unwrap();

        let report = reg.reconcile(1200).unwrap();
        assert_eq!(report.activated, ["pin"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].0, "gsap");
        assert!(!reg.is_live("gsap"));
        assert_eq!(reg.current_class(), Some(BreakpointClass::Wide));
    }

    #[test]
    fn registration_rules() {
        let mut reg = registry();
        let make = || FnFeature::new("menu", ClassSet::ALL, || Ok(Activation::missing("#nav")));
        reg.register(make()).unwrap();
        assert_eq!(
            reg.register(make()),
            Err(RegistryError::DuplicateName("menu".into()))
        );
        assert_eq!(reg.reconcile(500), Err(RegistryError::NotStarted));
        reg.start(500).unwrap();
        assert_eq!(
            reg.register(FnFeature::new("late", ClassSet::ALL, || {
                Ok(Activation::missing("#late"))
            })),
            Err(RegistryError::AlreadyStarted)
        );
        assert_eq!(reg.len(), 1);
    }
}
