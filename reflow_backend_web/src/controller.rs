// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Page-level installation of a [`Coordinator`].
//!
//! ```text
//!   DOMContentLoaded (or already loaded) ──► Coordinator::start
//!   window "resize" ──► Coordinator::on_resize ──► setTimeout ──► on_wakeup
//!   window[name]()  ──► Coordinator::teardown
//! ```
//!
//! Browser callbacks hold weak references and borrow the coordinator with
//! `try_borrow_mut`. An event arriving while the coordinator is already
//! borrowed (a feature's activation dispatching a synchronous `resize`, for
//! instance) is dropped with a console warning.

use alloc::boxed::Box;
use alloc::format;
use alloc::rc::{Rc, Weak};
use alloc::string::ToString as _;
use core::cell::RefCell;

use reflow_core::coordinator::{Coordinator, CoordinatorConfig};
use reflow_core::error::{EnvironmentError, RegistryError, StartError};
use reflow_core::feature::Feature;
use reflow_core::registry::Phase;
use reflow_core::trace::LifecycleSink;
use wasm_bindgen::JsValue;
use wasm_bindgen::closure::Closure;
use web_sys::{Window, console};

use crate::dom;
use crate::host::WebHost;
use crate::listener::EventBinding;
use crate::timer::Timeout;

/// Owns a [`Coordinator<WebHost>`] and its browser wiring.
///
/// Cloning yields another handle to the same controller. Dropping the last
/// handle releases every listener and disposes every live feature, so keep
/// one alive for the page's lifetime, or call
/// [`expose_teardown`](Self::expose_teardown), which does so.
#[derive(Clone)]
pub struct ResponsiveController {
    inner: Rc<Inner>,
}

struct Inner {
    window: Window,
    coordinator: RefCell<Coordinator<WebHost>>,
    /// Pending `DOMContentLoaded` binding, if startup was deferred.
    ready: RefCell<Option<EventBinding>>,
}

impl ResponsiveController {
    /// Creates a controller with an empty registry.
    pub fn new(config: CoordinatorConfig) -> Result<Self, EnvironmentError> {
        let window = dom::window()?;
        let inner = Rc::new_cyclic(|weak: &Weak<Inner>| {
            let weak = weak.clone();
            let timer = Timeout::new(move || {
                if let Some(inner) = weak.upgrade() {
                    inner.with_coordinator("wakeup", |c| {
                        c.on_wakeup();
                    });
                }
            });
            Inner {
                window: window.clone(),
                coordinator: RefCell::new(Coordinator::new(config, WebHost::new(window, timer))),
                ready: RefCell::new(None),
            }
        });
        Ok(Self { inner })
    }

    /// Registers a feature. Must be called before the controller starts.
    pub fn register(&self, feature: impl Feature + 'static) -> Result<(), RegistryError> {
        self.inner.coordinator.borrow_mut().register(feature)
    }

    /// Registers an already boxed feature.
    pub fn register_boxed(&self, feature: Box<dyn Feature>) -> Result<(), RegistryError> {
        self.inner.coordinator.borrow_mut().register_boxed(feature)
    }

    /// Installs the hook run once after each breakpoint change.
    pub fn set_layout_refresh(&self, refresh: impl FnMut() + 'static) {
        self.inner
            .coordinator
            .borrow_mut()
            .set_layout_refresh(refresh);
    }

    /// Installs a lifecycle sink.
    pub fn set_sink(&self, sink: Box<dyn LifecycleSink>) {
        self.inner.coordinator.borrow_mut().set_sink(sink);
    }

    /// Binds the resize listener and starts the coordinator, now if the
    /// document has finished parsing, otherwise on `DOMContentLoaded`.
    ///
    /// A start that fails on the environment also drops the resize listener.
    pub fn install(&self) -> Result<(), JsValue> {
        if self.phase() == Phase::Disposed {
            return Err(js_error(&RegistryError::Disposed.to_string()));
        }

        let weak = Rc::downgrade(&self.inner);
        let resize = EventBinding::new(self.inner.window.as_ref(), "resize", move |_| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            match dom::viewport_width(&inner.window) {
                Ok(width) => {
                    inner.with_coordinator("resize", |c| {
                        c.on_resize(width);
                    });
                }
                Err(err) => warn(&format!("reflow: resize ignored: {err}")),
            }
        })
        .map_err(|err| dom::to_js_error(&err))?;
        self.inner
            .coordinator
            .borrow_mut()
            .host_mut()
            .attach_resize(resize);

        let document = dom::document().map_err(|err| dom::to_js_error(&err))?;
        if document.ready_state() != "loading" {
            return self.inner.start();
        }

        let weak = Rc::downgrade(&self.inner);
        let ready = EventBinding::once(document.as_ref(), "DOMContentLoaded", move |_| {
            if let Some(inner) = weak.upgrade()
                && let Err(err) = inner.start()
            {
                console::error_1(&err);
            }
        })
        .map_err(|err| dom::to_js_error(&err))?;
        *self.inner.ready.borrow_mut() = Some(ready);
        Ok(())
    }

    /// Tears everything down. Idempotent and safe before startup.
    ///
    /// Returns the number of features disposed by this call.
    pub fn teardown(&self) -> usize {
        self.inner.teardown()
    }

    /// Installs `window[name]` as a no-argument function that runs
    /// [`teardown`](Self::teardown).
    ///
    /// The function holds a strong handle, keeping the controller alive for
    /// the page's lifetime.
    pub fn expose_teardown(&self, name: &str) -> Result<(), JsValue> {
        let inner = Rc::clone(&self.inner);
        let hook = Closure::wrap(Box::new(move || {
            inner.teardown();
        }) as Box<dyn FnMut()>)
        .into_js_value();
        js_sys::Reflect::set(&self.inner.window, &JsValue::from_str(name), &hook)?;
        Ok(())
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> Phase {
        self.inner.coordinator.borrow().registry().phase()
    }

    /// Runs `f` with shared access to the coordinator.
    pub fn with<R>(&self, f: impl FnOnce(&Coordinator<WebHost>) -> R) -> R {
        f(&self.inner.coordinator.borrow())
    }
}

impl Inner {
    fn with_coordinator<R>(
        &self,
        what: &str,
        f: impl FnOnce(&mut Coordinator<WebHost>) -> R,
    ) -> Option<R> {
        match self.coordinator.try_borrow_mut() {
            Ok(mut coordinator) => Some(f(&mut coordinator)),
            Err(_) => {
                warn(&format!("reflow: re-entrant {what} dropped"));
                None
            }
        }
    }

    // Leaves `ready` in place: this may be running inside its handler.
    fn start(&self) -> Result<(), JsValue> {
        match self.with_coordinator("start", Coordinator::start) {
            Some(result) => result.map_err(|err: StartError| js_error(&err.to_string())),
            None => Err(js_error("reflow: start re-entered")),
        }
    }

    fn teardown(&self) -> usize {
        let Some(disposed) = self.with_coordinator("teardown", Coordinator::teardown) else {
            return 0;
        };
        self.ready.borrow_mut().take();
        disposed
    }
}

impl core::fmt::Debug for ResponsiveController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ResponsiveController")
            .field("coordinator", &self.inner.coordinator.try_borrow().ok())
            .field("deferred_start", &self.inner.ready.borrow().is_some())
            .finish()
    }
}

fn js_error(message: &str) -> JsValue {
    js_sys::Error::new(message).into()
}

fn warn(message: &str) {
    console::warn_1(&JsValue::from_str(message));
}
