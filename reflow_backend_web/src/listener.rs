// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RAII DOM event listeners.

use alloc::boxed::Box;

use reflow_core::disposable::Disposable;
use reflow_core::error::EnvironmentError;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{AddEventListenerOptions, Event, EventTarget};

use crate::dom;

type Handler = Closure<dyn FnMut(Event)>;

/// An event listener that is removed when the binding is dropped.
///
/// The binding owns the JS closure, so the handler stays callable exactly as
/// long as it is registered. Convert into a [`Disposable`] to hand it to the
/// registry.
///
/// Do not drop a binding from inside its own handler.
pub struct EventBinding {
    target: EventTarget,
    kind: &'static str,
    closure: Handler,
}

impl EventBinding {
    /// Adds `handler` as a `kind` listener on `target`.
    pub fn new(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, EnvironmentError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(kind, closure.as_ref().unchecked_ref())
            .map_err(|err| dom::collaborator(kind, &err))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }

    /// Adds `handler` as a listener the browser removes after its first call.
    ///
    /// The closure itself lives until the binding is dropped.
    pub fn once(
        target: &EventTarget,
        kind: &'static str,
        handler: impl FnMut(Event) + 'static,
    ) -> Result<Self, EnvironmentError> {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        let options = AddEventListenerOptions::new();
        options.set_once(true);
        target
            .add_event_listener_with_callback_and_add_event_listener_options(
                kind,
                closure.as_ref().unchecked_ref(),
                &options,
            )
            .map_err(|err| dom::collaborator(kind, &err))?;
        Ok(Self {
            target: target.clone(),
            kind,
            closure,
        })
    }
}

impl Drop for EventBinding {
    fn drop(&mut self) {
        // Removing an already-removed listener is a no-op in the DOM.
        let _ = self
            .target
            .remove_event_listener_with_callback(self.kind, self.closure.as_ref().unchecked_ref());
    }
}

impl From<EventBinding> for Disposable {
    fn from(binding: EventBinding) -> Self {
        Self::new(move || drop(binding))
    }
}

impl core::fmt::Debug for EventBinding {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("EventBinding")
            .field("kind", &self.kind)
            .finish_non_exhaustive()
    }
}
