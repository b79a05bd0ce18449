// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RAII `IntersectionObserver`.

use alloc::boxed::Box;

use js_sys::Array;
use reflow_core::disposable::Disposable;
use reflow_core::error::EnvironmentError;
use wasm_bindgen::JsCast as _;
use wasm_bindgen::closure::Closure;
use web_sys::{Element, IntersectionObserver, IntersectionObserverEntry};

use crate::dom;

type ObserverCallback = Closure<dyn FnMut(Array, IntersectionObserver)>;

/// An `IntersectionObserver` that disconnects when dropped.
///
/// The callback runs once per entry that is intersecting, with the entry's
/// target and the observer (so it can `unobserve` the target).
pub struct IntersectionWatch {
    observer: IntersectionObserver,
    _callback: ObserverCallback,
}

impl IntersectionWatch {
    /// Creates an observer with the default root and thresholds.
    pub fn new(
        mut on_enter: impl FnMut(&Element, &IntersectionObserver) + 'static,
    ) -> Result<Self, EnvironmentError> {
        let callback = Closure::wrap(Box::new(move |entries: Array, observer: IntersectionObserver| {
            for entry in entries.iter() {
                let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                    continue;
                };
                if entry.is_intersecting() {
                    on_enter(&entry.target(), &observer);
                }
            }
        }) as Box<dyn FnMut(Array, IntersectionObserver)>);
        let observer = IntersectionObserver::new(callback.as_ref().unchecked_ref())
            .map_err(|err| dom::collaborator("IntersectionObserver", &err))?;
        Ok(Self {
            observer,
            _callback: callback,
        })
    }

    /// Starts observing `target`.
    pub fn observe(&self, target: &Element) {
        self.observer.observe(target);
    }
}

impl Drop for IntersectionWatch {
    fn drop(&mut self) {
        self.observer.disconnect();
    }
}

impl From<IntersectionWatch> for Disposable {
    fn from(watch: IntersectionWatch) -> Self {
        Self::new(move || drop(watch))
    }
}

impl core::fmt::Debug for IntersectionWatch {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("IntersectionWatch").finish_non_exhaustive()
    }
}
