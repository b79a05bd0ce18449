// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! One-shot `setTimeout` wakeups.

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use reflow_core::time::Duration;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_name = "setTimeout")]
    fn set_timeout(handler: &JsValue, timeout: i32) -> i32;

    #[wasm_bindgen(js_name = "clearTimeout")]
    fn clear_timeout(id: i32);
}

/// A re-armable one-shot timer.
///
/// At most one timeout is outstanding: [`arm`](Self::arm) replaces any
/// pending one. The callback runs with the timer already disarmed, so it may
/// re-arm it. Dropping the timer clears the pending timeout.
pub struct Timeout {
    inner: Rc<TimeoutInner>,
}

struct TimeoutInner {
    closure: RefCell<Option<Closure<dyn FnMut()>>>,
    callback: RefCell<Box<dyn FnMut()>>,
    /// The ID of the pending `setTimeout`, if armed.
    pending: Cell<Option<i32>>,
}

impl Timeout {
    /// Creates a disarmed timer that calls `callback` when it fires.
    pub fn new(callback: impl FnMut() + 'static) -> Self {
        let inner = Rc::new(TimeoutInner {
            closure: RefCell::new(None),
            callback: RefCell::new(Box::new(callback)),
            pending: Cell::new(None),
        });
        let weak = Rc::downgrade(&inner);
        let closure = Closure::wrap(Box::new(move || {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if inner.pending.take().is_none() {
                return;
            }
            // A callback that re-enters its own timer is dropped.
            if let Ok(mut callback) = inner.callback.try_borrow_mut() {
                callback();
            }
        }) as Box<dyn FnMut()>);
        *inner.closure.borrow_mut() = Some(closure);
        Self { inner }
    }

    /// Arms the timer to fire after `delay`, replacing any pending timeout.
    pub fn arm(&self, delay: Duration) {
        self.clear();
        if let Some(closure) = &*self.inner.closure.borrow() {
            let id = set_timeout(closure.as_ref(), timeout_millis(delay));
            self.inner.pending.set(Some(id));
        }
    }

    /// Clears the pending timeout. Returns `true` if one was armed.
    pub fn clear(&self) -> bool {
        match self.inner.pending.take() {
            Some(id) => {
                clear_timeout(id);
                true
            }
            None => false,
        }
    }
}

impl Drop for Timeout {
    fn drop(&mut self) {
        self.clear();
        self.inner.closure.borrow_mut().take();
    }
}

impl core::fmt::Debug for Timeout {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Timeout")
            .field("pending", &self.inner.pending.get())
            .finish_non_exhaustive()
    }
}

/// Converts a delay to the millisecond argument of `setTimeout`, rounding up
/// so a wakeup never fires before the throttle interval has elapsed.
pub(crate) fn timeout_millis(delay: Duration) -> i32 {
    i32::try_from(delay.as_millis_ceil()).unwrap_or(i32::MAX)
}
