// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! `requestAnimationFrame` loop.
//!
//! [`RafLoop`] calls back once per animation frame with the frame's
//! [`DOMHighResTimeStamp`][mdn] in milliseconds, the unit smooth-scroll
//! libraries expect for their `raf(time)` entry point.
//!
//! [mdn]: https://developer.mozilla.org/en-US/docs/Web/API/DOMHighResTimeStamp

use alloc::boxed::Box;
use alloc::rc::Rc;
use core::cell::{Cell, RefCell};

use reflow_core::disposable::Disposable;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;

// Direct global bindings instead of `web_sys::Window` methods. Avoids
// fetching the Window/Performance objects on every frame.
#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = performance, js_name = "now")]
    pub(crate) fn performance_now() -> f64;

    #[wasm_bindgen(js_name = "requestAnimationFrame")]
    fn request_animation_frame(callback: &JsValue) -> i32;

    #[wasm_bindgen(js_name = "cancelAnimationFrame")]
    fn cancel_animation_frame(id: i32);
}

/// A `requestAnimationFrame` loop.
///
/// Create with [`RafLoop::new`], then call [`start`](Self::start) to begin
/// receiving callbacks. The loop re-registers itself each frame until
/// [`stop`](Self::stop) is called or the `RafLoop` is dropped.
pub struct RafLoop {
    inner: Rc<RafInner>,
}

type RafClosure = Closure<dyn FnMut(f64)>;

struct RafInner {
    /// The JS closure registered with `requestAnimationFrame`.
    ///
    /// Stored in its own `RefCell` so it can be set once in `start()` and
    /// referenced from inside itself without conflicting with `callback`.
    closure: RefCell<Option<RafClosure>>,

    /// The user-supplied per-frame callback.
    callback: RefCell<Box<dyn FnMut(f64)>>,

    /// Number of frames delivered so far.
    frames: Cell<u64>,

    running: Cell<bool>,

    /// The ID returned by the most recent `requestAnimationFrame` call.
    raf_id: Cell<i32>,
}

impl RafLoop {
    /// Creates a new `RafLoop` that is **not yet running**.
    ///
    /// `callback` receives the frame timestamp in milliseconds.
    pub fn new(callback: impl FnMut(f64) + 'static) -> Self {
        Self {
            inner: Rc::new(RafInner {
                closure: RefCell::new(None),
                callback: RefCell::new(Box::new(callback)),
                frames: Cell::new(0),
                running: Cell::new(false),
                raf_id: Cell::new(0),
            }),
        }
    }

    /// Starts the loop. If already running, this is a no-op.
    pub fn start(&self) {
        if self.inner.running.get() {
            return;
        }
        self.inner.running.set(true);

        if let Some(closure) = &*self.inner.closure.borrow() {
            let id = request_animation_frame(closure.as_ref());
            self.inner.raf_id.set(id);
            return;
        }

        let weak = Rc::downgrade(&self.inner);
        let closure = Closure::wrap(Box::new(move |timestamp_ms: f64| {
            let Some(inner) = weak.upgrade() else {
                return;
            };
            if !inner.running.get() {
                return;
            }
            inner.frames.set(inner.frames.get() + 1);

            inner.callback.borrow_mut()(timestamp_ms);

            if inner.running.get()
                && let Some(ref closure) = *inner.closure.borrow()
            {
                let id = request_animation_frame(closure.as_ref());
                inner.raf_id.set(id);
            }
        }) as Box<dyn FnMut(f64)>);

        let id = request_animation_frame(closure.as_ref());
        self.inner.raf_id.set(id);
        *self.inner.closure.borrow_mut() = Some(closure);
    }

    /// Stops the loop and cancels the pending frame. Can be restarted.
    pub fn stop(&self) {
        if !self.inner.running.get() {
            return;
        }
        self.inner.running.set(false);
        cancel_animation_frame(self.inner.raf_id.get());
    }
}

impl Drop for RafLoop {
    fn drop(&mut self) {
        self.stop();
        // Drop the JS closure so it doesn't leak.
        self.inner.closure.borrow_mut().take();
    }
}

impl From<RafLoop> for Disposable {
    fn from(raf: RafLoop) -> Self {
        Self::new(move || drop(raf))
    }
}

impl core::fmt::Debug for RafLoop {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RafLoop")
            .field("running", &self.inner.running.get())
            .field("frames", &self.inner.frames.get())
            .finish()
    }
}
