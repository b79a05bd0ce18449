// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lenis smooth scrolling driven by a `requestAnimationFrame` loop.

use reflow_backend_web::{RafLoop, dom};
use reflow_core::breakpoint::ClassSet;
use reflow_core::disposable::Disposable;
use reflow_core::feature::{Activation, FnFeature};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
extern "C" {
    #[derive(Clone)]
    type Lenis;

    #[wasm_bindgen(constructor, catch)]
    fn new() -> Result<Lenis, JsValue>;

    #[wasm_bindgen(method)]
    fn raf(this: &Lenis, time: f64);

    #[wasm_bindgen(method)]
    fn destroy(this: &Lenis);
}

/// Smooth scrolling above the compact breakpoint.
///
/// Disposal stops the frame loop before destroying the Lenis instance, so no
/// frame reaches a destroyed instance.
pub(crate) fn smooth_scroll() -> FnFeature {
    FnFeature::new("smooth_scroll", ClassSet::ABOVE_COMPACT, || {
        let lenis = Lenis::new().map_err(|err| dom::collaborator("Lenis", &err))?;
        let driver = lenis.clone();
        let raf = RafLoop::new(move |time_ms| driver.raf(time_ms));
        raf.start();
        Ok(Activation::Active(Disposable::from_parts([
            Disposable::from(raf),
            Disposable::new(move || lenis.destroy()),
        ])))
    })
}
