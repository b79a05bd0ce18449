// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Splide carousel on the page's `.splide` element.

use reflow_backend_web::dom;
use reflow_core::breakpoint::ClassSet;
use reflow_core::disposable::Disposable;
use reflow_core::feature::{Activation, FnFeature};
use wasm_bindgen::prelude::*;
use web_sys::Element;

const CAROUSEL: &str = ".splide";

#[wasm_bindgen]
extern "C" {
    /// The global `Splide` constructor, loaded by a `<script>` tag.
    type Splide;

    #[wasm_bindgen(constructor, catch)]
    fn new(target: &Element) -> Result<Splide, JsValue>;

    #[wasm_bindgen(method, catch)]
    fn mount(this: &Splide) -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Splide, completely: bool);
}

/// Mounts a carousel on `.splide`; disposal destroys it completely.
pub(crate) fn carousel() -> FnFeature {
    FnFeature::new("carousel", ClassSet::ALL, || {
        let Some(target) = dom::query(CAROUSEL)? else {
            return Ok(Activation::missing(CAROUSEL));
        };
        let splide = Splide::new(&target).map_err(|err| dom::collaborator("Splide", &err))?;
        splide
            .mount()
            .map_err(|err| dom::collaborator("Splide.mount", &err))?;
        Ok(Activation::Active(Disposable::new(move || {
            splide.destroy(true);
        })))
    })
}
