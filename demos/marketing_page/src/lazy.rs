// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deferred background images for `.lazy-bg` elements.

use reflow_backend_web::{IntersectionWatch, dom};
use reflow_core::breakpoint::ClassSet;
use reflow_core::feature::{Activation, FnFeature};
use wasm_bindgen::JsCast as _;
use web_sys::HtmlElement;

const LAZY: &str = ".lazy-bg";

/// Sets `background-image` from `data-bg` the first time each `.lazy-bg`
/// element scrolls into view, then stops watching it.
pub(crate) fn lazy_backgrounds() -> FnFeature {
    FnFeature::new("lazy_backgrounds", ClassSet::ALL, || {
        let targets = dom::query_all(LAZY)?;
        if targets.is_empty() {
            return Ok(Activation::missing(LAZY));
        }
        let watch = IntersectionWatch::new(|el, observer| {
            if let Some(url) = el.get_attribute("data-bg")
                && let Some(el) = el.dyn_ref::<HtmlElement>()
            {
                let _ = el
                    .style()
                    .set_property("background-image", &dom::css_url(&url));
            }
            observer.unobserve(el);
        })?;
        for target in &targets {
            watch.observe(target);
        }
        Ok(Activation::Active(watch.into()))
    })
}
