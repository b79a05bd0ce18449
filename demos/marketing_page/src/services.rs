// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scroll-pinned services section (GSAP `ScrollTrigger`).

use js_sys::{Object, Reflect};
use reflow_backend_web::dom;
use reflow_core::breakpoint::ClassSet;
use reflow_core::disposable::Disposable;
use reflow_core::error::EnvironmentError;
use reflow_core::feature::{Activation, FnFeature};
use wasm_bindgen::prelude::*;
use web_sys::Element;

const SERVICES: &str = ".services";

#[wasm_bindgen]
extern "C" {
    type ScrollTrigger;

    #[wasm_bindgen(static_method_of = ScrollTrigger, catch)]
    fn create(vars: &Object) -> Result<ScrollTrigger, JsValue>;

    #[wasm_bindgen(static_method_of = ScrollTrigger, js_name = "refresh", catch)]
    fn refresh_all() -> Result<(), JsValue>;

    #[wasm_bindgen(method)]
    fn kill(this: &ScrollTrigger);
}

fn pin_vars(trigger: &Element) -> Result<Object, JsValue> {
    let vars = Object::new();
    Reflect::set(&vars, &"trigger".into(), trigger)?;
    Reflect::set(&vars, &"start".into(), &"top top".into())?;
    Reflect::set(&vars, &"end".into(), &"+=100%".into())?;
    Reflect::set(&vars, &"pin".into(), &JsValue::TRUE)?;
    Reflect::set(&vars, &"scrub".into(), &JsValue::TRUE)?;
    Ok(vars)
}

/// Pins `.services` while it scrolls past on wide viewports; disposal kills
/// the trigger and its pin spacer.
pub(crate) fn service_pin() -> FnFeature {
    FnFeature::new("service_pin", ClassSet::WIDE, || {
        let Some(section) = dom::query(SERVICES)? else {
            return Ok(Activation::missing(SERVICES));
        };
        let trigger = pin_vars(&section)
            .and_then(|vars| ScrollTrigger::create(&vars))
            .map_err(|err| dom::collaborator("ScrollTrigger.create", &err))?;
        Ok(Activation::Active(Disposable::new(move || trigger.kill())))
    })
}

/// Recomputes every trigger's start and end positions.
///
/// Installed as the layout-refresh hook, so it runs after each breakpoint
/// change once the feature set has settled.
pub(crate) fn refresh_layout() -> Result<(), EnvironmentError> {
    ScrollTrigger::refresh_all().map_err(|err| dom::collaborator("ScrollTrigger.refresh", &err))
}
