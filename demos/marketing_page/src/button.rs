// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer-following hover highlight on `.btn` elements.

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use reflow_backend_web::{EventBinding, dom};
use reflow_core::breakpoint::ClassSet;
use reflow_core::disposable::Disposable;
use reflow_core::feature::{Activation, FnFeature};
use wasm_bindgen::JsCast as _;
use web_sys::{HtmlElement, MouseEvent};

const BUTTON: &str = ".btn";
const BACKGROUND: &str = ".btn__bg";

/// Offset of the pointer from the button's top-left corner, as CSS lengths.
pub(crate) fn pointer_offset(client: (f64, f64), origin: (f64, f64)) -> (String, String) {
    (
        format!("{}px", client.0 - origin.0),
        format!("{}px", client.1 - origin.1),
    )
}

/// Moves each button's `.btn__bg` to the pointer on `mousemove`.
///
/// Buttons without a `.btn__bg` child are skipped.
pub(crate) fn button_effect() -> FnFeature {
    FnFeature::new("button_effect", ClassSet::ALL, || {
        let buttons = dom::query_all(BUTTON)?;
        if buttons.is_empty() {
            return Ok(Activation::missing(BUTTON));
        }

        let mut parts: Vec<Disposable> = Vec::with_capacity(buttons.len());
        for button in buttons {
            let Some(bg) = dom::query_within(&button, BACKGROUND)?
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let target = button.clone();
            let binding = EventBinding::new(button.as_ref(), "mousemove", move |event| {
                let Some(event) = event.dyn_ref::<MouseEvent>() else {
                    return;
                };
                let rect = target.get_bounding_client_rect();
                let (left, top) = pointer_offset(
                    (f64::from(event.client_x()), f64::from(event.client_y())),
                    (rect.left(), rect.top()),
                );
                let style = bg.style();
                let _ = style.set_property("left", &left);
                let _ = style.set_property("top", &top);
            })?;
            parts.push(binding.into());
        }
        Ok(Activation::Active(Disposable::from_parts(parts)))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offset_is_relative_to_button_corner() {
        let (left, top) = pointer_offset((130.0, 48.0), (100.0, 40.5));
        assert_eq!(left, "30px");
        assert_eq!(top, "7.5px");
    }
}
