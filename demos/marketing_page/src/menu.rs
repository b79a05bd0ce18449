// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Header navigation: an off-canvas menu below the wide breakpoint, a
//! permanently visible one at and above it.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::Cell;

use reflow_backend_web::{EventBinding, dom};
use reflow_core::breakpoint::ClassSet;
use reflow_core::disposable::Disposable;
use reflow_core::feature::{Activation, FnFeature};
use web_sys::{Element, HtmlElement};

const TOGGLER: &str = ".header__menu-toggler";
const NAVIGATION: &str = "#main-navigation";
const MENU_ITEM: &str = ".header__menu-item";

/// Navigation transform for an open or closed off-canvas menu.
pub(crate) fn nav_transform(open: bool) -> &'static str {
    if open {
        "translateX(0)"
    } else {
        "translateX(100%)"
    }
}

/// Open state of one activation of the off-canvas menu.
struct MenuState {
    toggler: Element,
    nav: HtmlElement,
    open: Cell<bool>,
}

impl MenuState {
    fn set_open(&self, open: bool) {
        self.open.set(open);
        let _ = self
            .toggler
            .set_attribute("aria-expanded", dom::aria_bool(open));
        let _ = self
            .nav
            .style()
            .set_property("transform", nav_transform(open));
    }

    fn toggle(&self) {
        self.set_open(!self.open.get());
    }
}

/// The off-canvas menu used on compact and tablet viewports.
///
/// The toggler flips the menu; following any menu item closes it. Disposal
/// removes every listener and leaves the menu closed.
pub(crate) fn mobile_menu() -> FnFeature {
    FnFeature::new("mobile_menu", ClassSet::BELOW_WIDE, || {
        let Some(toggler) = dom::query(TOGGLER)? else {
            return Ok(Activation::missing(TOGGLER));
        };
        let Some(nav) = dom::query_html(NAVIGATION)? else {
            return Ok(Activation::missing(NAVIGATION));
        };
        let items = dom::query_all_within(&nav, MENU_ITEM)?;

        let initially_open = toggler.get_attribute("aria-expanded").as_deref() == Some("true");
        let state = Rc::new(MenuState {
            toggler: toggler.clone(),
            nav,
            open: Cell::new(initially_open),
        });
        state.set_open(initially_open);

        let mut parts: Vec<Disposable> = Vec::with_capacity(items.len() + 2);
        let on_toggle = Rc::clone(&state);
        parts.push(
            EventBinding::new(toggler.as_ref(), "click", move |_| on_toggle.toggle())?.into(),
        );
        for item in &items {
            let on_item = Rc::clone(&state);
            parts.push(
                EventBinding::new(item.as_ref(), "click", move |_| on_item.set_open(false))?
                    .into(),
            );
        }
        parts.push(Disposable::new(move || state.set_open(false)));

        Ok(Activation::Active(Disposable::from_parts(parts)))
    })
}

/// The always-visible navigation used on wide viewports.
///
/// Forces the navigation into view and reports it collapsed to assistive
/// technology; disposal clears the inline transform.
pub(crate) fn desktop_menu() -> FnFeature {
    FnFeature::new("desktop_menu", ClassSet::WIDE, || {
        let Some(nav) = dom::query_html(NAVIGATION)? else {
            return Ok(Activation::missing(NAVIGATION));
        };
        let _ = nav.style().set_property("transform", nav_transform(true));
        if let Some(toggler) = dom::query(TOGGLER)? {
            let _ = toggler.set_attribute("aria-expanded", dom::aria_bool(false));
        }
        Ok(Activation::Active(Disposable::new(move || {
            let _ = nav.style().remove_property("transform");
        })))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reflow_core::breakpoint::BreakpointClass;
    use reflow_core::feature::Feature as _;

    #[test]
    fn closed_menu_slides_off_canvas() {
        assert_eq!(nav_transform(false), "translateX(100%)");
        assert_eq!(nav_transform(true), "translateX(0)");
    }

    #[test]
    fn mobile_and_desktop_menus_partition_the_classes() {
        let mobile = mobile_menu();
        let desktop = desktop_menu();
        for class in BreakpointClass::ALL {
            assert_ne!(
                mobile.is_applicable(class),
                desktop.is_applicable(class),
                "exactly one menu applies at {class}"
            );
        }
    }
}
