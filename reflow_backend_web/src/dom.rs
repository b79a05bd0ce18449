// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Element lookup and small DOM helpers.
//!
//! Lookups distinguish two kinds of absence: a missing `window`/`document` is
//! an [`EnvironmentError`], while a selector matching nothing is `Ok(None)`
//! (or an empty list) so features can report themselves inactive.

use alloc::format;
use alloc::string::{String, ToString as _};
use alloc::vec::Vec;

use reflow_core::error::EnvironmentError;
use wasm_bindgen::{JsCast as _, JsValue};
use web_sys::{Document, Element, HtmlElement, NodeList, Window};

/// Returns the global `window`.
pub fn window() -> Result<Window, EnvironmentError> {
    web_sys::window().ok_or(EnvironmentError::MissingWindow)
}

/// Returns the window's `document`.
pub fn document() -> Result<Document, EnvironmentError> {
    window()?.document().ok_or(EnvironmentError::MissingDocument)
}

/// Returns the first element matching `selector`, if any.
pub fn query(selector: &str) -> Result<Option<Element>, EnvironmentError> {
    document()?
        .query_selector(selector)
        .map_err(|err| collaborator(&format!("querySelector(`{selector}`)"), &err))
}

/// Returns the first element matching `selector` if it is an `HtmlElement`.
pub fn query_html(selector: &str) -> Result<Option<HtmlElement>, EnvironmentError> {
    Ok(query(selector)?.and_then(|el| el.dyn_into::<HtmlElement>().ok()))
}

/// Returns every element matching `selector`, in document order.
pub fn query_all(selector: &str) -> Result<Vec<Element>, EnvironmentError> {
    let list = document()?
        .query_selector_all(selector)
        .map_err(|err| collaborator(&format!("querySelectorAll(`{selector}`)"), &err))?;
    Ok(elements(&list))
}

/// Returns the first descendant of `root` matching `selector`, if any.
pub fn query_within(root: &Element, selector: &str) -> Result<Option<Element>, EnvironmentError> {
    root.query_selector(selector)
        .map_err(|err| collaborator(&format!("querySelector(`{selector}`)"), &err))
}

/// Returns every descendant of `root` matching `selector`.
pub fn query_all_within(root: &Element, selector: &str) -> Result<Vec<Element>, EnvironmentError> {
    let list = root
        .query_selector_all(selector)
        .map_err(|err| collaborator(&format!("querySelectorAll(`{selector}`)"), &err))?;
    Ok(elements(&list))
}

fn elements(list: &NodeList) -> Vec<Element> {
    (0..list.length())
        .filter_map(|i| list.item(i))
        .filter_map(|node| node.dyn_into::<Element>().ok())
        .collect()
}

/// Reads `window.innerWidth` in CSS pixels.
pub fn viewport_width(window: &Window) -> Result<u32, EnvironmentError> {
    window
        .inner_width()
        .ok()
        .and_then(|v| v.as_f64())
        .and_then(width_from_px)
        .ok_or(EnvironmentError::ViewportUnavailable)
}

/// Converts a CSS pixel width to whole pixels, rejecting negative and
/// non-finite values.
#[must_use]
pub fn width_from_px(px: f64) -> Option<u32> {
    if !px.is_finite() || px < 0.0 {
        return None;
    }
    #[expect(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        reason = "non-negative finite width; float-to-int casts saturate"
    )]
    Some(px as u32)
}

/// The string form of a boolean ARIA state.
#[must_use]
pub fn aria_bool(value: bool) -> &'static str {
    if value { "true" } else { "false" }
}

/// Formats a CSS `url()` value, quoting and escaping the URL.
#[must_use]
pub fn css_url(url: &str) -> String {
    let mut out = String::with_capacity(url.len() + 7);
    out.push_str("url(\"");
    for c in url.chars() {
        match c {
            '"' | '\\' => {
                out.push('\\');
                out.push(c);
            }
            '\n' | '\r' => {}
            _ => out.push(c),
        }
    }
    out.push_str("\")");
    out
}

/// Wraps a JavaScript exception as a [`EnvironmentError::Collaborator`].
#[must_use]
pub fn collaborator(what: &str, err: &JsValue) -> EnvironmentError {
    EnvironmentError::Collaborator(format!("{what}: {}", describe(err)))
}

/// Converts an [`EnvironmentError`] into a JavaScript `Error`.
#[must_use]
pub fn to_js_error(err: &EnvironmentError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn describe(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return e.message().into();
    }
    err.as_string().unwrap_or_else(|| "unknown error".to_string())
}
