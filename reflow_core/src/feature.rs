// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The feature contract.
//!
//! A [`Feature`] is a stateless descriptor: a unique name, a predicate over
//! [`BreakpointClass`], and a factory that performs setup and hands back a
//! [`Disposable`]. Any state a feature needs while it is live belongs to the
//! activation (captured by the closures its disposable owns), never to the
//! descriptor.
//!
//! Activation has three outcomes:
//!
//! - `Ok(Activation::Active(d))`: setup happened; `d` reverses it exactly.
//! - `Ok(Activation::Inactive(missing))`: an optional element is absent.
//!   Nothing was set up and nothing needs disposing.
//! - `Err(EnvironmentError)`: a required collaborator is unavailable.

use alloc::borrow::Cow;
use alloc::boxed::Box;
use core::fmt;

use crate::breakpoint::{BreakpointClass, ClassSet};
use crate::disposable::Disposable;
use crate::error::EnvironmentError;

/// An optional element a feature needs is not in the document.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MissingElement {
    /// The selector that matched nothing.
    pub selector: Cow<'static, str>,
}

impl MissingElement {
    /// Creates a report for `selector`.
    pub fn new(selector: impl Into<Cow<'static, str>>) -> Self {
        Self {
            selector: selector.into(),
        }
    }
}

impl fmt::Display for MissingElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "no element matches `{}`", self.selector)
    }
}

/// Result of a successful call to [`Feature::activate`].
#[derive(Debug)]
pub enum Activation {
    /// Setup was performed and must be reversed through this handle.
    Active(Disposable),
    /// Preconditions were unmet; nothing was set up.
    Inactive(MissingElement),
}

impl Activation {
    /// Shorthand for an inactive outcome caused by `selector` matching
    /// nothing.
    pub fn missing(selector: impl Into<Cow<'static, str>>) -> Self {
        Self::Inactive(MissingElement::new(selector))
    }
}

/// An independently activatable and disposable unit of page behavior.
pub trait Feature {
    /// Unique name within a registry.
    fn name(&self) -> &str;

    /// Whether the feature should be live under `class`.
    ///
    /// Must be a pure function of `class`.
    fn is_applicable(&self, class: BreakpointClass) -> bool;

    /// Performs setup. Only called while `is_applicable` holds.
    fn activate(&self) -> Result<Activation, EnvironmentError>;
}

/// Whether `feature` may change applicability when the breakpoint changes.
///
/// Features that apply to every class (or to none) are left alone by
/// reconciliation.
pub fn is_breakpoint_sensitive(feature: &dyn Feature) -> bool {
    let first = feature.is_applicable(BreakpointClass::ALL[0]);
    BreakpointClass::ALL[1..]
        .iter()
        .any(|class| feature.is_applicable(*class) != first)
}

type ActivateFn = Box<dyn Fn() -> Result<Activation, EnvironmentError>>;

/// A [`Feature`] assembled from a name, a [`ClassSet`] and a closure.
pub struct FnFeature {
    name: Cow<'static, str>,
    classes: ClassSet,
    activate: ActivateFn,
}

impl FnFeature {
    /// Creates a feature that applies under every class in `classes`.
    pub fn new(
        name: impl Into<Cow<'static, str>>,
        classes: ClassSet,
        activate: impl Fn() -> Result<Activation, EnvironmentError> + 'static,
    ) -> Self {
        Self {
            name: name.into(),
            classes,
            activate: Box::new(activate),
        }
    }

    /// The classes this feature applies to.
    #[must_use]
    pub fn classes(&self) -> ClassSet {
        self.classes
    }
}

impl Feature for FnFeature {
    fn name(&self) -> &str {
        &self.name
    }

    fn is_applicable(&self, class: BreakpointClass) -> bool {
        self.classes.contains(class)
    }

    fn activate(&self) -> Result<Activation, EnvironmentError> {
        (self.activate)()
    }
}

impl fmt::Debug for FnFeature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnFeature")
            .field("name", &self.name)
            .field("classes", &self.classes)
            .finish_non_exhaustive()
    }
}
