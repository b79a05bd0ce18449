// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scoped teardown handles.
//!
//! A [`Disposable`] owns the reversal of one activation's side effects. The
//! teardown runs exactly once: on the first [`dispose`](Disposable::dispose)
//! call, or on drop if it was never disposed explicitly. Later calls are
//! no-ops and report `false`.
//!
//! ```rust,ignore
//! let binding = EventBinding::new(&toggler, "click", on_click)?;
//! let reset = Disposable::new(move || close_menu(&nav));
//! Ok(Activation::Active(Disposable::from_parts([binding.into(), reset])))
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;

type Teardown = Box<dyn FnOnce()>;

/// A handle that reverses one activation.
#[must_use = "dropping a Disposable immediately runs its teardown"]
pub struct Disposable {
    teardown: Option<Teardown>,
}

impl Disposable {
    /// Wraps a teardown closure.
    pub fn new(teardown: impl FnOnce() + 'static) -> Self {
        Self {
            teardown: Some(Box::new(teardown)),
        }
    }

    /// A disposable with nothing to undo.
    pub fn empty() -> Self {
        Self { teardown: None }
    }

    /// Combines several disposables into one.
    ///
    /// Parts are disposed in the order they were given.
    pub fn from_parts(parts: impl IntoIterator<Item = Self>) -> Self {
        let mut parts: Vec<Self> = parts.into_iter().collect();
        Self::new(move || {
            for part in &mut parts {
                part.dispose();
            }
        })
    }

    /// Runs the teardown if it has not run yet.
    ///
    /// Returns `true` if this call performed the teardown and `false` for a
    /// redundant call.
    pub fn dispose(&mut self) -> bool {
        match self.teardown.take() {
            Some(teardown) => {
                teardown();
                true
            }
            None => false,
        }
    }

    /// Whether the teardown has already run (or there never was one).
    #[must_use]
    pub fn is_disposed(&self) -> bool {
        self.teardown.is_none()
    }
}

impl Drop for Disposable {
    fn drop(&mut self) {
        self.dispose();
    }
}

impl core::fmt::Debug for Disposable {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Disposable")
            .field("disposed", &self.is_disposed())
            .finish()
    }
}
