// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Viewport width classification.
//!
//! [`Breakpoints`] holds two thresholds and maps a width to a
//! [`BreakpointClass`]:
//!
//! ```text
//!   0 ──── Compact ──── tablet ──── Tablet ──── wide ──── Wide ────►
//! ```
//!
//! Classification is total, deterministic and monotonic in width.
//! [`ClassSet`] is a tiny bitset used to declare which classes a feature
//! applies to.

use core::fmt;

use crate::error::ConfigError;

/// Default lower bound (inclusive) of [`BreakpointClass::Tablet`], in CSS px.
pub const TABLET_MIN_WIDTH: u32 = 768;

/// Default lower bound (inclusive) of [`BreakpointClass::Wide`], in CSS px.
///
/// Also the width at which the page header stops using the slide-in menu.
pub const WIDE_MIN_WIDTH: u32 = 992;

/// A discrete viewport-size category.
///
/// Variants are ordered from smallest to largest viewport.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BreakpointClass {
    /// Phones and narrow windows.
    Compact,
    /// Tablets and mid-sized windows.
    Tablet,
    /// Desktop layouts.
    Wide,
}

impl BreakpointClass {
    /// Every class, smallest first.
    pub const ALL: [Self; 3] = [Self::Compact, Self::Tablet, Self::Wide];

    /// A short lowercase label, for diagnostics.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Compact => "compact",
            Self::Tablet => "tablet",
            Self::Wide => "wide",
        }
    }

    const fn bit(self) -> u8 {
        match self {
            Self::Compact => 1 << 0,
            Self::Tablet => 1 << 1,
            Self::Wide => 1 << 2,
        }
    }
}

impl fmt::Display for BreakpointClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Width thresholds that drive classification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Breakpoints {
    tablet: u32,
    wide: u32,
}

impl Breakpoints {
    /// The default thresholds: [`TABLET_MIN_WIDTH`] and [`WIDE_MIN_WIDTH`].
    pub const DEFAULT: Self = Self {
        tablet: TABLET_MIN_WIDTH,
        wide: WIDE_MIN_WIDTH,
    };

    /// Creates thresholds where `tablet` and `wide` are inclusive lower
    /// bounds.
    ///
    /// Equal thresholds are allowed and simply make `Tablet` unreachable.
    pub const fn new(tablet: u32, wide: u32) -> Result<Self, ConfigError> {
        if tablet > wide {
            return Err(ConfigError::InvertedBreakpoints { tablet, wide });
        }
        Ok(Self { tablet, wide })
    }

    /// Lower bound of [`BreakpointClass::Tablet`].
    #[must_use]
    pub const fn tablet(&self) -> u32 {
        self.tablet
    }

    /// Lower bound of [`BreakpointClass::Wide`].
    #[must_use]
    pub const fn wide(&self) -> u32 {
        self.wide
    }

    /// Classifies a viewport width.
    #[must_use]
    pub const fn classify(&self, width: u32) -> BreakpointClass {
        if width >= self.wide {
            BreakpointClass::Wide
        } else if width >= self.tablet {
            BreakpointClass::Tablet
        } else {
            BreakpointClass::Compact
        }
    }
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self::DEFAULT
    }
}

/// A set of [`BreakpointClass`] values.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct ClassSet(u8);

impl ClassSet {
    /// No classes.
    pub const EMPTY: Self = Self(0);
    /// Every class.
    pub const ALL: Self = Self(0b111);
    /// Compact only.
    pub const COMPACT: Self = Self::only(BreakpointClass::Compact);
    /// Tablet only.
    pub const TABLET: Self = Self::only(BreakpointClass::Tablet);
    /// Wide only.
    pub const WIDE: Self = Self::only(BreakpointClass::Wide);
    /// Everything narrower than Wide.
    pub const BELOW_WIDE: Self = Self::COMPACT.union(Self::TABLET);
    /// Everything wider than Compact.
    pub const ABOVE_COMPACT: Self = Self::TABLET.union(Self::WIDE);

    /// A set holding one class.
    #[must_use]
    pub const fn only(class: BreakpointClass) -> Self {
        Self(class.bit())
    }

    /// The union of two sets.
    #[must_use]
    pub const fn union(self, other: Self) -> Self {
        Self(self.0 | other.0)
    }

    /// Whether `class` is in the set.
    #[must_use]
    pub const fn contains(self, class: BreakpointClass) -> bool {
        self.0 & class.bit() != 0
    }

    /// Whether the set is empty.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

impl fmt::Debug for ClassSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set()
            .entries(BreakpointClass::ALL.iter().filter(|c| self.contains(**c)))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_thresholds_classify_boundaries() {
        let bp = Breakpoints::DEFAULT;
        assert_eq!(bp.classify(0), BreakpointClass::Compact);
        assert_eq!(bp.classify(500), BreakpointClass::Compact);
        assert_eq!(bp.classify(767), BreakpointClass::Compact);
        assert_eq!(bp.classify(768), BreakpointClass::Tablet);
        assert_eq!(bp.classify(991), BreakpointClass::Tablet);
        assert_eq!(bp.classify(992), BreakpointClass::Wide);
        assert_eq!(bp.classify(u32::MAX), BreakpointClass::Wide);
    }

    #[test]
    fn classification_is_monotonic() {
        let bp = Breakpoints::new(600, 1200).unwrap();
        let mut prev = bp.classify(0);
        for width in (0..2000).step_by(7) {
            let class = bp.classify(width);
            assert!(class >= prev, "width {width} moved from {prev} to {class}");
            prev = class;
        }
    }

    #[test]
    fn inverted_thresholds_are_rejected() {
        assert_eq!(
            Breakpoints::new(1000, 800),
            Err(ConfigError::InvertedBreakpoints {
                tablet: 1000,
                wide: 800
            })
        );
    }

    #[test]
    fn equal_thresholds_skip_tablet() {
        let bp = Breakpoints::new(900, 900).unwrap();
        assert_eq!(bp.classify(899), BreakpointClass::Compact);
        assert_eq!(bp.classify(900), BreakpointClass::Wide);
    }

    #[test]
    fn class_set_membership() {
        assert!(ClassSet::BELOW_WIDE.contains(BreakpointClass::Compact));
        assert!(ClassSet::BELOW_WIDE.contains(BreakpointClass::Tablet));
        assert!(!ClassSet::BELOW_WIDE.contains(BreakpointClass::Wide));
        assert!(ClassSet::EMPTY.is_empty());
        assert_eq!(
            ClassSet::COMPACT.union(ClassSet::ABOVE_COMPACT),
            ClassSet::ALL
        );
    }
}
