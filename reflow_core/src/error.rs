// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Error types.
//!
//! A missing optional element is deliberately absent from this module: it is
//! a normal activation outcome, modelled as
//! [`Activation::Inactive`](crate::feature::Activation::Inactive).

use alloc::string::String;
use core::fmt;

/// The root environment (window, document, viewport) or a required
/// collaborator is unavailable.
///
/// The root variants ([`is_root`](Self::is_root)) are fatal for
/// [`LifecycleRegistry::start`](crate::registry::LifecycleRegistry::start).
/// A [`Collaborator`](Self::Collaborator) failure is always contained to the
/// failing feature, both at start and during reconciliation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnvironmentError {
    /// There is no global window.
    MissingWindow,
    /// The window has no document.
    MissingDocument,
    /// The viewport width could not be read.
    ViewportUnavailable,
    /// A required third-party collaborator failed or is not loaded.
    Collaborator(String),
}

impl EnvironmentError {
    /// Whether the page itself is unusable, rather than one feature's
    /// collaborator.
    pub fn is_root(&self) -> bool {
        !matches!(self, Self::Collaborator(_))
    }
}

impl fmt::Display for EnvironmentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingWindow => f.write_str("no global window"),
            Self::MissingDocument => f.write_str("window has no document"),
            Self::ViewportUnavailable => f.write_str("viewport width unavailable"),
            Self::Collaborator(what) => write!(f, "collaborator unavailable: {what}"),
        }
    }
}

impl core::error::Error for EnvironmentError {}

/// Misuse of the [`LifecycleRegistry`](crate::registry::LifecycleRegistry)
/// state machine.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RegistryError {
    /// A feature with this name is already registered.
    DuplicateName(String),
    /// The operation is only valid before `start()`.
    AlreadyStarted,
    /// The operation requires a started registry.
    NotStarted,
    /// The registry has been torn down.
    Disposed,
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::DuplicateName(name) => write!(f, "feature `{name}` is already registered"),
            Self::AlreadyStarted => f.write_str("registry has already been started"),
            Self::NotStarted => f.write_str("registry has not been started"),
            Self::Disposed => f.write_str("registry has been torn down"),
        }
    }
}

impl core::error::Error for RegistryError {}

/// Failure of [`LifecycleRegistry::start`](crate::registry::LifecycleRegistry::start)
/// or [`Coordinator::start`](crate::coordinator::Coordinator::start).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StartError {
    /// The registry was not in a startable phase.
    Registry(RegistryError),
    /// The environment is unusable; nothing remains activated.
    Environment(EnvironmentError),
}

impl fmt::Display for StartError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Registry(e) => write!(f, "cannot start: {e}"),
            Self::Environment(e) => write!(f, "cannot start: {e}"),
        }
    }
}

impl core::error::Error for StartError {
    fn source(&self) -> Option<&(dyn core::error::Error + 'static)> {
        match self {
            Self::Registry(e) => Some(e),
            Self::Environment(e) => Some(e),
        }
    }
}

impl From<RegistryError> for StartError {
    fn from(e: RegistryError) -> Self {
        Self::Registry(e)
    }
}

impl From<EnvironmentError> for StartError {
    fn from(e: EnvironmentError) -> Self {
        Self::Environment(e)
    }
}

/// Invalid configuration values.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// The tablet threshold lies above the wide threshold.
    InvertedBreakpoints {
        /// Requested tablet threshold.
        tablet: u32,
        /// Requested wide threshold.
        wide: u32,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvertedBreakpoints { tablet, wide } => write!(
                f,
                "tablet breakpoint ({tablet}px) must not exceed wide breakpoint ({wide}px)"
            ),
        }
    }
}

impl core::error::Error for ConfigError {}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString as _;
    use core::error::Error as _;

    #[test]
    fn start_error_exposes_source() {
        let err = StartError::from(EnvironmentError::MissingDocument);
        assert_eq!(err.to_string(), "cannot start: window has no document");
        assert!(err.source().is_some(), "environment cause should be chained");
    }

    #[test]
    fn only_collaborator_failures_are_contained() {
        assert!(EnvironmentError::MissingWindow.is_root());
        assert!(EnvironmentError::MissingDocument.is_root());
        assert!(EnvironmentError::ViewportUnavailable.is_root());
        assert!(!EnvironmentError::Collaborator("gsap".into()).is_root());
    }

    #[test]
    fn inverted_breakpoints_message_names_both_values() {
        let err = ConfigError::InvertedBreakpoints {
            tablet: 1000,
            wide: 900,
        };
        let msg = err.to_string();
        assert!(msg.contains("1000px") && msg.contains("900px"), "{msg}");
    }
}
