// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pretty-printing and JSON journaling of reflow lifecycle events.
//!
//! This crate provides [`LifecycleSink`](reflow_core::trace::LifecycleSink)
//! implementations for development and post-mortem analysis:
//!
//! - [`pretty::PrettyPrintSink`] — human-readable one-line-per-event output.
//! - [`journal::Journal`] — structured records collected as JSON values and
//!   exported as a JSON array.
//! - [`fanout::Fanout`] — forwards every event to several sinks.

pub mod fanout;
pub mod journal;
pub mod pretty;
