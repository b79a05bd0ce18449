// Copyright 2026 the Reflow Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Breakpoint-aware feature lifecycle coordination.
//!
//! `reflow_core` keeps a page's enhancement features (menus, hover effects,
//! observers, scroll-linked animations) in step with the viewport. It is
//! `no_std` compatible (with `alloc`) and never touches the DOM: platform
//! work is behind the [`Host`](host::Host) trait and inside each
//! [`Feature`](feature::Feature).
//!
//! # Architecture
//!
//! ```text
//!   Backend (resize events, timer, clock)
//!       │
//!       ▼
//!   Coordinator::on_resize ──► Throttle ──► LifecycleRegistry::reconcile
//!                                                  │
//!                         ┌────────────────────────┤
//!                         ▼                        ▼
//!               Disposable::dispose()     Feature::activate() ──► Disposable
//! ```
//!
//! **[`disposable`]** — RAII teardown handles; disposing twice is a no-op.
//!
//! **[`feature`]** — The [`Feature`](feature::Feature) contract and the
//! closure-backed [`FnFeature`](feature::FnFeature) adapter.
//!
//! **[`breakpoint`]** — Pure width → [`BreakpointClass`](breakpoint::BreakpointClass)
//! classification.
//!
//! **[`scheduler`]** — Clock-driven throttle/debounce with trailing-edge
//! delivery.
//!
//! **[`registry`]** — The `Uninitialized → Active → Disposed` lifecycle
//! state machine and reconciliation.
//!
//! **[`coordinator`]** — Wires the registry and scheduler to a
//! [`Host`](host::Host).
//!
//! **[`trace`]** — [`LifecycleSink`](trace::LifecycleSink) trait and event
//! types, with a zero-overhead [`Tracer`](trace::Tracer) wrapper.
//!
//! # Crate features
//!
//! - `trace` (disabled by default): Enables `Tracer` dispatch to installed
//!   sinks.

#![no_std]
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

extern crate alloc;

pub mod breakpoint;
pub mod coordinator;
pub mod disposable;
pub mod error;
pub mod feature;
pub mod host;
pub mod registry;
pub mod scheduler;
pub mod time;
pub mod trace;
