//! # Quietfeed Architecture
//!
//! Quietfeed hides feed posts about a fixed set of topics (AI, out of the box)
//! from a live, continuously mutating document tree. It is a **library that
//! happens to ship a toggle CLI**: the filter itself knows nothing about
//! terminals, browsers or processes.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Runtime (runtime.rs)                                       │
//! │  - FeedGuard: start + cooperative tick                      │
//! │  - Drains flag changes, insertion records, rescan timer     │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Triggers (watcher.rs, controller.rs)                       │
//! │  - MutationWatcher, RescanTimer                             │
//! │  - EnablementController: Enabled ⇄ Disabled                 │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Filtering (scanner.rs, actions.rs, extract.rs, matcher.rs) │
//! │  - Find posts, extract text, classify, hide / reveal        │
//! │  - FilterState: registry + enablement, passed by &mut       │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Collaborators (dom/, store/)                               │
//! │  - HostDom trait: MemDom (arena, tests and tooling)         │
//! │  - FlagStore trait: MemFlagStore, FsFlagStore               │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Invariants
//!
//! - A post carries the hidden marker iff quietfeed currently hides it.
//! - A post is hidden at most once per enablement cycle: the registry is the
//!   guard, so any number of overlapping scans is safe.
//! - No marker is ever set while disabled. The flag is read at the moment of
//!   each hide, never cached by a scan.
//! - The registry holds identity keys only and never keeps a node alive.
//!
//! ## No Failure Path in Filtering
//!
//! Scanning, extraction, classification and hide/reveal have no error
//! returns. Missing attributes, empty text and stale handles all degrade to
//! no-ops. Only the flag store and configuration can fail, and the runtime
//! logs those and carries on with the filter enabled.
//!
//! ## Module Overview
//!
//! - [`api`]: Toggle facade over the flag store, plus standalone `check`
//! - [`runtime`]: The `FeedGuard` event loop
//! - [`controller`]: Enablement state machine
//! - [`watcher`]: Insertion watcher and rescan timer
//! - [`scanner`]: Bulk and single-node classification
//! - [`actions`]: Hide, reveal and container canonicalization
//! - [`extract`]: Post text extraction
//! - [`matcher`]: Topic patterns
//! - [`registry`]: Hidden-post identity set
//! - [`state`]: Shared filter state
//! - [`dom`]: Host tree abstraction and in-memory tree
//! - [`store`]: Flag persistence
//! - [`config`]: Configuration
//! - [`model`]: Core data types
//! - [`error`]: Error types

pub mod actions;
pub mod api;
pub mod config;
pub mod controller;
pub mod dom;
pub mod error;
pub mod extract;
pub mod matcher;
pub mod model;
pub mod registry;
pub mod runtime;
pub mod scanner;
pub mod state;
pub mod store;
pub mod watcher;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;

pub use runtime::{FeedGuard, TickReport};
